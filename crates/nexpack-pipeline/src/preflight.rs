//! Environment preflight checks
//!
//! `node` must be on PATH: the config provider needs it before any build
//! step runs. `next` and `electron-builder` usually live in the project's
//! `node_modules/.bin` and only reach PATH when invoked through a package
//! manager script, so their absence is a warning, not an error.

use tracing::warn;

use nexpack_core::{Error, Result};

const PROJECT_TOOLS: [&str; 2] = ["next", "electron-builder"];

/// Verify the external tools the pipeline is about to invoke
pub fn check_tools() -> Result<()> {
    which::which("node").map_err(|_| Error::ToolNotFound {
        tool: "node".to_string(),
        install_hint: "Install Node.js from https://nodejs.org".to_string(),
    })?;

    for tool in PROJECT_TOOLS {
        if which::which(tool).is_err() {
            warn!(
                tool,
                "not found on PATH; run through your package manager so node_modules/.bin is available"
            );
        }
    }

    Ok(())
}
