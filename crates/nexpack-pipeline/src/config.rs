//! Next config model and loading
//!
//! A next config is an executable module, not declarative data, so obtaining
//! its values means running project-supplied code. That trust boundary is
//! kept behind the [`ConfigProvider`] trait: the resolver only sees the
//! resulting [`NextConfig`] value, and tests substitute a stub provider.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use nexpack_core::{Error, Result};

/// The `output` modes a next config can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Server,
    Static,
    Serverless,
    Export,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Static => "static",
            Self::Serverless => "serverless",
            Self::Export => "export",
        }
    }
}

/// The subset of a loaded next config the resolver validates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NextConfig {
    pub output: Option<OutputMode>,
    pub dist_dir: Option<String>,
}

/// Capability for loading a next config from a located path
pub trait ConfigProvider {
    fn load(&self, path: &Path) -> Result<NextConfig>;
}

/// Production provider: evaluates the config module with `node` and reads
/// the default export back as JSON
pub struct NodeConfigProvider;

impl NodeConfigProvider {
    fn eval_script(path: &Path) -> String {
        format!(
            "import({:?}).then(m => process.stdout.write(JSON.stringify(m.default ?? m)))",
            file_url(path)
        )
    }
}

impl ConfigProvider for NodeConfigProvider {
    fn load(&self, path: &Path) -> Result<NextConfig> {
        let script = Self::eval_script(path);
        debug!(path = %path.display(), "evaluating next config");

        let output = Command::new("node")
            .arg("--input-type=module")
            .arg("-e")
            .arg(&script)
            .output()
            .map_err(|e| Error::config_load(path, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::config_load(path, stderr));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| Error::config_load(path, e.to_string()))
    }
}

/// Turn a filesystem path into a `file:///` URL usable by the module loader
fn file_url(path: &Path) -> String {
    let absolute = path.to_string_lossy().replace('\\', "/");
    format!("file:///{}", absolute.trim_start_matches('/'))
}
