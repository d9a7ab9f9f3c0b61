//! Next config file location
//!
//! Projects can carry several flavors of the next config side by side: a
//! `nextron`-specific one, a generic `electron` one, and the plain config the
//! framework itself reads. The locator probes a fixed priority list and
//! returns the first file that exists. It never errors; when nothing is
//! found it hands back the default path and lets the loader surface the
//! failure with a clear message.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Candidate filenames in strict priority order
const CANDIDATES: [&str; 9] = [
    "next.config.nextron.js",
    "next.config.nextron.mjs",
    "next.config.nextron.cjs",
    "next.config.electron.js",
    "next.config.electron.mjs",
    "next.config.electron.cjs",
    "next.config.js",
    "next.config.mjs",
    "next.config.cjs",
];

/// Fallback returned without an existence check when no candidate is present
const FALLBACK: &str = "next.config.js";

/// Locate the next config file inside the renderer source directory.
///
/// Each call re-probes the filesystem; nothing is cached between pipeline
/// runs.
pub fn locate_next_config(renderer_dir: &Path) -> PathBuf {
    for name in CANDIDATES {
        let candidate = renderer_dir.join(name);
        if candidate.exists() {
            debug!(config = name, "located next config");
            return candidate;
        }
    }

    debug!(config = FALLBACK, "no next config found, using fallback path");
    renderer_dir.join(FALLBACK)
}
