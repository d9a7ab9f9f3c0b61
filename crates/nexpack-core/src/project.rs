//! Project context
//!
//! All project-relative paths are resolved once per invocation from an
//! explicit root directory, never from ambient process state. Components take
//! this context by reference instead of consulting the current directory.

use std::path::{Path, PathBuf};

use crate::manifest::PackageManifest;

/// Renderer source directory used when the manifest does not configure one
pub const DEFAULT_RENDERER_DIR: &str = "renderer";

/// Output directory for exported renderer static files
pub const APP_DIR: &str = "app";

/// Output directory for packaged application artifacts
pub const DIST_DIR: &str = "dist";

/// Resolved paths for a single pipeline invocation
#[derive(Debug, Clone)]
pub struct ProjectContext {
    root: PathBuf,
    renderer_src_dir: String,
}

impl ProjectContext {
    /// Create a context with an explicit renderer source directory
    pub fn new(root: impl Into<PathBuf>, renderer_src_dir: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            renderer_src_dir: renderer_src_dir.into(),
        }
    }

    /// Create a context using the renderer directory configured in the
    /// manifest, falling back to [`DEFAULT_RENDERER_DIR`]
    pub fn from_manifest(root: impl Into<PathBuf>, manifest: &PackageManifest) -> Self {
        let renderer = manifest
            .renderer_src_dir()
            .unwrap_or(DEFAULT_RENDERER_DIR)
            .to_string();
        Self::new(root, renderer)
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Renderer source directory (`<root>/<rendererSrcDir>`)
    pub fn renderer_dir(&self) -> PathBuf {
        self.root.join(&self.renderer_src_dir)
    }

    /// Directory the renderer export writes into (`<root>/app`)
    pub fn app_dir(&self) -> PathBuf {
        self.root.join(APP_DIR)
    }

    /// Directory the packaging tool writes into (`<root>/dist`)
    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(DIST_DIR)
    }

    /// Path of the project manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("package.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ProjectSettings;

    #[test]
    fn test_derived_paths() {
        let ctx = ProjectContext::new("/project", "renderer");
        assert_eq!(ctx.renderer_dir(), PathBuf::from("/project/renderer"));
        assert_eq!(ctx.app_dir(), PathBuf::from("/project/app"));
        assert_eq!(ctx.dist_dir(), PathBuf::from("/project/dist"));
        assert_eq!(ctx.manifest_path(), PathBuf::from("/project/package.json"));
    }

    #[test]
    fn test_from_manifest_default() {
        let manifest = PackageManifest::default();
        let ctx = ProjectContext::from_manifest("/project", &manifest);
        assert_eq!(ctx.renderer_dir(), PathBuf::from("/project/renderer"));
    }

    #[test]
    fn test_from_manifest_configured() {
        let manifest = PackageManifest {
            nextron: Some(ProjectSettings {
                renderer_src_dir: Some("ui".to_string()),
            }),
            ..Default::default()
        };
        let ctx = ProjectContext::from_manifest("/project", &manifest);
        assert_eq!(ctx.renderer_dir(), PathBuf::from("/project/ui"));
    }
}
