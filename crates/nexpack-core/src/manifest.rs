//! Project manifest (`package.json`) model
//!
//! The manifest is loaded once per invocation and read-only after that. Only
//! the pieces the orchestrator consumes are modeled: the two dependency sets
//! and the optional `nextron` settings object.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// npm package name of the wrapped web framework
pub const FRAMEWORK_PACKAGE: &str = "next";

/// Which dependency set declared the framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencySet {
    /// `dependencies`
    Production,
    /// `devDependencies`
    Development,
}

/// Loaded `package.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageManifest {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    /// Tool settings carried inside the project manifest
    pub nextron: Option<ProjectSettings>,
}

/// The `nextron` settings object of `package.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Renderer source directory, relative to the project root
    pub renderer_src_dir: Option<String>,
}

impl PackageManifest {
    /// Load and parse a `package.json` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::manifest(path, e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| Error::manifest(path, e.to_string()))
    }

    /// The declared framework version range and the set it came from.
    ///
    /// `dependencies` wins over `devDependencies`; absence from both is a
    /// fatal configuration error, never an implicit version.
    pub fn framework_version(&self) -> Result<(&str, DependencySet)> {
        if let Some(range) = self.dependencies.get(FRAMEWORK_PACKAGE) {
            return Ok((range.as_str(), DependencySet::Production));
        }
        if let Some(range) = self.dev_dependencies.get(FRAMEWORK_PACKAGE) {
            return Ok((range.as_str(), DependencySet::Development));
        }
        Err(Error::MissingDependency {
            package: FRAMEWORK_PACKAGE.to_string(),
        })
    }

    /// Configured renderer source directory, if any
    pub fn renderer_src_dir(&self) -> Option<&str> {
        self.nextron
            .as_ref()
            .and_then(|settings| settings.renderer_src_dir.as_deref())
    }
}
