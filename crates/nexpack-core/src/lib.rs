//! Core types for nexpack - build and package Next.js + Electron applications
//!
//! This crate holds the pieces shared by the CLI and the build pipeline:
//! the project manifest model (`package.json`), the project context that
//! resolves all project-relative paths once per invocation, version-range
//! parsing, and the common error type.

pub mod error;
pub mod manifest;
pub mod project;
pub mod version;

pub use error::{Error, Result};
pub use manifest::{DependencySet, PackageManifest, ProjectSettings, FRAMEWORK_PACKAGE};
pub use project::ProjectContext;
pub use version::major_version;
