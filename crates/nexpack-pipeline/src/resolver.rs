//! Version-aware build strategy resolution
//!
//! The wrapped framework changed its static-export mechanism across major
//! versions: before 13 a dedicated `export` subcommand exists, at 13 static
//! export became config-driven and optional, after 13 the subcommand is gone
//! and export mode must be declared in the config. This module encodes that
//! compatibility matrix once; the pipeline only consumes the resulting
//! [`BuildStrategy`] and carries no version knowledge of its own.

use console::style;
use tracing::{debug, warn};

use nexpack_core::{
    major_version, DependencySet, Error, PackageManifest, ProjectContext, Result,
};

use crate::config::{ConfigProvider, NextConfig, OutputMode};
use crate::locator::locate_next_config;

/// Major version where static export became config-driven
pub const CONFIG_DRIVEN_EXPORT_MAJOR: u64 = 13;

/// The one distDir value the packaging steps can consume
pub const REQUIRED_DIST_DIR: &str = "../app";

/// How the renderer's static files come into existence
///
/// On every version that exports at all, the build step itself writes the
/// static files via `distDir`; 13.x releases reject the old `export`
/// subcommand once `output: "export"` is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// No static export; old versions do not need the export-based flow
    NotRequired,
    /// The build step writes the static files via `distDir`
    BuildOutput,
}

/// Resolved build strategy, produced once per invocation and never mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStrategy {
    pub major: u64,
    pub export: ExportMode,
}

impl BuildStrategy {
    pub fn requires_export(&self) -> bool {
        !matches!(self.export, ExportMode::NotRequired)
    }
}

/// Resolve the build strategy from the declared framework version and, where
/// the version demands it, the loaded next config.
///
/// Versions below 13 never touch the config; the loader is only consulted on
/// the branches that validate config values.
pub fn resolve(
    manifest: &PackageManifest,
    ctx: &ProjectContext,
    provider: &dyn ConfigProvider,
) -> Result<BuildStrategy> {
    let (range, set) = manifest.framework_version()?;

    if set == DependencySet::Production {
        warn!(
            "to reduce the packaged app size, move `next` from dependencies to devDependencies"
        );
    }

    let major = major_version(range)?;
    debug!(range, major, "resolved framework version");

    match major {
        m if m < CONFIG_DRIVEN_EXPORT_MAJOR => Ok(BuildStrategy {
            major,
            export: ExportMode::NotRequired,
        }),
        m if m == CONFIG_DRIVEN_EXPORT_MAJOR => {
            let config = load_config(ctx, provider)?;
            match config.output {
                Some(OutputMode::Export) => {
                    require_dist_dir(&config)?;
                    Ok(BuildStrategy {
                        major,
                        export: ExportMode::BuildOutput,
                    })
                }
                // Export is optional at this version
                _ => Ok(BuildStrategy {
                    major,
                    export: ExportMode::NotRequired,
                }),
            }
        }
        m if m > CONFIG_DRIVEN_EXPORT_MAJOR => {
            let config = load_config(ctx, provider)?;
            if config.output != Some(OutputMode::Export) {
                return Err(Error::MissingExportOutput {
                    found: output_label(&config),
                });
            }
            require_dist_dir(&config)?;
            Ok(BuildStrategy {
                major,
                export: ExportMode::BuildOutput,
            })
        }
        _ => Err(Error::UnexpectedResolverState { major }),
    }
}

fn load_config(ctx: &ProjectContext, provider: &dyn ConfigProvider) -> Result<NextConfig> {
    let path = locate_next_config(&ctx.renderer_dir());

    if let Some(name) = path.file_name() {
        println!(
            "{} using {} as next config",
            style("✓").green().bold(),
            style(name.to_string_lossy()).cyan()
        );
    }

    provider.load(&path)
}

fn require_dist_dir(config: &NextConfig) -> Result<()> {
    if config.dist_dir.as_deref() == Some(REQUIRED_DIST_DIR) {
        Ok(())
    } else {
        Err(Error::InvalidDistDir {
            found: config
                .dist_dir
                .clone()
                .unwrap_or_else(|| "unset".to_string()),
        })
    }
}

fn output_label(config: &NextConfig) -> String {
    config
        .output
        .map(|mode| mode.as_str().to_string())
        .unwrap_or_else(|| "unset".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Stub provider that counts loads and returns a fixed config
    struct StubProvider {
        config: NextConfig,
        loads: Cell<usize>,
    }

    impl StubProvider {
        fn new(output: Option<OutputMode>, dist_dir: Option<&str>) -> Self {
            Self {
                config: NextConfig {
                    output,
                    dist_dir: dist_dir.map(str::to_string),
                },
                loads: Cell::new(0),
            }
        }
    }

    impl ConfigProvider for StubProvider {
        fn load(&self, _path: &std::path::Path) -> Result<NextConfig> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.config.clone())
        }
    }

    fn manifest(range: &str) -> PackageManifest {
        let mut manifest = PackageManifest::default();
        manifest
            .dev_dependencies
            .insert("next".to_string(), range.to_string());
        manifest
    }

    fn ctx() -> ProjectContext {
        ProjectContext::new("/project", "renderer")
    }

    #[test]
    fn test_old_version_skips_config_loading() {
        let provider = StubProvider::new(Some(OutputMode::Export), Some("../app"));
        let strategy = resolve(&manifest("^12.3.4"), &ctx(), &provider).unwrap();

        assert_eq!(strategy.major, 12);
        assert_eq!(strategy.export, ExportMode::NotRequired);
        assert!(!strategy.requires_export());
        assert_eq!(provider.loads.get(), 0);
    }

    #[test]
    fn test_v13_export_output_with_valid_dist_dir() {
        let provider = StubProvider::new(Some(OutputMode::Export), Some("../app"));
        let strategy = resolve(&manifest("^13.2.0"), &ctx(), &provider).unwrap();

        assert_eq!(strategy.export, ExportMode::BuildOutput);
        assert!(strategy.requires_export());
        assert_eq!(provider.loads.get(), 1);
    }

    #[test]
    fn test_v13_export_output_with_wrong_dist_dir() {
        let provider = StubProvider::new(Some(OutputMode::Export), Some("../build"));
        let result = resolve(&manifest("^13.2.0"), &ctx(), &provider);

        assert!(matches!(result, Err(Error::InvalidDistDir { found }) if found == "../build"));
    }

    #[test]
    fn test_v13_without_export_output() {
        let provider = StubProvider::new(Some(OutputMode::Server), None);
        let strategy = resolve(&manifest("13.4.1"), &ctx(), &provider).unwrap();

        assert_eq!(strategy.export, ExportMode::NotRequired);
        assert_eq!(provider.loads.get(), 1);
    }

    #[test]
    fn test_v14_requires_export_output() {
        let provider = StubProvider::new(Some(OutputMode::Static), Some("../app"));
        let result = resolve(&manifest("^14.0.0"), &ctx(), &provider);

        assert!(matches!(
            result,
            Err(Error::MissingExportOutput { found }) if found == "static"
        ));
    }

    #[test]
    fn test_v14_unset_output_reports_unset() {
        let provider = StubProvider::new(None, Some("../app"));
        let result = resolve(&manifest("^14.0.0"), &ctx(), &provider);

        assert!(matches!(
            result,
            Err(Error::MissingExportOutput { found }) if found == "unset"
        ));
    }

    #[test]
    fn test_v14_export_output_with_valid_dist_dir() {
        let provider = StubProvider::new(Some(OutputMode::Export), Some("../app"));
        let strategy = resolve(&manifest("^14.1.0"), &ctx(), &provider).unwrap();

        assert_eq!(strategy.major, 14);
        assert_eq!(strategy.export, ExportMode::BuildOutput);
        assert!(strategy.requires_export());
    }

    #[test]
    fn test_v14_export_output_without_dist_dir() {
        let provider = StubProvider::new(Some(OutputMode::Export), None);
        let result = resolve(&manifest("^14.0.0"), &ctx(), &provider);

        assert!(matches!(result, Err(Error::InvalidDistDir { found }) if found == "unset"));
    }

    #[test]
    fn test_missing_dependency_fails_before_config_probe() {
        let provider = StubProvider::new(Some(OutputMode::Export), Some("../app"));
        let result = resolve(&PackageManifest::default(), &ctx(), &provider);

        assert!(matches!(result, Err(Error::MissingDependency { .. })));
        assert_eq!(provider.loads.get(), 0);
    }

    #[test]
    fn test_unparseable_range_fails_before_config_probe() {
        let provider = StubProvider::new(Some(OutputMode::Export), Some("../app"));
        let result = resolve(&manifest("latest"), &ctx(), &provider);

        assert!(matches!(result, Err(Error::VersionParse { .. })));
        assert_eq!(provider.loads.get(), 0);
    }
}
