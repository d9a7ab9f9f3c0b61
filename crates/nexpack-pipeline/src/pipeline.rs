//! Build pipeline orchestration
//!
//! Drives the ordered step sequence for a resolved strategy: clean, renderer
//! build, conditional renderer export, main-process build, packaging. The
//! first failing step aborts the run; nothing after it is attempted. The
//! clean stage is the sole best-effort exception.

use std::path::PathBuf;

use console::style;
use tracing::{debug, info};

use nexpack_core::{Error, ProjectContext, Result};

use crate::resolver::BuildStrategy;
use crate::step::{PipelineStep, Stage, StepRunner};

/// Environment variable that relaxes electron-builder's dependency
/// resolution; the renderer's dependencies are not packaged
pub const ALLOW_UNRESOLVED_ENV: &str = "ELECTRON_BUILDER_ALLOW_UNRESOLVED_DEPENDENCIES";

/// Target platforms, architectures and packaging overrides forwarded from
/// the CLI
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Build for Windows, macOS and Linux
    pub all: bool,
    pub win: bool,
    pub mac: bool,
    pub linux: bool,
    pub x64: bool,
    pub ia32: bool,
    pub armv7l: bool,
    pub arm64: bool,
    /// electron-builder config file override
    pub builder_config: Option<PathBuf>,
}

impl BuildOptions {
    /// Assemble the electron-builder argument list.
    ///
    /// Platform and architecture flags are additive; `all` collapses the
    /// three platform flags into `-wml`.
    pub fn packager_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(config) = &self.builder_config {
            args.push("--config".to_string());
            args.push(config.to_string_lossy().into_owned());
        }

        if self.all {
            args.push("-wml".to_string());
        } else {
            if self.win {
                args.push("--win".to_string());
            }
            if self.mac {
                args.push("--mac".to_string());
            }
            if self.linux {
                args.push("--linux".to_string());
            }
        }

        for (enabled, flag) in [
            (self.x64, "--x64"),
            (self.ia32, "--ia32"),
            (self.armv7l, "--armv7l"),
            (self.arm64, "--arm64"),
        ] {
            if enabled {
                args.push(flag.to_string());
            }
        }

        args
    }
}

/// Sequential, fail-fast build pipeline
pub struct BuildPipeline<'a> {
    ctx: &'a ProjectContext,
    runner: &'a dyn StepRunner,
}

impl<'a> BuildPipeline<'a> {
    pub fn new(ctx: &'a ProjectContext, runner: &'a dyn StepRunner) -> Self {
        Self { ctx, runner }
    }

    /// Run the full pipeline for a resolved strategy
    pub fn run(&self, strategy: BuildStrategy, options: &BuildOptions) -> Result<()> {
        announce(Stage::Clean);
        self.clean();

        announce(Stage::BuildRenderer);
        self.runner.run(&self.renderer_build_step())?;

        if strategy.requires_export() {
            announce(Stage::ExportRenderer);
            self.verify_export_output()?;
        }

        announce(Stage::BuildMain);
        self.runner.run(&self.main_build_step())?;

        announce(Stage::Package);
        self.runner.run(&self.package_step(options))?;

        info!("pipeline finished");
        Ok(())
    }

    /// Remove previous output directories. Best-effort: a failure here never
    /// fails the pipeline.
    fn clean(&self) {
        for dir in [self.ctx.app_dir(), self.ctx.dist_dir()] {
            if let Err(err) = std::fs::remove_dir_all(&dir) {
                debug!(dir = %dir.display(), %err, "skipping cleanup");
            }
        }
    }

    fn renderer_build_step(&self) -> PipelineStep {
        PipelineStep::new(Stage::BuildRenderer, "next", self.ctx.root())
            .with_arg("build")
            .with_path_arg(self.ctx.renderer_dir())
    }

    /// The renderer build must have written the static files into `app/`
    /// via `distDir`; nothing else produces them
    fn verify_export_output(&self) -> Result<()> {
        let app_dir = self.ctx.app_dir();
        if app_dir.is_dir() {
            Ok(())
        } else {
            Err(Error::step_failed(
                Stage::ExportRenderer.as_str(),
                format!(
                    "expected static files in {}; the renderer build did not produce them",
                    app_dir.display()
                ),
            ))
        }
    }

    fn main_build_step(&self) -> PipelineStep {
        PipelineStep::new(Stage::BuildMain, "webpack", self.ctx.root())
            .with_arg("--mode")
            .with_arg("production")
    }

    fn package_step(&self, options: &BuildOptions) -> PipelineStep {
        PipelineStep::new(Stage::Package, "electron-builder", self.ctx.root())
            .with_args(options.packager_args())
            .with_env(ALLOW_UNRESOLVED_ENV, "true")
    }
}

fn announce(stage: Stage) {
    info!(stage = stage.as_str(), "starting stage");
    println!("{} {}", style("›").cyan().bold(), style(stage.banner()).bold());
}
