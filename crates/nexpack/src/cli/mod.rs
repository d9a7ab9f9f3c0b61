//! CLI definition and command handling

use std::path::PathBuf;

use clap::Parser;
use console::style;
use tracing::info;

use nexpack_core::{PackageManifest, ProjectContext};
use nexpack_pipeline::{
    check_tools, resolve, BuildOptions, BuildPipeline, NodeConfigProvider, ProcessRunner,
};

/// Build and package a Next.js + Electron application for production
#[derive(Debug, Parser)]
#[command(name = "nexpack")]
#[command(author, about, long_about = None)]
pub struct Cli {
    /// Print the nexpack version
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Build for Windows, macOS and Linux
    #[arg(long)]
    pub all: bool,

    /// Build for Windows
    #[arg(short = 'w', long)]
    pub win: bool,

    /// Build for macOS
    #[arg(short = 'm', long)]
    pub mac: bool,

    /// Build for Linux
    #[arg(short = 'l', long)]
    pub linux: bool,

    /// Build for x64
    #[arg(long)]
    pub x64: bool,

    /// Build for ia32
    #[arg(long)]
    pub ia32: bool,

    /// Build for armv7l
    #[arg(long)]
    pub armv7l: bool,

    /// Build for arm64
    #[arg(long)]
    pub arm64: bool,

    /// electron-builder configuration file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

impl Cli {
    /// Execute the build
    pub fn execute(self) -> anyhow::Result<()> {
        if self.version {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }

        let root = match &self.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        check_tools()?;

        let manifest = PackageManifest::load(&root.join("package.json"))?;
        let ctx = ProjectContext::from_manifest(root, &manifest);

        let strategy = resolve(&manifest, &ctx, &NodeConfigProvider)?;
        let options = self.build_options();

        info!(
            major = strategy.major,
            requires_export = strategy.requires_export(),
            packager_args = ?options.packager_args(),
            "starting build"
        );

        BuildPipeline::new(&ctx, &ProcessRunner).run(strategy, &options)?;

        info!(dist = %ctx.dist_dir().display(), "build finished");

        println!(
            "{} packaged artifacts are in the {} directory",
            style("✓").green().bold(),
            style("dist").cyan()
        );
        Ok(())
    }

    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            all: self.all,
            win: self.win,
            mac: self.mac,
            linux: self.linux,
            x64: self.x64,
            ia32: self.ia32,
            armv7l: self.armv7l,
            arm64: self.arm64,
            builder_config: self.config.clone(),
        }
    }
}
