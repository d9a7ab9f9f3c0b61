//! nexpack pipeline - version-aware build strategy and orchestration
//!
//! This crate decides how a Next.js + Electron project has to be built and
//! then drives the build. The moving parts, leaf first:
//!
//! - [`locator`] probes the renderer directory for the next config file,
//!   honoring the `nextron`/`electron` flavor priority tiers.
//! - [`config`] models the loaded next config and the [`ConfigProvider`]
//!   seam through which it is obtained. The production provider evaluates the
//!   config module with `node`, because next configs are code, not data.
//! - [`resolver`] turns the declared framework version plus the loaded
//!   config into a [`BuildStrategy`], encoding the compatibility matrix the
//!   framework introduced when it moved static export from a dedicated
//!   subcommand to a config-driven build output.
//! - [`pipeline`] runs the ordered external steps fail-fast:
//!   clean, renderer build, conditional renderer export, main-process build,
//!   packaging.
//!
//! Everything is synchronous and strictly sequential; each step blocks until
//! its external process exits.

pub mod config;
pub mod locator;
pub mod pipeline;
pub mod preflight;
pub mod resolver;
pub mod step;

pub use config::{ConfigProvider, NextConfig, NodeConfigProvider, OutputMode};
pub use locator::locate_next_config;
pub use pipeline::{BuildOptions, BuildPipeline};
pub use preflight::check_tools;
pub use resolver::{resolve, BuildStrategy, ExportMode};
pub use step::{PipelineStep, ProcessRunner, Stage, StepRunner};
