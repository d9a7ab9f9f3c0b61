//! Pipeline steps and their execution
//!
//! A [`PipelineStep`] is a value object describing one external process
//! invocation. Execution goes through the [`StepRunner`] trait so the
//! pipeline's ordering and fail-fast behavior stay testable without spawning
//! processes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use nexpack_core::{Error, Result};

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clean,
    BuildRenderer,
    ExportRenderer,
    BuildMain,
    Package,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::BuildRenderer => "renderer build",
            Self::ExportRenderer => "renderer export",
            Self::BuildMain => "main process build",
            Self::Package => "packaging",
        }
    }

    /// Progress line printed when the stage starts
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Clean => "Clearing previous builds",
            Self::BuildRenderer => "Building renderer process",
            Self::ExportRenderer => "Exporting renderer process",
            Self::BuildMain => "Building main process",
            Self::Package => "Packaging - this may take a moment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One external process invocation owned by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
    pub stage: Stage,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
}

impl PipelineStep {
    pub fn new(stage: Stage, program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            stage,
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            env: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_path_arg(mut self, path: impl AsRef<Path>) -> Self {
        self.args.push(path.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Executes pipeline steps
pub trait StepRunner {
    /// Run a step to completion, returning `Err` on spawn failure or a
    /// non-zero exit status
    fn run(&self, step: &PipelineStep) -> Result<()>;
}

/// Production runner: spawns the process with inherited stdio and blocks
/// until it exits
pub struct ProcessRunner;

impl StepRunner for ProcessRunner {
    fn run(&self, step: &PipelineStep) -> Result<()> {
        debug!(
            stage = step.stage.as_str(),
            program = %step.program,
            args = ?step.args,
            "running pipeline step"
        );

        let status = Command::new(&step.program)
            .args(&step.args)
            .current_dir(&step.cwd)
            .envs(step.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                Error::step_failed(
                    step.stage.as_str(),
                    format!("could not run '{}': {}", step.program, e),
                )
            })?;

        if status.success() {
            Ok(())
        } else {
            let message = match status.code() {
                Some(code) => format!("'{}' exited with status {}", step.program, code),
                None => format!("'{}' was terminated by a signal", step.program),
            };
            Err(Error::step_failed(step.stage.as_str(), message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_builder() {
        let step = PipelineStep::new(Stage::BuildRenderer, "next", "/project")
            .with_arg("build")
            .with_path_arg("/project/renderer")
            .with_env("CI", "true");

        assert_eq!(step.program, "next");
        assert_eq!(step.args, vec!["build", "/project/renderer"]);
        assert_eq!(step.cwd, PathBuf::from("/project"));
        assert_eq!(step.env, vec![("CI".to_string(), "true".to_string())]);
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(Stage::Clean.as_str(), "clean");
        assert_eq!(Stage::Package.to_string(), "packaging");
    }

    #[test]
    fn test_process_runner_missing_program() {
        let step = PipelineStep::new(
            Stage::BuildMain,
            "definitely-not-a-real-program-4af1",
            std::env::temp_dir(),
        );

        let result = ProcessRunner.run(&step);
        assert!(matches!(result, Err(Error::StepFailed { .. })));
    }

    #[test]
    fn test_process_runner_nonzero_exit() {
        // `false` exits 1 on every unix
        #[cfg(unix)]
        {
            let step = PipelineStep::new(Stage::Package, "false", std::env::temp_dir());
            let result = ProcessRunner.run(&step);
            assert!(
                matches!(result, Err(Error::StepFailed { stage, .. }) if stage == "packaging")
            );
        }
    }
}
