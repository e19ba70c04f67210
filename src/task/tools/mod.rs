// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool abstractions for orchestrator steps.
//!
//! ```text
//! Orchestrator --> ToolContext --> Tool (git, cmake, build step)
//!                      |
//!                      v
//!               dyn CommandRunner
//!       ProcessRunner | DryRunRunner | (tests: RecordingRunner)
//! ```
//!
//! Tools only describe commands as [`ProcessBuilder`]s. Whether a command is
//! executed, logged or recorded is decided by the runner in the context.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tracing::info;

use crate::core::process::builder::ProcessBuilder;
use crate::error::FetchResult;

pub mod cmake;
pub mod git;

/// Executes one external command to completion.
///
/// Implementations must not change the caller's working directory; the
/// process carries its own.
pub trait CommandRunner: Send + Sync {
    /// Returns the name of this runner (e.g. "process", "dry-run").
    fn name(&self) -> &str;

    /// Runs `process`, resolving once it has exited.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::CommandFailed` if the command cannot be launched
    /// or exits unsuccessfully.
    fn run<'a>(&'a self, process: ProcessBuilder) -> BoxFuture<'a, FetchResult<()>>;
}

/// Runs commands as real child processes with inherited output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn name(&self) -> &'static str {
        "process"
    }

    fn run<'a>(&'a self, process: ProcessBuilder) -> BoxFuture<'a, FetchResult<()>> {
        Box::pin(process.run())
    }
}

/// Logs each command instead of running it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    fn run<'a>(&'a self, process: ProcessBuilder) -> BoxFuture<'a, FetchResult<()>> {
        Box::pin(async move {
            let cwd = process
                .working_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            info!(
                name = %process.display_name(),
                cmd = %process,
                cwd = %cwd,
                "[dry-run] Would run"
            );
            Ok(())
        })
    }
}

/// Context provided to tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    runner: Arc<dyn CommandRunner>,
    dry_run: bool,
}

impl ToolContext {
    /// Creates a context around an arbitrary runner.
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>, dry_run: bool) -> Self {
        Self { runner, dry_run }
    }

    /// Real execution, or logging only when `dry_run` is set.
    #[must_use]
    pub fn for_mode(dry_run: bool) -> Self {
        if dry_run {
            Self::new(Arc::new(DryRunRunner), true)
        } else {
            Self::new(Arc::new(ProcessRunner), false)
        }
    }

    #[must_use]
    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// Returns whether this is a dry-run execution.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Hands `process` to the runner.
    ///
    /// # Errors
    ///
    /// Propagates the runner's `CommandFailed`.
    pub async fn run(&self, process: ProcessBuilder) -> FetchResult<()> {
        self.runner.run(process).await
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("runner", &self.runner.name())
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

/// A command-producing step: git clone, cmake configure, ...
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "git", "cmake").
    fn name(&self) -> &str;

    /// Describes the command this tool would run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` when a required builder field is unset.
    fn to_process(&self) -> FetchResult<ProcessBuilder>;

    /// Builds the command and runs it through `ctx`.
    ///
    /// # Errors
    ///
    /// Returns the builder error or the runner's `CommandFailed`.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, FetchResult<()>> {
        Box::pin(async move {
            let process = self.to_process()?;
            ctx.run(process).await
        })
    }
}

#[cfg(test)]
pub(crate) mod test_utils;
