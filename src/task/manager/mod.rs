// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Orchestrator driving the fetch-and-build sequence.
//!
//! ```text
//! Orchestrator::new(&config)
//!   .with_runner()            (tests, custom execution)
//!   .run().await
//!
//!  Idle ──> EnsuringDependency(0) ──> ... ──> EnsuringDependency(n-1)
//!                                                   |
//!                                                   v
//!                                            BuildingProject ──> Done
//!  any error ──> Failed (terminal)
//!
//!  EnsuringDependency(i):
//!     target dir exists ──> Skipped
//!     otherwise         ──> clone, checkout, build steps ──> Fetched
//! ```
//!
//! Commands run one at a time. The first failure stops the sequence; later
//! dependencies and the project build are never started and nothing already
//! on disk is removed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::Config;
use crate::config::types::{BuildConfiguration, ProjectConfig, ToolsConfig};
use crate::core::env::container::Env;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{FetchResult, FsError};

use super::tools::cmake::CmakeTool;
use super::tools::git::GitTool;
use super::tools::{CommandRunner, Tool, ToolContext};
use super::{DependencySpec, Placeholders, placeholders, resolve_dependencies};

/// Where the orchestrator is in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    /// Working on the dependency at this index.
    EnsuringDependency(usize),
    BuildingProject,
    Done,
    Failed,
}

impl OrchestratorState {
    /// `Done` and `Failed` end a run.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// What happened to one dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyOutcome {
    /// Target directory already existed; nothing ran.
    Skipped,
    /// Cloned, checked out and built.
    Fetched,
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    outcomes: Vec<(String, DependencyOutcome)>,
    project_built: bool,
}

impl RunReport {
    /// Outcomes in declared order.
    #[must_use]
    pub fn outcomes(&self) -> &[(String, DependencyOutcome)] {
        &self.outcomes
    }

    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<DependencyOutcome> {
        self.outcomes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| *outcome)
    }

    #[must_use]
    pub fn fetched_count(&self) -> usize {
        self.count(DependencyOutcome::Fetched)
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(DependencyOutcome::Skipped)
    }

    #[must_use]
    pub const fn project_built(&self) -> bool {
        self.project_built
    }

    fn count(&self, wanted: DependencyOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == wanted).count()
    }
}

/// Directory layout the orchestrator works in.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Layout {
    root: PathBuf,
    external: PathBuf,
    install: PathBuf,
    build: PathBuf,
}

/// Fetch-and-build state machine.
pub struct Orchestrator {
    specs: Vec<DependencySpec>,
    layout: Layout,
    placeholders: Placeholders,
    project: ProjectConfig,
    tools: ToolsConfig,
    build_type: BuildConfiguration,
    env: Option<Env>,
    ctx: ToolContext,
    state: OrchestratorState,
}

impl Orchestrator {
    /// Creates an orchestrator for a resolved configuration.
    ///
    /// Commands are executed for real, or only logged when `global.dry` is
    /// set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the configuration's paths were
    /// never resolved.
    pub fn new(config: &Config) -> FetchResult<Self> {
        let layout = Layout {
            root: config.paths.root()?.to_path_buf(),
            external: config.paths.external()?.to_path_buf(),
            install: config.paths.install()?.to_path_buf(),
            build: config.paths.build()?.to_path_buf(),
        };

        Ok(Self {
            specs: resolve_dependencies(config)?,
            placeholders: placeholders(config)?,
            layout,
            project: config.project.clone(),
            tools: config.tools.clone(),
            build_type: config.toolchain.build_type,
            env: config.toolchain.build_env(),
            ctx: ToolContext::for_mode(config.global.dry),
            state: OrchestratorState::Idle,
        })
    }

    /// Routes every command through `runner`, keeping the dry-run flag.
    #[must_use]
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.ctx = ToolContext::new(runner, self.ctx.is_dry_run());
        self
    }

    #[must_use]
    pub const fn state(&self) -> OrchestratorState {
        self.state
    }

    #[must_use]
    pub fn specs(&self) -> &[DependencySpec] {
        &self.specs
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.ctx.is_dry_run()
    }

    fn transition(&mut self, next: OrchestratorState) {
        debug!(from = ?self.state, to = ?next, "State transition");
        self.state = next;
    }

    /// Runs the full sequence.
    ///
    /// # Errors
    ///
    /// Returns the first `IoFailure` or `CommandFailed`; the state is then
    /// `Failed`.
    pub async fn run(&mut self) -> FetchResult<RunReport> {
        self.state = OrchestratorState::Idle;
        let result = self.run_sequence().await;
        match &result {
            Ok(report) => {
                self.transition(OrchestratorState::Done);
                info!(
                    fetched = report.fetched_count(),
                    skipped = report.skipped_count(),
                    "Build completed successfully"
                );
            }
            Err(e) => {
                self.transition(OrchestratorState::Failed);
                error!(error = %e, "Build failed");
            }
        }
        result
    }

    async fn run_sequence(&mut self) -> FetchResult<RunReport> {
        let mut report = RunReport::default();

        self.prepare_directories().await?;

        info!(count = self.specs.len(), "Ensuring dependencies");
        for i in 0..self.specs.len() {
            self.transition(OrchestratorState::EnsuringDependency(i));
            let spec = self.specs[i].clone();
            let outcome = self.ensure_dependency(&spec).await.inspect_err(|e| {
                error!(dependency = %spec.name, error = %e, "Dependency failed");
            })?;
            report.outcomes.push((spec.name, outcome));
        }

        self.transition(OrchestratorState::BuildingProject);
        self.build_project().await?;
        report.project_built = true;

        Ok(report)
    }

    /// Creates the external and install directories if absent.
    ///
    /// # Errors
    ///
    /// Returns `FsError::IoFailure` if a directory cannot be created.
    pub async fn prepare_directories(&self) -> FetchResult<()> {
        for dir in [&self.layout.external, &self.layout.install] {
            create_dir(dir, self.is_dry_run()).await?;
        }
        Ok(())
    }

    /// Fetches and builds `spec` unless its directory already exists.
    ///
    /// Missing parents of the target directory are created first, since the
    /// clone runs from there.
    ///
    /// # Errors
    ///
    /// Returns `IoFailure` if the parent cannot be created, or `CommandFailed`
    /// from the clone, the checkout or a build step.
    pub async fn ensure_dependency(&self, spec: &DependencySpec) -> FetchResult<DependencyOutcome> {
        let path = spec.target_directory.display().to_string();
        if spec.is_satisfied() {
            info!(dependency = %spec.name, path = %path, "Already present, skipping");
            return Ok(DependencyOutcome::Skipped);
        }

        info!(
            dependency = %spec.name,
            url = %spec.repository_url,
            path = %path,
            "Cloning"
        );
        if let Some(parent) = spec.target_directory.parent() {
            create_dir(parent, self.is_dry_run()).await?;
        }
        GitTool::new()
            .program(self.tools.git())
            .url(&spec.repository_url)
            .path(&spec.target_directory)
            .shallow(spec.shallow)
            .clone_op()
            .run(&self.ctx)
            .await?;

        if let Some(revision) = &spec.revision {
            info!(dependency = %spec.name, revision = %revision, "Checking out");
            GitTool::new()
                .program(self.tools.git())
                .path(&spec.target_directory)
                .target(revision)
                .checkout_op()
                .run(&self.ctx)
                .await?;
        }

        let total = spec.build_steps.len();
        for (i, step) in spec.build_steps.iter().enumerate() {
            info!(
                dependency = %spec.name,
                step = i + 1,
                total,
                cmd = %step,
                "Running build step"
            );
            let process = step
                .to_process(&spec.target_directory, self.env.as_ref())
                .name(format!("{} step {}", spec.name, i + 1));
            self.ctx.run(process).await?;
        }

        info!(dependency = %spec.name, "Dependency ready");
        Ok(DependencyOutcome::Fetched)
    }

    /// Configure and compile steps for the main project, in order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if a `CMake` directory is unset.
    pub fn project_processes(&self) -> FetchResult<[ProcessBuilder; 2]> {
        let build_dir = &self.layout.build;
        let custom = |step: &crate::config::types::BuildStep, name: &str| {
            self.placeholders
                .expand_step(step)
                .to_process(build_dir, self.env.as_ref())
                .name(name)
        };
        let cmake = || {
            let mut tool = CmakeTool::new()
                .program(self.tools.cmake())
                .source_dir(&self.layout.root)
                .build_dir(build_dir)
                .configuration(self.build_type)
                .prefix_path(&self.layout.install)
                .definitions(self.project.definitions.clone())
                .env(self.env.clone());
            if let Some(generator) = &self.project.generator {
                tool = tool.generator(generator);
            }
            tool
        };

        let configure = match &self.project.configure {
            Some(step) => custom(step, "project configure"),
            None => cmake().configure_op().to_process()?,
        };
        let compile = match &self.project.compile {
            Some(step) => custom(step, "project compile"),
            None => cmake().build_op().to_process()?,
        };
        Ok([configure, compile])
    }

    /// Creates the build directory and runs the configure and compile steps.
    ///
    /// # Errors
    ///
    /// Returns `IoFailure` for the build directory or `CommandFailed`.
    pub async fn build_project(&self) -> FetchResult<()> {
        create_dir(&self.layout.build, self.is_dry_run()).await?;

        info!(path = %self.layout.build.display(), "Building project");
        for process in self.project_processes()? {
            info!(name = %process.display_name(), cmd = %process, "Running project step");
            self.ctx.run(process).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("dependencies", &self.specs.len())
            .field("state", &self.state)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

async fn create_dir(dir: &Path, dry_run: bool) -> FetchResult<()> {
    if dry_run {
        info!(path = %dir.display(), "[dry-run] Would create directory");
        return Ok(());
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| FsError::io(dir, e))?;
    Ok(())
}

#[cfg(test)]
mod tests;
