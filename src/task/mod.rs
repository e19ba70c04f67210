// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency descriptions and the fetch-and-build driver.
//!
//! # Architecture
//!
//! ```text
//! Config.dependencies ──resolve_dependencies──> Vec<DependencySpec>
//!                                                     |
//!                                                     v
//!                                               Orchestrator
//!                                   ensure each spec, then build project
//!                                                     |
//!                                                     v
//!                                        Tools (git, cmake, build steps)
//!                                                     |
//!                                                     v
//!                                              dyn CommandRunner
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`DependencySpec`] | One dependency with absolute paths and expanded steps |
//! | [`Placeholders`] | `{source}`, `{install}`, ... substitution in build steps |
//! | [`manager::Orchestrator`] | State machine running the whole sequence |
//!
//! # Presence Check
//!
//! A dependency counts as satisfied as soon as its target directory exists.
//! Contents and the checked-out revision are never inspected, so a clone
//! interrupted halfway is skipped on the next run. Delete the directory to
//! force a fresh fetch and build.

pub mod manager;
pub mod tools;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::config::types::{BuildConfiguration, BuildStep, DependencyConfig};
use crate::error::FetchResult;

/// Values substituted into build-step arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub source: PathBuf,
    pub external: PathBuf,
    pub install: PathBuf,
    pub root: PathBuf,
    pub build_type: BuildConfiguration,
}

impl Placeholders {
    /// Replaces every known `{name}` in `arg`. Unknown braces are kept as is.
    #[must_use]
    pub fn expand(&self, arg: &str) -> String {
        if !arg.contains('{') {
            return arg.to_string();
        }
        [
            ("{source}", display(&self.source)),
            ("{external}", display(&self.external)),
            ("{install}", display(&self.install)),
            ("{root}", display(&self.root)),
            ("{build_type}", self.build_type.to_string()),
        ]
        .into_iter()
        .fold(arg.to_string(), |acc, (key, value)| acc.replace(key, &value))
    }

    /// Expands every argument of `step`.
    #[must_use]
    pub fn expand_step(&self, step: &BuildStep) -> BuildStep {
        step.map(|arg| self.expand(arg))
    }

    /// Same placeholders with `{source}` pointing at `source`.
    #[must_use]
    pub fn with_source(&self, source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..self.clone()
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// One external source dependency, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    pub name: String,
    /// Absolute path the sources are cloned into.
    pub target_directory: PathBuf,
    pub repository_url: String,
    /// Checked out after cloning; `None` keeps the default branch.
    pub revision: Option<String>,
    /// Clone with `--depth 1`.
    pub shallow: bool,
    /// Run in order inside `target_directory`, placeholders expanded.
    pub build_steps: Vec<BuildStep>,
}

impl DependencySpec {
    /// Whether the target directory exists.
    ///
    /// Never fails: a missing parent or an unreadable path yields `false`.
    /// An empty directory is satisfied.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.target_directory.exists()
    }

    /// Builds a spec from its configuration form.
    ///
    /// A relative `directory` is taken under `placeholders.external`; the
    /// default directory is the dependency name.
    #[must_use]
    pub fn from_config(dep: &DependencyConfig, placeholders: &Placeholders) -> Self {
        let directory = dep
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(&dep.name));
        let target_directory = if directory.is_absolute() {
            directory
        } else {
            placeholders.external.join(directory)
        };

        let placeholders = placeholders.with_source(&target_directory);
        Self {
            name: dep.name.clone(),
            build_steps: dep
                .build_steps
                .iter()
                .map(|step| placeholders.expand_step(step))
                .collect(),
            target_directory,
            repository_url: dep.repository.clone(),
            revision: dep.revision.clone(),
            shallow: dep.shallow,
        }
    }
}

/// Placeholders for a resolved configuration, with `{source}` set to the root.
///
/// # Errors
///
/// Returns `ConfigError::MissingKey` if the paths were never resolved.
pub fn placeholders(config: &Config) -> FetchResult<Placeholders> {
    let root = config.paths.root()?.to_path_buf();
    Ok(Placeholders {
        source: root.clone(),
        external: config.paths.external()?.to_path_buf(),
        install: config.paths.install()?.to_path_buf(),
        root,
        build_type: config.toolchain.build_type,
    })
}

/// Resolves the configured dependencies, in declared order.
///
/// # Errors
///
/// Returns `ConfigError::MissingKey` if the paths were never resolved.
pub fn resolve_dependencies(config: &Config) -> FetchResult<Vec<DependencySpec>> {
    let placeholders = placeholders(config)?;
    Ok(config
        .dependencies
        .iter()
        .map(|dep| DependencySpec::from_config(dep, &placeholders))
        .collect())
}
