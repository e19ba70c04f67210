// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for fetchbuild.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults (built-in dependency manifest)
//! 2. fetchbuild.toml (cwd, optional)
//! 3. --ini (repeatable)
//! 4. FETCHBUILD_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! FETCHBUILD_GLOBAL__DRY=true                  → global.dry = true
//! FETCHBUILD_PATHS__ROOT=/src/app              → paths.root = "/src/app"
//! FETCHBUILD_TOOLCHAIN__CROSS_COMPILE=arm-...- → toolchain.cross_compile
//! ```
//!
//! # Custom Dependencies
//!
//! ```toml
//! [[dependencies]]
//! name = "zlib"
//! repository = "https://github.com/madler/zlib.git"
//! revision = "v1.3.1"
//! build_steps = [["./configure", "--prefix={install}"], ["make", "install"]]
//! ```
//!
//! Any `[[dependencies]]` entry replaces the whole built-in list.

pub mod loader;
pub mod manifest;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

pub use loader::ConfigLoader;
use paths::PathsConfig;
use types::{DependencyConfig, GlobalConfig, ProjectConfig, ToolchainConfig, ToolsConfig};

/// Name of the optional configuration file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "fetchbuild.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "FETCHBUILD";

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Directory layout.
    pub paths: PathsConfig,
    /// Tool paths.
    pub tools: ToolsConfig,
    /// Cross-compilation toolchain.
    pub toolchain: ToolchainConfig,
    /// Main project build.
    pub project: ProjectConfig,
    /// Dependencies, in build order.
    pub dependencies: Vec<DependencyConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            paths: PathsConfig::default(),
            tools: ToolsConfig::default(),
            toolchain: ToolchainConfig::default(),
            project: ProjectConfig::default(),
            dependencies: manifest::default_dependencies(),
        }
    }
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fetchbuild::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("fetchbuild.toml")
    ///     .with_env_prefix("FETCHBUILD")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve all paths against `base` and validate the dependency list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateDependency` when two dependencies share
    /// a name and `ConfigError::InvalidValue` for an empty name, repository or
    /// build step.
    pub fn resolve_and_validate(&mut self, base: &Path) -> Result<()> {
        self.paths.resolve(base);
        self.validate_dependencies()?;
        self.validate_project()?;
        Ok(())
    }

    fn validate_dependencies(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for dep in &self.dependencies {
            if dep.name.trim().is_empty() {
                return Err(invalid("dependencies", "name", "dependency name is empty").into());
            }
            if !seen.insert(dep.name.as_str()) {
                return Err(ConfigError::DuplicateDependency(dep.name.clone()).into());
            }
            if dep.repository.trim().is_empty() {
                return Err(invalid(
                    "dependencies",
                    "repository",
                    &format!("dependency '{}' has no repository", dep.name),
                )
                .into());
            }
            if let Some(i) = dep.build_steps.iter().position(|s| s.is_empty()) {
                return Err(invalid(
                    "dependencies",
                    "build_steps",
                    &format!("build step {} of '{}' is empty", i + 1, dep.name),
                )
                .into());
            }
        }
        Ok(())
    }

    fn validate_project(&self) -> Result<()> {
        for (key, step) in [
            ("configure", &self.project.configure),
            ("compile", &self.project.compile),
        ] {
            if step.as_ref().is_some_and(types::BuildStep::is_empty) {
                return Err(invalid("project", key, "build step is empty").into());
            }
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_tools_options(&mut options);
        self.format_toolchain_options(&mut options);
        self.format_project_options(&mut options);
        self.format_dependency_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.log_level".into(),
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(self.global.log_file.as_ref()));
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.root".into(), fmt_path(self.paths.root.as_ref()));
        options.insert("paths.external".into(), fmt_path(self.paths.external.as_ref()));
        options.insert("paths.install".into(), fmt_path(self.paths.install.as_ref()));
        options.insert("paths.build".into(), fmt_path(self.paths.build.as_ref()));
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.git".into(), self.tools.git().display().to_string());
        options.insert("tools.cmake".into(), self.tools.cmake().display().to_string());
    }

    fn format_toolchain_options(&self, options: &mut BTreeMap<String, String>) {
        let toolchain = &self.toolchain;
        options.insert(
            "toolchain.build_type".into(),
            toolchain.build_type.to_string(),
        );
        if toolchain.is_cross() {
            options.insert(
                "toolchain.cross_compile_path".into(),
                fmt_path(toolchain.cross_compile_path.as_ref()),
            );
            options.insert(
                "toolchain.cross_compile".into(),
                toolchain.cross_compile.clone(),
            );
        }
        for (key, value) in toolchain.variables() {
            options.insert(format!("toolchain.{}", key.to_lowercase()), value);
        }
    }

    fn format_project_options(&self, options: &mut BTreeMap<String, String>) {
        if let Some(generator) = &self.project.generator {
            options.insert("project.generator".into(), generator.clone());
        }
        for (key, step) in [
            ("configure", &self.project.configure),
            ("compile", &self.project.compile),
        ] {
            if let Some(step) = step {
                options.insert(format!("project.{key}"), step.to_string());
            }
        }
        for (key, value) in &self.project.definitions {
            options.insert(format!("project.definitions.{key}"), value.clone());
        }
    }

    fn format_dependency_options(&self, options: &mut BTreeMap<String, String>) {
        for (i, dep) in self.dependencies.iter().enumerate() {
            let revision = dep.revision.as_deref().unwrap_or("(default branch)");
            options.insert(
                format!("dependencies.{i}"),
                format!("{} {} @ {revision}", dep.name, dep.repository),
            );
        }
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn fmt_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
