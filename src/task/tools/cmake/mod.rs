// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `CMake` tool for the main project's configure and compile steps.
//!
//! ```text
//! CmakeTool
//! Operations: Configure | Build
//! Builder: program/source_dir/build_dir/generator/configuration/definition/prefix_path/env
//!
//! configure: cmake [-G <gen>] <source> -DCMAKE_BUILD_TYPE=<cfg> [-DCMAKE_PREFIX_PATH=..] [-D..]
//! build:     cmake --build . --config <cfg>
//! both run with cwd = build_dir
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::Tool;
use crate::config::types::BuildConfiguration;
use crate::core::env::container::Env;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ConfigError, FetchResult};

/// `CMake` operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CmakeOperation {
    /// Configure a `CMake` build directory.
    #[default]
    Configure,
    /// Build a configured build directory.
    Build,
}

/// `CMake` tool for configure/build operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmakeTool {
    program: PathBuf,
    source_dir: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    generator: Option<String>,
    configuration: BuildConfiguration,
    definitions: BTreeMap<String, String>,
    prefix_paths: Vec<PathBuf>,
    env: Option<Env>,
    operation: CmakeOperation,
}

impl CmakeTool {
    /// Creates a new `CmakeTool` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("cmake"),
            source_dir: None,
            build_dir: None,
            generator: None,
            configuration: BuildConfiguration::default(),
            definitions: BTreeMap::new(),
            prefix_paths: Vec::new(),
            env: None,
            operation: CmakeOperation::Configure,
        }
    }

    /// `CMake` executable (default: `cmake` on `PATH`).
    #[must_use]
    pub fn program(mut self, program: impl AsRef<Path>) -> Self {
        self.program = program.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn source_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn build_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    #[must_use]
    pub const fn configuration(mut self, configuration: BuildConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    #[must_use]
    pub fn definition(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.definitions.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn definitions<I, K, V>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.definitions
            .extend(definitions.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn prefix_path(mut self, path: impl AsRef<Path>) -> Self {
        self.prefix_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Environment for the `cmake` child, e.g. with `CC`/`CXX` exported.
    #[must_use]
    pub fn env(mut self, env: Option<Env>) -> Self {
        self.env = env;
        self
    }

    #[must_use]
    pub const fn configure_op(mut self) -> Self {
        self.operation = CmakeOperation::Configure;
        self
    }

    #[must_use]
    pub const fn build_op(mut self) -> Self {
        self.operation = CmakeOperation::Build;
        self
    }

    fn build_dir_required(&self) -> FetchResult<&Path> {
        required(self.build_dir.as_deref(), "build_dir")
    }

    fn source_dir_required(&self) -> FetchResult<&Path> {
        required(self.source_dir.as_deref(), "source_dir")
    }

    fn prefix_path_value(&self) -> Option<String> {
        if self.prefix_paths.is_empty() {
            return None;
        }
        let joined = self
            .prefix_paths
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect::<Vec<_>>()
            .join(";");
        Some(joined)
    }

    fn configure_process(&self) -> FetchResult<ProcessBuilder> {
        let source = self.source_dir_required()?;
        let build = self.build_dir_required()?;

        let mut builder = ProcessBuilder::new(&self.program);
        if let Some(generator) = &self.generator {
            builder = builder.arg("-G").arg(generator);
        }
        builder = builder
            .arg(source)
            .arg(format!("-DCMAKE_BUILD_TYPE={}", self.configuration));
        if let Some(prefix_path) = self.prefix_path_value() {
            builder = builder.arg(format!("-DCMAKE_PREFIX_PATH={prefix_path}"));
        }
        for (key, value) in &self.definitions {
            builder = builder.arg(format!("-D{key}={value}"));
        }

        Ok(builder
            .cwd(build)
            .maybe_env(self.env.clone())
            .name("cmake configure"))
    }

    fn build_process(&self) -> FetchResult<ProcessBuilder> {
        let build = self.build_dir_required()?;

        Ok(ProcessBuilder::new(&self.program)
            .arg("--build")
            .arg(".")
            .arg("--config")
            .arg(self.configuration.to_string())
            .cwd(build)
            .maybe_env(self.env.clone())
            .name("cmake build"))
    }
}

fn required<'a>(path: Option<&'a Path>, key: &str) -> FetchResult<&'a Path> {
    path.ok_or_else(|| {
        ConfigError::MissingKey {
            section: "cmake".to_string(),
            key: key.to_string(),
        }
        .into()
    })
}

impl Default for CmakeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for CmakeTool {
    fn name(&self) -> &'static str {
        "cmake"
    }

    fn to_process(&self) -> FetchResult<ProcessBuilder> {
        match self.operation {
            CmakeOperation::Configure => self.configure_process(),
            CmakeOperation::Build => self.build_process(),
        }
    }
}
