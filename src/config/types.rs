// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, ToolsConfig, ToolchainConfig,
//!         ProjectConfig, Vec<DependencyConfig>
//! BuildStep: argv list, e.g. ["cmake", "--build", "build"]
//! BuildConfiguration: Debug | Release (default) | RelWithDebInfo | MinSizeRel
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::core::process::builder::ProcessBuilder;
use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Build configuration type passed to the build system.
///
/// Parsed case-insensitively, so `build_type = "release"` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum BuildConfiguration {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl std::fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for BuildConfiguration {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "relwithdebinfo" => Ok(Self::RelWithDebInfo),
            "minsizerel" => Ok(Self::MinSizeRel),
            _ => Err(ConfigError::InvalidValue {
                section: "toolchain".to_string(),
                key: "build_type".to_string(),
                message: format!(
                    "expected 'Debug', 'Release', 'RelWithDebInfo' or 'MinSizeRel', got '{s}'"
                ),
            }),
        }
    }
}

impl TryFrom<String> for BuildConfiguration {
    type Error = ConfigError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log commands instead of running them; create no directories.
    pub dry: bool,
    /// Console log level (0-5).
    pub log_level: LogLevel,
    /// File log level (0-5).
    pub file_log_level: LogLevel,
    /// Optional log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
        }
    }
}

/// Executables used by the orchestrator. Empty paths are looked up on `PATH`
/// by their conventional name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub git: PathBuf,
    pub cmake: PathBuf,
}

impl ToolsConfig {
    #[must_use]
    pub fn git(&self) -> &Path {
        or_name(&self.git, "git")
    }

    #[must_use]
    pub fn cmake(&self) -> &Path {
        or_name(&self.cmake, "cmake")
    }
}

fn or_name<'a>(path: &'a Path, name: &'static str) -> &'a Path {
    if path.as_os_str().is_empty() {
        Path::new(name)
    } else {
        path
    }
}

/// Cross-compilation toolchain.
///
/// The orchestrator never interprets these values; it only exports them as
/// `CC`, `CXX` and `LD` to build steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Directory holding the cross tools, e.g. `/opt/arm-gnu/bin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_compile_path: Option<PathBuf>,
    /// Tool prefix, e.g. `arm-none-linux-gnueabihf-`.
    pub cross_compile: String,
    /// Explicit C compiler, overrides the derived one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<PathBuf>,
    /// Explicit C++ compiler, overrides the derived one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cxx: Option<PathBuf>,
    /// Explicit linker, overrides the derived one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ld: Option<PathBuf>,
    pub build_type: BuildConfiguration,
}

impl ToolchainConfig {
    /// True when a cross toolchain prefix or directory is configured.
    #[must_use]
    pub fn is_cross(&self) -> bool {
        self.cross_compile_path.is_some() || !self.cross_compile.is_empty()
    }

    fn derived(&self, explicit: Option<&PathBuf>, tool: &str) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.clone());
        }
        if !self.is_cross() {
            return None;
        }
        let file = format!("{}{tool}", self.cross_compile);
        Some(
            self.cross_compile_path
                .as_ref()
                .map_or_else(|| PathBuf::from(&file), |dir| dir.join(&file)),
        )
    }

    #[must_use]
    pub fn cc(&self) -> Option<PathBuf> {
        self.derived(self.cc.as_ref(), "gcc")
    }

    #[must_use]
    pub fn cxx(&self) -> Option<PathBuf> {
        self.derived(self.cxx.as_ref(), "g++")
    }

    #[must_use]
    pub fn ld(&self) -> Option<PathBuf> {
        self.derived(self.ld.as_ref(), "ld")
    }

    /// Toolchain variables as `(name, value)` pairs, in export order.
    #[must_use]
    pub fn variables(&self) -> Vec<(&'static str, String)> {
        [("CC", self.cc()), ("CXX", self.cxx()), ("LD", self.ld())]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v.display().to_string())))
            .collect()
    }

    /// Environment for build steps, or `None` to inherit the caller's.
    ///
    /// Starts from the current environment, exports the toolchain variables
    /// and puts `cross_compile_path` first on `PATH`.
    #[must_use]
    pub fn build_env(&self) -> Option<Env> {
        let variables = self.variables();
        if variables.is_empty() && self.cross_compile_path.is_none() {
            return None;
        }
        let mut env = current_env();
        for (key, value) in variables {
            env.set(key, value);
        }
        if let Some(dir) = &self.cross_compile_path {
            env.prepend_path(dir);
        }
        Some(env)
    }
}

/// One external command as an argv list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildStep(Vec<String>);

impl BuildStep {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(argv.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.first().is_none_or(String::is_empty)
    }

    /// Applies `f` to every element, program included.
    #[must_use]
    pub fn map(&self, f: impl Fn(&str) -> String) -> Self {
        Self(self.0.iter().map(|a| f(a)).collect())
    }

    /// Builds a process rooted at `cwd`.
    #[must_use]
    pub fn to_process(&self, cwd: &Path, env: Option<&Env>) -> ProcessBuilder {
        ProcessBuilder::new(self.program().unwrap_or_default())
            .args(self.args())
            .cwd(cwd)
            .maybe_env(env.cloned())
    }
}

impl std::fmt::Display for BuildStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if arg.is_empty() || arg.contains(' ') {
                write!(f, "\"{arg}\"")?;
            } else {
                f.write_str(arg)?;
            }
        }
        Ok(())
    }
}

/// Configuration form of one source dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyConfig {
    pub name: String,
    pub repository: String,
    /// Tag, branch or commit to check out after cloning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Directory under the external root (default: `name`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Clone with `--depth 1`. A `revision` must then be reachable from the
    /// default branch tip or be the branch itself.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub shallow: bool,
    #[serde(default)]
    pub build_steps: Vec<BuildStep>,
}

/// Main project build.
///
/// When `configure`/`compile` are unset, `CMake` is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configure: Option<BuildStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile: Option<BuildStep>,
    /// `CMake` generator (`-G`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    /// Extra `-D` definitions for the default configure step.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, String>,
}
