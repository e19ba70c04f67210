// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process builder with configuration options.
//!
//! ```text
//! ProcessBuilder
//!  • new
//!  • arg/args/cwd/env/maybe_env/name
//!  • resolved_program: bare names looked up on PATH (cached)
//!
//! stdout/stderr are inherited, stdin is closed
//! ```

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::{OnceLock, RwLock};

use crate::core::env::container::Env;
use crate::error::ProcessError;

/// Static cache for executable paths resolved via `which` on the caller's PATH.
static EXECUTABLE_CACHE: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();

fn exe_cache() -> &'static RwLock<BTreeMap<String, PathBuf>> {
    EXECUTABLE_CACHE.get_or_init(|| RwLock::new(BTreeMap::new()))
}

/// Builder for configuring and running a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    /// Replaces the inherited environment when set
    env: Option<Env>,
    name: Option<String>,
}

impl ProcessBuilder {
    /// Creates a new `ProcessBuilder` for the given program.
    ///
    /// A bare executable name is resolved through `PATH` when the process is
    /// run; see [`Self::resolved_program`].
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: None,
            name: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
        self
    }

    /// Sets the working directory of the child. The caller's own working
    /// directory is left untouched.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Replaces the child's environment with `env`.
    #[must_use]
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    /// Same as [`Self::env`] but accepts an optional environment.
    #[must_use]
    pub fn maybe_env(mut self, env: Option<Env>) -> Self {
        self.env = env;
        self
    }

    /// Sets a display name for logging.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    #[must_use]
    pub fn args_slice(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    #[must_use]
    pub const fn environment(&self) -> Option<&Env> {
        self.env.as_ref()
    }

    /// Returns the display name: the explicit name or the program's file stem.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.program.file_stem().map_or_else(
                || "process".to_string(),
                |s| s.to_string_lossy().into_owned(),
            )
        })
    }

    /// Absolute path of the program to launch.
    ///
    /// A bare name such as `git` is looked up on the `PATH` of the child's
    /// environment when one is set, otherwise on the caller's `PATH` with the
    /// result cached. Paths such as `./config` or `/usr/bin/make` are returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::CommandFailed` if a bare name is not found.
    pub fn resolved_program(&self) -> std::result::Result<PathBuf, ProcessError> {
        let mut components = self.program.components();
        let name = match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => name.to_string_lossy().into_owned(),
            _ => return Ok(self.program.clone()),
        };

        let not_found = |e: which::Error| ProcessError::CommandFailed {
            command: self.command_line(),
            cause: format!("executable not found: {name}: {e}"),
        };

        if let Some(path_var) = self.env.as_ref().and_then(|env| env.get("PATH")) {
            let cwd = self.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
            return which::which_in(&name, Some(path_var), cwd).map_err(not_found);
        }

        {
            let cache = exe_cache()
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(path) = cache.get(&name) {
                return Ok(path.clone());
            }
        }

        let path = which::which(&name).map_err(not_found)?;
        exe_cache()
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(name, path.clone());
        Ok(path)
    }

    /// Returns the full command line, quoting arguments that contain spaces.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProcessBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
