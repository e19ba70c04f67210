// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git tool for fetching dependency sources.
//!
//! ```text
//! GitTool
//! Operations: Clone | Checkout
//! Builder: program/url/path/target/shallow
//!
//! clone:    git clone [--depth 1] <url> <path>
//! checkout: git -c advice.detachedHead=false checkout -q <target>   (cwd = path)
//! ```
//!
//! Clone is rooted at the parent's working directory; checkout runs inside
//! the clone.

use std::path::{Path, PathBuf};

use super::Tool;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ConfigError, FetchResult};

/// Git tool for repository operations.
///
/// # Example
///
/// ```ignore
/// GitTool::new()
///     .url("https://github.com/gabime/spdlog.git")
///     .path("externallib/spdlog")
///     .run(&ctx)
///     .await?;
///
/// GitTool::new()
///     .path("externallib/spdlog")
///     .target("v1.14.1")
///     .checkout_op()
///     .run(&ctx)
///     .await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitTool {
    program: PathBuf,
    url: Option<String>,
    path: Option<PathBuf>,
    target: Option<String>,
    shallow: bool,
    operation: GitOperation,
}

/// Git operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitOperation {
    /// Clone a repository.
    #[default]
    Clone,
    /// Checkout a branch, tag, or commit.
    Checkout,
}

impl GitTool {
    /// Creates a new `GitTool` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
            url: None,
            path: None,
            target: None,
            shallow: false,
            operation: GitOperation::Clone,
        }
    }

    /// Git executable (default: `git` on `PATH`).
    #[must_use]
    pub fn program(mut self, program: impl AsRef<Path>) -> Self {
        self.program = program.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub const fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    #[must_use]
    pub const fn clone_op(mut self) -> Self {
        self.operation = GitOperation::Clone;
        self
    }

    #[must_use]
    pub const fn checkout_op(mut self) -> Self {
        self.operation = GitOperation::Checkout;
        self
    }

    #[must_use]
    pub const fn operation(&self) -> GitOperation {
        self.operation
    }

    fn clone_process(&self) -> FetchResult<ProcessBuilder> {
        let url = required(self.url.as_ref(), "url")?;
        let path = required(self.path.as_ref(), "path")?;

        let mut builder = ProcessBuilder::new(&self.program).arg("clone");
        if self.shallow {
            builder = builder.arg("--depth").arg("1");
        }
        builder = builder.arg(url).arg(path);

        // Clone creates `path`; run from its parent so nothing is needed there yet.
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            builder = builder.cwd(parent);
        }
        Ok(builder.name(format!("git clone {url}")))
    }

    fn checkout_process(&self) -> FetchResult<ProcessBuilder> {
        let path = required(self.path.as_ref(), "path")?;
        let target = required(self.target.as_ref(), "target")?;

        Ok(ProcessBuilder::new(&self.program)
            .arg("-c")
            .arg("advice.detachedHead=false")
            .arg("checkout")
            .arg("-q")
            .arg(target)
            .cwd(path)
            .name(format!("git checkout {target}")))
    }
}

fn required<'a, T>(value: Option<&'a T>, key: &str) -> FetchResult<&'a T> {
    value.ok_or_else(|| {
        ConfigError::MissingKey {
            section: "git".to_string(),
            key: key.to_string(),
        }
        .into()
    })
}

impl Default for GitTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for GitTool {
    fn name(&self) -> &'static str {
        "git"
    }

    fn to_process(&self) -> FetchResult<ProcessBuilder> {
        match self.operation {
            GitOperation::Clone => self.clone_process(),
            GitOperation::Checkout => self.checkout_process(),
        }
    }
}
