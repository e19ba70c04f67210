// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! root/
//!   externallib/     (dependency sources)
//!     install/       (install prefix)
//!   build/           (project build output)
//! ```
//!
//! All paths are optional and resolved from `root` if not set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, FetchResult};

/// Directory layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Project root (default: current directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Dependency sources (default: root/externallib).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<PathBuf>,
    /// Install prefix for dependencies (default: external/install).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<PathBuf>,
    /// Project build directory (default: root/build).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<PathBuf>,
}

impl PathsConfig {
    /// Makes every path absolute and fills in defaults.
    ///
    /// A relative `root` is taken relative to `base`; the other relative
    /// paths are taken relative to the root.
    pub fn resolve(&mut self, base: &Path) {
        let root = match self.root.take() {
            Some(root) if root.is_relative() => base.join(root),
            Some(root) => root,
            None => base.to_path_buf(),
        };

        let resolve = |path: Option<PathBuf>, parent: &Path, default: &str| match path {
            Some(p) if p.is_relative() => root.join(p),
            Some(p) => p,
            None => parent.join(default),
        };

        let external = resolve(self.external.take(), &root, "externallib");
        self.install = Some(resolve(self.install.take(), &external, "install"));
        self.build = Some(resolve(self.build.take(), &root, "build"));
        self.external = Some(external);

        self.root = Some(root);
    }

    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the paths were never resolved.
    pub fn root(&self) -> FetchResult<&Path> {
        required(self.root.as_deref(), "root")
    }

    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the paths were never resolved.
    pub fn external(&self) -> FetchResult<&Path> {
        required(self.external.as_deref(), "external")
    }

    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the paths were never resolved.
    pub fn install(&self) -> FetchResult<&Path> {
        required(self.install.as_deref(), "install")
    }

    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the paths were never resolved.
    pub fn build(&self) -> FetchResult<&Path> {
        required(self.build.as_deref(), "build")
    }
}

fn required<'a>(path: Option<&'a Path>, key: &str) -> FetchResult<&'a Path> {
    path.ok_or_else(|| {
        ConfigError::MissingKey {
            section: "paths".to_string(),
            key: key.to_string(),
        }
        .into()
    })
}
