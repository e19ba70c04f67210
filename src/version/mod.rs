// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `MAJOR.MINOR.PATCH` version file handling.
//!
//! ```text
//! version.txt  "1.2.3\n"
//!      | read, trim, parse
//!      v
//! Version { 1, 2, 3 } --bump_patch--> Version { 1, 2, 4 }
//!      | write back, no trailing newline
//!      v
//! version.txt  "1.2.4"
//! ```
//!
//! A missing file is an error and is never created.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use regex::Regex;
use tracing::{debug, info};

use crate::error::{FetchError, FetchResult, FsError, VersionError};

/// Default version file, relative to the current directory.
pub const DEFAULT_VERSION_FILE: &str = "version.txt";

const VERSION_PATTERN: &str = r"^([0-9]+)\.([0-9]+)\.([0-9]+)$";

/// A three-part decimal version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
}

impl Version {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses `MAJOR.MINOR.PATCH`, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::MalformedVersion` unless the trimmed content is
    /// exactly three dot-separated decimal integers.
    pub fn parse(content: &str) -> FetchResult<Self> {
        let trimmed = content.trim();
        let regex = Regex::new(VERSION_PATTERN)
            .map_err(|e| FetchError::Other(format!("invalid version pattern: {e}").into()))?;

        let malformed = || VersionError::MalformedVersion {
            content: trimmed.to_string(),
        };
        let captures = regex.captures(trimmed).ok_or_else(malformed)?;
        let part = |i: usize| -> FetchResult<u64> {
            captures
                .get(i)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(|| malformed().into())
        };

        Ok(Self::new(part(1)?, part(2)?, part(3)?))
    }

    #[must_use]
    pub const fn major(self) -> u64 {
        self.major
    }

    #[must_use]
    pub const fn minor(self) -> u64 {
        self.minor
    }

    #[must_use]
    pub const fn patch(self) -> u64 {
        self.patch
    }

    /// Increments the patch component. Major and minor are unchanged and
    /// nothing carries over.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::MalformedVersion` if the patch would overflow.
    pub fn bump_patch(self) -> FetchResult<Self> {
        let patch = self
            .patch
            .checked_add(1)
            .ok_or_else(|| VersionError::MalformedVersion {
                content: self.to_string(),
            })?;
        Ok(Self { patch, ..self })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Reads and parses a version file.
///
/// # Errors
///
/// Returns `VersionError::MissingFile` if `path` does not exist,
/// `FsError::IoFailure` if it cannot be read and
/// `VersionError::MalformedVersion` if it does not parse.
pub async fn read_version_file(path: &Path) -> FetchResult<Version> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::from(VersionError::MissingFile {
                path: path.display().to_string(),
            }),
            _ => FsError::io(path, e).into(),
        })?;
    debug!(path = %path.display(), content = %content.trim(), "Read version file");
    Version::parse(&content)
}

/// Increments the patch number stored in `path` and returns the new version.
///
/// # Errors
///
/// Same as [`read_version_file`], plus `FsError::IoFailure` if the new
/// version cannot be written.
pub async fn bump_version_file(path: &Path) -> FetchResult<Version> {
    let current = read_version_file(path).await?;
    let next = current.bump_patch()?;

    tokio::fs::write(path, next.to_string())
        .await
        .map_err(|e| FsError::io(path, e))?;

    info!(path = %path.display(), from = %current, to = %next, "Version bumped");
    Ok(next)
}

#[cfg(test)]
mod tests;
