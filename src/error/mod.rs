// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            FetchError (<= 24 bytes)
//!                    |
//!   +--------+-------+-------+--------+
//!   |        |       |       |        |
//!   v        v       v       v        v
//! Process   Fs    Version  Config   Other
//!   Box     Box     Box      Box   Box<str>
//!
//! Process  CommandFailed
//! Fs       IoFailure
//! Version  MissingFile, MalformedVersion
//! Config   MissingKey, InvalidValue, DuplicateDependency
//! ```
//!
//! Every variant is fatal to the current run. Nothing is retried.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`FetchError`].
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An external command could not be launched or exited unsuccessfully.
    #[error(transparent)]
    Process(#[from] Box<ProcessError>),

    /// A filesystem operation failed.
    #[error(transparent)]
    Fs(#[from] Box<FsError>),

    /// The version file is missing or unreadable as a version.
    #[error(transparent)]
    Version(#[from] Box<VersionError>),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl FetchError {
    /// Returns the failed command line if this is a command failure.
    #[must_use]
    pub fn failed_command(&self) -> Option<&str> {
        match self {
            Self::Process(err) => match err.as_ref() {
                ProcessError::CommandFailed { command, .. } => Some(command),
            },
            _ => None,
        }
    }
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for FetchError {
                fn from(err: $error) -> Self {
                    FetchError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ProcessError => Process,
    FsError => Fs,
    VersionError => Version,
    ConfigError => Config,
}

// --- Process Errors ---

/// External command errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Launch failure, non-zero exit, or termination by signal.
    #[error("command failed: {command}: {cause}")]
    CommandFailed { command: String, cause: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Directory creation, read or write failed.
    #[error("I/O failure on '{path}': {source}")]
    IoFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Builds an [`FsError::IoFailure`] for `path`.
    #[must_use]
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoFailure {
            path: path.display().to_string(),
            source,
        }
    }
}

// --- Version Errors ---

/// Version file errors.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The version file does not exist.
    #[error("{path} not found")]
    MissingFile { path: String },

    /// The content is not three dot-separated integers.
    #[error("malformed version '{content}', expected MAJOR.MINOR.PATCH")]
    MalformedVersion { content: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Two dependencies share a name.
    #[error("dependency '{0}' is declared more than once")]
    DuplicateDependency(String),
}

#[cfg(test)]
mod tests;
