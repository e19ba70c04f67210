// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `bump-version` command implementation.

use anyhow::Context;
use tracing::info;

use crate::cli::bump::BumpCli;
use crate::error::Result;
use crate::logging::{LogConfig, LogLevel};
use crate::version::{Version, bump_version_file};

/// Logging for `bump-version`: warnings and errors only unless raised.
#[must_use]
pub fn log_config(args: &BumpCli) -> LogConfig {
    let level = args
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::WARN);
    LogConfig::builder()
        .with_console_level(level)
        .with_file_level(level)
        .build()
}

/// Bumps the patch number in `args.file` and prints the new version.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, malformed or cannot
/// be written. The file is left untouched in every case but the last.
pub async fn run_bump_command(args: &BumpCli) -> Result<Version> {
    let next = bump_version_file(&args.file)
        .await
        .with_context(|| format!("failed to bump {}", args.file.display()))?;

    info!(path = %args.file.display(), version = %next, "Version bumped");
    println!("{next}");
    Ok(next)
}
