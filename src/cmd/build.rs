// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build command implementation.

use anyhow::Context;

use crate::cli::global::GlobalOptions;
use crate::config::{Config, ConfigLoader, ENV_PREFIX, LOCAL_CONFIG_FILE};
use crate::error::Result;
use crate::logging::{LogConfig, LogLevel};
use crate::task::manager::{Orchestrator, RunReport};

/// Layers every configuration source for `fetch-build`.
///
/// Later sources win: defaults, `fetchbuild.toml` in the current directory,
/// each `--ini` file, `FETCHBUILD_*` variables, then command-line flags.
///
/// # Errors
///
/// Returns an error if a command-line override cannot be applied.
pub fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(LOCAL_CONFIG_FILE);
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    Ok(loader)
}

/// Loads, resolves and validates the configuration.
///
/// # Errors
///
/// Returns an error if a file is missing or malformed, or validation fails.
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global)?.build()
}

/// Logging settings from the resolved configuration.
#[must_use]
pub fn log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file.as_ref().map(|p| p.display().to_string()))
        .with_show_target(config.global.log_level >= LogLevel::TRACE)
        .build()
}

/// Main handler for the build.
///
/// # Errors
///
/// Returns the first directory or command failure; nothing after it runs.
pub async fn run_build_command(config: &Config) -> Result<RunReport> {
    let mut orchestrator = Orchestrator::new(config).context("invalid configuration")?;

    tracing::info!(
        dependencies = orchestrator.specs().len(),
        dry_run = orchestrator.is_dry_run(),
        "Starting fetch and build"
    );

    let report = orchestrator.run().await?;
    Ok(report)
}
