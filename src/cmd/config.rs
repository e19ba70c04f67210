// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands.

use crate::config::Config;

/// Lines printed by `--show-config`.
#[must_use]
pub fn options_lines(config: &Config) -> Vec<String> {
    config.format_options()
}

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in options_lines(config) {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_inis_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}
