// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Dispatch
//!   --show-inis | --show-config | fetch and build
//! ```

use std::process::ExitCode;

use fetchbuild::cli;
use fetchbuild::cmd::build::{build_config_loader, load_config, log_config, run_build_command};
use fetchbuild::cmd::config::{run_inis_command, run_options_command};
use fetchbuild::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if cli.show_inis {
        return match build_config_loader(&cli.global) {
            Ok(loader) => {
                run_inis_command(&loader.format_loaded_files());
                ExitCode::SUCCESS
            }
            Err(e) => failure(&e),
        };
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => return failure(&e),
    };

    if cli.show_config {
        run_options_command(&config);
        return ExitCode::SUCCESS;
    }

    let _log_guard = match init_logging(&log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_build_command(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => failure(&e),
    }
}

fn failure(e: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {e:#}");
    ExitCode::FAILURE
}
