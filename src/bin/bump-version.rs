// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `bump-version` entry point.
//!
//! ```text
//! version.txt: 1.2.3  --> version.txt: 1.2.4, stdout: 1.2.4
//! ```

use std::process::ExitCode;

use clap::Parser;
use fetchbuild::cli::bump::BumpCli;
use fetchbuild::cmd::version::{log_config, run_bump_command};
use fetchbuild::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let args = BumpCli::parse();

    let _log_guard = match init_logging(&log_config(&args)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_bump_command(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
