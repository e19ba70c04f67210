// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env()
//!   .run()
//!       --> which (bare names only)
//!       --> tokio::process::Command (cwd applied to the child only)
//!       --> ProcessError::CommandFailed on lookup, launch or non-zero exit
//! ```

pub mod builder;
mod runner;
