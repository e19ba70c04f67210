// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!        main.rs (fetch-build)        bin/bump-version.rs
//!                |                            |
//!       +--------+--------+                   |
//!       v                 v                   v
//!   cli (clap)      cmd (handlers)  ------> version
//!       |                 |              MAJOR.MINOR.PATCH
//!       +--------+--------+
//!                v
//!     ,---------------------------,
//!     |          config           |
//!     |   TOML, env, CLI layers   |
//!     '-------------+-------------'
//!                   v
//!                 task
//!       DependencySpec, Orchestrator
//!                   |
//!                   v
//!                 tools
//!         git / cmake / build steps
//!
//!   +-----------------------------------------+
//!   |  core   process, env                    |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod task;
pub mod version;
