// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! fetch-build  --> cmd::build   (load config, run orchestrator)
//!              --> cmd::config  (--show-config, --show-inis)
//! bump-version --> cmd::version
//! ```

pub mod build;
pub mod config;
pub mod version;
