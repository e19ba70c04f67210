// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process and environment management.
//!
//! ```text
//!        core
//!         |
//!     +---+-----+
//!     v         v
//!    env     process
//!     |         |
//!    Env    ProcessBuilder
//!           (which)
//! ```

pub mod env;
pub mod process;
