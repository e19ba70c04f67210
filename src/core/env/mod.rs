// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management for child processes.
//!
//! ```text
//! current_env() --> Env (BTreeMap<String, String>)
//!   set/get/remove/prepend_path
//!   ProcessBuilder::env(env) replaces the child environment wholesale
//! ```

pub mod container;


/// Captures the current process environment.
#[must_use]
pub fn current_env() -> container::Env {
    container::Env::from_map(std::env::vars().collect())
}
