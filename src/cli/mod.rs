// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! fetch-build [global options] [--show-config | --show-inis]
//! bump-version [--file FILE] [--log-level N]
//! ```

pub mod bump;
pub mod global;


use crate::cli::global::GlobalOptions;
use clap::Parser;

/// Fetches and builds third-party dependencies, then builds the project.
#[derive(Debug, Parser)]
#[command(
    name = "fetch-build",
    author,
    version,
    about = "Dependency fetch-and-build orchestrator",
    long_about = "Clones each dependency that is missing from externallib/, checks out\n\
                  its pinned revision and runs its build steps, then configures and\n\
                  compiles the main project in build/.\n\n\
                  Run it from the project root, or point --root at it; every\n\
                  directory above is relative to that root.\n\n\
                  A dependency whose directory already exists is skipped, even if the\n\
                  directory is empty. Delete it to fetch and build it again.",
    after_help = "CONFIG FILES:\n\n\
                  fetchbuild.toml in the current directory is loaded if present.\n\
                  Additional files can be given with --ini. FETCHBUILD_SECTION__KEY\n\
                  environment variables override both, and command-line flags\n\
                  override everything."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Prints the resolved configuration and exits.
    #[arg(long = "show-config")]
    pub show_config: bool,

    /// Prints the configuration files that were loaded and exits.
    #[arg(long = "show-inis")]
    pub show_inis: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
