// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of `bump-version`.

use clap::Parser;
use std::path::PathBuf;

use crate::version::DEFAULT_VERSION_FILE;

/// Increments the patch number of a `MAJOR.MINOR.PATCH` version file and
/// prints the new version.
#[derive(Debug, Clone, Parser)]
#[command(name = "bump-version", author, version)]
pub struct BumpCli {
    /// Version file to rewrite in place.
    #[arg(short = 'f', long = "file", value_name = "FILE", default_value = DEFAULT_VERSION_FILE)]
    pub file: PathBuf,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,
}
