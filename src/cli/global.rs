// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options of `fetch-build`.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --root DIR        ← paths.root override
//! --dry             ← Log commands, create nothing
//! --log-level N     ← Console verbosity (0-5)
//! --log-file FILE   ← global.log_file override
//!
//! Precedence: CLI flags > FETCHBUILD_* env > --ini > fetchbuild.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Options shared by every invocation.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files override earlier ones.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Project root containing externallib/ and build/ (default: current directory,
    /// so run from the project root or set this).
    #[arg(short = 'r', long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Logs every command instead of running it and creates no directories.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.log_level", config::Value::from(i64::from(level))));
        }

        if let Some(ref path) = self.log_file {
            overrides.push((
                "global.log_file",
                config::Value::from(path.display().to_string()),
            ));
        }

        if self.dry {
            overrides.push(("global.dry", config::Value::from(true)));
        }

        if let Some(ref root) = self.root {
            overrides.push(("paths.root", config::Value::from(root.display().to_string())));
        }

        overrides
    }
}
