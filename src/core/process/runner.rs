// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run()
//!   |
//!   v
//! resolved_program()   bare name --> which (cached)
//!   |                \
//!   |                 not on PATH --> CommandFailed
//!   v
//! build_command()      args, cwd, env, inherited stdout/stderr
//!   |
//!   v
//! status()             (awaited to completion)
//!   |            \
//!   |             launch error --> CommandFailed
//!   v
//! exit code != 0 --> CommandFailed
//! ```

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::ProcessBuilder;
use crate::error::{FetchResult, ProcessError};

impl ProcessBuilder {
    /// Spawns the process and waits for it to exit.
    ///
    /// Output goes straight to the caller's stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::CommandFailed` carrying the command line if the
    /// program is not found, cannot be launched, exits with a non-zero status,
    /// or is killed by a signal.
    pub async fn run(self) -> FetchResult<()> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        let program = self.resolved_program()?;
        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, program = %program.display(), "exec");

        let status = self
            .build_command(&program)
            .status()
            .await
            .map_err(|e| ProcessError::CommandFailed {
                command: cmd_line.clone(),
                cause: format!("failed to launch: {e}"),
            })?;

        if !status.success() {
            return Err(ProcessError::CommandFailed {
                command: cmd_line,
                cause: describe_exit(status),
            }
            .into());
        }

        trace!(process = %name, "completed");
        Ok(())
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self, program: &Path) -> Command {
        let mut command = Command::new(program);
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        if let Some(env) = self.environment() {
            command.env_clear();
            command.envs(env.iter());
        }

        command
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command.kill_on_drop(true);
        command
    }
}

fn describe_exit(status: ExitStatus) -> String {
    status.code().map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exited with code {code}"),
    )
}
