// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test utilities for tool and orchestrator tests.
//!
//! `RecordingRunner` stands in for real processes; `run_with_logs` captures
//! tracing output for dry-run assertions.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use futures_util::future::BoxFuture;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use super::CommandRunner;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{FetchResult, ProcessError};

/// One command seen by [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub command: String,
    pub cwd: Option<PathBuf>,
}

/// Records every command instead of running it.
///
/// A command whose line contains the configured fragment fails with
/// `CommandFailed`, like a non-zero exit would.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Mutex<Vec<RecordedCommand>>,
    fail_on: Option<String>,
    create_dirs: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails any command containing `fragment`.
    pub fn failing_on(fragment: impl Into<String>) -> Self {
        Self {
            fail_on: Some(fragment.into()),
            ..Self::default()
        }
    }

    /// Mimics `git clone` by creating the last argument as a directory.
    pub fn creating_clone_dirs(mut self) -> Self {
        self.create_dirs = true;
        self
    }

    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.commands
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.commands().into_iter().map(|c| c.command).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn run<'a>(&'a self, process: ProcessBuilder) -> BoxFuture<'a, FetchResult<()>> {
        Box::pin(async move {
            let command = process.command_line();
            if let Ok(mut guard) = self.commands.lock() {
                guard.push(RecordedCommand {
                    command: command.clone(),
                    cwd: process.working_dir().map(PathBuf::from),
                });
            }

            if let Some(fragment) = &self.fail_on
                && command.contains(fragment.as_str())
            {
                return Err(ProcessError::CommandFailed {
                    command,
                    cause: "exited with code 1".to_string(),
                }
                .into());
            }

            if self.create_dirs
                && process.args_slice().first().is_some_and(|a| a == "clone")
                && let Some(target) = process.args_slice().last()
            {
                let _ = std::fs::create_dir_all(target);
            }
            Ok(())
        })
    }
}

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs an async closure while capturing tracing output.
///
/// Returns the captured log output as a string.
pub async fn run_with_logs<F, Fut>(f: F) -> Result<String>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferMakeWriter {
            buffer: buffer.clone(),
        })
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .finish();

    let _guard = tracing::subscriber::set_default(subscriber);
    f().await?;

    let guard = buffer
        .lock()
        .map_err(|_| anyhow::anyhow!("log buffer poisoned"))?;
    Ok(String::from_utf8_lossy(&guard).to_string())
}
