//! Subprocess execution
//!
//! A [`Launcher`] runs one command line to completion and returns its
//! captured standard output. [`fan_out`] runs many of them on a bounded
//! pool of scoped worker threads and joins them all before returning.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use log::debug;

use crate::core::command::CommandLine;
use crate::core::errors::{BenchError, Result};

/// Default cap on concurrently running subprocesses
pub const DEFAULT_MAX_WORKERS: usize = 64;

/// Runs a command line and captures what it prints
pub trait Launcher: Sync {
    /// Run `command` to completion and return its standard output
    fn launch(&self, command: &CommandLine) -> Result<String>;
}

/// Launches real OS processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, command: &CommandLine) -> Result<String> {
        debug!("Command to execute : {}", command);

        let stdin = if command.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| BenchError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let lost = |source: std::io::Error| BenchError::Communicate {
            command: command.to_string(),
            source,
        };

        if let (Some(input), Some(mut pipe)) = (&command.stdin, child.stdin.take()) {
            match pipe.write_all(input.as_bytes()) {
                Ok(()) => {}
                // The exit status decides whether an early close was a failure
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("{} closed its standard input early", command);
                }
                Err(e) => {
                    // Reap the child before giving up on it
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(lost(e));
                }
            }
        }

        let output = child.wait_with_output().map_err(lost)?;
        if !output.status.success() {
            return Err(BenchError::ExitStatus {
                command: command.to_string(),
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Run every command concurrently, at most `max_workers` at a time
///
/// Outputs are returned in the order of `commands`. All commands run to
/// completion before the first failure (in command order) is returned.
pub fn fan_out<L: Launcher + ?Sized>(
    launcher: &L,
    commands: &[CommandLine],
    max_workers: usize,
) -> Result<Vec<String>> {
    if commands.is_empty() {
        return Ok(Vec::new());
    }

    let workers = max_workers.clamp(1, commands.len());
    let next = AtomicUsize::new(0);

    let joined: Vec<thread::Result<Vec<(usize, Result<String>)>>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut finished = Vec::new();
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(command) = commands.get(index) else {
                            break;
                        };
                        finished.push((index, launcher.launch(command)));
                    }
                    finished
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join()).collect()
    });

    let mut slots: Vec<Option<Result<String>>> = commands.iter().map(|_| None).collect();
    for worker in joined {
        let finished = worker.map_err(|_| BenchError::WorkerPanicked)?;
        for (index, outcome) in finished {
            slots[index] = Some(outcome);
        }
    }

    debug!("Finished all {} processes on {} workers", commands.len(), workers);

    slots
        .into_iter()
        .map(|slot| slot.ok_or(BenchError::WorkerPanicked)?)
        .collect()
}
