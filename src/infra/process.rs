use std::process::{Command, Stdio};

use crate::infra::{
    contracts::{ProcessHandle, ProcessLauncher},
    error::AppError,
};

const KILLALL: &str = "killall";
/// `killall` exit code when no process matched the name.
const KILLALL_NO_MATCH: i32 = 1;

/// Launches real OS processes. Children are left running on their own and
/// are only reaped when their liveness is queried.
#[derive(Debug, Clone, Default)]
pub struct SystemProcessLauncher;

impl ProcessLauncher for SystemProcessLauncher {
    fn start(&mut self, command: &str, args: &[String]) -> Result<ProcessHandle, AppError> {
        let child = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| AppError::Launch {
                program: command.to_owned(),
                source,
            })?;

        let handle = ProcessHandle { pid: child.id() };
        tracing::info!(pid = handle.pid, command, ?args, "process started");
        Ok(handle)
    }

    fn is_running(&self, handle: &ProcessHandle) -> bool {
        let Ok(pid) = libc::pid_t::try_from(handle.pid) else {
            return false;
        };

        let mut status = 0;
        // SAFETY: waitpid with WNOHANG only inspects the child table and
        // writes into the local `status`.
        let reaped = unsafe { libc::waitpid(pid, &mut status, libc::WNOHANG) };
        match reaped {
            0 => true,
            r if r == pid => false,
            // Not our child (e.g. started by an earlier invocation): probe with signal 0.
            // SAFETY: signal 0 performs permission and existence checks only.
            _ => unsafe { libc::kill(pid, 0) == 0 },
        }
    }

    fn interrupt(&mut self, process_name: &str) -> Result<bool, AppError> {
        tracing::info!(process_name, "sending SIGINT via killall");
        let status = Command::new(KILLALL)
            .args(["-SIGINT", process_name])
            .status()
            .map_err(|source| AppError::Interrupt {
                process_name: process_name.to_owned(),
                details: source.to_string(),
            })?;

        match status.code() {
            Some(0) => Ok(true),
            Some(KILLALL_NO_MATCH) => {
                tracing::info!(process_name, "no process matched");
                Ok(false)
            }
            _ => Err(AppError::Interrupt {
                process_name: process_name.to_owned(),
                details: format!("{KILLALL} exited with {status}"),
            }),
        }
    }
}
