use crate::infra::{
    contracts::{ProcessHandle, ProcessLauncher},
    error::AppError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedProcess {
    pub command: String,
    pub args: Vec<String>,
}

/// Launcher that records requests instead of touching the OS.
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    pub started: Vec<StartedProcess>,
    pub interrupted: Vec<String>,
    pub running_pids: Vec<u32>,
    /// Recorded pids look alive but no process carries the expected name.
    pub name_mismatch: bool,
    next_pid: u32,
}

impl RecordingLauncher {
    pub fn with_running(pids: &[u32]) -> Self {
        Self {
            running_pids: pids.to_vec(),
            ..Self::default()
        }
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn start(&mut self, command: &str, args: &[String]) -> Result<ProcessHandle, AppError> {
        self.next_pid += 1;
        let pid = 1000 + self.next_pid;
        self.started.push(StartedProcess {
            command: command.to_owned(),
            args: args.to_vec(),
        });
        self.running_pids.push(pid);

        Ok(ProcessHandle { pid })
    }

    fn is_running(&self, handle: &ProcessHandle) -> bool {
        self.running_pids.contains(&handle.pid)
    }

    fn interrupt(&mut self, process_name: &str) -> Result<bool, AppError> {
        self.interrupted.push(process_name.to_owned());
        if self.name_mismatch {
            return Ok(false);
        }
        let matched = !self.running_pids.is_empty();
        self.running_pids.clear();
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_launcher_tracks_liveness_until_interrupted() {
        let mut launcher = RecordingLauncher::default();

        let handle = launcher
            .start("swspectrometer", &["a.ini".to_owned()])
            .expect("stub start never fails");
        assert!(launcher.is_running(&handle));

        let matched = launcher
            .interrupt("swspectrometer")
            .expect("stub interrupt never fails");

        assert!(matched);

        assert!(!launcher.is_running(&handle));
        assert_eq!(launcher.interrupted, ["swspectrometer"]);
    }
}
