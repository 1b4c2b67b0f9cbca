use crate::infra::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    pub pid: u32,
}

/// OS capability for starting and stopping the spectrometer.
pub trait ProcessLauncher {
    fn start(&mut self, command: &str, args: &[String]) -> Result<ProcessHandle, AppError>;
    fn is_running(&self, handle: &ProcessHandle) -> bool;
    /// Signals every process named `process_name`; `Ok(false)` when none matched.
    fn interrupt(&mut self, process_name: &str) -> Result<bool, AppError>;
}
