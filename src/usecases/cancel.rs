use crate::{
    infra::{
        contracts::{ProcessHandle, ProcessLauncher},
        error::AppError,
    },
    usecases::{context::AppContext, state::load_state},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    Interrupted { pid: u32, process_name: String },
    NotRunning,
}

/// Interrupts the spectrometer started by the last run, if it is still alive.
pub fn cancel_run(
    context: &AppContext,
    launcher: &mut dyn ProcessLauncher,
) -> Result<CancelOutcome, AppError> {
    let state = load_state(&context.state_file)?;

    let Some(handle) = state.last_pid.map(|pid| ProcessHandle { pid }) else {
        tracing::info!("no spectrometer run recorded");
        return Ok(CancelOutcome::NotRunning);
    };

    if !launcher.is_running(&handle) {
        tracing::info!(pid = handle.pid, "spectrometer is not running");
        return Ok(CancelOutcome::NotRunning);
    }

    // A pid left over from an earlier boot may belong to something else now.
    let process_name = context.config.spectrometer.process_name();
    if !launcher.interrupt(&process_name)? {
        tracing::info!(pid = handle.pid, process_name = %process_name, "recorded pid is alive but no spectrometer is");
        return Ok(CancelOutcome::NotRunning);
    }
    tracing::info!(pid = handle.pid, process_name = %process_name, "spectrometer interrupted");

    Ok(CancelOutcome::Interrupted {
        pid: handle.pid,
        process_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::launcher_state::LauncherState,
        infra::{config::AppConfig, stubs::RecordingLauncher},
        usecases::state::save_state,
    };

    fn context_with_pid(dir: &std::path::Path, pid: Option<u32>) -> AppContext {
        let context = AppContext::new(AppConfig::default(), dir.join("specctl.ini"));
        let state = LauncherState {
            last_pid: pid,
            ..LauncherState::default()
        };
        save_state(&state, &context.state_file).expect("state fixture");
        context
    }

    #[test]
    fn interrupts_running_spectrometer_by_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let context = context_with_pid(dir.path(), Some(4242));
        let mut launcher = RecordingLauncher::with_running(&[4242]);

        let outcome = cancel_run(&context, &mut launcher).expect("cancel");

        assert_eq!(
            outcome,
            CancelOutcome::Interrupted {
                pid: 4242,
                process_name: "swspectrometer".to_owned()
            }
        );
        assert_eq!(launcher.interrupted, ["swspectrometer"]);
    }

    #[test]
    fn stale_pid_without_matching_spectrometer_is_not_running() {
        let dir = tempfile::tempdir().expect("tempdir");
        let context = context_with_pid(dir.path(), Some(4242));
        let mut launcher = RecordingLauncher::with_running(&[4242]);
        launcher.name_mismatch = true;

        let outcome = cancel_run(&context, &mut launcher).expect("cancel");

        assert_eq!(outcome, CancelOutcome::NotRunning);
        assert_eq!(launcher.interrupted, ["swspectrometer"]);
    }

    #[test]
    fn exited_process_is_not_interrupted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let context = context_with_pid(dir.path(), Some(4242));
        let mut launcher = RecordingLauncher::default();

        let outcome = cancel_run(&context, &mut launcher).expect("cancel");

        assert_eq!(outcome, CancelOutcome::NotRunning);
        assert!(launcher.interrupted.is_empty());
    }

    #[test]
    fn nothing_to_cancel_without_recorded_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let context = AppContext::new(AppConfig::default(), dir.path().join("specctl.ini"));
        let mut launcher = RecordingLauncher::with_running(&[1]);

        let outcome = cancel_run(&context, &mut launcher).expect("cancel");

        assert_eq!(outcome, CancelOutcome::NotRunning);
        assert!(launcher.interrupted.is_empty());
    }
}
