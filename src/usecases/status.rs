use crate::{
    domain::launcher_state::LauncherState,
    infra::{
        contracts::{ProcessHandle, ProcessLauncher},
        error::AppError,
    },
    usecases::{context::AppContext, state::load_state},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub state: LauncherState,
    pub running: bool,
}

impl StatusReport {
    pub fn lines(&self) -> Vec<String> {
        let path_line = |label: &str, path: &Option<std::path::PathBuf>| match path {
            Some(path) => format!("{label}: {}", path.display()),
            None => format!("{label}: -"),
        };

        let run_line = match (self.state.last_pid, self.running) {
            (Some(pid), true) => format!("spectrometer: running (pid {pid})"),
            (Some(pid), false) => format!("spectrometer: not running (last pid {pid})"),
            (None, _) => "spectrometer: never started".to_owned(),
        };

        vec![
            path_line("last template", &self.state.last_template_ini),
            path_line("last input", &self.state.last_input1),
            path_line("last output INI", &self.state.last_output_ini),
            run_line,
        ]
    }
}

pub fn status(
    context: &AppContext,
    launcher: &dyn ProcessLauncher,
) -> Result<StatusReport, AppError> {
    let state = load_state(&context.state_file)?;
    let running = state
        .last_pid
        .is_some_and(|pid| launcher.is_running(&ProcessHandle { pid }));

    Ok(StatusReport { state, running })
}
