use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::{
    domain::{
        launcher_state::LauncherState,
        settings::{SpectrometerSettings, NO_SECOND_OUTPUT, REQUIRED_KEYS, SPECTROMETER_SECTION},
    },
    infra::{config::SpectrometerConfig, contracts::ProcessLauncher, error::AppError, ini_store},
    usecases::{
        context::AppContext,
        state::{load_state, save_state},
        template::{load_template, suggested_output_ini},
    },
};

const LOG_TIMESTAMP_FORMAT: &str = "%Yy%mm%dd-%Hh%Mm%Ss";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    pub template: Option<PathBuf>,
    pub input1: Option<PathBuf>,
    pub input2: Option<PathBuf>,
    pub output_ini: Option<PathBuf>,
    pub overrides: Vec<(String, String)>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Transcript written by the `script` wrapper, if one is used.
    pub log_file: Option<PathBuf>,
}

impl LaunchCommand {
    pub fn display_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub output_ini: PathBuf,
    pub command: LaunchCommand,
    /// `None` for dry runs.
    pub pid: Option<u32>,
}

/// Writes the spectrometer INI, remembers the paths, and starts the executable.
///
/// The INI is written before the input paths are checked, so a refused
/// launch still leaves the chosen settings on disk.
pub fn run_spectrometer(
    context: &AppContext,
    request: &RunRequest,
    launcher: &mut dyn ProcessLauncher,
    now: DateTime<Utc>,
) -> Result<RunOutcome, AppError> {
    let mut state = load_state(&context.state_file)?;

    let mut settings = initial_settings(request.template.as_deref(), &state)?;
    for (key, value) in &request.overrides {
        settings.apply_override(key, value)?;
    }
    settings.base_filename2 = NO_SECOND_OUTPUT.to_owned();

    let input1 = request
        .input1
        .clone()
        .or_else(|| state.last_input1.clone())
        .filter(|path| !path.as_os_str().is_empty());

    let output_ini = request
        .output_ini
        .clone()
        .or_else(|| input1.as_deref().map(suggested_output_ini))
        .unwrap_or_else(|| context.config.spectrometer.default_output_ini.clone());

    let map = settings.to_config_map();
    ini_store::validate_required(&map, REQUIRED_KEYS).map_err(|source| {
        AppError::MissingKeys {
            path: output_ini.clone(),
            source,
        }
    })?;
    ini_store::write_config(&map, SPECTROMETER_SECTION, &output_ini)?;
    tracing::info!(path = %output_ini.display(), "spectrometer INI written");

    let Some(input1) = input1.filter(|_| !settings.base_filename1.is_empty()) else {
        return Err(AppError::MissingInputOrOutput);
    };

    state.last_output_ini = Some(output_ini.clone());
    state.last_input1 = Some(input1.clone());
    if let Some(template) = &request.template {
        state.last_template_ini = Some(template.clone());
    }
    save_state(&state, &context.state_file)?;

    let command = build_command(
        &context.config.spectrometer,
        &output_ini,
        &input1,
        request.input2.as_deref(),
        now,
    );
    tracing::info!(command = %command.display_line(), log_file = ?command.log_file, "launch command prepared");

    if request.dry_run {
        return Ok(RunOutcome {
            output_ini,
            command,
            pid: None,
        });
    }

    let handle = launcher.start(&command.program, &command.args)?;
    state.last_pid = Some(handle.pid);
    save_state(&state, &context.state_file)?;

    Ok(RunOutcome {
        output_ini,
        command,
        pid: Some(handle.pid),
    })
}

/// Builds the spectrometer invocation, wrapped in `script -a -c` when configured.
pub fn build_command(
    config: &SpectrometerConfig,
    ini: &Path,
    input1: &Path,
    input2: Option<&Path>,
    now: DateTime<Utc>,
) -> LaunchCommand {
    let mut spectrometer_args = vec![path_arg(ini), path_arg(input1)];
    if let Some(input2) = input2 {
        spectrometer_args.push(path_arg(input2));
    }
    let program = path_arg(&config.executable);

    let Some(wrapper) = &config.script_wrapper else {
        return LaunchCommand {
            program,
            args: spectrometer_args,
            log_file: None,
        };
    };

    let inner = LaunchCommand {
        program,
        args: spectrometer_args,
        log_file: None,
    };
    let log_file = PathBuf::from(transcript_name(input1, now));

    LaunchCommand {
        program: path_arg(wrapper),
        args: vec![
            "-a".to_owned(),
            "-c".to_owned(),
            inner.display_line(),
            path_arg(&log_file),
        ],
        log_file: Some(log_file),
    }
}

/// `<input basename><UTC timestamp>.log`, e.g. `scan.vdif2024y05m01d-12h00m00s.log`.
pub fn transcript_name(input: &Path, now: DateTime<Utc>) -> String {
    let base = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!("{base}{}.log", now.format(LOG_TIMESTAMP_FORMAT))
}

fn initial_settings(
    template: Option<&Path>,
    state: &LauncherState,
) -> Result<SpectrometerSettings, AppError> {
    if let Some(template) = template {
        return Ok(load_template(template)?.settings);
    }

    // Fall back to what was used last time; a stale or broken file only warns.
    let remembered = [&state.last_output_ini, &state.last_template_ini];
    for path in remembered.into_iter().flatten() {
        match load_template(path) {
            Ok(loaded) => return Ok(loaded.settings),
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "remembered INI unusable");
            }
        }
    }

    tracing::info!("no template given, using built-in defaults");
    Ok(SpectrometerSettings::default())
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || "-_./:=+,@%".contains(ch));

    if plain {
        word.to_owned()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
