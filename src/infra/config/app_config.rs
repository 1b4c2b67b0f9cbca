use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub spectrometer: SpectrometerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpectrometerConfig {
    pub executable: PathBuf,
    /// Transcript wrapper (`script`); `None` launches the executable directly.
    pub script_wrapper: Option<PathBuf>,
    pub default_output_ini: PathBuf,
}

impl Default for SpectrometerConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("/usr/local/bin/swspectrometer"),
            script_wrapper: Some(PathBuf::from("/usr/bin/script")),
            default_output_ini: PathBuf::from("inifile.ini"),
        }
    }
}

impl SpectrometerConfig {
    /// Name `killall` matches against when cancelling a run.
    pub fn process_name(&self) -> String {
        self.executable
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.executable.to_string_lossy().into_owned())
    }
}
