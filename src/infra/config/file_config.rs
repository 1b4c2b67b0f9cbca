use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, LogConfig, SpectrometerConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub spectrometer: Option<FileSpectrometerConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(spectrometer) = self.spectrometer {
            spectrometer.merge_into(&mut config.spectrometer);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileSpectrometerConfig {
    pub executable: Option<PathBuf>,
    pub script_wrapper: Option<PathBuf>,
    pub default_output_ini: Option<PathBuf>,
}

impl FileSpectrometerConfig {
    fn merge_into(self, config: &mut SpectrometerConfig) {
        if let Some(executable) = self.executable {
            config.executable = executable;
        }

        // An empty wrapper path switches the transcript wrapper off.
        if let Some(wrapper) = self.script_wrapper {
            config.script_wrapper = (!wrapper.as_os_str().is_empty()).then_some(wrapper);
        }

        if let Some(default_output_ini) = self.default_output_ini {
            config.default_output_ini = default_output_ini;
        }
    }
}
