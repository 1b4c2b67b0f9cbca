use std::path::PathBuf;

use crate::domain::config_map::ConfigMap;

pub const LAUNCHER_STATE_SECTION: &str = "SpectrometerGUI";

const LAST_TEMPLATE_INI: &str = "LastTemplateINI";
const LAST_INPUT1: &str = "LastInput1";
const LAST_OUTPUT_INI: &str = "LastOutputINI";
const LAST_PID: &str = "LastPid";

/// What the launcher remembers between invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherState {
    pub last_template_ini: Option<PathBuf>,
    pub last_input1: Option<PathBuf>,
    pub last_output_ini: Option<PathBuf>,
    pub last_pid: Option<u32>,
}

impl LauncherState {
    pub fn from_config_map(map: &ConfigMap) -> Self {
        let path = |key: &str| {
            map.get(key)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        Self {
            last_template_ini: path(LAST_TEMPLATE_INI),
            last_input1: path(LAST_INPUT1),
            last_output_ini: path(LAST_OUTPUT_INI),
            last_pid: map.get(LAST_PID).and_then(|value| value.parse().ok()),
        }
    }

    pub fn to_config_map(&self) -> ConfigMap {
        let mut map = ConfigMap::new();
        let entries = [
            (LAST_TEMPLATE_INI, &self.last_template_ini),
            (LAST_INPUT1, &self.last_input1),
            (LAST_OUTPUT_INI, &self.last_output_ini),
        ];
        for (key, path) in entries {
            if let Some(path) = path {
                map.set(key, path.to_string_lossy());
            }
        }
        if let Some(pid) = self.last_pid {
            map.set(LAST_PID, pid.to_string());
        }
        map
    }
}
