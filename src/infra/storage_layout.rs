use std::{env, fs, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "specctl";
const STATE_FILE_NAME: &str = "specctl.ini";

/// Where the launcher keeps its own memory between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub config_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let config_base = env::var_os("XDG_CONFIG_HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "unable to resolve config base directory (XDG_CONFIG_HOME/HOME)".into(),
            })?;

        Ok(Self {
            config_dir: config_base.join(APP_DIR_NAME),
        })
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.config_dir).map_err(|source| AppError::StorageDirCreate {
            path: self.config_dir.clone(),
            source,
        })
    }

    pub fn state_file(&self) -> PathBuf {
        self.config_dir.join(STATE_FILE_NAME)
    }
}
