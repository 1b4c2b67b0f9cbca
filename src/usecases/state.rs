use std::path::Path;

use crate::{
    domain::launcher_state::{LauncherState, LAUNCHER_STATE_SECTION},
    infra::{error::IniStoreError, ini_store},
};

/// Loads the launcher memory; a file that cannot be opened means a first run.
pub fn load_state(path: &Path) -> Result<LauncherState, IniStoreError> {
    match ini_store::read_config(path) {
        Ok(map) => Ok(LauncherState::from_config_map(&map)),
        Err(error) if error.is_file_open() => {
            tracing::debug!(path = %path.display(), "no launcher state yet, starting fresh");
            Ok(LauncherState::default())
        }
        Err(error) => Err(error),
    }
}

pub fn save_state(state: &LauncherState, path: &Path) -> Result<(), IniStoreError> {
    ini_store::write_config(&state.to_config_map(), LAUNCHER_STATE_SECTION, path)
}
