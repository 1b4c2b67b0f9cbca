use std::path::{Path, PathBuf};

use crate::{
    domain::{
        config_map::ConfigMap,
        settings::{SpectrometerSettings, REQUIRED_KEYS, SPECTROMETER_SECTION},
    },
    infra::{error::AppError, ini_store},
};

const OUTPUT_INI_SUFFIX: &str = ".spec.ini";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTemplate {
    pub path: PathBuf,
    /// Raw entries, including keys the launcher does not model.
    pub entries: ConfigMap,
    pub settings: SpectrometerSettings,
}

/// Reads a template INI and checks it carries every required setting.
pub fn load_template(path: &Path) -> Result<LoadedTemplate, AppError> {
    let entries = ini_store::read_config(path).map_err(|source| AppError::TemplateUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    check_required(&entries, path)?;
    let settings = SpectrometerSettings::from_config_map(&entries)?;
    tracing::info!(path = %path.display(), "template loaded");

    Ok(LoadedTemplate {
        path: path.to_path_buf(),
        entries,
        settings,
    })
}

/// Validates an INI file without converting it.
pub fn validate_file(path: &Path) -> Result<ConfigMap, AppError> {
    let entries = ini_store::read_config(path).map_err(|source| AppError::TemplateUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    check_required(&entries, path)?;

    Ok(entries)
}

/// Writes a starter template with default settings.
pub fn init_template(path: &Path) -> Result<(), AppError> {
    let map = SpectrometerSettings::default().to_config_map();
    ini_store::write_config(&map, SPECTROMETER_SECTION, path)?;
    tracing::info!(path = %path.display(), "template written");

    Ok(())
}

/// Output INI placed next to the input recording: `<input>.spec.ini`.
pub fn suggested_output_ini(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(OUTPUT_INI_SUFFIX);
    PathBuf::from(name)
}

pub(crate) fn check_required(entries: &ConfigMap, path: &Path) -> Result<(), AppError> {
    ini_store::validate_required(entries, REQUIRED_KEYS).map_err(|source| AppError::MissingKeys {
        path: path.to_path_buf(),
        source,
    })
}
