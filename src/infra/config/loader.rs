use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

const DEFAULT_CONFIG_PATH: &str = "specctl.toml";

pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = AppConfig::default();

    if !config_path.exists() {
        return Ok(config);
    }

    let raw = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;

    let file_config: FileConfig = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: config_path,
        source,
    })?;

    file_config.merge_into(&mut config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_defaults_when_file_is_missing() {
        let config = load(Some(Path::new("./missing-config.toml"))).expect("config must load");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn merges_file_values_over_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("specctl.toml");

        fs::write(
            &config_path,
            r#"[logging]
level = "debug"

[spectrometer]
executable = "/opt/spec/bin/swspectrometer"
script_wrapper = ""
"#,
        )
        .expect("must write test config");

        let config = load(Some(&config_path)).expect("config must load");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.spectrometer.executable,
            PathBuf::from("/opt/spec/bin/swspectrometer")
        );
        assert_eq!(config.spectrometer.script_wrapper, None);
        assert_eq!(
            config.spectrometer.default_output_ini,
            PathBuf::from("inifile.ini")
        );
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("broken.toml");
        fs::write(&config_path, "[spectrometer]\nexecutable = 5\n").expect("must write");

        let error = load(Some(&config_path)).expect_err("must fail");

        assert!(matches!(error, AppError::ConfigParse { ref path, .. } if *path == config_path));
    }
}
