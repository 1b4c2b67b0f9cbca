use std::path::PathBuf;

use thiserror::Error;

use crate::domain::settings::SettingsError;

#[derive(Debug, Error)]
pub enum IniStoreError {
    #[error("could not open INI file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read INI file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write INI file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IniStoreError {
    pub fn is_file_open(&self) -> bool {
        matches!(self, Self::FileOpen { .. })
    }
}

/// Required keys absent from a configuration, in the order they were required.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("INI lacks required keys: {}", .keys.join(", "))]
pub struct MissingKeys {
    pub keys: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to initialize logging: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("unable to resolve storage path: {details}")]
    StoragePathResolution { details: String },
    #[error("failed to create storage directory {path}: {source}")]
    StorageDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template {path} does not exist or contains no INI keys")]
    TemplateUnavailable {
        path: PathBuf,
        #[source]
        source: IniStoreError,
    },
    #[error(transparent)]
    IniStore(#[from] IniStoreError),
    #[error("{path}: {source}")]
    MissingKeys {
        path: PathBuf,
        #[source]
        source: MissingKeys,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("input or output files not specified (input file and BaseFilename1 are required)")]
    MissingInputOrOutput,
    #[error("could not launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not interrupt {process_name}: {details}")]
    Interrupt {
        process_name: String,
        details: String,
    },
}
