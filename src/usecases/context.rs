use std::path::PathBuf;

use crate::infra::config::AppConfig;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub state_file: PathBuf,
}

impl AppContext {
    pub fn new(config: AppConfig, state_file: PathBuf) -> Self {
        Self { config, state_file }
    }
}
