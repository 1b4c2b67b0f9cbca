use std::path::Path;

use crate::{
    infra::{self, error::AppError, storage_layout::StorageLayout},
    usecases::context::AppContext,
};

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let context = build_context(config_path)?;
    infra::logging::init(&context.config.logging)?;
    tracing::debug!(state_file = %context.state_file.display(), "context ready");

    Ok(context)
}

fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config = infra::config::load(config_path)?;

    let layout = StorageLayout::resolve()?;
    layout.ensure_dirs()?;

    Ok(AppContext::new(config, layout.state_file()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{env_lock, EnvVarGuard};

    #[test]
    fn builds_context_with_defaults_and_creates_state_dir() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().expect("tempdir");
        let _xdg = EnvVarGuard::set("XDG_CONFIG_HOME", dir.path());

        let context = build_context(Some(Path::new("./missing-config.toml")))
            .expect("context should build from defaults");

        assert_eq!(context.config, crate::infra::config::AppConfig::default());
        assert!(dir.path().join("specctl").is_dir());
        assert_eq!(
            context.state_file,
            dir.path().join("specctl").join("specctl.ini")
        );
    }
}
