//! Domain layer: settings records and the flat key/value map they travel in.

pub mod config_map;
pub mod launcher_state;
pub mod settings;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
