//! Infrastructure layer: INI persistence, config, logging, and OS process control.

pub mod config;
pub mod contracts;
pub mod error;
pub mod ini_store;
pub mod logging;
pub mod process;
pub mod storage_layout;
#[cfg(test)]
pub mod stubs;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
