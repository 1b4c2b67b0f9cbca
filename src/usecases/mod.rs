//! Use case layer: template loading, launching, and cancelling spectrometer runs.

pub mod bootstrap;
pub mod cancel;
pub mod context;
pub mod launch;
pub mod state;
pub mod status;
pub mod template;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
