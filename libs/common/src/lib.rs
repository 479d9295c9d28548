//! Shared plumbing for the alarm inventory tools
//!
//! Provides the pieces every binary needs before it touches the core:
//! - logging initialisation (stderr, bracketed levels)
//! - layered configuration loading (defaults, file, environment)

pub mod config_loader;
pub mod logging;

pub use config_loader::load_layered;
pub use logging::init_cli_logging;
