/// Database connection and table creation
pub mod database;

/// Settings loading and validation from config.toml
pub mod settings;

pub use settings::{AppConfig, DateWindow, Prices, WorkerConfig};

/// Loads the validated application configuration from the default location.
///
/// # Errors
/// Returns `Error::Config` when the settings file is missing, malformed, or
/// fails validation; callers should treat this as fatal at startup.
pub fn load_app_configuration() -> crate::errors::Result<AppConfig> {
    settings::load_default_config()
}
