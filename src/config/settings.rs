//! Application settings loading from config.toml
//!
//! All business constants live here: per-unit prices, the ordered worker
//! roster with personal unlock secrets, the admin password, the two calendar
//! windows, and the demo-mode flag. Settings are parsed and validated once at
//! startup into an immutable [`AppConfig`] that is passed by reference into
//! the core; nothing in the business logic reads ambient configuration.

use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

/// Per-unit prices for the fixed product categories, fixed at config time.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Prices {
    /// Price of one beer
    pub beer: f64,
    /// Price of one soft drink
    pub soft_drink: f64,
    /// Price of one food item
    pub food: f64,
}

/// One roster worker and their personal unlock secret.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Roster name, as used in entry ownership
    pub name: String,
    /// Secret that re-opens this worker's own locked entries
    pub unlock_secret: String,
}

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy)]
pub struct DateWindow {
    /// First permitted date
    pub start: NaiveDate,
    /// Last permitted date
    pub end: NaiveDate,
}

impl DateWindow {
    /// Whether `date` falls inside the window (inclusive on both ends).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Validated, immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Per-unit prices used by the derivation engine
    pub prices: Prices,
    /// Ordered roster of workers; its length is the per-person-share divisor
    pub workers: Vec<WorkerConfig>,
    /// Administrator password, valid for unlocking any worker's entry
    pub admin_password: String,
    /// When true, both calendar windows are bypassed entirely
    pub demo_mode: bool,
    /// Business dates for which entries may exist in production mode
    pub data_window: DateWindow,
    /// Range of *today's* date during which any editing is permitted
    pub edit_window: DateWindow,
}

impl AppConfig {
    /// Fixed roster size used as the per-person-share divisor. This is a
    /// business constant, not a count of workers who logged an entry.
    #[must_use]
    pub fn roster_size(&self) -> usize {
        self.workers.len()
    }

    /// Whether `name` appears on the configured roster.
    #[must_use]
    pub fn is_on_roster(&self, name: &str) -> bool {
        self.workers.iter().any(|w| w.name == name)
    }

    /// The personal unlock secret for `name`, if on the roster.
    #[must_use]
    pub fn unlock_secret_for(&self, name: &str) -> Option<&str> {
        self.workers
            .iter()
            .find(|w| w.name == name)
            .map(|w| w.unlock_secret.as_str())
    }
}

/// Raw shape of config.toml before validation.
#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    demo_mode: bool,
    prices: Prices,
    windows: WindowsSection,
    admin: AdminSection,
    workers: Vec<WorkerConfig>,
}

#[derive(Debug, Deserialize)]
struct WindowsSection {
    data_start: String,
    data_end: String,
    edit_start: String,
    edit_end: String,
}

#[derive(Debug, Deserialize)]
struct AdminSection {
    password: String,
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| Error::Config {
        message: format!("invalid date for {field}: {value} ({e})"),
    })
}

fn parse_window(name: &str, start: &str, end: &str) -> Result<DateWindow> {
    let window = DateWindow {
        start: parse_date(&format!("{name}_start"), start)?,
        end: parse_date(&format!("{name}_end"), end)?,
    };
    if window.start > window.end {
        return Err(Error::Config {
            message: format!("{name} window starts after it ends"),
        });
    }
    Ok(window)
}

/// Parses and validates settings from TOML text.
fn parse_settings(contents: &str) -> Result<AppConfig> {
    let raw: SettingsFile = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("failed to parse config.toml: {e}"),
    })?;

    let config = AppConfig {
        prices: raw.prices,
        workers: raw.workers,
        admin_password: raw.admin.password,
        demo_mode: raw.demo_mode,
        data_window: parse_window("data", &raw.windows.data_start, &raw.windows.data_end)?,
        edit_window: parse_window("edit", &raw.windows.edit_start, &raw.windows.edit_end)?,
    };
    validate(&config)?;
    Ok(config)
}

/// Loads and validates application settings from a TOML file.
///
/// `DEMO_MODE=1` in the environment overrides the file's `demo_mode` flag,
/// so a deployment can be switched to production without editing the file.
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read, the TOML is invalid,
/// or any validation rule fails. Startup should abort on any of these.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("failed to read config file: {e}"),
    })?;

    let mut config = parse_settings(&contents)?;
    if let Ok(value) = std::env::var("DEMO_MODE") {
        config.demo_mode = value == "1";
    }
    Ok(config)
}

/// Loads settings from the default location (./config.toml), overridable via
/// the `CONFIG_PATH` environment variable.
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}

fn validate(config: &AppConfig) -> Result<()> {
    if config.workers.is_empty() {
        return Err(Error::Config {
            message: "worker roster must not be empty".to_string(),
        });
    }
    for worker in &config.workers {
        if worker.name.trim().is_empty() {
            return Err(Error::Config {
                message: "worker name must not be empty".to_string(),
            });
        }
        if worker.unlock_secret.is_empty() {
            return Err(Error::Config {
                message: format!("worker {} has an empty unlock secret", worker.name),
            });
        }
    }
    let mut names: Vec<&str> = config.workers.iter().map(|w| w.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    if names.len() != config.workers.len() {
        return Err(Error::Config {
            message: "worker roster contains duplicate names".to_string(),
        });
    }
    if config.admin_password.is_empty() {
        return Err(Error::Config {
            message: "admin password must not be empty".to_string(),
        });
    }
    for (label, price) in [
        ("beer", config.prices.beer),
        ("soft_drink", config.prices.soft_drink),
        ("food", config.prices.food),
    ] {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::Config {
                message: format!("price for {label} must be a non-negative number"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn base_toml() -> String {
        r#"
            demo_mode = false

            [prices]
            beer = 14.01
            soft_drink = 6.10
            food = 22.30

            [windows]
            data_start = "2025-09-20"
            data_end = "2025-10-06"
            edit_start = "2025-09-20"
            edit_end = "2025-10-07"

            [admin]
            password = "hunter2"

            [[workers]]
            name = "Florian"
            unlock_secret = "flo-secret"

            [[workers]]
            name = "Jonas"
            unlock_secret = "jonas-secret"
        "#
        .to_string()
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_settings(&base_toml()).unwrap();
        assert_eq!(config.roster_size(), 2);
        assert_eq!(config.prices.beer, 14.01);
        assert!(!config.demo_mode);
        assert_eq!(
            config.data_window.start,
            NaiveDate::from_ymd_opt(2025, 9, 20).unwrap()
        );
        assert_eq!(
            config.edit_window.end,
            NaiveDate::from_ymd_opt(2025, 10, 7).unwrap()
        );
    }

    #[test]
    fn test_roster_lookups() {
        let config = parse_settings(&base_toml()).unwrap();
        assert!(config.is_on_roster("Florian"));
        assert!(!config.is_on_roster("Mallory"));
        assert_eq!(config.unlock_secret_for("Jonas"), Some("jonas-secret"));
        assert_eq!(config.unlock_secret_for("Mallory"), None);
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let config = parse_settings(&base_toml()).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        assert!(config.data_window.contains(start));
        assert!(config.data_window.contains(end));
        assert!(!config.data_window.contains(start.pred_opt().unwrap()));
        assert!(!config.data_window.contains(end.succ_opt().unwrap()));
    }

    #[test]
    fn test_rejects_inverted_window() {
        let toml_str = base_toml().replace("data_end = \"2025-10-06\"", "data_end = \"2025-09-01\"");
        let result = parse_settings(&toml_str);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_malformed_date() {
        let toml_str = base_toml().replace("2025-09-20", "20.09.2025");
        let result = parse_settings(&toml_str);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_empty_roster() {
        let mut toml_str = base_toml();
        toml_str.truncate(toml_str.find("[[workers]]").unwrap());
        let result = parse_settings(&toml_str);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_duplicate_worker_names() {
        let toml_str = base_toml().replace("name = \"Jonas\"", "name = \"Florian\"");
        let result = parse_settings(&toml_str);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_negative_price() {
        let toml_str = base_toml().replace("beer = 14.01", "beer = -1.0");
        let result = parse_settings(&toml_str);
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
