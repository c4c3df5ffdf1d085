//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases, a fixed test
//! configuration matching the season setup, and entry fixtures with sensible
//! defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    config::{AppConfig, DateWindow, Prices, WorkerConfig},
    core::derivation::EntryInput,
    core::entry::EntryValues,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for building a calendar date in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A production-mode configuration with a six-worker roster, the season
/// windows (data 2025-09-20..2025-10-06, edit through 2025-10-07), and the
/// standard prices.
pub fn test_config() -> AppConfig {
    let workers = [
        ("Florian", "flo-secret"),
        ("Jonas", "jonas-secret"),
        ("Julia", "julia-secret"),
        ("Regina", "regina-secret"),
        ("Schorsch", "schorsch-secret"),
        ("Toni", "toni-secret"),
    ]
    .into_iter()
    .map(|(name, secret)| WorkerConfig {
        name: name.to_string(),
        unlock_secret: secret.to_string(),
    })
    .collect();

    AppConfig {
        prices: Prices {
            beer: 14.01,
            soft_drink: 6.10,
            food: 22.30,
        },
        workers,
        admin_password: "admin-pw".to_string(),
        demo_mode: false,
        data_window: DateWindow {
            start: date(2025, 9, 20),
            end: date(2025, 10, 6),
        },
        edit_window: DateWindow {
            start: date(2025, 9, 20),
            end: date(2025, 10, 7),
        },
    }
}

/// The same configuration with demo mode switched on.
pub fn demo_config() -> AppConfig {
    AppConfig {
        demo_mode: true,
        ..test_config()
    }
}

/// Store-level entry values with everything zeroed and unlocked. Tests set
/// the fields they care about.
pub fn sample_values(entry_date: NaiveDate, worker: &str) -> EntryValues {
    EntryValues {
        date: entry_date,
        worker: worker.to_string(),
        opening_balance: 0.0,
        cash_income: 0.0,
        beer_count: 0,
        soft_drink_count: 0,
        food_count: 0,
        tax_adjustment: 0.0,
        cash_withdrawn: 0.0,
        derived_total: 0.0,
        derived_closing_balance: 0.0,
        locked: false,
    }
}

/// An all-zero operator input with no submitted opening balance.
pub fn sample_input() -> EntryInput {
    EntryInput::default()
}
