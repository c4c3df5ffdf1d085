//! Entry lifecycle - the save/lock/unlock state machine.
//!
//! An entry moves `absent -> saved (locked) -> unlocked -> saved (locked)`.
//! A successful save always freezes the row; re-opening it takes an explicit
//! authenticated unlock, either with the owning worker's personal secret or
//! with the administrator password. This is what prevents accidental
//! double-entry once a day's numbers are submitted, while still allowing a
//! deliberate correction.
//!
//! Every operation takes the caller's [`Identity`] explicitly; nothing here
//! reads session state.

use crate::{
    config::AppConfig,
    core::derivation::{self, EntryInput},
    core::entry::{self, EntryValues},
    entities::entry::Model as EntryModel,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

/// The authenticated caller of a core operation, as supplied by the external
/// session layer. The core trusts this value; it performs no login itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// A shift worker, identified by roster name
    Worker(String),
    /// The administrator role
    Administrator,
}

/// Creates or updates the entry for (`date`, the calling worker) and locks it.
///
/// Preconditions, all checked before any mutation:
/// - the identity is a roster worker (the administrator may unlock entries
///   but never edits raw fields);
/// - outside demo mode, `date` lies in the data-entry window and `today` lies
///   in the edit window;
/// - no locked entry exists for the key.
///
/// The opening balance is resolved per the carry-forward rule, both derived
/// figures are recomputed from the raw inputs, and the row is written with
/// `locked = true`.
pub async fn save_entry(
    db: &DatabaseConnection,
    config: &AppConfig,
    identity: &Identity,
    date: NaiveDate,
    today: NaiveDate,
    input: EntryInput,
) -> Result<EntryModel> {
    let worker = match identity {
        Identity::Worker(name) => name.as_str(),
        Identity::Administrator => {
            warn!("Administrator attempted to edit entry fields for {}", date);
            return Err(Error::AuthenticationFailed);
        }
    };

    if !config.is_on_roster(worker) {
        return Err(Error::UnknownWorker {
            name: worker.to_string(),
        });
    }

    if !config.demo_mode {
        if !config.data_window.contains(date) {
            info!("Rejected save for {} on {}: outside data window", worker, date);
            return Err(Error::WindowClosed { date });
        }
        if !config.edit_window.contains(today) {
            info!("Rejected save for {} on {}: edit window closed", worker, date);
            return Err(Error::WindowClosed { date: today });
        }
    }

    let existing = entry::get_entry(db, date, worker).await?;
    if let Some(ref model) = existing {
        if model.locked {
            info!("Rejected save for {} on {}: entry is locked", worker, date);
            return Err(Error::AlreadyLocked {
                date,
                worker: worker.to_string(),
            });
        }
    }

    let opening_balance =
        resolve_opening_balance(db, config, date, worker, input.opening_balance, existing.as_ref())
            .await?;
    let tax_adjustment = derivation::effective_tax_adjustment(date, input.tax_adjustment);
    let derived = derivation::derive_totals(&config.prices, &input);

    let saved = entry::upsert_entry(
        db,
        EntryValues {
            date,
            worker: worker.to_string(),
            opening_balance,
            cash_income: input.cash_income,
            beer_count: input.beer_count,
            soft_drink_count: input.soft_drink_count,
            food_count: input.food_count,
            tax_adjustment,
            cash_withdrawn: input.cash_withdrawn,
            derived_total: derived.gross_total,
            derived_closing_balance: derived.closing_balance,
            locked: true,
        },
    )
    .await?;

    info!(
        "Saved and locked entry for {} on {} (total {:.2})",
        worker, date, saved.derived_total
    );
    Ok(saved)
}

/// Resolves the opening balance for a save:
/// - a re-save of an existing (unlocked) row may override it, and keeps the
///   stored value when nothing was submitted;
/// - on the first window day, and anywhere in demo mode, it is
///   operator-supplied;
/// - otherwise it defaults to the same worker's prior-day closing balance,
///   zero when no prior entry exists.
async fn resolve_opening_balance(
    db: &DatabaseConnection,
    config: &AppConfig,
    date: NaiveDate,
    worker: &str,
    submitted: Option<f64>,
    existing: Option<&EntryModel>,
) -> Result<f64> {
    if let Some(model) = existing {
        return Ok(submitted.unwrap_or(model.opening_balance));
    }
    if config.demo_mode || date == config.data_window.start {
        return Ok(submitted.unwrap_or(0.0));
    }
    let prior = match date.pred_opt() {
        Some(prior_date) => entry::get_entry(db, prior_date, worker).await?,
        None => None,
    };
    Ok(prior.map_or(0.0, |model| model.derived_closing_balance))
}

/// Re-opens a locked entry after credential verification.
///
/// A worker may unlock only their own entry, with their configured personal
/// secret; the administrator may unlock any entry with the admin password.
/// Success flips `locked` to false and changes nothing else. Failure leaves
/// the entry untouched and reveals nothing about the expected credential.
pub async fn unlock_entry(
    db: &DatabaseConnection,
    config: &AppConfig,
    identity: &Identity,
    date: NaiveDate,
    worker: &str,
    credential: &str,
) -> Result<()> {
    let existing = entry::get_entry(db, date, worker).await?;
    if existing.is_none() {
        return Err(Error::EntryNotFound {
            date,
            worker: worker.to_string(),
        });
    }

    let authorized = match identity {
        Identity::Worker(name) => {
            name == worker && config.unlock_secret_for(name) == Some(credential)
        }
        Identity::Administrator => credential == config.admin_password,
    };
    if !authorized {
        warn!("Failed unlock attempt for {} on {}", worker, date);
        return Err(Error::AuthenticationFailed);
    }

    entry::set_locked(db, date, worker, false).await?;
    info!("Unlocked entry for {} on {} via {}", worker, date, identity_kind(identity));
    Ok(())
}

fn identity_kind(identity: &Identity) -> &'static str {
    match identity {
        Identity::Worker(_) => "worker secret",
        Identity::Administrator => "admin password",
    }
}

/// Reads the current entry for (date, worker) regardless of lock state.
pub async fn get_entry(
    db: &DatabaseConnection,
    date: NaiveDate,
    worker: &str,
) -> Result<Option<EntryModel>> {
    entry::get_entry(db, date, worker).await
}
