//! Entry store - persistence operations for reconciliation entries.
//!
//! One row per (date, worker), enforced by a unique index. A missing key is a
//! normal empty result (`Ok(None)`), never an error surfaced to the caller.
//! Concurrent writers to the same key serialize at the database; the
//! application-level lock flag is the real concurrency guard.

use crate::{
    entities::{Entry, entry},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use tracing::debug;

/// Full field set written on an upsert. Derived figures arrive precomputed
/// from the lifecycle; the store never computes anything itself.
#[derive(Debug, Clone)]
pub struct EntryValues {
    /// Business day being reconciled
    pub date: NaiveDate,
    /// Owning worker
    pub worker: String,
    /// Opening balance after carry-forward resolution
    pub opening_balance: f64,
    /// Loose cash taken in during the day
    pub cash_income: f64,
    /// Beer units sold
    pub beer_count: i32,
    /// Soft drink units sold
    pub soft_drink_count: i32,
    /// Food units sold
    pub food_count: i32,
    /// Tax adjustment after the weekday gate
    pub tax_adjustment: f64,
    /// Cash removed from the till
    pub cash_withdrawn: f64,
    /// Computed gross total
    pub derived_total: f64,
    /// Computed closing balance
    pub derived_closing_balance: f64,
    /// Lock flag to persist
    pub locked: bool,
}

/// Fetches the entry for (date, worker), `Ok(None)` when absent.
pub async fn get_entry(
    db: &DatabaseConnection,
    date: NaiveDate,
    worker: &str,
) -> Result<Option<entry::Model>> {
    Entry::find()
        .filter(entry::Column::Date.eq(date))
        .filter(entry::Column::Worker.eq(worker))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts or fully updates the entry for (date, worker).
///
/// All fields are replaced on update; the uniqueness invariant guarantees at
/// most one row per key, so the prior row (if any) is looked up by key.
pub async fn upsert_entry(db: &DatabaseConnection, values: EntryValues) -> Result<entry::Model> {
    let existing = get_entry(db, values.date, &values.worker).await?;

    match existing {
        Some(model) => {
            let mut active: entry::ActiveModel = model.into();
            active.opening_balance = Set(values.opening_balance);
            active.cash_income = Set(values.cash_income);
            active.beer_count = Set(values.beer_count);
            active.soft_drink_count = Set(values.soft_drink_count);
            active.food_count = Set(values.food_count);
            active.tax_adjustment = Set(values.tax_adjustment);
            active.cash_withdrawn = Set(values.cash_withdrawn);
            active.derived_total = Set(values.derived_total);
            active.derived_closing_balance = Set(values.derived_closing_balance);
            active.locked = Set(values.locked);
            active.update(db).await.map_err(Into::into)
        }
        None => {
            let active = entry::ActiveModel {
                date: Set(values.date),
                worker: Set(values.worker),
                opening_balance: Set(values.opening_balance),
                cash_income: Set(values.cash_income),
                beer_count: Set(values.beer_count),
                soft_drink_count: Set(values.soft_drink_count),
                food_count: Set(values.food_count),
                tax_adjustment: Set(values.tax_adjustment),
                cash_withdrawn: Set(values.cash_withdrawn),
                derived_total: Set(values.derived_total),
                derived_closing_balance: Set(values.derived_closing_balance),
                locked: Set(values.locked),
                ..Default::default()
            };
            active.insert(db).await.map_err(Into::into)
        }
    }
}

/// Flips only the lock flag of an existing entry.
///
/// # Errors
/// `EntryNotFound` when no entry exists for the key.
pub async fn set_locked(
    db: &DatabaseConnection,
    date: NaiveDate,
    worker: &str,
    locked: bool,
) -> Result<()> {
    let model = get_entry(db, date, worker)
        .await?
        .ok_or_else(|| Error::EntryNotFound {
            date,
            worker: worker.to_string(),
        })?;

    let mut active: entry::ActiveModel = model.into();
    active.locked = Set(locked);
    active.update(db).await?;

    debug!("Set locked={} for {} on {}", locked, worker, date);
    Ok(())
}

/// Per-date sums of the derived total and the tax adjustment, ascending by
/// date. An empty store yields an empty sequence.
pub async fn aggregate_by_date(db: &DatabaseConnection) -> Result<Vec<(NaiveDate, f64, f64)>> {
    Entry::find()
        .select_only()
        .column(entry::Column::Date)
        .column_as(entry::Column::DerivedTotal.sum(), "total")
        .column_as(entry::Column::TaxAdjustment.sum(), "tax")
        .group_by(entry::Column::Date)
        .order_by_asc(entry::Column::Date)
        .into_tuple()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Bulk snapshot of every entry, ordered by (date, worker), for export.
pub async fn all_entries(db: &DatabaseConnection) -> Result<Vec<entry::Model>> {
    Entry::find()
        .order_by_asc(entry::Column::Date)
        .order_by_asc(entry::Column::Worker)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes every entry and returns the number of rows removed. Only the
/// demo-mode transition calls this.
pub async fn wipe_all_entries(db: &DatabaseConnection) -> Result<u64> {
    let result = Entry::delete_many().exec(db).await?;
    Ok(result.rows_affected)
}
