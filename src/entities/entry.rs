//! Entry entity - One worker's reconciliation record for one business day.
//!
//! Raw inputs (cash figures, unit counts) live next to the two derived
//! figures, which are recomputed on every save and never accepted as input.
//! The `locked` flag freezes the row until an explicit authenticated unlock.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Business day being reconciled
    pub date: Date,
    /// Roster name of the worker who owns this entry
    pub worker: String,
    /// Cash carried in at the start of the day (audit figure, not part of the total)
    pub opening_balance: f64,
    /// Loose cash taken in during the day
    pub cash_income: f64,
    /// Beer units sold
    pub beer_count: i32,
    /// Soft drink units sold
    pub soft_drink_count: i32,
    /// Food units sold
    pub food_count: i32,
    /// Mid-week tax figure; zero on every weekday except Wednesday
    pub tax_adjustment: f64,
    /// Cash physically removed from the till during the day
    pub cash_withdrawn: f64,
    /// Computed gross total for the day
    pub derived_total: f64,
    /// Computed `derived_total - cash_withdrawn`
    pub derived_closing_balance: f64,
    /// When true, the entry is immutable except via the unlock transition
    pub locked: bool,
}

/// Entries stand alone; uniqueness of (date, worker) is enforced by an index
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
