//! Derivation engine - pure computation of the two per-entry totals.
//!
//! Given the config-time unit prices, the gross total is the loose cash plus
//! the weighted unit counts; the closing balance subtracts the cash withdrawn
//! from the till. The opening balance is deliberately *not* part of the gross
//! total: it is carried per entry as a continuity/audit figure only. The tax
//! adjustment is likewise tracked per entry and only subtracted at the
//! aggregate report level.

use crate::config::Prices;
use chrono::{Datelike, NaiveDate, Weekday};

/// Raw operator inputs for one save, after lenient numeric coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryInput {
    /// Opening balance, when the operator may supply one (first window day,
    /// demo mode, or a re-save after unlock). `None` means "use the default".
    pub opening_balance: Option<f64>,
    /// Loose cash taken in during the day
    pub cash_income: f64,
    /// Beer units sold
    pub beer_count: i32,
    /// Soft drink units sold
    pub soft_drink_count: i32,
    /// Food units sold
    pub food_count: i32,
    /// Submitted tax figure; zeroed by the weekday gate off-Wednesday
    pub tax_adjustment: f64,
    /// Cash removed from the till during the day
    pub cash_withdrawn: f64,
}

impl EntryInput {
    /// Builds an input from raw form field values as received from the
    /// presentation layer. Absent or malformed numeric values coerce to zero
    /// rather than erroring; this lenient behavior is load-bearing for the
    /// end-to-end contract and must not be replaced with strict validation.
    #[must_use]
    pub fn from_form(
        opening_balance: Option<&str>,
        cash_income: Option<&str>,
        beer_count: Option<&str>,
        soft_drink_count: Option<&str>,
        food_count: Option<&str>,
        tax_adjustment: Option<&str>,
        cash_withdrawn: Option<&str>,
    ) -> Self {
        Self {
            opening_balance: opening_balance.map(|raw| parse_cash_field(Some(raw))),
            cash_income: parse_cash_field(cash_income),
            beer_count: parse_count_field(beer_count),
            soft_drink_count: parse_count_field(soft_drink_count),
            food_count: parse_count_field(food_count),
            tax_adjustment: parse_cash_field(tax_adjustment),
            cash_withdrawn: parse_cash_field(cash_withdrawn),
        }
    }
}

/// The two computed per-entry figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedTotals {
    /// Gross value generated that day
    pub gross_total: f64,
    /// `gross_total - cash_withdrawn`
    pub closing_balance: f64,
}

/// Computes both derived figures from the raw inputs and the fixed prices.
#[must_use]
pub fn derive_totals(prices: &Prices, input: &EntryInput) -> DerivedTotals {
    let gross_total = input.cash_income
        + f64::from(input.beer_count) * prices.beer
        + f64::from(input.soft_drink_count) * prices.soft_drink
        + f64::from(input.food_count) * prices.food;

    DerivedTotals {
        gross_total,
        closing_balance: gross_total - input.cash_withdrawn,
    }
}

/// Applies the weekday gate: the tax adjustment is only meaningful on a
/// Wednesday and is forced to zero on every other weekday, regardless of
/// what was submitted.
#[must_use]
pub fn effective_tax_adjustment(date: NaiveDate, submitted: f64) -> f64 {
    if date.weekday() == Weekday::Wed {
        submitted
    } else {
        0.0
    }
}

/// Parses a cash form field, coercing absence or garbage to `0.0`.
#[must_use]
pub fn parse_cash_field(raw: Option<&str>) -> f64 {
    let parsed = raw
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    // NaN/infinity from exotic form input would poison every downstream sum
    if parsed.is_finite() { parsed } else { 0.0 }
}

/// Parses a unit-count form field, coercing absence, garbage, or negative
/// counts to `0`.
#[must_use]
pub fn parse_count_field(raw: Option<&str>) -> i32 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<i32>().ok())
        .filter(|n| *n >= 0)
        .unwrap_or(0)
}
