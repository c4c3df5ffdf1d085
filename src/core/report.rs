//! Aggregation and reporting over saved entries.
//!
//! The admin view and the export both consume a [`SeasonReport`]: per-date
//! gross totals across all workers, day-over-day differences, the per-person
//! share of each difference, and grand totals. The per-person divisor is the
//! fixed configured roster size, deliberately not the number of workers who
//! actually logged an entry that day. Tax is subtracted from the grand total
//! only, never from the per-entry or per-day gross figures.

use crate::{config::AppConfig, core::entry, errors::Result};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Aggregate figures for one business day across all workers.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    /// The business day
    pub date: NaiveDate,
    /// Sum of every worker's derived total for the day
    pub gross_total: f64,
    /// Sum of every worker's tax adjustment for the day
    pub tax_total: f64,
    /// `gross_total - previous day's gross_total`; absent on the first day
    pub day_over_day_diff: Option<f64>,
    /// `day_over_day_diff / roster_size`; absent when the diff is absent
    pub per_person_share: Option<f64>,
}

/// The full aggregate report: one row per date plus grand totals.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonReport {
    /// Per-date rows, ascending by date
    pub days: Vec<DailyAggregate>,
    /// Sum of `gross_total` over all dates
    pub grand_gross_total: f64,
    /// Sum of `tax_total` over all dates
    pub grand_tax_total: f64,
    /// `grand_gross_total - grand_tax_total`
    pub net_total: f64,
}

/// Builds a report from per-date (gross, tax) sums, assumed ascending by
/// date. An empty input yields an empty report with zero totals.
#[must_use]
pub fn build_report(rows: &[(NaiveDate, f64, f64)], roster_size: usize) -> SeasonReport {
    let mut days = Vec::with_capacity(rows.len());
    let mut previous_gross: Option<f64> = None;
    let mut grand_gross_total = 0.0;
    let mut grand_tax_total = 0.0;

    for &(date, gross_total, tax_total) in rows {
        let day_over_day_diff = previous_gross.map(|prev| gross_total - prev);
        let per_person_share = match (day_over_day_diff, roster_size) {
            (Some(_), 0) => None,
            #[allow(clippy::cast_precision_loss)]
            (Some(diff), n) => Some(diff / n as f64),
            (None, _) => None,
        };

        grand_gross_total += gross_total;
        grand_tax_total += tax_total;
        previous_gross = Some(gross_total);

        days.push(DailyAggregate {
            date,
            gross_total,
            tax_total,
            day_over_day_diff,
            per_person_share,
        });
    }

    SeasonReport {
        days,
        grand_gross_total,
        grand_tax_total,
        net_total: grand_gross_total - grand_tax_total,
    }
}

/// Reads the per-date sums from the store and builds the report.
pub async fn season_report(db: &DatabaseConnection, config: &AppConfig) -> Result<SeasonReport> {
    let rows = entry::aggregate_by_date(db).await?;
    Ok(build_report(&rows, config.roster_size()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_day_over_day_and_shares() {
        // Known totals [100, 150, 130] with roster size 6
        let rows = vec![
            (date(2025, 9, 20), 100.0, 0.0),
            (date(2025, 9, 21), 150.0, 0.0),
            (date(2025, 9, 22), 130.0, 0.0),
        ];
        let report = build_report(&rows, 6);

        assert_eq!(report.days.len(), 3);
        assert_eq!(report.days[0].day_over_day_diff, None);
        assert_eq!(report.days[0].per_person_share, None);
        assert_eq!(report.days[1].day_over_day_diff, Some(50.0));
        assert_eq!(report.days[2].day_over_day_diff, Some(-20.0));

        // Shares to 2 decimals: 8.33 and -3.33
        assert!((report.days[1].per_person_share.unwrap() - 8.33).abs() < 0.005);
        assert!((report.days[2].per_person_share.unwrap() - (-3.33)).abs() < 0.005);
    }

    #[test]
    fn test_grand_totals_and_net() {
        let rows = vec![
            (date(2025, 9, 24), 200.0, 30.0),
            (date(2025, 9, 25), 100.0, 0.0),
        ];
        let report = build_report(&rows, 6);

        assert_eq!(report.grand_gross_total, 300.0);
        assert_eq!(report.grand_tax_total, 30.0);
        assert_eq!(report.net_total, 270.0);
        // Tax is not subtracted from the per-day gross figures
        assert_eq!(report.days[0].gross_total, 200.0);
    }

    #[test]
    fn test_empty_report() {
        let report = build_report(&[], 6);
        assert!(report.days.is_empty());
        assert_eq!(report.grand_gross_total, 0.0);
        assert_eq!(report.grand_tax_total, 0.0);
        assert_eq!(report.net_total, 0.0);
    }

    #[test]
    fn test_zero_roster_yields_no_share() {
        let rows = vec![(date(2025, 9, 20), 100.0, 0.0), (date(2025, 9, 21), 150.0, 0.0)];
        let report = build_report(&rows, 0);
        assert_eq!(report.days[1].day_over_day_diff, Some(50.0));
        assert_eq!(report.days[1].per_person_share, None);
    }

    #[tokio::test]
    async fn test_season_report_reads_store() -> Result<()> {
        let db = setup_test_db().await?;
        let config = test_config();

        let mut v = sample_values(date(2025, 9, 20), "Florian");
        v.derived_total = 60.0;
        crate::core::entry::upsert_entry(&db, v).await?;

        let mut v = sample_values(date(2025, 9, 20), "Jonas");
        v.derived_total = 40.0;
        crate::core::entry::upsert_entry(&db, v).await?;

        let mut v = sample_values(date(2025, 9, 21), "Florian");
        v.derived_total = 150.0;
        crate::core::entry::upsert_entry(&db, v).await?;

        let report = season_report(&db, &config).await?;
        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].gross_total, 100.0);
        assert_eq!(report.days[1].day_over_day_diff, Some(50.0));
        assert_eq!(report.grand_gross_total, 250.0);
        Ok(())
    }
}
