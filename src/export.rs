//! Spreadsheet-compatible export of the aggregate report and the raw entry
//! snapshot.
//!
//! Both writers emit CSV to any `io::Write`, so tests exercise them against
//! byte buffers and the binary points them at files. Cell layout is
//! deliberately plain: one row per date (or entry), money to two decimals,
//! empty cells for absent figures, grand totals in a footer.

use crate::{
    config::AppConfig,
    core::{entry, report, report::SeasonReport},
    entities::entry::Model as EntryModel,
    errors::Result,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the per-date aggregate report with a grand-total footer.
pub fn write_report_csv<W: Write>(writer: W, season: &SeasonReport) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "date",
        "gross_total",
        "day_over_day",
        "per_person_share",
        "tax_total",
    ])?;

    for day in &season.days {
        csv_writer.write_record([
            day.date.to_string(),
            format!("{:.2}", day.gross_total),
            day.day_over_day_diff
                .map_or_else(String::new, |diff| format!("{diff:.2}")),
            day.per_person_share
                .map_or_else(String::new, |share| format!("{share:.2}")),
            format!("{:.2}", day.tax_total),
        ])?;
    }

    csv_writer.write_record(["", "", "", "", ""])?;
    csv_writer.write_record([
        "TOTAL".to_string(),
        format!("{:.2}", season.grand_gross_total),
        String::new(),
        String::new(),
        format!("{:.2}", season.grand_tax_total),
    ])?;
    csv_writer.write_record([
        "NET".to_string(),
        format!("{:.2}", season.net_total),
        String::new(),
        String::new(),
        String::new(),
    ])?;

    csv_writer.flush()?;
    Ok(())
}

/// Writes the bulk snapshot of every entry, raw and derived fields alike.
pub fn write_snapshot_csv<W: Write>(writer: W, entries: &[EntryModel]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "date",
        "worker",
        "opening_balance",
        "cash_income",
        "beer_count",
        "soft_drink_count",
        "food_count",
        "tax_adjustment",
        "cash_withdrawn",
        "derived_total",
        "derived_closing_balance",
        "locked",
    ])?;

    for entry in entries {
        csv_writer.write_record([
            entry.date.to_string(),
            entry.worker.clone(),
            format!("{:.2}", entry.opening_balance),
            format!("{:.2}", entry.cash_income),
            entry.beer_count.to_string(),
            entry.soft_drink_count.to_string(),
            entry.food_count.to_string(),
            format!("{:.2}", entry.tax_adjustment),
            format!("{:.2}", entry.cash_withdrawn),
            format!("{:.2}", entry.derived_total),
            format!("{:.2}", entry.derived_closing_balance),
            entry.locked.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Exports both files into `dir` with date-stamped names and returns their
/// paths: the aggregate report and the raw snapshot.
pub async fn export_to_dir(
    db: &DatabaseConnection,
    config: &AppConfig,
    dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;
    let stamp = Utc::now().date_naive().to_string();

    let season = report::season_report(db, config).await?;
    let report_path = dir.join(format!("report_{stamp}.csv"));
    write_report_csv(std::fs::File::create(&report_path)?, &season)?;

    let entries = entry::all_entries(db).await?;
    let snapshot_path = dir.join(format!("entries_{stamp}.csv"));
    write_snapshot_csv(std::fs::File::create(&snapshot_path)?, &entries)?;

    info!(
        "Exported {} report rows and {} entries to {}",
        season.days.len(),
        entries.len(),
        dir.display()
    );
    Ok((report_path, snapshot_path))
}
