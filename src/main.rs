//! Administrative binary: prints the aggregate report or exports CSV files.
//!
//! The web presentation layer lives elsewhere and consumes the library; this
//! binary covers the admin-side tasks that need no server.

use std::env;
use std::path::Path;

use dotenvy::dotenv;
use tent_ledger::config;
use tent_ledger::core::{demo, report};
use tent_ledger::errors::Result;
use tent_ledger::export;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load application configuration: {}", e))?;
    info!(
        "Configuration loaded: {} workers on the roster, demo_mode={}",
        app_config.roster_size(),
        app_config.demo_mode
    );

    // 4. Connect to the database and ensure tables exist
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;

    // 5. Apply the demo-mode transition before anything reads entries
    demo::apply_mode_transition(&db, &app_config).await?;

    // 6. Dispatch the admin command
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("report") => {
            let season = report::season_report(&db, &app_config).await?;
            print_report(&season);
        }
        Some("export") => {
            let dir = args.get(1).map_or("export", String::as_str);
            let (report_path, snapshot_path) =
                export::export_to_dir(&db, &app_config, Path::new(dir)).await?;
            println!("Wrote {}", report_path.display());
            println!("Wrote {}", snapshot_path.display());
        }
        Some(other) => {
            eprintln!("Unknown command: {other}");
            eprintln!("Usage: tent-ledger [report | export <dir>]");
        }
    }

    Ok(())
}

fn print_report(season: &report::SeasonReport) {
    println!(
        "{:<12} {:>12} {:>12} {:>12} {:>10}",
        "date", "gross", "day diff", "per person", "tax"
    );
    for day in &season.days {
        println!(
            "{:<12} {:>12.2} {:>12} {:>12} {:>10.2}",
            day.date.to_string(),
            day.gross_total,
            day.day_over_day_diff
                .map_or_else(|| "-".to_string(), |diff| format!("{diff:.2}")),
            day.per_person_share
                .map_or_else(|| "-".to_string(), |share| format!("{share:.2}")),
            day.tax_total,
        );
    }
    println!();
    println!("Gross total: {:.2}", season.grand_gross_total);
    println!("Tax total:   {:.2}", season.grand_tax_total);
    println!("Net total:   {:.2}", season.net_total);
}
