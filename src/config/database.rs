//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! struct definitions without manual SQL. The uniqueness of (date, worker) on
//! the entries table is enforced with a dedicated unique index created right
//! after the tables.

use crate::entities::{Entry, SystemState, entry};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/tent_ledger.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a default local file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions, plus
/// the unique (date, worker) index that backs the one-entry-per-day-per-worker
/// invariant.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut entry_table = schema.create_table_from_entity(Entry);
    entry_table.if_not_exists();
    db.execute(builder.build(&entry_table)).await?;

    let mut system_state_table = schema.create_table_from_entity(SystemState);
    system_state_table.if_not_exists();
    db.execute(builder.build(&system_state_table)).await?;

    let mut date_worker_index = Index::create();
    date_worker_index
        .name("idx_entries_date_worker")
        .table(Entry)
        .col(entry::Column::Date)
        .col(entry::Column::Worker)
        .unique()
        .if_not_exists();
    db.execute(builder.build(&date_worker_index)).await?;

    Ok(())
}
