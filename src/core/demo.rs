//! Demo-mode transition handling.
//!
//! Rehearsal data must never survive into production. The mode the process
//! last ran in is persisted in `system_state`; when a process configured for
//! production finds that the previous run was in demo mode, every entry is
//! wiped and the wipe is written to the audit log. This is an explicit
//! administrative operation invoked once at startup, never a side effect of
//! a read path.

use crate::{
    config::AppConfig,
    core::entry,
    entities::{SystemState, system_state},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set, prelude::*};
use tracing::{info, warn};

const DEMO_MODE_KEY: &str = "demo_mode";

/// Compares the persisted demo-mode flag with the configured one, wipes all
/// entries on the demo-to-production edge, and records the current mode.
///
/// Returns `Some(wiped_row_count)` when the wipe fired, `None` otherwise.
pub async fn apply_mode_transition(
    db: &DatabaseConnection,
    config: &AppConfig,
) -> Result<Option<u64>> {
    let previous_was_demo = persisted_demo_mode(db).await?.unwrap_or(false);

    let wiped = if previous_was_demo && !config.demo_mode {
        let count = entry::wipe_all_entries(db).await?;
        warn!(
            "Demo-to-production transition: wiped {} rehearsal entr{}",
            count,
            if count == 1 { "y" } else { "ies" }
        );
        Some(count)
    } else {
        None
    };

    set_persisted_demo_mode(db, config.demo_mode).await?;
    info!(
        "Recorded current mode: {}",
        if config.demo_mode { "demo" } else { "production" }
    );
    Ok(wiped)
}

/// Reads the persisted demo-mode flag, `Ok(None)` when never recorded.
pub async fn persisted_demo_mode(db: &DatabaseConnection) -> Result<Option<bool>> {
    let state = SystemState::find()
        .filter(system_state::Column::Key.eq(DEMO_MODE_KEY))
        .one(db)
        .await?;
    Ok(state.map(|s| s.value == "1"))
}

async fn set_persisted_demo_mode(db: &DatabaseConnection, demo_mode: bool) -> Result<()> {
    let value = if demo_mode { "1" } else { "0" };
    let now = Utc::now().naive_utc();

    let existing = SystemState::find()
        .filter(system_state::Column::Key.eq(DEMO_MODE_KEY))
        .one(db)
        .await?;

    if let Some(state) = existing {
        let mut active: system_state::ActiveModel = state.into();
        active.value = Set(value.to_string());
        active.updated_at = Set(now);
        active.update(db).await?;
    } else {
        let state = system_state::ActiveModel {
            key: Set(DEMO_MODE_KEY.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        state.insert(db).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::entry::upsert_entry;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_first_run_records_mode_without_wipe() -> Result<()> {
        let db = setup_test_db().await?;
        let config = test_config();

        assert!(persisted_demo_mode(&db).await?.is_none());
        let wiped = apply_mode_transition(&db, &config).await?;
        assert_eq!(wiped, None);
        assert_eq!(persisted_demo_mode(&db).await?, Some(false));
        Ok(())
    }

    #[tokio::test]
    async fn test_demo_to_production_wipes_entries() -> Result<()> {
        let db = setup_test_db().await?;

        // A demo run leaves rehearsal data behind
        apply_mode_transition(&db, &demo_config()).await?;
        upsert_entry(&db, sample_values(date(2025, 9, 21), "Florian")).await?;
        upsert_entry(&db, sample_values(date(2025, 9, 21), "Jonas")).await?;

        // Next start in production mode wipes it
        let wiped = apply_mode_transition(&db, &test_config()).await?;
        assert_eq!(wiped, Some(2));
        assert!(crate::core::entry::all_entries(&db).await?.is_empty());
        assert_eq!(persisted_demo_mode(&db).await?, Some(false));
        Ok(())
    }

    #[tokio::test]
    async fn test_production_to_production_keeps_entries() -> Result<()> {
        let db = setup_test_db().await?;
        let config = test_config();

        apply_mode_transition(&db, &config).await?;
        upsert_entry(&db, sample_values(date(2025, 9, 21), "Florian")).await?;

        let wiped = apply_mode_transition(&db, &config).await?;
        assert_eq!(wiped, None);
        assert_eq!(crate::core::entry::all_entries(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_demo_to_demo_keeps_entries() -> Result<()> {
        let db = setup_test_db().await?;
        let config = demo_config();

        apply_mode_transition(&db, &config).await?;
        upsert_entry(&db, sample_values(date(2025, 9, 21), "Florian")).await?;

        let wiped = apply_mode_transition(&db, &config).await?;
        assert_eq!(wiped, None);
        assert_eq!(crate::core::entry::all_entries(&db).await?.len(), 1);
        assert_eq!(persisted_demo_mode(&db).await?, Some(true));
        Ok(())
    }
}
