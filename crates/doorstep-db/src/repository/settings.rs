//! # Shipping Settings Repository
//!
//! SQLite persistence for the shipping-settings singleton, implementing the
//! `SettingsRepository` contract from doorstep-session.
//!
//! ## Storage Shape
//! A single row with `id = 1`, enforced by a CHECK constraint. A missing row
//! means "never configured" and reads as the documented defaults; the first
//! save creates it.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use doorstep_core::ShippingSettings;
use doorstep_session::{PersistenceError, SettingsRepository, StoreResult};

use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    fee_cents: i64,
    free_threshold_cents: i64,
    enabled: bool,
}

/// SQLite-backed shipping-settings repository.
#[derive(Debug, Clone)]
pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    /// Creates a new SqliteSettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteSettingsRepository { pool }
    }

    async fn load(&self) -> DbResult<ShippingSettings> {
        let row: Option<SettingsRow> = sqlx::query_as(
            "SELECT fee_cents, free_threshold_cents, enabled FROM shipping_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(match row {
            Some(row) => ShippingSettings {
                fee_cents: row.fee_cents,
                free_threshold_cents: row.free_threshold_cents,
                enabled: row.enabled,
            },
            None => ShippingSettings::default(),
        })
    }

    async fn save(&self, settings: &ShippingSettings) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO shipping_settings (id, fee_cents, free_threshold_cents, enabled)
            VALUES (1, ?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                fee_cents = excluded.fee_cents,
                free_threshold_cents = excluded.free_threshold_cents,
                enabled = excluded.enabled
            "#,
        )
        .bind(settings.fee_cents)
        .bind(settings.free_threshold_cents)
        .bind(settings.enabled)
        .execute(&self.pool)
        .await?;

        debug!(
            fee_cents = settings.fee_cents,
            free_threshold_cents = settings.free_threshold_cents,
            enabled = settings.enabled,
            "Saved shipping settings"
        );
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn load_shipping_settings(&self) -> StoreResult<ShippingSettings> {
        self.load().await.map_err(PersistenceError::from)
    }

    async fn save_shipping_settings(&self, settings: &ShippingSettings) -> StoreResult<()> {
        self.save(settings).await.map_err(PersistenceError::from)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_defaults_when_never_configured() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let settings = db.settings().load_shipping_settings().await.unwrap();
        assert_eq!(settings, ShippingSettings::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();

        let wanted = ShippingSettings {
            fee_cents: 300,
            free_threshold_cents: 3000,
            enabled: true,
        };
        repo.save_shipping_settings(&wanted).await.unwrap();
        assert_eq!(repo.load_shipping_settings().await.unwrap(), wanted);

        // Second save overwrites the singleton row
        let changed = ShippingSettings {
            fee_cents: 0,
            free_threshold_cents: 0,
            enabled: false,
        };
        repo.save_shipping_settings(&changed).await.unwrap();
        assert_eq!(repo.load_shipping_settings().await.unwrap(), changed);
    }
}
