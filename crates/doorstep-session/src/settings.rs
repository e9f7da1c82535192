//! # Shipping Settings Administration
//!
//! Admin read/write access to the process-wide [`ShippingSettings`]
//! singleton, with input coercion at the write boundary.
//!
//! ## Coercion
//! Admin forms can submit anything, so negative fee or threshold values are
//! clamped to zero here rather than rejected; a negative fee has no sensible
//! meaning and zero is the conservative reading. The pricing code downstream
//! assumes settings values are already non-negative.

use tracing::info;

use doorstep_core::types::ShippingSettings;

use crate::error::SessionResult;
use crate::store::SettingsRepository;

/// Admin handle for shipping settings.
pub struct SettingsStore<S: SettingsRepository> {
    repo: S,
}

impl<S: SettingsRepository> SettingsStore<S> {
    /// Wraps a settings repository.
    pub fn new(repo: S) -> Self {
        SettingsStore { repo }
    }

    /// Current settings. When nothing has been stored yet this is the
    /// documented default: no fee, no threshold, shipping enabled.
    pub async fn load(&self) -> SessionResult<ShippingSettings> {
        Ok(self.repo.load_shipping_settings().await?)
    }

    /// Replaces the stored settings, clamping negative monetary fields to
    /// zero. Returns the value actually stored.
    pub async fn update(&self, requested: ShippingSettings) -> SessionResult<ShippingSettings> {
        let settings = ShippingSettings {
            fee_cents: requested.fee_cents.max(0),
            free_threshold_cents: requested.free_threshold_cents.max(0),
            enabled: requested.enabled,
        };

        self.repo.save_shipping_settings(&settings).await?;

        info!(
            fee_cents = settings.fee_cents,
            free_threshold_cents = settings.free_threshold_cents,
            enabled = settings.enabled,
            "shipping settings updated"
        );
        Ok(settings)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[tokio::test]
    async fn test_defaults_before_first_save() {
        let store = SettingsStore::new(MemoryStore::new());
        let settings = store.load().await.unwrap();
        assert_eq!(settings, ShippingSettings::default());
    }

    #[tokio::test]
    async fn test_update_round_trips() {
        let store = SettingsStore::new(MemoryStore::new());
        let wanted = ShippingSettings {
            fee_cents: 300,
            free_threshold_cents: 3000,
            enabled: true,
        };

        let stored = store.update(wanted).await.unwrap();
        assert_eq!(stored, wanted);
        assert_eq!(store.load().await.unwrap(), wanted);
    }

    #[tokio::test]
    async fn test_negative_values_clamp_to_zero() {
        let store = SettingsStore::new(MemoryStore::new());
        let stored = store
            .update(ShippingSettings {
                fee_cents: -500,
                free_threshold_cents: -1,
                enabled: false,
            })
            .await
            .unwrap();

        assert_eq!(stored.fee_cents, 0);
        assert_eq!(stored.free_threshold_cents, 0);
        assert!(!stored.enabled);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_value() {
        let backend = MemoryStore::new();
        let store = SettingsStore::new(backend.clone());
        let first = ShippingSettings {
            fee_cents: 300,
            free_threshold_cents: 0,
            enabled: true,
        };
        store.update(first).await.unwrap();

        backend.fail_writes(true);
        assert!(store
            .update(ShippingSettings {
                fee_cents: 900,
                free_threshold_cents: 0,
                enabled: true,
            })
            .await
            .is_err());

        backend.fail_writes(false);
        assert_eq!(store.load().await.unwrap(), first);
    }
}
