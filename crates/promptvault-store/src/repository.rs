//! Whole-collection load and save of assets per scope.

use crate::kv::{KeyValueStore, StorageError};
use crate::samples::sample_assets;
use crate::scope::ScopeKey;
use chrono::{DateTime, SubsecRound, Utc};
use promptvault_core::Asset;

/// Reads and writes a scope's asset collection as one JSON array.
#[derive(Debug)]
pub struct AssetRepository<S> {
    store: S,
}

impl<S: KeyValueStore> AssetRepository<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Give back the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load the collection for `scope`.
    ///
    /// Never fails: unreadable or corrupt data yields an empty collection and
    /// a warning. A guest scope with nothing stored is seeded with the sample
    /// assets, which are written back so later loads see the same data.
    pub fn load(&self, scope: &ScopeKey) -> Vec<Asset> {
        let key = scope.storage_key();
        let raw = match self.store.get(&key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(scope = %scope, error = %e, "Failed to read assets");
                return Vec::new();
            }
        };

        match raw {
            Some(json) => match serde_json::from_str::<Vec<Asset>>(&json) {
                Ok(assets) => {
                    tracing::debug!(scope = %scope, count = assets.len(), "Loaded assets");
                    assets
                }
                Err(e) => {
                    tracing::warn!(scope = %scope, error = %e, "Discarding corrupt asset data");
                    Vec::new()
                }
            },
            None if scope.is_guest() => {
                let seeded = sample_assets(now());
                if let Err(e) = self.save(scope, &seeded) {
                    tracing::warn!(scope = %scope, error = %e, "Failed to store sample assets");
                }
                seeded
            }
            None => Vec::new(),
        }
    }

    /// Replace the stored collection for `scope`.
    ///
    /// # Errors
    ///
    /// Returns error if encoding or the write fails.
    pub fn save(&self, scope: &ScopeKey, assets: &[Asset]) -> Result<(), StorageError> {
        let json = serde_json::to_string(assets)?;
        self.store.set(&scope.storage_key(), &json)?;
        tracing::debug!(scope = %scope, count = assets.len(), "Saved assets");
        Ok(())
    }
}

/// Current time at the millisecond precision assets are stored with.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
