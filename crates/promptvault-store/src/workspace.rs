//! The session context: one scope's asset collection, kept in sync with
//! storage after every mutation.

use crate::kv::KeyValueStore;
use crate::repository::{now, AssetRepository};
use crate::scope::ScopeKey;
use promptvault_core::draft::validate_changelog;
use promptvault_core::{
    next_display_id, next_free_display_id, Asset, AssetDraft, AssetKind, CatalogQuery, LedgerError, ValidationError,
    Version, INITIAL_CHANGELOG,
};

/// In-memory asset collection for one scope.
///
/// New assets are prepended. Every successful mutation rewrites the whole
/// collection to storage; write failures are logged and the in-memory state
/// stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct Workspace<S: KeyValueStore> {
    repo: AssetRepository<S>,
    scope: ScopeKey,
    assets: Vec<Asset>,
}

impl<S: KeyValueStore> Workspace<S> {
    /// Load `scope` from `store`.
    pub fn open(store: S, scope: ScopeKey) -> Self {
        let repo = AssetRepository::new(store);
        let assets = repo.load(&scope);
        tracing::debug!(scope = %scope, count = assets.len(), "Opened workspace");
        Self {
            repo,
            scope,
            assets,
        }
    }

    /// Persist and hand back the store.
    pub fn close(self) -> S {
        self.persist();
        self.repo.into_inner()
    }

    /// Scope this workspace reads and writes.
    #[must_use]
    pub fn scope(&self) -> &ScopeKey {
        &self.scope
    }

    /// All assets, newest creation first.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Look up an asset by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Look up an asset by id, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::AssetNotFound`] for an unknown id.
    pub fn require(&self, id: &str) -> Result<&Asset, WorkspaceError> {
        self.get(id)
            .ok_or_else(|| WorkspaceError::AssetNotFound(id.to_string()))
    }

    /// A specific version of an asset, or its head when `label` is `None`.
    ///
    /// # Errors
    ///
    /// Returns error if the asset or the version does not exist.
    pub fn version(&self, id: &str, label: Option<&str>) -> Result<&Version, WorkspaceError> {
        Ok(self.require(id)?.select_version_str(label)?)
    }

    /// Matching assets in display order.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Asset> {
        query.apply(&self.assets)
    }

    /// Identifier the next created asset of `kind` will get.
    ///
    /// This is the count-based identifier unless an existing asset already
    /// holds it, in which case the sequence moves on to the first free one.
    #[must_use]
    pub fn next_id(&self, kind: AssetKind) -> String {
        next_free_display_id(kind, &self.assets)
    }

    /// Create an asset from a draft, at `v1.0`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields.
    pub fn create(&mut self, draft: AssetDraft) -> Result<&Asset, WorkspaceError> {
        let draft = draft.validate()?;
        let id = self.next_id(draft.kind);
        let counted = next_display_id(draft.kind, &self.assets);
        if id != counted {
            tracing::warn!(taken = %counted, id = %id, "Identifier in use, skipping ahead");
        }

        let mut asset = Asset::create(
            id,
            draft.kind,
            draft.content.clone(),
            INITIAL_CHANGELOG,
            now(),
        );
        draft.apply_metadata(&mut asset);
        tracing::info!(id = %asset.id, kind = %asset.kind, "Created asset");

        self.assets.insert(0, asset);
        self.persist();
        Ok(&self.assets[0])
    }

    /// Update metadata and append a new version with the draft's content.
    ///
    /// A version is appended even when the content is unchanged.
    ///
    /// # Errors
    ///
    /// Returns error for an unknown id, missing fields or a blank changelog.
    pub fn edit(
        &mut self,
        id: &str,
        draft: AssetDraft,
        changelog: &str,
    ) -> Result<&Asset, WorkspaceError> {
        let draft = draft.validate()?;
        let changelog = validate_changelog(changelog)?;
        let index = self.index_of(id)?;

        let asset = &mut self.assets[index];
        draft.apply_metadata(asset);
        let label = asset.append_version(draft.content, changelog, now()).version;
        tracing::info!(id, version = %label, "Appended version");

        self.persist();
        Ok(&self.assets[index])
    }

    /// Remove an asset and its history.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::AssetNotFound`] for an unknown id.
    pub fn delete(&mut self, id: &str) -> Result<Asset, WorkspaceError> {
        let index = self.index_of(id)?;
        let removed = self.assets.remove(index);
        tracing::info!(id, "Deleted asset");

        self.persist();
        Ok(removed)
    }

    fn index_of(&self, id: &str) -> Result<usize, WorkspaceError> {
        self.assets
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| WorkspaceError::AssetNotFound(id.to_string()))
    }

    fn persist(&self) {
        if let Err(e) = self.repo.save(&self.scope, &self.assets) {
            tracing::error!(scope = %self.scope, error = %e, "Failed to persist assets");
        }
    }
}

/// Errors from workspace operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// Draft or changelog failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No asset with this id in the scope
    #[error("asset not found: {0}")]
    AssetNotFound(String),
    /// Version lookup failed
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
