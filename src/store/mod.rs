//! Translation store collaborator: the persistence backend for translation
//! triples.

mod memory;

pub use memory::{
    MemoryStore,
    StoreOp,
};
use thiserror::Error;

use crate::bundle::TranslationBundle;
use crate::types::{
    EntityKey,
    Locale,
    StoreHandle,
};

/// Errors surfaced by a translation store backend.
///
/// The aggregator performs no retries; these propagate unmodified to the
/// caller.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("translation store unavailable: {0}")]
    Unavailable(String),

    /// A write violated a backend constraint.
    #[error("constraint violation writing '{field}' [{locale}] of {entity}: {message}")]
    Constraint {
        /// Entity being written.
        entity: EntityKey,
        /// Field whose triple was rejected.
        field: String,
        /// Locale of the rejected triple.
        locale: Locale,
        /// Backend-supplied detail.
        message: String,
    },

    /// Any other backend-defined failure.
    #[error(transparent)]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Persistence backend for (entity, field, locale) → value triples.
///
/// Implementations decide how triples are laid out (one table, one table per
/// entity type, a remote service). The handle returned by
/// [`resolve_store_for`](Self::resolve_store_for) is threaded back into
/// every call, so a store may route entity types to different underlying
/// tables; an implementation that does not distinguish tables is free to
/// ignore it.
pub trait TranslationStore {
    /// The table/collection serving translations of `entity_type`.
    fn resolve_store_for(&self, entity_type: &str) -> StoreHandle;

    /// Every persisted (locale, field, value) triple of `entity`. An entity
    /// without persisted translations yields an empty bundle, not an error.
    fn find_all(
        &self,
        handle: &StoreHandle,
        entity: &EntityKey,
    ) -> Result<TranslationBundle, StoreError>;

    /// Creates or updates one triple.
    fn upsert(
        &mut self,
        handle: &StoreHandle,
        entity: &EntityKey,
        field: &str,
        locale: &Locale,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Removes one triple if present. Removing an absent triple is a silent
    /// no-op.
    fn delete(
        &mut self,
        handle: &StoreHandle,
        entity: &EntityKey,
        field: &str,
        locale: &Locale,
    ) -> Result<(), StoreError>;

    /// The persisted native field values of `entity` under `locale`, used to
    /// refresh an entity after a reload in another locale.
    fn fetch_native_fields(
        &self,
        handle: &StoreHandle,
        entity: &EntityKey,
        locale: &Locale,
    ) -> Result<Vec<(String, String)>, StoreError>;
}
