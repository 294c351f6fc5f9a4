//! Core value types shared across the crate.

use serde::{
    Deserialize,
    Serialize,
};

/// A language/region identifier such as `"de"` or `"en_US"`.
///
/// Used as the row key of a [`TranslationBundle`](crate::bundle::TranslationBundle).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Creates a locale from any string-like code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw locale code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identity key of a translatable entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Creates an identity key from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identity value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The address a translation store uses for one entity: its type plus its
/// identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    /// Entity type name (e.g. `"Article"`).
    pub entity_type: String,
    /// Identity key within the type.
    pub id: EntityId,
}

impl EntityKey {
    /// Creates an entity key.
    #[must_use]
    pub fn new(entity_type: impl Into<String>, id: impl Into<EntityId>) -> Self {
        Self { entity_type: entity_type.into(), id: id.into() }
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.entity_type, self.id)
    }
}

/// Names the underlying table/collection serving translations for an entity
/// type. Lets a store route different entity types to different backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreHandle(String);

impl StoreHandle {
    /// Creates a handle from a table/collection name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The raw table/collection name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata of a translatable entity type, as seen by a locale resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMetadata {
    /// Entity type name.
    pub entity_type: String,
    /// Names of the fields carrying translatable content.
    pub translatable_fields: Vec<String>,
}

impl EntityMetadata {
    /// Creates metadata for an entity type.
    #[must_use]
    pub fn new<F>(entity_type: impl Into<String>, translatable_fields: F) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            entity_type: entity_type.into(),
            translatable_fields: translatable_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `field` is declared translatable.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.translatable_fields.iter().any(|f| f == field)
    }
}
