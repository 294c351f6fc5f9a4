//! Locale resolver collaborator: supplies the canonical/default locale of
//! an entity when no override locale is set.

use crate::types::{
    EntityMetadata,
    Locale,
};

/// Resolves the fallback/canonical locale for an entity type.
///
/// The resolver is passed in explicitly; there is no ambient process-wide
/// locale state.
pub trait LocaleResolver {
    /// The default locale used for `metadata` when the entity carries no
    /// override locale.
    fn default_locale(&self, metadata: &EntityMetadata) -> Locale;
}

/// Resolver returning one configured locale for every entity type.
///
/// The common deployment: a single canonical language for the whole
/// application.
#[derive(Debug, Clone)]
pub struct FixedLocaleResolver {
    /// 全エンティティ共通のデフォルトロケール
    default: Locale,
}

impl FixedLocaleResolver {
    /// Creates a resolver always answering `locale`.
    #[must_use]
    pub fn new(locale: impl Into<Locale>) -> Self {
        Self { default: locale.into() }
    }
}

impl LocaleResolver for FixedLocaleResolver {
    fn default_locale(&self, _metadata: &EntityMetadata) -> Locale {
        self.default.clone()
    }
}
