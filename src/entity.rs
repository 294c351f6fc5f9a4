//! Contract for domain entities that carry translatable fields.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{
    EntityId,
    EntityKey,
    EntityMetadata,
    Locale,
};

/// Shared handle to a translatable entity within one unit of work.
///
/// The deferred-write manager has to reach entities again at flush time,
/// after the `translate` call returned. The usage model is single-threaded
/// and request-scoped, so `Rc<RefCell<_>>` is the right amount of sharing.
pub type SharedEntity<E> = Rc<RefCell<E>>;

/// Wraps an entity in a [`SharedEntity`] handle.
pub fn shared<E: Translatable>(entity: E) -> SharedEntity<E> {
    Rc::new(RefCell::new(entity))
}

/// A domain object whose fields can carry per-locale translations.
///
/// Translation mechanics live in the aggregator and manager; an entity only
/// exposes its identity, its metadata, its locale override and a way to
/// write the canonical-locale value onto its native field.
pub trait Translatable {
    /// Stable identity key of this entity.
    fn id(&self) -> EntityId;

    /// Metadata of this entity's type.
    fn metadata(&self) -> &EntityMetadata;

    /// The address a translation store uses for this entity.
    fn entity_key(&self) -> EntityKey {
        EntityKey { entity_type: self.metadata().entity_type.clone(), id: self.id() }
    }

    /// Locale overriding the ambient default, if one was set (e.g. by a
    /// reload in another locale).
    fn locale_override(&self) -> Option<&Locale>;

    /// Sets the override locale.
    fn set_locale_override(&mut self, locale: Locale);

    /// Writes `value` directly onto the native field named `field`.
    ///
    /// Called for canonical-locale values, which bypass the translation
    /// store, and when reloading native fields in another locale. A field
    /// name not present in the metadata is the implementor's business.
    fn set_native_field(&mut self, field: &str, value: String);
}
