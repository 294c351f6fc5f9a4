//! Statically declared field transforms, applied when translations cross
//! the store boundary.
//!
//! Some stores keep a field under a different name and encoding than the
//! entity exposes (e.g. a serialized `resource` column backing an `image`
//! property). A [`FieldTransform`] declares that pair explicitly at
//! construction time: on load the stored field is renamed to the property
//! and its value decoded, on save the inverse happens. There is no runtime
//! method-name lookup.

use crate::bundle::TranslationBundle;
use crate::types::Locale;

/// Value transform applied to one translated value.
pub type TransformFn = fn(&str) -> String;

/// Identity transform: returns the value unchanged.
#[must_use]
pub fn identity(value: &str) -> String {
    value.to_string()
}

/// One stored-field ↔ property pair with its value transforms.
#[derive(Debug, Clone)]
pub struct FieldTransform {
    /// Field name used inside the translation store.
    pub stored_field: String,
    /// Property name exposed on the entity.
    pub property: String,
    /// Applied to values coming out of the store (stored → property).
    pub on_load: TransformFn,
    /// Applied to values going into the store (property → stored).
    pub on_save: TransformFn,
}

impl FieldTransform {
    /// Declares a transform pair.
    #[must_use]
    pub fn new(
        stored_field: impl Into<String>,
        property: impl Into<String>,
        on_load: TransformFn,
        on_save: TransformFn,
    ) -> Self {
        Self {
            stored_field: stored_field.into(),
            property: property.into(),
            on_load,
            on_save,
        }
    }

    /// Declares a pure rename: same value, different field name.
    #[must_use]
    pub fn rename(stored_field: impl Into<String>, property: impl Into<String>) -> Self {
        Self::new(stored_field, property, identity, identity)
    }
}

/// Registry of all transform pairs of one aggregator.
///
/// Fields without a registered transform pass through untouched.
#[derive(Debug, Clone, Default)]
pub struct FieldTransforms {
    /// 登録済みの変換ペア
    transforms: Vec<FieldTransform>,
}

impl FieldTransforms {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a transform pair, builder style.
    #[must_use]
    pub fn with(mut self, transform: FieldTransform) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Whether any transform is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Rewrites a bundle freshly loaded from the store: stored field names
    /// become property names, values run through `on_load`.
    pub(crate) fn apply_on_load(&self, bundle: &mut TranslationBundle) {
        for transform in &self.transforms {
            rewrite(bundle, &transform.stored_field, &transform.property, transform.on_load);
        }
    }

    /// Rewrites a bundle supplied by the caller before it is merged and
    /// written: property names become stored field names, values run
    /// through `on_save`.
    pub(crate) fn apply_on_save(&self, bundle: &mut TranslationBundle) {
        for transform in &self.transforms {
            rewrite(bundle, &transform.property, &transform.stored_field, transform.on_save);
        }
    }
}

/// Renames `from` to `to` in every locale row, transforming the value.
fn rewrite(bundle: &mut TranslationBundle, from: &str, to: &str, f: TransformFn) {
    let locales: Vec<Locale> = bundle.locales().cloned().collect();
    for locale in locales {
        if let Some(value) = bundle.remove(&locale, from) {
            bundle.set(locale, to, f(&value));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    /// 値を大文字化するテスト用変換
    fn upper(value: &str) -> String {
        value.to_uppercase()
    }

    /// 値を小文字化するテスト用変換
    fn lower(value: &str) -> String {
        value.to_lowercase()
    }

    #[googletest::test]
    #[rstest]
    fn test_apply_on_load_renames_and_transforms() {
        let transforms =
            FieldTransforms::new().with(FieldTransform::new("resource", "image", upper, lower));
        let mut bundle = TranslationBundle::new()
            .with("de", "resource", "bild.png")
            .with("de", "name", "Name auf Deutsch")
            .with("en", "resource", "image.png");

        transforms.apply_on_load(&mut bundle);

        let de = Locale::from("de");
        let en = Locale::from("en");
        expect_that!(bundle.get(&de, "image"), some(eq("BILD.PNG")));
        expect_that!(bundle.get(&en, "image"), some(eq("IMAGE.PNG")));
        expect_that!(bundle.get(&de, "resource"), none());
        // 登録外のフィールドはそのまま
        expect_that!(bundle.get(&de, "name"), some(eq("Name auf Deutsch")));
    }

    #[googletest::test]
    #[rstest]
    fn test_apply_on_save_is_the_inverse_direction() {
        let transforms =
            FieldTransforms::new().with(FieldTransform::new("resource", "image", upper, lower));
        let mut bundle = TranslationBundle::new().with("en", "image", "IMAGE.PNG");

        transforms.apply_on_save(&mut bundle);

        let en = Locale::from("en");
        expect_that!(bundle.get(&en, "resource"), some(eq("image.png")));
        expect_that!(bundle.get(&en, "image"), none());
    }

    #[rstest]
    fn test_rename_keeps_the_value() {
        let transforms = FieldTransforms::new().with(FieldTransform::rename("body_md", "body"));
        let mut bundle = TranslationBundle::new().with("en", "body_md", "# Heading");

        transforms.apply_on_load(&mut bundle);

        assert_that!(bundle.get(&Locale::from("en"), "body"), some(eq("# Heading")));
    }

    #[rstest]
    fn test_empty_registry_leaves_bundle_untouched() {
        let transforms = FieldTransforms::new();
        let mut bundle = TranslationBundle::new().with("en", "name", "X");
        let before = bundle.clone();

        transforms.apply_on_load(&mut bundle);

        assert_that!(bundle, eq(&before));
        assert_that!(transforms.is_empty(), eq(true));
    }
}
