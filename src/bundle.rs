//! Translation bundle: the locale → field → value structure holding all
//! known translated content of one entity.

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::types::Locale;

/// All known translations of one entity, grouped by locale.
///
/// For an entity with the translatable fields `name` and `abstract`,
/// translated into German and English, the bundle looks like:
///
/// ```text
/// "de" → { "name": "Name auf Deutsch", "abstract": "Der Abstract" }
/// "en" → { "name": "Name in english",  "abstract": "The abstract" }
/// ```
///
/// Insertion order of locales and fields is preserved, so iteration is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationBundle {
    /// locale → field → translated value
    entries: IndexMap<Locale, IndexMap<String, String>>,
}

impl TranslationBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one translation entry, builder style. Handy for literals in
    /// tests and examples.
    #[must_use]
    pub fn with(
        mut self,
        locale: impl Into<Locale>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(locale, field, value);
        self
    }

    /// Sets the value of `field` in `locale`, adding locale and field rows
    /// as needed.
    pub fn set(
        &mut self,
        locale: impl Into<Locale>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.entries.entry(locale.into()).or_default().insert(field.into(), value.into());
    }

    /// The value of `field` in `locale`, if present.
    #[must_use]
    pub fn get(&self, locale: &Locale, field: &str) -> Option<&str> {
        self.entries.get(locale).and_then(|fields| fields.get(field)).map(String::as_str)
    }

    /// Removes the value of `field` in `locale` and returns it.
    ///
    /// A locale row left without any field is dropped entirely.
    pub fn remove(&mut self, locale: &Locale, field: &str) -> Option<String> {
        let fields = self.entries.get_mut(locale)?;
        let removed = fields.shift_remove(field);
        if fields.is_empty() {
            self.entries.shift_remove(locale);
        }
        removed
    }

    /// Deep-merges `other` into this bundle.
    ///
    /// Entries of this bundle not present in `other` survive unchanged;
    /// entries present in `other` overwrite or add; locales only known to
    /// `other` are added wholesale.
    pub fn merge(&mut self, other: Self) {
        for (locale, fields) in other.entries {
            let row = self.entries.entry(locale).or_default();
            for (field, value) in fields {
                row.insert(field, value);
            }
        }
    }

    /// Whether the bundle holds no translations at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of locales present.
    #[must_use]
    pub fn locale_count(&self) -> usize {
        self.entries.len()
    }

    /// Locales present, in insertion order.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.entries.keys()
    }

    /// Iterates locale rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Locale, &IndexMap<String, String>)> {
        self.entries.iter()
    }

    /// Flattens the bundle into (locale, field, value) triples.
    pub fn triples(&self) -> impl Iterator<Item = (&Locale, &str, &str)> {
        self.entries.iter().flat_map(|(locale, fields)| {
            fields.iter().map(move |(field, value)| (locale, field.as_str(), value.as_str()))
        })
    }

    /// The by-locale view: the bundle's own representation.
    #[must_use]
    pub fn by_locale(&self) -> &IndexMap<Locale, IndexMap<String, String>> {
        &self.entries
    }

    /// The inverted, by-property view:
    ///
    /// ```text
    /// "name"     → { "de": "Name auf Deutsch", "en": "Name in english" }
    /// "abstract" → { "de": "Der Abstract",     "en": "The abstract" }
    /// ```
    #[must_use]
    pub fn by_property(&self) -> IndexMap<String, IndexMap<Locale, String>> {
        let mut view: IndexMap<String, IndexMap<Locale, String>> = IndexMap::new();
        for (locale, field, value) in self.triples() {
            view.entry(field.to_string())
                .or_default()
                .insert(locale.clone(), value.to_string());
        }
        view
    }

    /// The by-property view filtered to one field. A field without any
    /// translation yields an empty mapping.
    #[must_use]
    pub fn property_translations(&self, field: &str) -> IndexMap<Locale, String> {
        self.by_property().shift_remove(field).unwrap_or_default()
    }

    /// The translation of one field in one locale, if present.
    #[must_use]
    pub fn property_in_locale(&self, field: &str, locale: &Locale) -> Option<&str> {
        self.get(locale, field)
    }
}

impl FromIterator<(Locale, IndexMap<String, String>)> for TranslationBundle {
    fn from_iter<T: IntoIterator<Item = (Locale, IndexMap<String, String>)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    /// de/en の 2 ロケールを持つバンドルを作成する
    fn sample_bundle() -> TranslationBundle {
        TranslationBundle::new()
            .with("de", "name", "Name auf Deutsch")
            .with("de", "abstract", "Der Abstract")
            .with("en", "name", "Name in english")
    }

    #[googletest::test]
    #[rstest]
    fn test_merge_keeps_unspecified_entries_and_overwrites_specified_ones() {
        let mut bundle = TranslationBundle::new()
            .with("de", "name", "A")
            .with("de", "abstract", "B")
            .with("en", "name", "C");
        let incoming = TranslationBundle::new()
            .with("en", "name", "D")
            .with("en", "license", "E")
            .with("fr", "name", "F");

        bundle.merge(incoming);

        let de = Locale::from("de");
        let en = Locale::from("en");
        let fr = Locale::from("fr");
        // 未指定のエントリは生き残る
        expect_that!(bundle.get(&de, "name"), some(eq("A")));
        expect_that!(bundle.get(&de, "abstract"), some(eq("B")));
        // 指定されたエントリは上書き・追加される
        expect_that!(bundle.get(&en, "name"), some(eq("D")));
        expect_that!(bundle.get(&en, "license"), some(eq("E")));
        // 新しいロケールは丸ごと追加される
        expect_that!(bundle.get(&fr, "name"), some(eq("F")));
        expect_that!(bundle.locale_count(), eq(3));
    }

    #[rstest]
    fn test_merge_into_empty_bundle_adds_everything() {
        let mut bundle = TranslationBundle::new();

        bundle.merge(sample_bundle());

        assert_that!(bundle, eq(&sample_bundle()));
    }

    #[googletest::test]
    #[rstest]
    fn test_remove_drops_emptied_locale_row() {
        let mut bundle = TranslationBundle::new().with("en", "name", "X");
        let en = Locale::from("en");

        let removed = bundle.remove(&en, "name");

        expect_that!(removed, some(eq(&"X".to_string())));
        expect_that!(bundle.is_empty(), eq(true));
        expect_that!(bundle.locales().count(), eq(0));
    }

    #[rstest]
    fn test_remove_missing_field_is_none() {
        let mut bundle = sample_bundle();
        let de = Locale::from("de");

        assert_that!(bundle.remove(&de, "license"), none());
        assert_that!(bundle.locale_count(), eq(2));
    }

    #[googletest::test]
    #[rstest]
    fn test_by_property_inverts_the_bundle() {
        let view = sample_bundle().by_property();

        let name = view.get("name").unwrap();
        expect_that!(name.get(&Locale::from("de")), some(eq(&"Name auf Deutsch".to_string())));
        expect_that!(name.get(&Locale::from("en")), some(eq(&"Name in english".to_string())));
        // "abstract" は de のみ
        let abstract_ = view.get("abstract").unwrap();
        expect_that!(abstract_.len(), eq(1));
    }

    #[rstest]
    fn test_property_translations_of_missing_field_is_empty() {
        assert_that!(sample_bundle().property_translations("license").is_empty(), eq(true));
    }

    #[rstest]
    #[case::present("name", "en", Some("Name in english"))]
    #[case::missing_locale("abstract", "en", None)]
    #[case::missing_field("license", "de", None)]
    fn test_property_in_locale(
        #[case] field: &str,
        #[case] locale: &str,
        #[case] expected: Option<&str>,
    ) {
        let bundle = sample_bundle();

        assert_that!(bundle.property_in_locale(field, &Locale::from(locale)), eq(expected));
    }

    #[rstest]
    fn test_triples_iterate_in_insertion_order() {
        let triples: Vec<(String, String, String)> = sample_bundle()
            .triples()
            .map(|(l, f, v)| (l.to_string(), f.to_string(), v.to_string()))
            .collect();

        assert_that!(
            triples,
            eq(&vec![
                ("de".to_string(), "name".to_string(), "Name auf Deutsch".to_string()),
                ("de".to_string(), "abstract".to_string(), "Der Abstract".to_string()),
                ("en".to_string(), "name".to_string(), "Name in english".to_string()),
            ])
        );
    }
}
