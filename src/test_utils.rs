//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される翻訳対象エンティティを提供します。
#![cfg(test)]

use indexmap::IndexMap;

use crate::entity::Translatable;
use crate::types::{
    EntityId,
    EntityMetadata,
    Locale,
};

/// テスト用の翻訳対象エンティティ
///
/// `name` と `abstract` を翻訳可能フィールドとして持つ。
#[derive(Debug)]
pub(crate) struct Article {
    /// 識別子
    id: EntityId,
    /// 型メタデータ
    metadata: EntityMetadata,
    /// 上書きロケール
    locale: Option<Locale>,
    /// ネイティブフィールドの現在値
    native: IndexMap<String, String>,
}

impl Article {
    /// 指定した識別子の記事を作成する
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: EntityId::from(id),
            metadata: EntityMetadata::new("Article", ["name", "abstract"]),
            locale: None,
            native: IndexMap::new(),
        }
    }

    /// ネイティブフィールドの現在値
    pub(crate) fn native_field(&self, field: &str) -> Option<&str> {
        self.native.get(field).map(String::as_str)
    }
}

impl Translatable for Article {
    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn locale_override(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    fn set_locale_override(&mut self, locale: Locale) {
        self.locale = Some(locale);
    }

    fn set_native_field(&mut self, field: &str, value: String) {
        self.native.insert(field.to_string(), value);
    }
}
