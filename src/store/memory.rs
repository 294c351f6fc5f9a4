//! インメモリの翻訳ストア実装
//!
//! テストと小規模な組み込み用途のためのリファレンス実装。発行された操作を
//! すべて記録するので、「フェッチは最大 1 回」「空値で upsert しない」と
//! いった性質をそのまま検証できます。

use std::cell::Cell;
use std::collections::HashMap;

use super::{
    StoreError,
    TranslationStore,
};
use crate::bundle::TranslationBundle;
use crate::types::{
    EntityKey,
    Locale,
    StoreHandle,
};

/// デフォルトのテーブル名
const DEFAULT_TABLE: &str = "translations";

/// ストアに対して発行された書き込み操作の記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// トリプルの作成・更新
    Upsert {
        /// 対象エンティティ
        entity: EntityKey,
        /// フィールド名
        field: String,
        /// ロケール
        locale: Locale,
        /// 書き込まれた値
        value: String,
    },
    /// トリプルの削除
    Delete {
        /// 対象エンティティ
        entity: EntityKey,
        /// フィールド名
        field: String,
        /// ロケール
        locale: Locale,
    },
}

/// インメモリの翻訳ストア
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// テーブル → エンティティ → バンドル
    rows: HashMap<StoreHandle, HashMap<EntityKey, TranslationBundle>>,
    /// ロケール別のネイティブフィールド行（reload 用）
    native_rows: HashMap<(EntityKey, Locale), Vec<(String, String)>>,
    /// エンティティ型ごとのテーブル上書き
    routes: HashMap<String, StoreHandle>,
    /// 発行された書き込み操作のログ
    ops: Vec<StoreOp>,
    /// `find_all` の呼び出し回数
    find_all_calls: Cell<usize>,
}

impl MemoryStore {
    /// 空のストアを作成する
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// エンティティ型 `entity_type` の翻訳を別テーブルに振り分ける
    pub fn route(&mut self, entity_type: impl Into<String>, handle: StoreHandle) {
        self.routes.insert(entity_type.into(), handle);
    }

    /// 永続済みトリプルを直接投入する（テストのセットアップ用）
    pub fn seed(
        &mut self,
        entity: &EntityKey,
        locale: impl Into<Locale>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) {
        let handle = self.resolve_store_for(&entity.entity_type);
        self.rows
            .entry(handle)
            .or_default()
            .entry(entity.clone())
            .or_default()
            .set(locale, field, value);
    }

    /// ロケール別のネイティブフィールド行を投入する（reload テスト用）
    pub fn seed_native_fields(
        &mut self,
        entity: &EntityKey,
        locale: impl Into<Locale>,
        fields: Vec<(String, String)>,
    ) {
        self.native_rows.insert((entity.clone(), locale.into()), fields);
    }

    /// 永続されている 1 トリプルの値
    #[must_use]
    pub fn value(&self, entity: &EntityKey, field: &str, locale: &Locale) -> Option<&str> {
        let handle = self.resolve_store_for(&entity.entity_type);
        self.rows
            .get(&handle)
            .and_then(|table| table.get(entity))
            .and_then(|bundle| bundle.get(locale, field))
    }

    /// これまでに発行された書き込み操作
    #[must_use]
    pub fn ops(&self) -> &[StoreOp] {
        &self.ops
    }

    /// `find_all` が呼ばれた回数
    #[must_use]
    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.get()
    }
}

impl TranslationStore for MemoryStore {
    fn resolve_store_for(&self, entity_type: &str) -> StoreHandle {
        self.routes.get(entity_type).cloned().unwrap_or_else(|| StoreHandle::new(DEFAULT_TABLE))
    }

    fn find_all(
        &self,
        handle: &StoreHandle,
        entity: &EntityKey,
    ) -> Result<TranslationBundle, StoreError> {
        self.find_all_calls.set(self.find_all_calls.get() + 1);
        let bundle = self
            .rows
            .get(handle)
            .and_then(|table| table.get(entity))
            .cloned()
            .unwrap_or_default();
        tracing::debug!(%entity, %handle, locales = bundle.locale_count(), "find_all");
        Ok(bundle)
    }

    fn upsert(
        &mut self,
        handle: &StoreHandle,
        entity: &EntityKey,
        field: &str,
        locale: &Locale,
        value: &str,
    ) -> Result<(), StoreError> {
        tracing::debug!(%entity, %handle, field, %locale, "upsert");
        self.rows
            .entry(handle.clone())
            .or_default()
            .entry(entity.clone())
            .or_default()
            .set(locale.clone(), field, value);
        self.ops.push(StoreOp::Upsert {
            entity: entity.clone(),
            field: field.to_string(),
            locale: locale.clone(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn delete(
        &mut self,
        handle: &StoreHandle,
        entity: &EntityKey,
        field: &str,
        locale: &Locale,
    ) -> Result<(), StoreError> {
        tracing::debug!(%entity, %handle, field, %locale, "delete");
        if let Some(bundle) = self.rows.get_mut(handle).and_then(|table| table.get_mut(entity)) {
            // 存在しないトリプルの削除は黙って no-op
            let _ = bundle.remove(locale, field);
        }
        self.ops.push(StoreOp::Delete {
            entity: entity.clone(),
            field: field.to_string(),
            locale: locale.clone(),
        });
        Ok(())
    }

    fn fetch_native_fields(
        &self,
        _handle: &StoreHandle,
        entity: &EntityKey,
        locale: &Locale,
    ) -> Result<Vec<(String, String)>, StoreError> {
        Ok(self.native_rows.get(&(entity.clone(), locale.clone())).cloned().unwrap_or_default())
    }
}
