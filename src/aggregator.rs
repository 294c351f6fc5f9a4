//! 翻訳バンドルの集約を行うモジュール
//!
//! エンティティごとの翻訳バンドルをキャッシュし、ステージ（ディープマージ）
//! と適用（ストアへの書き出し）を担当します。ストアとロケールリゾルバーは
//! 外部コラボレーターとして注入されます。

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::bundle::TranslationBundle;
use crate::entity::Translatable;
use crate::resolver::LocaleResolver;
use crate::store::{
    StoreError,
    TranslationStore,
};
use crate::transform::FieldTransforms;
use crate::types::{
    EntityKey,
    Locale,
};

/// エンティティごとの翻訳バンドルを集約・ステージングする
///
/// バンドルは最初の読み取りでストアから取得され、以後は明示的に無効化される
/// までキャッシュが唯一の情報源になります。
pub struct TranslationAggregator<S, R> {
    /// 翻訳ストア
    store: S,
    /// ロケールリゾルバー
    resolver: R,
    /// フィールド変換レジストリ
    transforms: FieldTransforms,
    /// ロード済みバンドルのキャッシュ（キーの存在 = ロード済み）
    bundles: HashMap<EntityKey, TranslationBundle>,
}

impl<S: TranslationStore, R: LocaleResolver> TranslationAggregator<S, R> {
    /// 新しいアグリゲーターを作成する
    pub fn new(store: S, resolver: R) -> Self {
        Self { store, resolver, transforms: FieldTransforms::new(), bundles: HashMap::new() }
    }

    /// フィールド変換レジストリを設定する
    #[must_use]
    pub fn with_transforms(mut self, transforms: FieldTransforms) -> Self {
        self.transforms = transforms;
        self
    }

    /// エンティティの翻訳バンドルを返す
    ///
    /// キャッシュ済みならそのまま返します（エンティティごとにフェッチは
    /// 最大 1 回）。未ロードならストアから全トリプルを取得し、ロード変換を
    /// 適用してキャッシュします。
    ///
    /// # Errors
    /// - ストアの読み取りエラー
    pub fn translations(
        &mut self,
        entity: &impl Translatable,
    ) -> Result<&TranslationBundle, StoreError> {
        match self.bundles.entry(entity.entity_key()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let handle = self.store.resolve_store_for(&entry.key().entity_type);
                let mut bundle = self.store.find_all(&handle, entry.key())?;
                self.transforms.apply_on_load(&mut bundle);
                tracing::debug!(
                    entity = %entry.key(),
                    locales = bundle.locale_count(),
                    "loaded translations"
                );
                Ok(entry.insert(bundle))
            }
        }
    }

    /// 新しい翻訳データをキャッシュにステージする
    ///
    /// セーブ変換を適用したうえで、既存バンドルにディープマージします。
    /// マージには直前の状態が必要なので、未ロードなら先にフェッチします。
    /// ストアへの書き出しは [`apply`](Self::apply) が行います。
    ///
    /// # Errors
    /// - 事前フェッチ時のストア読み取りエラー
    pub fn stage(
        &mut self,
        entity: &impl Translatable,
        new_bundle: TranslationBundle,
    ) -> Result<(), StoreError> {
        let mut incoming = new_bundle;
        self.transforms.apply_on_save(&mut incoming);
        self.translations(entity)?;
        if let Some(bundle) = self.bundles.get_mut(&entity.entity_key()) {
            bundle.merge(incoming);
        }
        Ok(())
    }

    /// キャッシュ済みバンドルをストアとエンティティに書き出す
    ///
    /// トリプルごとに:
    /// - 空値: ストアから削除し、バンドルからもエントリを除去
    /// - 解決ロケール（上書きロケール、なければリゾルバーのデフォルト）と
    ///   一致: ストアを経由せずエンティティのネイティブフィールドへ直接
    ///   書き込み
    /// - それ以外: ストアへ upsert
    ///
    /// ベストエフォート方針: 途中でストアが失敗した場合、処理済みのトリプル
    /// はそのまま残り、エラーが伝播します。削除エントリはストアの削除が成功
    /// した後にのみバンドルから除去されます。
    ///
    /// # Errors
    /// - ストアの書き込みエラー（再試行せずそのまま伝播）
    pub fn apply<E: Translatable>(&mut self, entity: &mut E) -> Result<(), StoreError> {
        self.translations(&*entity)?;
        let key = entity.entity_key();
        let resolved = self.resolved_locale(&*entity);
        let handle = self.store.resolve_store_for(&key.entity_type);
        // ループ中にバンドルを更新するためスナップショットを取る
        let triples: Vec<(Locale, String, String)> = self
            .bundles
            .get(&key)
            .map(|bundle| {
                bundle
                    .triples()
                    .map(|(l, f, v)| (l.clone(), f.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        for (locale, field, value) in triples {
            if value.is_empty() {
                self.store.delete(&handle, &key, &field, &locale)?;
                if let Some(bundle) = self.bundles.get_mut(&key) {
                    let _ = bundle.remove(&locale, &field);
                }
            } else if locale == resolved {
                entity.set_native_field(&field, value);
            } else {
                self.store.upsert(&handle, &key, &field, &locale, &value)?;
            }
        }
        tracing::debug!(entity = %key, locale = %resolved, "applied translations");
        Ok(())
    }

    /// エンティティを別ロケールでリロードする
    ///
    /// 上書きロケールを設定し、そのロケールで永続されているネイティブ
    /// フィールド値をストアから取得してエンティティに書き戻します。
    /// バンドルはロケール非依存なのでキャッシュは無効化しません。
    ///
    /// # Errors
    /// - ストアの読み取りエラー
    pub fn reload_in_locale<E: Translatable>(
        &mut self,
        entity: &mut E,
        locale: Locale,
    ) -> Result<(), StoreError> {
        let key = entity.entity_key();
        let handle = self.store.resolve_store_for(&key.entity_type);
        tracing::debug!(entity = %key, locale = %locale, "reloading in locale");
        entity.set_locale_override(locale.clone());
        for (field, value) in self.store.fetch_native_fields(&handle, &key, &locale)? {
            entity.set_native_field(&field, value);
        }
        Ok(())
    }

    /// キャッシュ済みバンドルを破棄する（次回読み取りで再フェッチ）
    pub fn invalidate(&mut self, entity: &impl Translatable) {
        let _ = self.bundles.remove(&entity.entity_key());
    }

    /// エンティティのバンドルがロード済みかどうか
    #[must_use]
    pub fn is_loaded(&self, entity: &impl Translatable) -> bool {
        self.bundles.contains_key(&entity.entity_key())
    }

    /// 翻訳ストアへの参照
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// 翻訳ストアへの可変参照
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// エンティティの解決ロケール（上書きロケール優先）
    fn resolved_locale(&self, entity: &impl Translatable) -> Locale {
        entity
            .locale_override()
            .cloned()
            .unwrap_or_else(|| self.resolver.default_locale(entity.metadata()))
    }
}

impl<S, R> std::fmt::Debug for TranslationAggregator<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationAggregator")
            .field("transforms", &self.transforms)
            .field("loaded_entities", &self.bundles.len())
            .finish_non_exhaustive()
    }
}
