//! 翻訳書き込みの即時/遅延モードを管理するモジュール
//!
//! アグリゲーターの書き込みパスを二つのモードでラップします。即時モードは
//! `translate` の時点でストアへ書き出し、遅延モードは変更されたエンティティ
//! を保留セットに積んで `flush` まで書き出しを遅らせます。

use std::rc::Rc;

use indexmap::IndexMap;

use crate::aggregator::TranslationAggregator;
use crate::bundle::TranslationBundle;
use crate::config::TranslationSettings;
use crate::entity::{
    SharedEntity,
    Translatable,
};
use crate::resolver::LocaleResolver;
use crate::store::{
    StoreError,
    TranslationStore,
};
use crate::transform::FieldTransforms;
use crate::types::Locale;

/// 翻訳書き込みのモード切り替えと保留セットを管理する
///
/// 保留セットは挿入順を保ち、メンバーシップはエンティティの同一性
/// （`Rc` ポインタ）で判定されます。同じエンティティを何度 `translate`
/// してもエントリは 1 つだけです。フラッシュされなかったエンティティが
/// 暗黙に書き出されることはありません。
pub struct TranslatableManager<S, R, E> {
    /// 翻訳アグリゲーター
    aggregator: TranslationAggregator<S, R>,
    /// 即時書き込みモードかどうか
    instant_translation: bool,
    /// フラッシュ待ちのエンティティ（挿入順）
    pending: Vec<SharedEntity<E>>,
}

impl<S, R, E> TranslatableManager<S, R, E>
where
    S: TranslationStore,
    R: LocaleResolver,
    E: Translatable,
{
    /// 新しいマネージャーを作成する
    pub fn new(store: S, resolver: R, settings: &TranslationSettings) -> Self {
        Self {
            aggregator: TranslationAggregator::new(store, resolver),
            instant_translation: settings.instant_translation,
            pending: Vec::new(),
        }
    }

    /// フィールド変換レジストリを設定する
    #[must_use]
    pub fn with_transforms(mut self, transforms: FieldTransforms) -> Self {
        self.aggregator = self.aggregator.with_transforms(transforms);
        self
    }

    /// エンティティの翻訳バンドルを返す（必要ならフェッチ）
    ///
    /// # Errors
    /// - ストアの読み取りエラー
    pub fn translations(
        &mut self,
        entity: &SharedEntity<E>,
    ) -> Result<&TranslationBundle, StoreError> {
        let guard = entity.borrow();
        self.aggregator.translations(&*guard)
    }

    /// 新しい翻訳データをマージして書き込みパスに渡す
    ///
    /// ステージ（ディープマージ）のあと [`translate`](Self::translate) を
    /// 呼びます。即時モードならこの時点でストアへ書き出されます。
    ///
    /// # Errors
    /// - ストアの読み書きエラー
    pub fn set_translations(
        &mut self,
        entity: &SharedEntity<E>,
        new_bundle: TranslationBundle,
    ) -> Result<(), StoreError> {
        {
            let guard = entity.borrow();
            self.aggregator.stage(&*guard, new_bundle)?;
        }
        self.translate(entity)
    }

    /// エンティティの翻訳を書き出す、または保留セットに積む
    ///
    /// 即時モードでは直ちにアグリゲーターの適用ループを実行します。遅延
    /// モードでは保留セットに追加するだけです（冪等）。
    ///
    /// # Errors
    /// - 即時モードでのストア書き込みエラー
    pub fn translate(&mut self, entity: &SharedEntity<E>) -> Result<(), StoreError> {
        if self.instant_translation {
            self.aggregator.apply(&mut *entity.borrow_mut())
        } else {
            self.mark_changed(entity);
            Ok(())
        }
    }

    /// 保留セットを挿入順に書き出す
    ///
    /// 各エンティティに適用ループを実行し、成功したものから保留セットを
    /// 外します。途中でエラーになった場合、失敗したエンティティと未処理の
    /// エンティティは保留のまま残り、エラーが伝播します。
    ///
    /// # Errors
    /// - ストアの書き込みエラー
    pub fn flush(&mut self) -> Result<(), StoreError> {
        tracing::debug!(pending = self.pending.len(), "flushing pending translations");
        while let Some(entity) = self.pending.first().cloned() {
            self.aggregator.apply(&mut *entity.borrow_mut())?;
            self.unmark_changed(&entity);
        }
        Ok(())
    }

    /// エンティティを保留セットに追加する（同一性で判定、重複なし）
    pub fn mark_changed(&mut self, entity: &SharedEntity<E>) {
        if !self.pending.iter().any(|pending| Rc::ptr_eq(pending, entity)) {
            self.pending.push(Rc::clone(entity));
        }
    }

    /// エンティティを保留セットから外す
    pub fn unmark_changed(&mut self, entity: &SharedEntity<E>) {
        self.pending.retain(|pending| !Rc::ptr_eq(pending, entity));
    }

    /// 保留中のエンティティ数
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// エンティティを別ロケールでリロードする
    ///
    /// # Errors
    /// - ストアの読み取りエラー
    pub fn reload_in_locale(
        &mut self,
        entity: &SharedEntity<E>,
        locale: Locale,
    ) -> Result<(), StoreError> {
        self.aggregator.reload_in_locale(&mut *entity.borrow_mut(), locale)
    }

    /// キャッシュ済みバンドルを破棄する
    pub fn invalidate(&mut self, entity: &SharedEntity<E>) {
        self.aggregator.invalidate(&*entity.borrow());
    }

    /// by-property ビュー: フィールド → ロケール → 値
    ///
    /// # Errors
    /// - ストアの読み取りエラー
    pub fn translations_by_property(
        &mut self,
        entity: &SharedEntity<E>,
    ) -> Result<IndexMap<String, IndexMap<Locale, String>>, StoreError> {
        Ok(self.translations(entity)?.by_property())
    }

    /// 1 フィールドの全ロケール翻訳: ロケール → 値（未知のフィールドは空）
    ///
    /// # Errors
    /// - ストアの読み取りエラー
    pub fn translations_of_property(
        &mut self,
        entity: &SharedEntity<E>,
        property: &str,
    ) -> Result<IndexMap<Locale, String>, StoreError> {
        Ok(self.translations(entity)?.property_translations(property))
    }

    /// 1 フィールド・1 ロケールの翻訳値（なければ `None`）
    ///
    /// # Errors
    /// - ストアの読み取りエラー
    pub fn property_in_locale(
        &mut self,
        entity: &SharedEntity<E>,
        property: &str,
        locale: &Locale,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.translations(entity)?.property_in_locale(property, locale).map(String::from))
    }

    /// 翻訳ストアへの参照
    #[must_use]
    pub const fn store(&self) -> &S {
        self.aggregator.store()
    }

    /// 翻訳ストアへの可変参照
    pub const fn store_mut(&mut self) -> &mut S {
        self.aggregator.store_mut()
    }
}

impl<S, R, E> std::fmt::Debug for TranslatableManager<S, R, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatableManager")
            .field("instant_translation", &self.instant_translation)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}
