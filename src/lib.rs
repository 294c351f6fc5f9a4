//! entity-translations
//!
//! ドメインエンティティのフィールド翻訳をロケール別に管理するライブラリ。
//! 翻訳ストアとロケールリゾルバーを外部コラボレーターとして注入し、
//! バンドルのキャッシュ・ディープマージ・即時/遅延書き込みを提供します。

pub mod aggregator;
pub mod bundle;
pub mod config;
pub mod entity;
pub mod manager;
pub mod resolver;
pub mod store;
pub mod transform;
pub mod types;

#[cfg(test)]
mod test_utils;

// 主要な型を再エクスポート
pub use aggregator::TranslationAggregator;
pub use bundle::TranslationBundle;
pub use config::TranslationSettings;
pub use entity::{
    SharedEntity,
    Translatable,
    shared,
};
pub use manager::TranslatableManager;
pub use resolver::{
    FixedLocaleResolver,
    LocaleResolver,
};
pub use store::{
    MemoryStore,
    StoreError,
    StoreOp,
    TranslationStore,
};
pub use transform::{
    FieldTransform,
    FieldTransforms,
};
pub use types::{
    EntityId,
    EntityKey,
    EntityMetadata,
    Locale,
    StoreHandle,
};
