//! 設定の型と読み込み
//!
//! 書き込みモードなどの設定を `.entity-translations.json` から読み込みます。
//! ファイルが無ければデフォルト設定（即時書き込み）になります。

use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// 設定ファイル名
const CONFIG_FILE_NAME: &str = ".entity-translations.json";

/// 翻訳書き込みの設定
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationSettings {
    /// `true` なら `translate` が直ちにストアへ書き出す。`false` なら
    /// `flush` まで保留する。
    pub instant_translation: bool,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self { instant_translation: true }
    }
}

/// 設定の読み込みエラー
#[derive(Error, Debug)]
pub enum ConfigError {
    /// ファイル読み込みエラー
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON パースエラー
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// ワークスペースから設定を読み込む
///
/// `.entity-translations.json` ファイルを探して読み込む
///
/// # Arguments
/// * `workspace_root` - ワークスペースのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<TranslationSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: TranslationSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
