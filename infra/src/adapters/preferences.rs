use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use domain::DomainError;

/// 設定ストアのエラー
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    /// 設定ストアへのアクセスが許可されていない。
    #[error("設定ストアへのアクセスが許可されていません。")]
    PermissionDenied(#[source] std::io::Error),

    /// ストレージの空き容量が不足している。
    #[error("ストレージの空き容量が不足しています。")]
    InsufficientStorage(#[source] std::io::Error),

    /// 設定値のシリアライズに失敗した。
    #[error("設定値のシリアライズに失敗しました。")]
    Serialize(#[source] serde_json::Error),

    /// 設定値のデシリアライズに失敗した。
    #[error("設定値のデシリアライズに失敗しました。")]
    Deserialize(#[source] serde_json::Error),

    /// その他の入出力エラー
    #[error("設定ストアの入出力でエラーが発生しました。")]
    Io(#[source] std::io::Error),
}

impl PreferencesError {
    /// 入出力エラーを設定ストアのエラーに分類する。
    fn from_io(e: std::io::Error) -> Self {
        match e.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(e),
            ErrorKind::StorageFull => Self::InsufficientStorage(e),
            _ => Self::Io(e),
        }
    }
}

/// JSONファイルに保存するキー・バリュー形式の設定ストア
///
/// モバイル・プラットフォームの設定ストアと同じく、ストアのファイルが存在しない
/// 場合は空の設定として扱う。読み書きは`RwLock`で直列化する。
#[derive(Debug)]
pub struct JsonPreferencesStore {
    /// 設定ファイルのパス
    path: PathBuf,
    /// 読み書きを直列化するロック
    lock: RwLock<()>,
}

impl JsonPreferencesStore {
    /// 設定ストアを構築する。
    ///
    /// # 引数
    ///
    /// * `path` - 設定ファイルのパス
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: RwLock::new(()),
        }
    }

    /// 指定されたキーの設定値を取得する。
    ///
    /// # 引数
    ///
    /// * `key` - 設定値のキー
    ///
    /// # 戻り値
    ///
    /// 設定値。キーが保存されていない場合は`None`
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PreferencesError> {
        let _guard = self.lock.read().await;
        let entries = self.read_entries().await?;
        match entries.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(PreferencesError::Deserialize),
            None => Ok(None),
        }
    }

    /// 指定されたキーに設定値を保存する。
    ///
    /// # 引数
    ///
    /// * `key` - 設定値のキー
    /// * `value` - 保存する設定値
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PreferencesError> {
        let _guard = self.lock.write().await;
        let mut entries = self.read_entries().await?;
        let value = serde_json::to_value(value).map_err(PreferencesError::Serialize)?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries).await
    }

    /// 設定ファイルからすべての設定値を読み込む。
    async fn read_entries(&self) -> Result<Map<String, Value>, PreferencesError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(PreferencesError::Deserialize),
            // ストアのファイルが存在しない場合は空の設定として扱う
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(PreferencesError::from_io(e)),
        }
    }

    /// 設定ファイルにすべての設定値を書き込む。
    async fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(PreferencesError::from_io)?;
        }
        let bytes = serde_json::to_vec_pretty(entries).map_err(PreferencesError::Serialize)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(PreferencesError::from_io)
    }
}

/// 設定ストアのエラーをドメイン・エラーに変換する。
///
/// 変換は既知のすべてのバリアントを網羅して、副作用を持たない。
pub fn translate_preferences_error(e: PreferencesError) -> DomainError {
    let message = e.to_string();
    match e {
        PreferencesError::PermissionDenied(source) => DomainError::permission_denied()
            .with_message(message)
            .with_cause(source.into()),
        PreferencesError::InsufficientStorage(source) => {
            DomainError::insufficient_storage().with_cause(source.into())
        }
        PreferencesError::Serialize(source) | PreferencesError::Deserialize(source) => {
            DomainError::storage()
                .with_message(message)
                .with_cause(source.into())
        }
        PreferencesError::Io(source) => DomainError::storage()
            .with_message(message)
            .with_cause(source.into()),
    }
}
