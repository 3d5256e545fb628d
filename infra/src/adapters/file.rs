use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use domain::models::diary_image::ImageData;
use domain::DomainError;

/// 画像ファイル・ストアのエラー
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    /// ファイルが存在しない。
    #[error("ファイル({0})が存在しません。")]
    NotFound(PathBuf),

    /// ファイルへのアクセスが許可されていない。
    #[error("ファイル({0})へのアクセスが許可されていません。")]
    PermissionDenied(PathBuf),

    /// ストレージの空き容量が不足している。
    #[error("ストレージの空き容量が不足しています。")]
    InsufficientStorage(#[source] std::io::Error),

    /// その他の入出力エラー
    #[error("ファイル({0})の入出力でエラーが発生しました。")]
    Io(PathBuf, #[source] std::io::Error),
}

impl FileStoreError {
    /// 入出力エラーをファイル・ストアのエラーに分類する。
    fn from_io(e: std::io::Error, path: &Path) -> Self {
        match e.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::StorageFull => Self::InsufficientStorage(e),
            _ => Self::Io(path.to_path_buf(), e),
        }
    }
}

/// 画像ファイル・ストア
///
/// 日記の画像をキャッシュ・ディレクトリと保存ディレクトリに保存する。ファイル名は
/// UUID v4から生成して、ファイル名の衝突を避ける。
#[derive(Debug, Clone)]
pub struct ImageFileStore {
    /// キャッシュ・ディレクトリのパス
    cache_dir: PathBuf,
    /// 保存ディレクトリのパス
    picture_dir: PathBuf,
}

impl ImageFileStore {
    /// 画像ファイル・ストアを構築する。
    ///
    /// # 引数
    ///
    /// * `cache_dir` - キャッシュ・ディレクトリのパス
    /// * `picture_dir` - 保存ディレクトリのパス
    pub fn new(cache_dir: PathBuf, picture_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            picture_dir,
        }
    }

    /// 画像をキャッシュ・ディレクトリに保存する。
    ///
    /// # 引数
    ///
    /// * `data` - 画像のデータ
    ///
    /// # 戻り値
    ///
    /// キャッシュ・ディレクトリに保存した画像のパス
    pub async fn write_cache(&self, data: &ImageData) -> Result<PathBuf, FileStoreError> {
        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| FileStoreError::from_io(e, &self.cache_dir))?;
        let path = self
            .cache_dir
            .join(format!("{}.{}", Uuid::new_v4(), data.format.extension()));
        tokio::fs::write(&path, &data.bytes)
            .await
            .map_err(|e| FileStoreError::from_io(e, &path))?;

        Ok(path)
    }

    /// キャッシュ・ディレクトリの画像を保存ディレクトリに移動する。
    ///
    /// # 引数
    ///
    /// * `cached` - キャッシュ・ディレクトリに保存した画像のパス
    ///
    /// # 戻り値
    ///
    /// 保存ディレクトリに移動した画像のパス
    pub async fn promote(&self, cached: &Path) -> Result<PathBuf, FileStoreError> {
        let file_name = cached
            .file_name()
            .ok_or_else(|| FileStoreError::NotFound(cached.to_path_buf()))?;
        tokio::fs::create_dir_all(&self.picture_dir)
            .await
            .map_err(|e| FileStoreError::from_io(e, &self.picture_dir))?;
        let destination = self.picture_dir.join(file_name);

        match tokio::fs::rename(cached, &destination).await {
            Ok(()) => Ok(destination),
            // ファイル・システムをまたぐ場合はコピーしてから削除
            Err(e) if e.kind() == ErrorKind::CrossesDevices => {
                tokio::fs::copy(cached, &destination)
                    .await
                    .map_err(|e| FileStoreError::from_io(e, &destination))?;
                tokio::fs::remove_file(cached)
                    .await
                    .map_err(|e| FileStoreError::from_io(e, cached))?;
                Ok(destination)
            }
            Err(e) => Err(FileStoreError::from_io(e, cached)),
        }
    }

    /// 画像を削除する。
    ///
    /// # 引数
    ///
    /// * `path` - 削除する画像のパス
    pub async fn remove(&self, path: &Path) -> Result<(), FileStoreError> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| FileStoreError::from_io(e, path))
    }
}

/// ファイル・ストアのエラーをドメイン・エラーに変換する。
///
/// 変換は既知のすべてのバリアントを網羅して、副作用を持たない。
pub fn translate_file_store_error(e: FileStoreError) -> DomainError {
    let message = e.to_string();
    match e {
        FileStoreError::NotFound(_) => DomainError::not_found().with_message(message),
        FileStoreError::PermissionDenied(_) => {
            DomainError::permission_denied().with_message(message)
        }
        FileStoreError::InsufficientStorage(source) => {
            DomainError::insufficient_storage().with_cause(source.into())
        }
        FileStoreError::Io(_, source) => DomainError::storage()
            .with_message(message)
            .with_cause(source.into()),
    }
}

#[cfg(test)]
pub mod tests {
    use domain::models::diary_image::ImageFormat;
    use domain::DomainErrorKind;

    use super::*;

    /// テスト用のファイル・ストアを構築する。
    pub fn temporary_store() -> ImageFileStore {
        let root = std::env::temp_dir().join(format!("diary-image-store-{}", Uuid::new_v4()));
        ImageFileStore::new(root.join("cache"), root.join("pictures"))
    }

    pub fn png_data() -> ImageData {
        ImageData::new(ImageFormat::Png, vec![0x89, 0x50, 0x4e, 0x47]).unwrap()
    }

    /// 画像をキャッシュ・ディレクトリに保存できることを確認
    #[tokio::test]
    async fn an_image_can_be_written_to_the_cache_dir() -> anyhow::Result<()> {
        let store = temporary_store();

        let path = store.write_cache(&png_data()).await?;

        assert!(path.starts_with(&store.cache_dir));
        assert_eq!(Some("png"), path.extension().and_then(|e| e.to_str()));
        assert_eq!(png_data().bytes, tokio::fs::read(&path).await?);

        Ok(())
    }

    /// キャッシュ・ディレクトリの画像を保存ディレクトリに移動できることを確認
    #[tokio::test]
    async fn a_cached_image_can_be_promoted_to_the_picture_dir() -> anyhow::Result<()> {
        let store = temporary_store();
        let cached = store.write_cache(&png_data()).await?;

        let promoted = store.promote(&cached).await?;

        assert!(promoted.starts_with(&store.picture_dir));
        assert!(!tokio::fs::try_exists(&cached).await?);
        assert_eq!(png_data().bytes, tokio::fs::read(&promoted).await?);

        Ok(())
    }

    /// 存在しない画像を移動できないことを確認
    #[tokio::test]
    async fn a_missing_image_can_not_be_promoted() {
        let store = temporary_store();

        let result = store.promote(Path::new("/no/such/image.png")).await;

        assert!(matches!(result, Err(FileStoreError::NotFound(_))));
    }

    /// 画像を削除できることを確認
    #[tokio::test]
    async fn an_image_can_be_removed() -> anyhow::Result<()> {
        let store = temporary_store();
        let cached = store.write_cache(&png_data()).await?;

        store.remove(&cached).await?;

        assert!(!tokio::fs::try_exists(&cached).await?);

        Ok(())
    }

    /// ファイル・ストアのエラーを期待したドメイン・エラー分類に変換することを確認
    #[test]
    fn file_store_errors_are_translated_to_the_documented_kinds() {
        let candidates = [
            (
                translate_file_store_error(FileStoreError::NotFound(PathBuf::from("a.png"))),
                DomainErrorKind::NotFound,
            ),
            (
                translate_file_store_error(FileStoreError::PermissionDenied(PathBuf::from(
                    "a.png",
                ))),
                DomainErrorKind::PermissionDenied,
            ),
            (
                translate_file_store_error(FileStoreError::InsufficientStorage(
                    std::io::Error::new(ErrorKind::StorageFull, "no space left on device"),
                )),
                DomainErrorKind::InsufficientStorage,
            ),
            (
                translate_file_store_error(FileStoreError::Io(
                    PathBuf::from("a.png"),
                    std::io::Error::other("broken"),
                )),
                DomainErrorKind::Storage,
            ),
        ];
        for (translated, expected) in candidates {
            assert_eq!(expected, translated.kind);
        }
    }

    /// 入出力エラーの分類を確認
    #[test]
    fn io_errors_are_classified_by_the_error_kind() {
        let path = Path::new("a.png");
        assert!(matches!(
            FileStoreError::from_io(std::io::Error::new(ErrorKind::NotFound, "not found"), path),
            FileStoreError::NotFound(_)
        ));
        assert!(matches!(
            FileStoreError::from_io(
                std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
                path
            ),
            FileStoreError::PermissionDenied(_)
        ));
        assert!(matches!(
            FileStoreError::from_io(
                std::io::Error::new(ErrorKind::StorageFull, "no space"),
                path
            ),
            FileStoreError::InsufficientStorage(_)
        ));
        assert!(matches!(
            FileStoreError::from_io(std::io::Error::other("broken"), path),
            FileStoreError::Io(_, _)
        ));
    }
}
