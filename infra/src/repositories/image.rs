use async_trait::async_trait;

use domain::models::diary_image::{CachedImagePath, ImageData, StoredImagePath};
use domain::repositories::diary_image::DiaryImageRepository;
use domain::DomainResult;

use crate::adapters::file::{translate_file_store_error, ImageFileStore};

/// ファイル・システム日記画像リポジトリ
#[derive(Debug, Clone)]
pub struct FsDiaryImageRepository {
    /// 画像ファイル・ストア
    store: ImageFileStore,
}

impl FsDiaryImageRepository {
    /// ファイル・システム日記画像リポジトリを構築する。
    ///
    /// # 引数
    ///
    /// * `store` - 画像ファイル・ストア
    pub fn new(store: ImageFileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DiaryImageRepository for FsDiaryImageRepository {
    async fn cache(&self, data: ImageData) -> DomainResult<CachedImagePath> {
        let path = self.store.write_cache(&data).await.map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            translate_file_store_error(e)
        })?;

        Ok(CachedImagePath::new(path))
    }

    async fn store(&self, cached: CachedImagePath) -> DomainResult<StoredImagePath> {
        let path = self.store.promote(cached.value()).await.map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            translate_file_store_error(e)
        })?;

        Ok(StoredImagePath::new(path))
    }

    async fn delete_cached(&self, path: CachedImagePath) -> DomainResult<()> {
        self.store.remove(path.value()).await.map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            translate_file_store_error(e)
        })
    }

    async fn delete_stored(&self, path: StoredImagePath) -> DomainResult<()> {
        self.store.remove(path.value()).await.map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            translate_file_store_error(e)
        })
    }
}
