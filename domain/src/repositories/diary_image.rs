use async_trait::async_trait;

use crate::models::diary_image::{CachedImagePath, ImageData, StoredImagePath};
use crate::DomainResult;

/// 日記画像リポジトリ
///
/// 日記の画像をキャッシュ領域と保存領域に保存する。日記を登録するまでの間、画像は
/// キャッシュ領域に保存して、日記を登録するときに保存領域へ移動する。
#[async_trait]
pub trait DiaryImageRepository: Send + Sync + 'static {
    /// 画像をキャッシュ領域に保存する。
    ///
    /// ストレージの空き容量が不足している場合、`InsufficientStorage`のドメイン・
    /// エラーを返す。
    ///
    /// # 引数
    ///
    /// * `data` - 画像のデータ
    ///
    /// # 戻り値
    ///
    /// キャッシュ領域に保存した画像のパス
    async fn cache(&self, data: ImageData) -> DomainResult<CachedImagePath>;

    /// キャッシュ領域の画像を保存領域に移動する。
    ///
    /// # 引数
    ///
    /// * `cached` - キャッシュ領域に保存した画像のパス
    ///
    /// # 戻り値
    ///
    /// 保存領域に移動した画像のパス
    async fn store(&self, cached: CachedImagePath) -> DomainResult<StoredImagePath>;

    /// キャッシュ領域の画像を削除する。
    async fn delete_cached(&self, path: CachedImagePath) -> DomainResult<()>;

    /// 保存領域の画像を削除する。
    async fn delete_stored(&self, path: StoredImagePath) -> DomainResult<()>;
}
