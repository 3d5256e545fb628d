use domain::models::diary_image::{CachedImagePath, ImageData};
use domain::repositories::diary_image::DiaryImageRepository;
use domain::{DomainError, DomainErrorKind};

use crate::UseCaseResult;

/// 日記画像キャッシュ・ユース・ケースのエラー
#[derive(Debug, thiserror::Error)]
pub enum CacheDiaryImageError {
    /// ストレージの空き容量が不足している。
    #[error("ストレージの空き容量が不足しているため、画像を保存できません。")]
    InsufficientStorage,

    /// ストレージへのアクセスが許可されていない。
    #[error("ストレージへのアクセスが許可されていません。")]
    PermissionDenied,

    /// 画像をキャッシュ領域に保存できなかった。
    #[error("画像の保存に失敗しました。")]
    Repository(#[source] DomainError),

    /// 処理がキャンセルされた。
    #[error("処理がキャンセルされました。")]
    Cancelled,
}

impl CacheDiaryImageError {
    /// 日記画像リポジトリが返したドメイン・エラーを、ユース・ケースのエラーに変換する。
    ///
    /// キャンセルの通知は、他の分類より先にそのまま伝播する。
    fn from_repository(e: DomainError) -> Self {
        if e.is_cancelled() {
            return Self::Cancelled;
        }
        match e.kind {
            DomainErrorKind::InsufficientStorage => Self::InsufficientStorage,
            DomainErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Repository(e),
        }
    }
}

/// 日記の画像をキャッシュ領域に保存する。
///
/// 日記を登録するまでの間、画像はキャッシュ領域に保存する。日記を登録するとき、
/// 日記登録ユース・ケースが画像を保存領域に移動する。
///
/// # 引数
///
/// * `data` - 画像のデータ
/// * `repository` - 日記画像リポジトリ
///
/// # 戻り値
///
/// キャッシュ領域に保存した画像のパス
#[tracing::instrument(name = "cache diary image use case", skip(data, repository))]
pub async fn cache_diary_image(
    data: ImageData,
    repository: &impl DiaryImageRepository,
) -> UseCaseResult<CachedImagePath, CacheDiaryImageError> {
    repository.cache(data).await.map_err(|e| {
        tracing::error!("{} ({}:{})", e, file!(), line!());
        CacheDiaryImageError::from_repository(e)
    })
}
