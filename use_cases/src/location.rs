use domain::cancellation::CancellationToken;
use domain::models::location::{Location, LocationTimeout};
use domain::permissions::{Permission, PermissionGuard};
use domain::repositories::location::LocationRepository;
use domain::{DomainError, DomainErrorKind};

use crate::UseCaseResult;

/// 現在位置取得ユース・ケースのエラー
#[derive(Debug, thiserror::Error)]
pub enum FetchCurrentLocationError {
    /// 位置情報へのアクセスが許可されていない。
    #[error("位置情報へのアクセスが許可されていません。")]
    PermissionNotGranted,

    /// 現在位置を取得できなかった。
    #[error("現在位置を取得できませんでした。")]
    Unavailable(#[source] DomainError),

    /// 処理がキャンセルされた。
    #[error("処理がキャンセルされました。")]
    Cancelled,

    /// 予期していないエラーが発生した。
    #[error("現在位置を取得するときに、予期していないエラーが発生しました。")]
    Unexpected(#[source] DomainError),
}

impl FetchCurrentLocationError {
    /// 位置情報リポジトリが返したドメイン・エラーを、ユース・ケースのエラーに変換する。
    ///
    /// キャンセルの通知は、他の分類より先にそのまま伝播する。
    fn from_repository(e: DomainError) -> Self {
        if e.is_cancelled() {
            return Self::Cancelled;
        }
        match e.kind {
            DomainErrorKind::NotFound => Self::Unavailable(e),
            _ => Self::Unexpected(e),
        }
    }
}

/// 現在位置を取得する。
///
/// 位置情報へのアクセスが許可されていない場合、位置情報リポジトリを呼び出さずに
/// `PermissionNotGranted`を返す。
///
/// # 引数
///
/// * `guard` - 権限の許可状態を確認する能力
/// * `repository` - 位置情報リポジトリ
/// * `timeout` - 現在位置の取得タイムアウト
/// * `token` - キャンセル・トークン
///
/// # 戻り値
///
/// 現在位置
#[tracing::instrument(
    name = "fetch current location use case",
    skip(guard, repository, token)
)]
pub async fn fetch_current_location(
    guard: &impl PermissionGuard,
    repository: &impl LocationRepository,
    timeout: LocationTimeout,
    token: &CancellationToken,
) -> UseCaseResult<Location, FetchCurrentLocationError> {
    // 位置情報へのアクセスが許可されているか確認
    if !guard.is_granted(Permission::Location) {
        return Err(FetchCurrentLocationError::PermissionNotGranted);
    }

    // 現在位置を取得
    repository
        .fetch_current_location(timeout, token)
        .await
        .map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            FetchCurrentLocationError::from_repository(e)
        })
}
