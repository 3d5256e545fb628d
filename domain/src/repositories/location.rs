use async_trait::async_trait;

use crate::cancellation::CancellationToken;
use crate::models::location::{Location, LocationTimeout};
use crate::DomainResult;

/// 位置情報リポジトリ
#[async_trait]
pub trait LocationRepository: Send + Sync + 'static {
    /// 現在位置を取得する。
    ///
    /// タイムアウトまでに現在位置を取得できない場合、「現在位置を取得できませんで
    /// した」ことを示す`NotFound`のドメイン・エラーを返す。タイムアウト固有のエラー
    /// 型を返してはならない。
    ///
    /// キャンセル・トークンにキャンセルが通知された場合、`Cancelled`のドメイン・
    /// エラーを返す。
    ///
    /// # 引数
    ///
    /// * `timeout` - 現在位置の取得タイムアウト
    /// * `token` - キャンセル・トークン
    ///
    /// # 戻り値
    ///
    /// 現在位置
    async fn fetch_current_location(
        &self,
        timeout: LocationTimeout,
        token: &CancellationToken,
    ) -> DomainResult<Location>;
}
