use std::sync::Arc;

use async_trait::async_trait;

use domain::cancellation::CancellationToken;
use domain::models::location::{Location, LocationTimeout};
use domain::repositories::location::LocationRepository;
use domain::{DomainError, DomainResult};

use crate::adapters::location::{translate_location_provider_error, LocationProvider};

/// 現在位置を取得できなかったときのメッセージ
const LOCATION_UNAVAILABLE: &str = "現在位置を取得できませんでした。";

/// 位置情報プロバイダーを使用する位置情報リポジトリ
///
/// 位置情報プロバイダーの呼び出しをタイムアウトとキャンセル・トークンで包んで、
/// タイムアウトは「現在位置を取得できない」ことを示すドメイン・エラーに変換する。
pub struct ProviderLocationRepository {
    /// 位置情報プロバイダー
    provider: Arc<dyn LocationProvider>,
}

impl ProviderLocationRepository {
    /// 位置情報リポジトリを構築する。
    ///
    /// # 引数
    ///
    /// * `provider` - 位置情報プロバイダー
    pub fn new(provider: Arc<dyn LocationProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl LocationRepository for ProviderLocationRepository {
    async fn fetch_current_location(
        &self,
        timeout: LocationTimeout,
        token: &CancellationToken,
    ) -> DomainResult<Location> {
        let fetch = tokio::time::timeout(timeout.to_duration(), self.provider.current_location());

        tokio::select! {
            // キャンセルの通知を最優先で伝播
            _ = token.cancelled() => Err(DomainError::cancelled()),
            result = fetch => match result {
                Ok(Ok(raw)) => Location::new(raw.latitude, raw.longitude),
                Ok(Err(e)) => {
                    tracing::error!("{} ({}:{})", e, file!(), line!());
                    Err(translate_location_provider_error(e))
                }
                // タイムアウトは「現在位置を取得できない」として扱う
                Err(_) => Err(DomainError::not_found().with_message(LOCATION_UNAVAILABLE)),
            },
        }
    }
}
