use async_trait::async_trait;

use domain::DomainError;

/// 位置情報プロバイダーが返す生の位置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawLocation {
    /// 緯度（度）
    pub latitude: f64,
    /// 経度（度）
    pub longitude: f64,
}

/// 位置情報プロバイダーのエラー
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum LocationProviderError {
    /// 現在位置を取得できない。
    #[error("位置情報プロバイダーが現在位置を取得できませんでした。")]
    Unavailable,

    /// 位置情報へのアクセスが許可されていない。
    #[error("位置情報プロバイダーへのアクセスが許可されていません。")]
    PermissionDenied,

    /// 現在位置の取得が中断された。
    #[error("現在位置の取得が中断されました。")]
    Interrupted,
}

/// 位置情報プロバイダー
///
/// プラットフォームの位置情報APIを抽象化する。
#[async_trait]
pub trait LocationProvider: Send + Sync + 'static {
    /// 現在位置を取得する。
    async fn current_location(&self) -> Result<RawLocation, LocationProviderError>;
}

/// 構成された固定位置を返す位置情報プロバイダー
///
/// 位置情報センサーを持たない環境で使用する。
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    location: RawLocation,
}

impl FixedLocationProvider {
    /// 固定位置を返す位置情報プロバイダーを構築する。
    ///
    /// # 引数
    ///
    /// * `latitude` - 緯度（度）
    /// * `longitude` - 経度（度）
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            location: RawLocation {
                latitude,
                longitude,
            },
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_location(&self) -> Result<RawLocation, LocationProviderError> {
        Ok(self.location)
    }
}

/// 位置情報プロバイダーのエラーをドメイン・エラーに変換する。
///
/// 中断の通知は、他の分類に変換する前にキャンセルとしてそのまま伝播する。
pub fn translate_location_provider_error(e: LocationProviderError) -> DomainError {
    let message = e.to_string();
    match e {
        LocationProviderError::Interrupted => DomainError::cancelled(),
        LocationProviderError::Unavailable => {
            DomainError::not_found().with_message("現在位置を取得できませんでした。")
        }
        LocationProviderError::PermissionDenied => {
            DomainError::permission_denied().with_message(message)
        }
    }
}
