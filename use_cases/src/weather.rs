use time::Date;

use domain::cancellation::CancellationToken;
use domain::models::location::LocationTimeout;
use domain::models::weather::WeatherInfo;
use domain::now_jst;
use domain::permissions::PermissionGuard;
use domain::repositories::location::LocationRepository;
use domain::repositories::weather::WeatherInfoRepository;
use domain::DomainError;

use crate::location::{fetch_current_location, FetchCurrentLocationError};
use crate::settings::WeatherSettings;
use crate::UseCaseResult;

/// 天気情報取得ユース・ケースのエラー
#[derive(Debug, thiserror::Error)]
pub enum FetchWeatherInfoError {
    /// 位置情報へのアクセスが許可されていない。
    #[error("位置情報へのアクセスが許可されていません。")]
    LocationPermissionNotGranted,

    /// 日付が天気情報を取得できる範囲外である。
    #[error("日付({0})は天気情報を取得できる範囲外です。")]
    DateOutOfRange(Date),

    /// 現在位置を取得できなかった。
    #[error("現在位置を取得できませんでした。")]
    LocationUnavailable(#[source] DomainError),

    /// 天気情報を取得できなかった。
    #[error("天気情報の取得に失敗しました。")]
    Fetch(#[source] DomainError),

    /// 処理がキャンセルされた。
    #[error("処理がキャンセルされました。")]
    Cancelled,

    /// 予期していないエラーが発生した。
    #[error("天気情報を取得するときに、予期していないエラーが発生しました。")]
    Unexpected(#[source] DomainError),
}

impl From<FetchCurrentLocationError> for FetchWeatherInfoError {
    /// 現在位置取得ユース・ケースのエラーを、天気情報取得ユース・ケースのエラーに
    /// 変換する。
    fn from(e: FetchCurrentLocationError) -> Self {
        match e {
            FetchCurrentLocationError::PermissionNotGranted => Self::LocationPermissionNotGranted,
            FetchCurrentLocationError::Unavailable(e) => Self::LocationUnavailable(e),
            FetchCurrentLocationError::Cancelled => Self::Cancelled,
            FetchCurrentLocationError::Unexpected(e) => Self::Unexpected(e),
        }
    }
}

impl FetchWeatherInfoError {
    /// 天気情報リポジトリが返したドメイン・エラーを、ユース・ケースのエラーに変換する。
    ///
    /// キャンセルの通知は、他の分類より先にそのまま伝播する。
    fn from_weather_repository(e: DomainError) -> Self {
        if e.is_cancelled() {
            return Self::Cancelled;
        }

        Self::Fetch(e)
    }
}

/// 天気情報を取得できる日付の範囲か確認する。
///
/// この確認は失敗しないため、結果を`bool`で返す。
///
/// # 引数
///
/// * `date` - 確認する日付
/// * `today` - 本日の日付
/// * `settings` - 天気情報設定
///
/// # 戻り値
///
/// 天気情報を取得できる日付の場合は`true`、それ以外の場合は`false`
pub fn is_fetchable_date(date: Date, today: Date, settings: &WeatherSettings) -> bool {
    let min = today - time::Duration::days(i64::from(settings.fetchable_past_days));
    let max = today + time::Duration::days(i64::from(settings.fetchable_future_days));

    (min..=max).contains(&date)
}

/// 指定された日付と現在位置の天気情報を取得する。
///
/// 次の手順で天気情報を取得して、最初に失敗した手順のエラーを返す。
///
/// 1. 日付が天気情報を取得できる範囲か確認
/// 2. 現在位置を取得
/// 3. 現在位置の天気情報を取得
///
/// 日付が範囲外の場合、位置情報リポジトリと天気情報リポジトリは呼び出さない。
///
/// # 引数
///
/// * `date` - 天気情報を取得する日付
/// * `guard` - 権限の許可状態を確認する能力
/// * `location_repository` - 位置情報リポジトリ
/// * `weather_repository` - 天気情報リポジトリ
/// * `settings` - 天気情報設定
/// * `timeout` - 現在位置の取得タイムアウト
/// * `token` - キャンセル・トークン
///
/// # 戻り値
///
/// 天気情報
#[tracing::instrument(
    name = "fetch weather info use case",
    skip(guard, location_repository, weather_repository, settings, token),
    fields(weather.date = %date)
)]
pub async fn fetch_weather_info(
    date: Date,
    guard: &impl PermissionGuard,
    location_repository: &impl LocationRepository,
    weather_repository: &impl WeatherInfoRepository,
    settings: &WeatherSettings,
    timeout: LocationTimeout,
    token: &CancellationToken,
) -> UseCaseResult<WeatherInfo, FetchWeatherInfoError> {
    // 天気情報を取得できる日付の範囲か確認
    if !is_fetchable_date(date, now_jst().date(), settings) {
        return Err(FetchWeatherInfoError::DateOutOfRange(date));
    }

    // 現在位置を取得
    let location = fetch_current_location(guard, location_repository, timeout, token)
        .await
        .map_err(FetchWeatherInfoError::from)?;

    // 現在位置の天気情報を取得
    weather_repository
        .fetch(date, location)
        .await
        .map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            FetchWeatherInfoError::from_weather_repository(e)
        })
}
