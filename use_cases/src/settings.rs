use std::borrow::Cow;

use secrecy::SecretString;

use domain::models::location::{LocationTimeout, LOCATION_TIMEOUT_MIN_MILLISECONDS};

use crate::UseCaseResult;

/// 設定の検証エラー
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct InvalidSettings {
    /// メッセージ
    pub message: Cow<'static, str>,
}

impl InvalidSettings {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 位置情報設定
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LocationSettings {
    /// 現在位置の取得タイムアウト（ミリ秒）
    pub timeout_milliseconds: u64,
}

impl LocationSettings {
    /// 位置情報設定を検証する。
    pub fn validate(&self) -> UseCaseResult<(), InvalidSettings> {
        if self.timeout_milliseconds < LOCATION_TIMEOUT_MIN_MILLISECONDS {
            tracing::error!("{} ({}:{})", INVALID_LOCATION_TIMEOUT, file!(), line!());
            return Err(InvalidSettings::new(INVALID_LOCATION_TIMEOUT));
        }

        Ok(())
    }

    /// 現在位置の取得タイムアウトを返す。
    ///
    /// 設定を検証した後に呼び出さなければならない。
    pub fn timeout(&self) -> LocationTimeout {
        LocationTimeout::new(self.timeout_milliseconds).expect("validated location settings")
    }
}

const INVALID_LOCATION_TIMEOUT: &str =
    "現在位置の取得タイムアウトは、1ミリ秒以上でなければなりません。";

/// 天気APIが予報を提供する日数の上限
const WEATHER_FORECAST_MAX_DAYS: u16 = 16;

/// 天気情報設定
#[derive(Debug, Clone, serde::Deserialize)]
pub struct WeatherSettings {
    /// 天気APIのベースURL
    pub base_url: String,
    /// 天気APIのAPIキー
    pub api_key: Option<SecretString>,
    /// 天気APIの接続タイムアウト（秒）
    pub timeout_seconds: u64,
    /// 天気情報を取得できる過去の日数
    pub fetchable_past_days: u16,
    /// 天気情報を取得できる未来の日数
    pub fetchable_future_days: u16,
}

impl WeatherSettings {
    /// 天気情報設定を検証する。
    pub fn validate(&self) -> UseCaseResult<(), InvalidSettings> {
        if self.base_url.trim().is_empty() {
            tracing::error!("{} ({}:{})", INVALID_WEATHER_BASE_URL, file!(), line!());
            return Err(InvalidSettings::new(INVALID_WEATHER_BASE_URL));
        }
        if self.timeout_seconds == 0 {
            tracing::error!("{} ({}:{})", INVALID_WEATHER_TIMEOUT, file!(), line!());
            return Err(InvalidSettings::new(INVALID_WEATHER_TIMEOUT));
        }
        if WEATHER_FORECAST_MAX_DAYS < self.fetchable_future_days {
            tracing::error!("{} ({}:{})", INVALID_WEATHER_FUTURE_DAYS, file!(), line!());
            return Err(InvalidSettings::new(INVALID_WEATHER_FUTURE_DAYS));
        }

        Ok(())
    }
}

const INVALID_WEATHER_BASE_URL: &str = "天気APIのベースURLを指定してください。";
const INVALID_WEATHER_TIMEOUT: &str =
    "天気APIの接続タイムアウトは、1秒以上でなければなりません。";
const INVALID_WEATHER_FUTURE_DAYS: &str =
    "天気情報を取得できる未来の日数は、16日以下でなければなりません。";
