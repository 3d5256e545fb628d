use reqwest::StatusCode;
use secrecy::{ExposeSecret as _, SecretString};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;

use domain::models::location::Location;
use domain::models::weather::Weather;
use domain::DomainError;
use use_cases::settings::WeatherSettings;

/// 天気APIのエラー
#[derive(Debug, thiserror::Error)]
pub enum WeatherApiError {
    /// 天気APIに接続できない。
    #[error("天気APIに接続できませんでした。")]
    Connect(#[source] reqwest::Error),

    /// 天気APIへの接続がタイムアウトした。
    #[error("天気APIへの接続がタイムアウトしました。")]
    Timeout(#[source] reqwest::Error),

    /// 天気APIがエラー・ステータスを返した。
    #[error("天気APIがエラー・ステータス({0})を返しました。")]
    Status(StatusCode),

    /// 天気APIのレスポンスを解釈できない。
    #[error("天気APIのレスポンスを解釈できませんでした。")]
    Parse(#[source] anyhow::Error),

    /// 指定した日付の天気情報がレスポンスに存在しない。
    #[error("天気APIが日付({0})の天気情報を返しませんでした。")]
    MissingData(Date),
}

/// 日付のフォーマット
const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// 日単位の天気予報
///
/// 天気APIが返した、検証する前の天気予報を表現する。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyForecast {
    /// 日付
    pub date: Date,
    /// 天気
    pub weather: Weather,
    /// 最高気温（摂氏）
    pub max_temperature: f64,
    /// 最低気温（摂氏）
    pub min_temperature: f64,
}

/// 天気APIクライアント
///
/// Open-Meteo互換の天気予報APIから、日単位の天気と気温を取得する。
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    /// HTTPクライアント
    client: reqwest::Client,
    /// 天気APIのベースURL
    base_url: String,
    /// 天気APIのAPIキー
    api_key: Option<SecretString>,
}

impl WeatherApiClient {
    /// 天気APIクライアントを構築する。
    ///
    /// # 引数
    ///
    /// * `settings` - 天気情報設定
    ///
    /// # 戻り値
    ///
    /// 天気APIクライアント
    pub fn new(settings: &WeatherSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    /// 指定された日付と位置の日単位の天気予報を取得する。
    ///
    /// # 引数
    ///
    /// * `date` - 天気予報を取得する日付
    /// * `location` - 天気予報を取得する位置
    ///
    /// # 戻り値
    ///
    /// 日単位の天気予報
    pub async fn fetch_daily_forecast(
        &self,
        date: Date,
        location: Location,
    ) -> Result<DailyForecast, WeatherApiError> {
        let date_str = date
            .format(&DATE_FORMAT)
            .map_err(|e| WeatherApiError::Parse(e.into()))?;
        let url = format!("{}/v1/forecast", self.base_url);
        let mut request = self.client.get(&url).query(&[
            ("latitude", location.latitude.value().to_string()),
            ("longitude", location.longitude.value().to_string()),
            (
                "daily",
                String::from("weather_code,temperature_2m_max,temperature_2m_min"),
            ),
            ("timezone", String::from("Asia/Tokyo")),
            ("start_date", date_str.clone()),
            ("end_date", date_str.clone()),
        ]);
        if let Some(api_key) = &self.api_key {
            request = request.query(&[("apikey", api_key.expose_secret())]);
        }

        let response = request.send().await.map_err(classify_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherApiError::Status(status));
        }
        let body: ForecastResponseBody = response
            .json()
            .await
            .map_err(|e| WeatherApiError::Parse(e.into()))?;

        body.daily_forecast(date, &date_str)
    }
}

/// `reqwest`のエラーを天気APIのエラーに分類する。
fn classify_reqwest_error(e: reqwest::Error) -> WeatherApiError {
    if e.is_timeout() {
        WeatherApiError::Timeout(e)
    } else {
        WeatherApiError::Connect(e)
    }
}

/// 天気APIのレスポンス・ボディ
#[derive(Debug, serde::Deserialize)]
struct ForecastResponseBody {
    daily: DailyResponseBody,
}

/// 天気APIのレスポンス・ボディの日単位の予報
#[derive(Debug, serde::Deserialize)]
struct DailyResponseBody {
    time: Vec<String>,
    weather_code: Vec<u16>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

impl ForecastResponseBody {
    /// レスポンス・ボディから指定された日付の予報を取り出す。
    fn daily_forecast(self, date: Date, date_str: &str) -> Result<DailyForecast, WeatherApiError> {
        let index = self
            .daily
            .time
            .iter()
            .position(|t| t == date_str)
            .ok_or(WeatherApiError::MissingData(date))?;
        let weather_code = *self
            .daily
            .weather_code
            .get(index)
            .ok_or(WeatherApiError::MissingData(date))?;
        let max_temperature = *self
            .daily
            .temperature_2m_max
            .get(index)
            .ok_or(WeatherApiError::MissingData(date))?;
        let min_temperature = *self
            .daily
            .temperature_2m_min
            .get(index)
            .ok_or(WeatherApiError::MissingData(date))?;
        let weather = weather_from_wmo_code(weather_code).ok_or_else(|| {
            WeatherApiError::Parse(anyhow::anyhow!(
                "unknown WMO weather code: {}",
                weather_code
            ))
        })?;

        Ok(DailyForecast {
            date,
            weather,
            max_temperature,
            min_temperature,
        })
    }
}

/// WMO天気コードを天気に変換する。
///
/// 天気APIが返すWMO天気コードの表に基づいて、アプリが扱う天気の区分に丸める。
pub fn weather_from_wmo_code(code: u16) -> Option<Weather> {
    match code {
        0 | 1 => Some(Weather::Sunny),
        2 | 3 | 45 | 48 => Some(Weather::Cloudy),
        51..=67 | 80..=82 => Some(Weather::Rainy),
        71..=77 | 85 | 86 => Some(Weather::Snowy),
        95..=99 => Some(Weather::Stormy),
        _ => None,
    }
}

/// 天気APIのエラーをドメイン・エラーに変換する。
///
/// 変換は既知のすべてのバリアントを網羅して、副作用を持たない。
pub fn translate_weather_api_error(e: WeatherApiError) -> DomainError {
    let message = e.to_string();
    match e {
        WeatherApiError::Connect(source) | WeatherApiError::Timeout(source) => {
            DomainError::network_connection()
                .with_message(message)
                .with_cause(source.into())
        }
        WeatherApiError::Status(_) => DomainError::network_connection().with_message(message),
        WeatherApiError::Parse(source) => DomainError::unexpected()
            .with_message(message)
            .with_cause(source),
        WeatherApiError::MissingData(_) => DomainError::not_found().with_message(message),
    }
}
