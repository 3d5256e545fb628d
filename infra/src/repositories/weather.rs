use async_trait::async_trait;
use time::Date;

use domain::models::location::Location;
use domain::models::weather::{Temperature, WeatherInfo};
use domain::repositories::weather::WeatherInfoRepository;
use domain::DomainResult;

use crate::adapters::weather::{translate_weather_api_error, WeatherApiClient};

/// 天気APIを使用する天気情報リポジトリ
#[derive(Debug, Clone)]
pub struct ApiWeatherInfoRepository {
    /// 天気APIクライアント
    client: WeatherApiClient,
}

impl ApiWeatherInfoRepository {
    /// 天気情報リポジトリを構築する。
    ///
    /// # 引数
    ///
    /// * `client` - 天気APIクライアント
    pub fn new(client: WeatherApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WeatherInfoRepository for ApiWeatherInfoRepository {
    async fn fetch(&self, date: Date, location: Location) -> DomainResult<WeatherInfo> {
        let forecast = self
            .client
            .fetch_daily_forecast(date, location)
            .await
            .map_err(|e| {
                tracing::error!("{} ({}:{})", e, file!(), line!());
                translate_weather_api_error(e)
            })?;

        WeatherInfo::new(
            forecast.date,
            forecast.weather,
            Temperature::new(forecast.max_temperature)?,
            Temperature::new(forecast.min_temperature)?,
        )
    }
}
