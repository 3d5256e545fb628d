use time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use domain::cancellation::CancellationToken;
use domain::models::location::LocationTimeout;
use domain::models::weather::Weather;
use domain::now_jst;
use use_cases::weather::{fetch_weather_info, FetchWeatherInfoError};

use crate::helpers::spawn_test_app;

/// 天気APIのレスポンス・ボディを構築する。
fn forecast_response_body(date: &str) -> serde_json::Value {
    serde_json::json!({
        "daily": {
            "time": [date],
            "weather_code": [0],
            "temperature_2m_max": [21.4],
            "temperature_2m_min": [12.3],
        }
    })
}

/// 本日の日付をYYYY-MM-DD形式で返す。
fn today_string() -> String {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    now_jst().date().format(&format).expect("formatting today")
}

/// 現在位置の天気情報を取得できることを確認
#[tokio::test]
async fn weather_info_can_be_fetched_for_the_current_location() -> anyhow::Result<()> {
    // 準備
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_response_body(
            &today_string(),
        )))
        .expect(1)
        .mount(&server)
        .await;
    let app = spawn_test_app(&server.uri()).await?;
    let location_repository = app.context.location_repository();
    let weather_repository = app.context.weather_info_repository();

    // 実行
    let info = fetch_weather_info(
        now_jst().date(),
        app.context.permission_guard(),
        &location_repository,
        &weather_repository,
        &app.context.weather_settings,
        LocationTimeout::default(),
        &CancellationToken::never(),
    )
    .await
    .expect("the weather info was not fetched");

    // 検証
    assert_eq!(now_jst().date(), info.date);
    assert_eq!(Weather::Sunny, info.weather);
    assert_eq!(21.4, info.max_temperature.value());
    assert_eq!(12.3, info.min_temperature.value());

    Ok(())
}

/// 範囲外の日付の場合に、天気APIを呼び出さずにエラーを返すことを確認
#[tokio::test]
async fn the_weather_api_is_not_called_for_an_out_of_range_date() -> anyhow::Result<()> {
    // 準備
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_response_body(
            &today_string(),
        )))
        .expect(0)
        .mount(&server)
        .await;
    let app = spawn_test_app(&server.uri()).await?;
    let location_repository = app.context.location_repository();
    let weather_repository = app.context.weather_info_repository();
    let date = now_jst().date() + Duration::days(31);

    // 実行
    let result = fetch_weather_info(
        date,
        app.context.permission_guard(),
        &location_repository,
        &weather_repository,
        &app.context.weather_settings,
        LocationTimeout::default(),
        &CancellationToken::never(),
    )
    .await;

    // 検証
    assert!(matches!(
        result,
        Err(FetchWeatherInfoError::DateOutOfRange(d)) if d == date
    ));

    Ok(())
}

/// 天気APIに接続できない場合のエラーを確認
#[tokio::test]
async fn fetch_error_is_returned_when_the_weather_api_is_unreachable() -> anyhow::Result<()> {
    // 準備
    let app = spawn_test_app("http://localhost:9").await?;
    let location_repository = app.context.location_repository();
    let weather_repository = app.context.weather_info_repository();

    // 実行
    let result = fetch_weather_info(
        now_jst().date(),
        app.context.permission_guard(),
        &location_repository,
        &weather_repository,
        &app.context.weather_settings,
        LocationTimeout::default(),
        &CancellationToken::never(),
    )
    .await;

    // 検証
    assert!(matches!(result, Err(FetchWeatherInfoError::Fetch(_))));

    Ok(())
}
