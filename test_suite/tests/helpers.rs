use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::Lazy;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use app::telemetry::{generate_log_subscriber, init_log_subscriber};
use configurations::settings::{
    AppSettings, DatabaseSettings, FixedLocationSettings, ImageStoreSettings, LoggingSettings,
    PermissionsSettings, PreferencesSettings,
};
use infra::adapters::location::FixedLocationProvider;
use infra::adapters::scheduler::TracingReminderNotifier;
use infra::repositories::sqlite::MIGRATOR;
use infra::AppContext;
use use_cases::settings::{LocationSettings, WeatherSettings};

/// ログ・サブスクライバ
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_level = log::Level::Info;
    let subscriber_name = String::from("test");

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = generate_log_subscriber(subscriber_name, default_level, std::io::stdout);
        init_log_subscriber(subscriber);
    } else {
        let subscriber = generate_log_subscriber(subscriber_name, default_level, std::io::sink);
        init_log_subscriber(subscriber);
    }
});

/// 統合テスト用アプリ
pub struct TestApp {
    /// アプリ・コンテキスト
    pub context: AppContext,
    /// テスト用のファイルを格納するディレクトリ
    root: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        // テスト用のファイルを削除
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// 統合テスト用のアプリケーション設定を構築する。
///
/// # 引数
///
/// * `root` - テスト用のファイルを格納するディレクトリ
/// * `weather_base_url` - 天気APIのベースURL
///
/// # 戻り値
///
/// アプリケーション設定
fn test_app_settings(root: &PathBuf, weather_base_url: &str) -> AppSettings {
    AppSettings {
        database: DatabaseSettings {
            path: root.join("diary.db"),
            create_if_missing: true,
            connection_timeout_seconds: 2,
            log_statements: log::LevelFilter::Debug,
        },
        weather: WeatherSettings {
            base_url: weather_base_url.to_string(),
            api_key: None,
            timeout_seconds: 2,
            fetchable_past_days: 92,
            fetchable_future_days: 14,
        },
        location: LocationSettings {
            timeout_milliseconds: 1_000,
        },
        fixed_location: FixedLocationSettings {
            latitude: 35.6812,
            longitude: 139.7671,
        },
        image_store: ImageStoreSettings {
            cache_dir: root.join("cache").join("images"),
            picture_dir: root.join("pictures"),
        },
        preferences: PreferencesSettings {
            path: root.join("preferences.json"),
        },
        permissions: PermissionsSettings {
            location: true,
            notification: true,
        },
        logging: LoggingSettings {
            level: log::Level::Debug,
        },
    }
}

/// 統合テスト用アプリを起動する。
///
/// インメモリーのデータベースにマイグレーションを実行して、テスト用のディレクトリを
/// 使用するアプリ・コンテキストを構築する。
///
/// # 引数
///
/// * `weather_base_url` - 天気APIのベースURL
///
/// # 戻り値
///
/// 統合テスト用アプリ
pub async fn spawn_test_app(weather_base_url: &str) -> anyhow::Result<TestApp> {
    Lazy::force(&TRACING);

    let root = std::env::temp_dir().join(format!("diary-app-test-{}", Uuid::new_v4()));
    let settings = test_app_settings(&root, weather_base_url);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    MIGRATOR.run(&pool).await?;

    let location_provider = Arc::new(FixedLocationProvider::new(
        settings.fixed_location.latitude,
        settings.fixed_location.longitude,
    ));
    let context = AppContext::new(
        &settings,
        pool,
        location_provider,
        Arc::new(TracingReminderNotifier),
    )?;

    Ok(TestApp { context, root })
}

/// 天気APIを使用しない統合テスト用アプリを起動する。
pub async fn spawn_test_app_without_weather_api() -> anyhow::Result<TestApp> {
    spawn_test_app("http://localhost:9").await
}
