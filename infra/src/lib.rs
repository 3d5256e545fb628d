pub mod adapters;
pub mod repositories;

use std::sync::Arc;

use sqlx::SqlitePool;

use configurations::settings::{AppSettings, PermissionsSettings};
use domain::permissions::{Permission, PermissionGuard};
use domain::repositories::diary::DiaryRepository;
use domain::repositories::diary_image::DiaryImageRepository;
use domain::repositories::location::LocationRepository;
use domain::repositories::reminder::ReminderRepository;
use domain::repositories::settings::AppSettingsRepository;
use domain::repositories::weather::WeatherInfoRepository;
use use_cases::settings::{LocationSettings, WeatherSettings};

use crate::adapters::file::ImageFileStore;
use crate::adapters::location::LocationProvider;
use crate::adapters::preferences::JsonPreferencesStore;
use crate::adapters::scheduler::{ReminderNotifier, TokioReminderScheduler};
use crate::adapters::weather::WeatherApiClient;
use crate::repositories::image::FsDiaryImageRepository;
use crate::repositories::location::ProviderLocationRepository;
use crate::repositories::reminder::SchedulerReminderRepository;
use crate::repositories::settings::JsonAppSettingsRepository;
use crate::repositories::sqlite::diary::SqliteDiaryRepository;
use crate::repositories::weather::ApiWeatherInfoRepository;

/// アプリ・コンテキスト
///
/// アプリの起動時に構築して、ユース・ケースに引き渡すリポジトリと権限ガードを
/// 保持する。
#[derive(Clone)]
pub struct AppContext {
    /// 位置情報設定
    pub location_settings: LocationSettings,
    /// 天気情報設定
    pub weather_settings: WeatherSettings,
    /// データベース接続プール
    pool: SqlitePool,
    /// 画像ファイル・ストア
    image_store: ImageFileStore,
    /// 設定ストア
    preferences: Arc<JsonPreferencesStore>,
    /// リマインダー・スケジューラー
    scheduler: Arc<TokioReminderScheduler>,
    /// 位置情報プロバイダー
    location_provider: Arc<dyn LocationProvider>,
    /// 天気APIクライアント
    weather_client: WeatherApiClient,
    /// 権限ガード
    permission_guard: ConfiguredPermissionGuard,
}

impl AppContext {
    /// アプリ・コンテキストを構築する。
    ///
    /// # 引数
    ///
    /// * `settings` - アプリケーション設定
    /// * `pool` - データベース接続プール
    /// * `location_provider` - 位置情報プロバイダー
    /// * `notifier` - リマインダー通知の通知先
    ///
    /// # 戻り値
    ///
    /// アプリ・コンテキスト
    pub fn new(
        settings: &AppSettings,
        pool: SqlitePool,
        location_provider: Arc<dyn LocationProvider>,
        notifier: Arc<dyn ReminderNotifier>,
    ) -> anyhow::Result<Self> {
        // 設定を検証
        settings.location.validate()?;
        settings.weather.validate()?;

        let weather_client = WeatherApiClient::new(&settings.weather)?;
        let image_store = ImageFileStore::new(
            settings.image_store.cache_dir.clone(),
            settings.image_store.picture_dir.clone(),
        );

        Ok(Self {
            location_settings: settings.location.clone(),
            weather_settings: settings.weather.clone(),
            pool,
            image_store,
            preferences: Arc::new(JsonPreferencesStore::new(settings.preferences.path.clone())),
            scheduler: Arc::new(TokioReminderScheduler::new(notifier)),
            location_provider,
            weather_client,
            permission_guard: ConfiguredPermissionGuard::new(&settings.permissions),
        })
    }

    /// 日記リポジトリを返す。
    pub fn diary_repository(&self) -> impl DiaryRepository {
        SqliteDiaryRepository::new(self.pool.clone())
    }

    /// 日記画像リポジトリを返す。
    pub fn diary_image_repository(&self) -> impl DiaryImageRepository {
        FsDiaryImageRepository::new(self.image_store.clone())
    }

    /// 天気情報リポジトリを返す。
    pub fn weather_info_repository(&self) -> impl WeatherInfoRepository {
        ApiWeatherInfoRepository::new(self.weather_client.clone())
    }

    /// 位置情報リポジトリを返す。
    pub fn location_repository(&self) -> impl LocationRepository {
        ProviderLocationRepository::new(Arc::clone(&self.location_provider))
    }

    /// リマインダー・リポジトリを返す。
    pub fn reminder_repository(&self) -> impl ReminderRepository {
        SchedulerReminderRepository::new(Arc::clone(&self.scheduler))
    }

    /// アプリ設定リポジトリを返す。
    pub fn app_settings_repository(&self) -> impl AppSettingsRepository {
        JsonAppSettingsRepository::new(Arc::clone(&self.preferences))
    }

    /// 権限ガードを返す。
    pub fn permission_guard(&self) -> &impl PermissionGuard {
        &self.permission_guard
    }

    /// リマインダー・スケジューラーを停止する。
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }
}

/// アプリケーション設定で許可状態を決める権限ガード
///
/// プラットフォームの権限APIを持たない環境では、設定ファイルで許可状態を構成する。
#[derive(Debug, Clone)]
pub struct ConfiguredPermissionGuard {
    /// 位置情報へのアクセスを許可するか示すフラグ
    location: bool,
    /// 通知の表示を許可するか示すフラグ
    notification: bool,
}

impl ConfiguredPermissionGuard {
    pub fn new(settings: &PermissionsSettings) -> Self {
        Self {
            location: settings.location,
            notification: settings.notification,
        }
    }
}

impl PermissionGuard for ConfiguredPermissionGuard {
    fn is_granted(&self, permission: Permission) -> bool {
        match permission {
            Permission::Location => self.location,
            Permission::Notification => self.notification,
        }
    }
}
