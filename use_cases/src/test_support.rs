use async_trait::async_trait;
use mockall::mock;
use time::{macros::date, Date};

use domain::cancellation::CancellationToken;
use domain::models::diary::{Condition, Diary, DiaryId, DiaryItem, DiaryPage, NewDiary};
use domain::models::diary_image::{CachedImagePath, ImageData, StoredImagePath};
use domain::models::location::{Location, LocationTimeout};
use domain::models::reminder::{ReminderId, ReminderSetting, ReminderTime};
use domain::models::weather::{Temperature, Weather, WeatherInfo};
use domain::now_jst;
use domain::permissions::{Permission, PermissionGuard};
use domain::repositories::diary::DiaryRepository;
use domain::repositories::diary_image::DiaryImageRepository;
use domain::repositories::location::LocationRepository;
use domain::repositories::reminder::ReminderRepository;
use domain::repositories::settings::AppSettingsRepository;
use domain::repositories::weather::WeatherInfoRepository;
use domain::DomainResult;

mock! {
    pub Diaries {}

    #[async_trait]
    impl DiaryRepository for Diaries {
        async fn register(&self, diary: NewDiary) -> DomainResult<Diary>;
        async fn update(&self, diary: Diary) -> DomainResult<Diary>;
        async fn delete(&self, id: DiaryId) -> DomainResult<()>;
        async fn find_by_id(&self, id: DiaryId) -> DomainResult<Option<Diary>>;
        async fn find_by_date(&self, date: Date) -> DomainResult<Option<Diary>>;
        async fn list(&self, page: DiaryPage) -> DomainResult<Vec<Diary>>;
        async fn search(&self, keyword: &str) -> DomainResult<Vec<Diary>>;
    }
}

mock! {
    pub DiaryImages {}

    #[async_trait]
    impl DiaryImageRepository for DiaryImages {
        async fn cache(&self, data: ImageData) -> DomainResult<CachedImagePath>;
        async fn store(&self, cached: CachedImagePath) -> DomainResult<StoredImagePath>;
        async fn delete_cached(&self, path: CachedImagePath) -> DomainResult<()>;
        async fn delete_stored(&self, path: StoredImagePath) -> DomainResult<()>;
    }
}

mock! {
    pub Locations {}

    #[async_trait]
    impl LocationRepository for Locations {
        async fn fetch_current_location(
            &self,
            timeout: LocationTimeout,
            token: &CancellationToken,
        ) -> DomainResult<Location>;
    }
}

mock! {
    pub WeatherInfos {}

    #[async_trait]
    impl WeatherInfoRepository for WeatherInfos {
        async fn fetch(&self, date: Date, location: Location) -> DomainResult<WeatherInfo>;
    }
}

mock! {
    pub Reminders {}

    #[async_trait]
    impl ReminderRepository for Reminders {
        async fn register(&self, time: ReminderTime) -> DomainResult<ReminderId>;
        async fn cancel(&self, id: ReminderId) -> DomainResult<()>;
        async fn is_registered(&self, id: ReminderId) -> DomainResult<bool>;
    }
}

mock! {
    pub AppSettings {}

    #[async_trait]
    impl AppSettingsRepository for AppSettings {
        async fn reminder_setting(&self) -> DomainResult<ReminderSetting>;
        async fn set_reminder_setting(&self, setting: ReminderSetting) -> DomainResult<()>;
    }
}

/// すべての権限を許可、またはすべての権限を拒否する権限ガード
pub struct StaticPermissionGuard {
    granted: bool,
}

impl StaticPermissionGuard {
    pub fn granting() -> Self {
        Self { granted: true }
    }

    pub fn denying() -> Self {
        Self { granted: false }
    }
}

impl PermissionGuard for StaticPermissionGuard {
    fn is_granted(&self, _permission: Permission) -> bool {
        self.granted
    }
}

/// テスト用の位置情報を構築する。
pub fn tokyo_station() -> Location {
    Location::new(35.6812, 139.7671).unwrap()
}

/// テスト用の天気情報を構築する。
pub fn weather_info(date: Date) -> WeatherInfo {
    WeatherInfo::new(
        date,
        Weather::Sunny,
        Temperature::new(15.2).unwrap(),
        Temperature::new(7.1).unwrap(),
    )
    .unwrap()
}

/// テスト用の記事のリストを構築する。
pub fn diary_items() -> Vec<DiaryItem> {
    vec![
        DiaryItem::new("朝から良い天気だった。").unwrap(),
        DiaryItem::new("公園まで散歩した。").unwrap(),
    ]
}

/// テスト用の日記を構築する。
pub fn diary(date: Date, image: Option<StoredImagePath>) -> Diary {
    let now = now_jst();
    Diary {
        id: DiaryId::default(),
        date,
        weather: Weather::Sunny,
        condition: Condition::Good,
        items: diary_items(),
        image,
        created_at: now,
        updated_at: now,
    }
}

/// テスト用の日記の日付を返す。
pub fn diary_date() -> Date {
    date!(2024 - 04 - 01)
}
