use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use domain::models::reminder::{ReminderId, ReminderSetting};
use domain::repositories::settings::AppSettingsRepository;
use domain::{DomainError, DomainResult};

use crate::adapters::preferences::{translate_preferences_error, JsonPreferencesStore};

/// リマインダー設定を保存するキー
const REMINDER_SETTING_KEY: &str = "reminder_setting";

/// 設定ストアに保存するリマインダー設定
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct StoredReminderSetting {
    /// リマインダーが有効か示すフラグ
    enabled: bool,
    /// リマインダー通知時刻（HH:MM）
    time: String,
    /// 登録済みのリマインダー通知ID
    reminder_id: Option<Uuid>,
}

impl From<ReminderSetting> for StoredReminderSetting {
    fn from(setting: ReminderSetting) -> Self {
        Self {
            enabled: setting.enabled,
            time: setting.time.to_string(),
            reminder_id: setting.reminder_id.map(|id| id.value()),
        }
    }
}

impl TryFrom<StoredReminderSetting> for ReminderSetting {
    type Error = DomainError;

    fn try_from(stored: StoredReminderSetting) -> DomainResult<Self> {
        Ok(Self {
            enabled: stored.enabled,
            time: stored.time.parse()?,
            reminder_id: stored.reminder_id.map(ReminderId::new),
        })
    }
}

/// JSON設定ストアを使用するアプリ設定リポジトリ
#[derive(Clone)]
pub struct JsonAppSettingsRepository {
    /// 設定ストア
    store: Arc<JsonPreferencesStore>,
}

impl JsonAppSettingsRepository {
    /// アプリ設定リポジトリを構築する。
    ///
    /// # 引数
    ///
    /// * `store` - 設定ストア
    pub fn new(store: Arc<JsonPreferencesStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AppSettingsRepository for JsonAppSettingsRepository {
    async fn reminder_setting(&self) -> DomainResult<ReminderSetting> {
        let stored: Option<StoredReminderSetting> =
            self.store.get(REMINDER_SETTING_KEY).await.map_err(|e| {
                tracing::error!("{} ({}:{})", e, file!(), line!());
                translate_preferences_error(e)
            })?;

        match stored {
            Some(stored) => stored.try_into(),
            // 保存されていない場合はデフォルトの設定を返す
            None => Ok(ReminderSetting::default()),
        }
    }

    async fn set_reminder_setting(&self, setting: ReminderSetting) -> DomainResult<()> {
        self.store
            .put(REMINDER_SETTING_KEY, &StoredReminderSetting::from(setting))
            .await
            .map_err(|e| {
                tracing::error!("{} ({}:{})", e, file!(), line!());
                translate_preferences_error(e)
            })
    }
}
