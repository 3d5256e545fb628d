use async_trait::async_trait;

use crate::models::reminder::ReminderSetting;
use crate::DomainResult;

/// アプリ設定リポジトリ
///
/// ユーザーが変更できるアプリの設定を、キー・バリュー形式の設定ストアに保存する。
#[async_trait]
pub trait AppSettingsRepository: Send + Sync + 'static {
    /// リマインダー設定を取得する。
    ///
    /// リマインダー設定が保存されていない場合、デフォルトの設定を返す。
    async fn reminder_setting(&self) -> DomainResult<ReminderSetting>;

    /// リマインダー設定を保存する。
    ///
    /// # 引数
    ///
    /// * `setting` - 保存するリマインダー設定
    async fn set_reminder_setting(&self, setting: ReminderSetting) -> DomainResult<()>;
}
