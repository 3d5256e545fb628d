use domain::models::reminder::{ReminderId, ReminderSetting, ReminderTime};
use domain::permissions::{Permission, PermissionGuard};
use domain::repositories::reminder::ReminderRepository;
use domain::repositories::settings::AppSettingsRepository;
use domain::DomainError;

use crate::UseCaseResult;

/// リマインダー登録ユース・ケースのエラー
#[derive(Debug, thiserror::Error)]
pub enum RegisterReminderError {
    /// 通知の表示が許可されていない。
    #[error("通知の表示が許可されていません。")]
    NotificationPermissionNotGranted,

    /// リマインダーをスケジューラーに登録できなかった。
    #[error("リマインダーの登録に失敗しました。")]
    Scheduling(#[source] DomainError),

    /// リマインダー設定を保存できなかった。
    #[error("リマインダー設定の保存に失敗しました。")]
    Storage(#[source] DomainError),

    /// 処理がキャンセルされた。
    #[error("処理がキャンセルされました。")]
    Cancelled,
}

/// リマインダーを登録する。
///
/// 次の手順でリマインダーを登録して、最初に失敗した手順のエラーを返す。
///
/// 1. 通知の表示が許可されているか確認
/// 2. 登録済みのリマインダーをキャンセル（登録されている場合）
/// 3. リマインダーをスケジューラーに登録
/// 4. リマインダー設定を保存
///
/// リマインダー設定を保存できなかった場合、スケジューラーに登録したリマインダーを
/// キャンセルして巻き戻す。このユース・ケースは再実行に対して冪等でない。
///
/// # 引数
///
/// * `time` - リマインダー通知時刻
/// * `guard` - 権限の許可状態を確認する能力
/// * `reminder_repository` - リマインダー・リポジトリ
/// * `settings_repository` - アプリ設定リポジトリ
///
/// # 戻り値
///
/// 登録したリマインダーのリマインダー通知ID
#[tracing::instrument(
    name = "register reminder use case",
    skip(guard, reminder_repository, settings_repository),
    fields(reminder.time = %time)
)]
pub async fn register_reminder(
    time: ReminderTime,
    guard: &impl PermissionGuard,
    reminder_repository: &impl ReminderRepository,
    settings_repository: &impl AppSettingsRepository,
) -> UseCaseResult<ReminderId, RegisterReminderError> {
    // 通知の表示が許可されているか確認
    if !guard.is_granted(Permission::Notification) {
        return Err(RegisterReminderError::NotificationPermissionNotGranted);
    }

    // 登録済みのリマインダーをキャンセル
    let current = settings_repository.reminder_setting().await.map_err(|e| {
        tracing::error!("{} ({}:{})", e, file!(), line!());
        if e.is_cancelled() {
            RegisterReminderError::Cancelled
        } else {
            RegisterReminderError::Storage(e)
        }
    })?;
    if let Some(id) = current.reminder_id {
        // 実行済みなどでキャンセルできない場合は、記録して続行
        if let Err(e) = reminder_repository.cancel(id).await {
            tracing::warn!("{} ({}:{})", e, file!(), line!());
        }
    }

    // リマインダーをスケジューラーに登録
    let id = reminder_repository.register(time).await.map_err(|e| {
        tracing::error!("{} ({}:{})", e, file!(), line!());
        if e.is_cancelled() {
            RegisterReminderError::Cancelled
        } else {
            RegisterReminderError::Scheduling(e)
        }
    })?;

    // リマインダー設定を保存
    let setting = ReminderSetting {
        enabled: true,
        time,
        reminder_id: Some(id),
    };
    if let Err(e) = settings_repository.set_reminder_setting(setting).await {
        tracing::error!("{} ({}:{})", e, file!(), line!());
        // スケジューラーに登録したリマインダーをキャンセルして巻き戻す
        if let Err(re) = reminder_repository.cancel(id).await {
            tracing::warn!("{} ({}:{})", re, file!(), line!());
        }
        return Err(if e.is_cancelled() {
            RegisterReminderError::Cancelled
        } else {
            RegisterReminderError::Storage(e)
        });
    }

    Ok(id)
}

/// リマインダー・キャンセル・ユース・ケースのエラー
#[derive(Debug, thiserror::Error)]
pub enum CancelReminderError {
    /// リマインダーが登録されていない。
    #[error("リマインダーが登録されていません。")]
    NotRegistered,

    /// リマインダーをキャンセルできなかった。
    #[error("リマインダーのキャンセルに失敗しました。")]
    Scheduling(#[source] DomainError),

    /// リマインダー設定を保存できなかった。
    #[error("リマインダー設定の保存に失敗しました。")]
    Storage(#[source] DomainError),

    /// 処理がキャンセルされた。
    #[error("処理がキャンセルされました。")]
    Cancelled,
}

/// リマインダーをキャンセルする。
///
/// スケジューラーに登録したリマインダーをキャンセルして、リマインダーを無効にした
/// リマインダー設定を保存する。
///
/// # 引数
///
/// * `reminder_repository` - リマインダー・リポジトリ
/// * `settings_repository` - アプリ設定リポジトリ
#[tracing::instrument(
    name = "cancel reminder use case",
    skip(reminder_repository, settings_repository)
)]
pub async fn cancel_reminder(
    reminder_repository: &impl ReminderRepository,
    settings_repository: &impl AppSettingsRepository,
) -> UseCaseResult<(), CancelReminderError> {
    // 登録済みのリマインダーを取得
    let current = settings_repository.reminder_setting().await.map_err(|e| {
        tracing::error!("{} ({}:{})", e, file!(), line!());
        if e.is_cancelled() {
            CancelReminderError::Cancelled
        } else {
            CancelReminderError::Storage(e)
        }
    })?;
    let id = match current.reminder_id {
        Some(id) => id,
        None => return Err(CancelReminderError::NotRegistered),
    };

    // スケジューラーのリマインダーをキャンセル
    reminder_repository.cancel(id).await.map_err(|e| {
        tracing::error!("{} ({}:{})", e, file!(), line!());
        if e.is_cancelled() {
            CancelReminderError::Cancelled
        } else {
            CancelReminderError::Scheduling(e)
        }
    })?;

    // リマインダーを無効にした設定を保存
    let setting = ReminderSetting {
        enabled: false,
        time: current.time,
        reminder_id: None,
    };
    settings_repository
        .set_reminder_setting(setting)
        .await
        .map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            if e.is_cancelled() {
                CancelReminderError::Cancelled
            } else {
                CancelReminderError::Storage(e)
            }
        })
}

/// リマインダー設定を取得する。
///
/// # 引数
///
/// * `settings_repository` - アプリ設定リポジトリ
///
/// # 戻り値
///
/// リマインダー設定
#[tracing::instrument(name = "reminder setting use case", skip(settings_repository))]
pub async fn reminder_setting(
    settings_repository: &impl AppSettingsRepository,
) -> UseCaseResult<ReminderSetting, DomainError> {
    settings_repository.reminder_setting().await
}
