use std::sync::Arc;

use anyhow::Context as _;

use configurations::settings::AppSettings;
use infra::adapters::location::FixedLocationProvider;
use infra::adapters::scheduler::TracingReminderNotifier;
use infra::repositories::sqlite::MIGRATOR;
use infra::AppContext;
use use_cases::reminder::RegisterReminderError;

/// アプリ・コンテキストを構築する。
///
/// データベースのマイグレーションを実行してから、リポジトリを構築する。
///
/// # 引数
///
/// * `settings` - アプリケーション設定
///
/// # 戻り値
///
/// アプリ・コンテキスト
pub async fn build_app_context(settings: &AppSettings) -> anyhow::Result<AppContext> {
    // データベース接続プールを構築してマイグレーションを実行
    let pool = settings.database.connection_pool();
    MIGRATOR
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    // プラットフォーム連携の実装を構築
    let location_provider = Arc::new(FixedLocationProvider::new(
        settings.fixed_location.latitude,
        settings.fixed_location.longitude,
    ));
    let notifier = Arc::new(TracingReminderNotifier);

    AppContext::new(settings, pool, location_provider, notifier)
}

/// 保存されたリマインダー設定を復元する。
///
/// リマインダーが有効な場合、スケジューラーに登録し直して、新しいリマインダー通知
/// IDでリマインダー設定を保存する。通知の表示が許可されていない場合は復元しない。
///
/// # 引数
///
/// * `context` - アプリ・コンテキスト
pub async fn restore_reminder(context: &AppContext) -> anyhow::Result<()> {
    let settings_repository = context.app_settings_repository();
    let setting = use_cases::reminder::reminder_setting(&settings_repository).await?;
    if !setting.enabled {
        return Ok(());
    }

    let reminder_repository = context.reminder_repository();
    match use_cases::reminder::register_reminder(
        setting.time,
        context.permission_guard(),
        &reminder_repository,
        &settings_repository,
    )
    .await
    {
        Ok(id) => {
            tracing::info!("リマインダー({})を復元しました。", id);
            Ok(())
        }
        // 通知の表示が許可されていない場合は復元を諦める
        Err(RegisterReminderError::NotificationPermissionNotGranted) => {
            tracing::warn!("通知の表示が許可されていないため、リマインダーを復元しません。");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
