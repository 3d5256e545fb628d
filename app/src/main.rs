use std::path::Path;

use app::startup::{build_app_context, restore_reminder};
use app::telemetry::{generate_log_subscriber, init_log_subscriber, LOG_SUBSCRIBER_NAME};
use configurations::settings::{
    retrieve_app_settings, AppEnvironment, ENV_APP_ENVIRONMENT, ENV_APP_ENVIRONMENT_DEFAULT,
    SETTINGS_DIR_NAME,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 環境変数を設定
    dotenvx::dotenv().ok();

    // 環境変数からアプリの動作環境を取得
    let app_env: AppEnvironment = std::env::var(ENV_APP_ENVIRONMENT)
        .unwrap_or_else(|_| String::from(ENV_APP_ENVIRONMENT_DEFAULT))
        .into();
    // アプリケーション設定を取得
    let app_settings = retrieve_app_settings(app_env, Path::new(SETTINGS_DIR_NAME))?;

    // サブスクライバを初期化
    let subscriber = generate_log_subscriber(
        LOG_SUBSCRIBER_NAME.into(),
        app_settings.logging.level,
        std::io::stdout,
    );
    init_log_subscriber(subscriber);

    // アプリ・コンテキストを構築して、保存されたリマインダーを復元
    let context = build_app_context(&app_settings).await?;
    restore_reminder(&context).await?;
    tracing::info!("日記アプリ・コアを起動しました。({})", app_env);

    // SIGINTを受信するまで実行
    tokio::signal::ctrl_c().await?;
    context.shutdown();
    tracing::info!("日記アプリ・コアを停止しました。");

    Ok(())
}
