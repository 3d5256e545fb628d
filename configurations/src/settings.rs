use std::path::{Path, PathBuf};

use config::{Config, FileFormat, FileSourceFile};
use enum_display::EnumDisplay;
use log::LevelFilter;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions as _;

use use_cases::settings::{LocationSettings, WeatherSettings};

/// 設定ファイル・ディレクトリ・パス
pub const SETTINGS_DIR_NAME: &str = "settings";

/// 動作環境を表現する環境変数とそのデフォルト値
pub const ENV_APP_ENVIRONMENT: &str = "APP_ENVIRONMENT";
pub const ENV_APP_ENVIRONMENT_DEFAULT: &str = "development";

/// アプリの動作環境
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumDisplay)]
#[enum_display(case = "Lower")]
pub enum AppEnvironment {
    /// 開発環境
    Development,
    /// 運用環境
    Production,
}

impl From<String> for AppEnvironment {
    /// アプリの動作環境を表現する文字列から、アプリの動作環境を判定する。
    ///
    /// アプリの動作環境を表現する文字列が`production`の場合は運用環境、それ以外の
    /// 場合は開発環境と判定する。なお、大文字と小文字は無視する。
    ///
    /// # 引数
    ///
    /// * `value` - アプリの動作環境を表現する文字列
    ///
    /// # 戻り値
    ///
    /// アプリの動作環境
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AppSettings {
    /// データベース設定
    pub database: DatabaseSettings,
    /// 天気情報設定
    pub weather: WeatherSettings,
    /// 位置情報設定
    pub location: LocationSettings,
    /// 固定位置設定
    pub fixed_location: FixedLocationSettings,
    /// 画像ストア設定
    pub image_store: ImageStoreSettings,
    /// 設定ストア設定
    pub preferences: PreferencesSettings,
    /// 権限設定
    pub permissions: PermissionsSettings,
    /// ロギング設定
    pub logging: LoggingSettings,
}

/// データベース設定
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    /// データベース・ファイルのパス
    pub path: PathBuf,
    /// データベース・ファイルが存在しない場合に作成するか示すフラグ
    pub create_if_missing: bool,
    /// 接続タイムアウト秒
    pub connection_timeout_seconds: u64,
    /// ログに記録するSQLステートメントの最小レベル
    pub log_statements: LevelFilter,
}

impl DatabaseSettings {
    /// データベース接続オプションを取得する。
    ///
    /// 日記の記事を日記と一緒に削除するため、外部キー制約を有効にする。
    ///
    /// # 戻り値
    ///
    /// データベース接続オプション
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(self.create_if_missing)
            .foreign_keys(true)
            .log_statements(self.log_statements)
    }

    /// データベース接続プールを取得する。
    ///
    /// # 戻り値
    ///
    /// データベース接続プール
    pub fn connection_pool(&self) -> SqlitePool {
        SqlitePoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(
                self.connection_timeout_seconds,
            ))
            .connect_lazy_with(self.connect_options())
    }
}

/// 固定位置設定
///
/// 位置情報センサーを持たない環境で、現在位置として扱う座標を構成する。
#[derive(Debug, Clone, serde::Deserialize)]
pub struct FixedLocationSettings {
    /// 緯度（度）
    pub latitude: f64,
    /// 経度（度）
    pub longitude: f64,
}

/// 画像ストア設定
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ImageStoreSettings {
    /// キャッシュ・ディレクトリのパス
    pub cache_dir: PathBuf,
    /// 保存ディレクトリのパス
    pub picture_dir: PathBuf,
}

/// 設定ストア設定
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PreferencesSettings {
    /// 設定ファイルのパス
    pub path: PathBuf,
}

/// 権限設定
///
/// プラットフォームの権限APIを持たない環境では、設定ファイルで権限の許可状態を
/// 構成する。
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PermissionsSettings {
    /// 位置情報へのアクセスを許可するか示すフラグ
    pub location: bool,
    /// 通知の表示を許可するか示すフラグ
    pub notification: bool,
}

/// ロギング設定
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoggingSettings {
    /// ログ・レベル
    pub level: log::Level,
}

/// アプリケーション設定を取得する。
///
/// # 引数
///
/// * `app_env` - アプリの動作環境
/// * `settings_dir` - アプリケーション設定ファイルを格納しているディレクトリのパス
///
/// # 戻り値
///
/// アプリケーション設定
pub fn retrieve_app_settings<P: AsRef<Path>>(
    app_env: AppEnvironment,
    settings_dir: P,
) -> anyhow::Result<AppSettings> {
    // デフォルト及び動作環境別設定ファイルのパスを生成
    let settings_dir = settings_dir.as_ref();
    let default_settings_file = config_file_source(settings_dir, "default.yml");
    let env_settings_file = config_file_source(settings_dir, &format!("{app_env}.yml"));

    // アプリケーション設定のビルダーを構築
    let settings = Config::builder()
        // デフォルトの設定ファイルをロード
        .add_source(default_settings_file)
        // 環境別の設定ファイルをロード
        .add_source(env_settings_file)
        // 環境変数に記録された設定をロード
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // アプリケーション設定を読み込み
    let app_settings = settings.try_deserialize::<AppSettings>()?;

    // 位置情報設定と天気情報設定を検証
    app_settings.location.validate()?;
    app_settings.weather.validate()?;

    Ok(app_settings)
}

/// `Config`がロードする設定ファイルのパスを構築する。
///
/// # 引数
///
/// * `settings_dir` - 設定ファイル・ディレクトリ・パス
/// * `file_name` - 設定ファイルの名前
///
/// # 戻り値
///
/// 設定ファイルのパス
fn config_file_source(
    settings_dir: &Path,
    file_name: &str,
) -> config::File<FileSourceFile, FileFormat> {
    config::File::from(settings_dir.join(file_name))
}
