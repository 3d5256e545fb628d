use async_trait::async_trait;
use time::Date;

use crate::models::location::Location;
use crate::models::weather::WeatherInfo;
use crate::DomainResult;

/// 天気情報リポジトリ
#[async_trait]
pub trait WeatherInfoRepository: Send + Sync + 'static {
    /// 指定された日付と位置の天気情報を取得する。
    ///
    /// 天気APIに接続できない場合は`NetworkConnection`、天気APIが指定された日付の
    /// 天気情報を返さない場合は`NotFound`のドメイン・エラーを返す。
    ///
    /// # 引数
    ///
    /// * `date` - 天気情報を取得する日付
    /// * `location` - 天気情報を取得する位置
    ///
    /// # 戻り値
    ///
    /// 天気情報
    async fn fetch(&self, date: Date, location: Location) -> DomainResult<WeatherInfo>;
}
