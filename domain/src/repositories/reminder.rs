use async_trait::async_trait;

use crate::models::reminder::{ReminderId, ReminderTime};
use crate::DomainResult;

/// リマインダー・リポジトリ
///
/// 日記の記入を促す通知を毎日表示するリマインダーを、タスク・スケジューラーに登録する。
#[async_trait]
pub trait ReminderRepository: Send + Sync + 'static {
    /// リマインダーを登録する。
    ///
    /// スケジューラーに登録できない場合、`Scheduling`のドメイン・エラーを返す。
    ///
    /// # 引数
    ///
    /// * `time` - リマインダー通知時刻
    ///
    /// # 戻り値
    ///
    /// 登録したリマインダーのリマインダー通知ID
    async fn register(&self, time: ReminderTime) -> DomainResult<ReminderId>;

    /// リマインダーをキャンセルする。
    ///
    /// 指定されたリマインダー通知IDのリマインダーが登録されていない場合、
    /// `Scheduling`のドメイン・エラーを返す。
    async fn cancel(&self, id: ReminderId) -> DomainResult<()>;

    /// リマインダーが登録されているか確認する。
    async fn is_registered(&self, id: ReminderId) -> DomainResult<bool>;
}
