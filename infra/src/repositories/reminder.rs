use std::sync::Arc;

use async_trait::async_trait;

use domain::models::reminder::{ReminderId, ReminderTime};
use domain::repositories::reminder::ReminderRepository;
use domain::DomainResult;

use crate::adapters::scheduler::{translate_scheduler_error, TokioReminderScheduler};

/// スケジューラー・リマインダー・リポジトリ
#[derive(Clone)]
pub struct SchedulerReminderRepository {
    /// リマインダー・スケジューラー
    scheduler: Arc<TokioReminderScheduler>,
}

impl SchedulerReminderRepository {
    /// スケジューラー・リマインダー・リポジトリを構築する。
    ///
    /// # 引数
    ///
    /// * `scheduler` - リマインダー・スケジューラー
    pub fn new(scheduler: Arc<TokioReminderScheduler>) -> Self {
        Self { scheduler }
    }
}

#[async_trait]
impl ReminderRepository for SchedulerReminderRepository {
    async fn register(&self, time: ReminderTime) -> DomainResult<ReminderId> {
        self.scheduler.enqueue(time).map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            translate_scheduler_error(e)
        })
    }

    async fn cancel(&self, id: ReminderId) -> DomainResult<()> {
        self.scheduler.cancel(id).map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            translate_scheduler_error(e)
        })
    }

    async fn is_registered(&self, id: ReminderId) -> DomainResult<bool> {
        Ok(self.scheduler.is_enqueued(id))
    }
}
