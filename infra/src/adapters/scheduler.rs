use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use domain::models::reminder::{ReminderId, ReminderTime};
use domain::{now_jst, DomainError};

/// リマインダー通知の表示を依頼する能力
///
/// 通知の表示はこのコアの範囲外のため、トレイトの実装者に委譲する。
pub trait ReminderNotifier: Send + Sync + 'static {
    /// リマインダー通知の表示を依頼する。
    ///
    /// # 引数
    ///
    /// * `time` - リマインダー通知時刻
    fn notify(&self, time: ReminderTime);
}

/// リマインダー通知をログに記録する通知先
///
/// 通知の表示を実装していない環境で使用する。
#[derive(Debug, Default)]
pub struct TracingReminderNotifier;

impl ReminderNotifier for TracingReminderNotifier {
    fn notify(&self, time: ReminderTime) {
        tracing::info!("リマインダー通知: {}", time);
    }
}

/// スケジューラーのエラー
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// スケジューラーが停止している。
    #[error("スケジューラーが停止しているため、リマインダーを登録できません。")]
    ShutDown,

    /// 指定されたリマインダーが登録されていない。
    #[error("リマインダー({0})が登録されていません。")]
    CancelFailed(ReminderId),
}

/// tokioタスクでリマインダーを実行するスケジューラー
///
/// リマインダーごとにタスクを起動して、毎日、指定された時刻に通知先を呼び出す。
/// タスクの起動と停止以外の永続化は行わないため、アプリの再起動後の復元は保存した
/// リマインダー設定から行う。
pub struct TokioReminderScheduler {
    /// 通知先
    notifier: Arc<dyn ReminderNotifier>,
    /// 実行中のリマインダーのタスク
    jobs: Mutex<HashMap<ReminderId, JoinHandle<()>>>,
    /// スケジューラーが停止したか示すフラグ
    shut_down: AtomicBool,
}

impl TokioReminderScheduler {
    /// スケジューラーを構築する。
    ///
    /// # 引数
    ///
    /// * `notifier` - リマインダー通知の通知先
    pub fn new(notifier: Arc<dyn ReminderNotifier>) -> Self {
        Self {
            notifier,
            jobs: Mutex::new(HashMap::new()),
            shut_down: AtomicBool::new(false),
        }
    }

    /// リマインダーを登録する。
    ///
    /// tokioランタイムの中から呼び出さなければならない。
    ///
    /// # 引数
    ///
    /// * `time` - リマインダー通知時刻
    ///
    /// # 戻り値
    ///
    /// 登録したリマインダーのリマインダー通知ID
    pub fn enqueue(&self, time: ReminderTime) -> Result<ReminderId, SchedulerError> {
        if self.shut_down.load(Ordering::SeqCst) {
            return Err(SchedulerError::ShutDown);
        }

        let id = ReminderId::default();
        let notifier = Arc::clone(&self.notifier);
        let handle = tokio::spawn(async move {
            loop {
                let duration = time.duration_until_next(now_jst());
                tokio::time::sleep(duration).await;
                notifier.notify(time);
            }
        });
        self.jobs
            .lock()
            .expect("reminder scheduler lock")
            .insert(id, handle);

        Ok(id)
    }

    /// リマインダーをキャンセルする。
    ///
    /// # 引数
    ///
    /// * `id` - キャンセルするリマインダーのリマインダー通知ID
    pub fn cancel(&self, id: ReminderId) -> Result<(), SchedulerError> {
        match self
            .jobs
            .lock()
            .expect("reminder scheduler lock")
            .remove(&id)
        {
            Some(handle) => {
                handle.abort();
                Ok(())
            }
            None => Err(SchedulerError::CancelFailed(id)),
        }
    }

    /// リマインダーが登録されているか確認する。
    pub fn is_enqueued(&self, id: ReminderId) -> bool {
        self.jobs
            .lock()
            .expect("reminder scheduler lock")
            .contains_key(&id)
    }

    /// すべてのリマインダーをキャンセルして、スケジューラーを停止する。
    ///
    /// 停止した後は、リマインダーを登録できない。
    pub fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
        let mut jobs = self.jobs.lock().expect("reminder scheduler lock");
        for (_, handle) in jobs.drain() {
            handle.abort();
        }
    }
}

/// スケジューラーのエラーをドメイン・エラーに変換する。
///
/// 変換は既知のすべてのバリアントを網羅して、副作用を持たない。
pub fn translate_scheduler_error(e: SchedulerError) -> DomainError {
    let message = e.to_string();
    match e {
        SchedulerError::ShutDown => DomainError::scheduling().with_message(message),
        SchedulerError::CancelFailed(_) => DomainError::scheduling().with_message(message),
    }
}
