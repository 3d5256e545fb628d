use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use time::{OffsetDateTime, Time};

use crate::models::primitives::EntityId;
use crate::{DomainError, DomainResult};

/// リマインダー通知時刻の正規表現
static REMINDER_TIME_EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").unwrap());

/// リマインダー通知時刻
///
/// 日記の記入を促す通知を毎日表示する時刻を、時と分で表現する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    /// リマインダー通知時刻を構築する。
    ///
    /// # 引数
    ///
    /// * `hour` - 時（0以上23以下）
    /// * `minute` - 分（0以上59以下）
    ///
    /// # 戻り値
    ///
    /// リマインダー通知時刻
    pub fn new(hour: u8, minute: u8) -> DomainResult<Self> {
        if 23 < hour || 59 < minute {
            return Err(DomainError::validation()
                .with_message("リマインダー通知時刻が時刻として範囲外です。"));
        }

        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// 次にリマインダーを通知する日時までの時間を返す。
    ///
    /// 指定された日時の時刻が通知時刻より前の場合は当日の通知時刻まで、それ以外の
    /// 場合は翌日の通知時刻までの時間を返す。
    ///
    /// # 引数
    ///
    /// * `now` - 基準とする日時
    ///
    /// # 戻り値
    ///
    /// 次にリマインダーを通知する日時までの時間
    pub fn duration_until_next(&self, now: OffsetDateTime) -> std::time::Duration {
        let time = Time::from_hms(self.hour, self.minute, 0).expect("validated reminder time");
        let mut next = now.replace_time(time);
        if next <= now {
            next += time::Duration::days(1);
        }

        (next - now).unsigned_abs()
    }
}

impl FromStr for ReminderTime {
    type Err = DomainError;

    /// `HH:MM`形式の文字列からリマインダー通知時刻を構築する。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = REMINDER_TIME_EXPRESSION.captures(s).ok_or_else(|| {
            DomainError::validation()
                .with_message("リマインダー通知時刻はHH:MM形式で指定してください。")
        })?;
        // 正規表現に一致したキャプチャは数値に変換できる
        let hour = captures[1].parse().expect("captured digits");
        let minute = captures[2].parse().expect("captured digits");

        Self::new(hour, minute)
    }
}

impl std::fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// リマインダー通知ID
pub type ReminderId = EntityId<ReminderSetting>;

/// リマインダー通知時刻のデフォルト値
const REMINDER_TIME_DEFAULT: ReminderTime = ReminderTime {
    hour: 21,
    minute: 0,
};

/// リマインダー設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSetting {
    /// リマインダーが有効か示すフラグ
    pub enabled: bool,
    /// リマインダー通知時刻
    pub time: ReminderTime,
    /// 登録済みのリマインダー通知ID
    pub reminder_id: Option<ReminderId>,
}

impl Default for ReminderSetting {
    /// リマインダーが無効で、通知時刻が21:00の設定を返す。
    fn default() -> Self {
        Self {
            enabled: false,
            time: REMINDER_TIME_DEFAULT,
            reminder_id: None,
        }
    }
}
