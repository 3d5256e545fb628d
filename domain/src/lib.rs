pub mod cancellation;
pub mod models;
pub mod permissions;
pub mod repositories;

use std::borrow::Cow;

use time::macros::offset;
use time::OffsetDateTime;

/// ドメイン・エラー分類
///
/// リポジトリとユース・ケースが扱うエラーの、技術に依存しない分類を表現する。
/// アダプター固有のエラーは、インフラストラクチャ層の変換関数でこの分類に変換する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    /// リソースが見つからない。
    NotFound,

    /// リソースがすでに存在する。
    AlreadyExists,

    /// アクセスが許可されていない。
    PermissionDenied,

    /// ネットワークに接続できない。
    NetworkConnection,

    /// ストレージの操作に失敗した。
    Storage,

    /// ストレージの空き容量が不足している。
    InsufficientStorage,

    /// スケジューリングに失敗した。
    Scheduling,

    /// 検証エラー
    ///
    /// 座標の範囲外など、入出力を実行する前に検出した検証エラーを表現する。
    Validation,

    /// 処理がキャンセルされた。
    ///
    /// キャンセルの通知は変換の対象でないため、変換関数はこの分類をそのまま伝播する。
    Cancelled,

    /// 予期していないエラー
    Unexpected,
}

impl DomainErrorKind {
    /// ドメイン・エラー分類のデフォルト・メッセージを返す。
    pub fn default_message(self) -> &'static str {
        match self {
            DomainErrorKind::NotFound => "リソースが見つかりません。",
            DomainErrorKind::AlreadyExists => "リソースがすでに存在します。",
            DomainErrorKind::PermissionDenied => "アクセスが許可されていません。",
            DomainErrorKind::NetworkConnection => "ネットワークに接続できません。",
            DomainErrorKind::Storage => "ストレージの操作に失敗しました。",
            DomainErrorKind::InsufficientStorage => "ストレージの空き容量が不足しています。",
            DomainErrorKind::Scheduling => "スケジューリングに失敗しました。",
            DomainErrorKind::Validation => "値の検証に失敗しました。",
            DomainErrorKind::Cancelled => "処理がキャンセルされました。",
            DomainErrorKind::Unexpected => "予期していないエラーが発生しました。",
        }
    }
}

impl std::fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match *self {
            DomainErrorKind::NotFound => "not_found",
            DomainErrorKind::AlreadyExists => "already_exists",
            DomainErrorKind::PermissionDenied => "permission_denied",
            DomainErrorKind::NetworkConnection => "network_connection",
            DomainErrorKind::Storage => "storage",
            DomainErrorKind::InsufficientStorage => "insufficient_storage",
            DomainErrorKind::Scheduling => "scheduling",
            DomainErrorKind::Validation => "validation",
            DomainErrorKind::Cancelled => "cancelled",
            DomainErrorKind::Unexpected => "unexpected",
        };
        write!(f, "{}", s)
    }
}

/// ドメイン・エラー
///
/// エラー分類とメッセージに、発生元のエラーを添えて表現する。
/// 分類ごとのデフォルト・メッセージは、`with_message`メソッドでインスタンスごとに
/// 上書きできる。発生元のエラーはログに記録するために保持して、リポジトリより上の
/// 層はその内容を検査しない。
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct DomainError {
    /// ドメイン・エラー分類
    pub kind: DomainErrorKind,
    /// メッセージ
    pub message: Cow<'static, str>,
    /// 発生元のエラー
    pub cause: Option<anyhow::Error>,
}

impl DomainError {
    /// ドメイン・エラーを構築する。
    ///
    /// # 引数
    ///
    /// * `kind` - ドメイン・エラー分類
    ///
    /// # 戻り値
    ///
    /// 分類のデフォルト・メッセージを持つドメイン・エラー
    pub fn from_kind(kind: DomainErrorKind) -> Self {
        Self {
            kind,
            message: Cow::Borrowed(kind.default_message()),
            cause: None,
        }
    }

    pub fn not_found() -> Self {
        Self::from_kind(DomainErrorKind::NotFound)
    }

    pub fn already_exists() -> Self {
        Self::from_kind(DomainErrorKind::AlreadyExists)
    }

    pub fn permission_denied() -> Self {
        Self::from_kind(DomainErrorKind::PermissionDenied)
    }

    pub fn network_connection() -> Self {
        Self::from_kind(DomainErrorKind::NetworkConnection)
    }

    pub fn storage() -> Self {
        Self::from_kind(DomainErrorKind::Storage)
    }

    pub fn insufficient_storage() -> Self {
        Self::from_kind(DomainErrorKind::InsufficientStorage)
    }

    pub fn scheduling() -> Self {
        Self::from_kind(DomainErrorKind::Scheduling)
    }

    pub fn validation() -> Self {
        Self::from_kind(DomainErrorKind::Validation)
    }

    pub fn cancelled() -> Self {
        Self::from_kind(DomainErrorKind::Cancelled)
    }

    pub fn unexpected() -> Self {
        Self::from_kind(DomainErrorKind::Unexpected)
    }

    /// メッセージを上書きする。
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// 発生元のエラーを設定する。
    pub fn with_cause(mut self, cause: anyhow::Error) -> Self {
        self.cause = Some(cause);
        self
    }

    /// キャンセルの通知であるか確認する。
    pub fn is_cancelled(&self) -> bool {
        self.kind == DomainErrorKind::Cancelled
    }
}

/// ドメイン層の結果型
pub type DomainResult<T> = Result<T, DomainError>;

/// 現在の日時を日本標準時で返す。
///
/// 世界標準時で取得した現在の日時を、+9時間オフセットした日時を返す。
///
/// # 戻り値
///
/// 日本標準時の現在日時
pub fn now_jst() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(offset!(+9))
}

#[cfg(test)]
mod tests {
    use time::macros::offset;

    use super::*;

    /// ドメイン・エラーが分類ごとのデフォルト・メッセージを持つことを確認
    #[test]
    fn domain_error_has_the_default_message_of_each_kind() {
        let candidates = [
            (DomainError::not_found(), "リソースが見つかりません。"),
            (DomainError::already_exists(), "リソースがすでに存在します。"),
            (
                DomainError::permission_denied(),
                "アクセスが許可されていません。",
            ),
            (
                DomainError::network_connection(),
                "ネットワークに接続できません。",
            ),
            (DomainError::storage(), "ストレージの操作に失敗しました。"),
            (
                DomainError::insufficient_storage(),
                "ストレージの空き容量が不足しています。",
            ),
            (DomainError::scheduling(), "スケジューリングに失敗しました。"),
            (DomainError::validation(), "値の検証に失敗しました。"),
            (DomainError::cancelled(), "処理がキャンセルされました。"),
            (
                DomainError::unexpected(),
                "予期していないエラーが発生しました。",
            ),
        ];
        for (err, expected) in candidates {
            assert_eq!(expected, err.to_string());
        }
    }

    /// ドメイン・エラーのメッセージを上書きできることを確認
    #[test]
    fn domain_error_message_can_be_overwritten() {
        let err = DomainError::not_found().with_message("現在位置を取得できませんでした。");

        assert_eq!(DomainErrorKind::NotFound, err.kind);
        assert_eq!("現在位置を取得できませんでした。", err.to_string());
    }

    /// 発生元のエラーを設定しても分類とメッセージが変わらないことを確認
    #[test]
    fn domain_error_cause_does_not_change_the_kind_and_message() {
        let err = DomainError::storage().with_cause(anyhow::anyhow!("disk I/O error"));

        assert_eq!(DomainErrorKind::Storage, err.kind);
        assert_eq!("ストレージの操作に失敗しました。", err.to_string());
        assert!(err.cause.is_some());
    }

    /// キャンセルの通知を判別できることを確認
    #[test]
    fn cancelled_domain_error_can_be_distinguished() {
        assert!(DomainError::cancelled().is_cancelled());
        assert!(!DomainError::unexpected().is_cancelled());
    }

    /// 現在の日時を日本標準時で返すことを確認
    #[test]
    fn retrieve_current_date_time_at_jst() {
        let utc = OffsetDateTime::now_utc();
        let jst = now_jst();

        // オフセットを確認
        assert_eq!(offset!(+9), jst.offset());
        // 同じ瞬間を表現していることを確認
        assert!((jst - utc).whole_seconds().abs() < 60);
    }
}
