/// アプリが利用する権限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// 位置情報へのアクセス
    Location,
    /// 通知の表示
    Notification,
}

/// 権限の許可状態を確認する能力
///
/// プラットフォームの権限APIへの問い合わせは、このトレイトの実装者に委譲する。
/// ユース・ケースは、入出力を実行する前にこのトレイトで権限を確認する。
pub trait PermissionGuard: Send + Sync {
    /// 指定された権限が許可されているか確認する。
    ///
    /// # 引数
    ///
    /// * `permission` - 確認する権限
    ///
    /// # 戻り値
    ///
    /// 権限が許可されている場合は`true`、それ以外の場合は`false`
    fn is_granted(&self, permission: Permission) -> bool;
}
