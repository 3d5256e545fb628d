pub mod diary;

use std::marker::PhantomData;

use sqlx::{Sqlite, SqlitePool, Transaction};

use domain::{DomainError, DomainResult};

/// データベースのマイグレーター
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// SQLiteリポジトリ構造体
#[derive(Debug)]
pub struct SqliteRepository<T> {
    /// データベース接続プール
    pub pool: SqlitePool,
    /// マーカー
    _phantom: PhantomData<T>,
}

impl<T> SqliteRepository<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    /// トランザクションを開始する。
    ///
    /// # 戻り値
    ///
    /// トランザクション
    pub async fn begin(&self) -> DomainResult<Transaction<'static, Sqlite>> {
        self.pool.begin().await.map_err(translate_sqlx_error)
    }
}

impl<T> Clone for SqliteRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

/// トランザクションをコミットする。
///
/// # 引数
///
/// * `tx` - コミットするトランザクション
pub async fn commit_transaction(tx: Transaction<'static, Sqlite>) -> DomainResult<()> {
    tx.commit().await.map_err(translate_sqlx_error)
}

/// `sqlx`のエラーをドメイン・エラーに変換する。
///
/// 行が存在しない場合は`NotFound`、一意制約違反は`AlreadyExists`に変換して、
/// それ以外は`Storage`に分類する。変換は副作用を持たない。
pub fn translate_sqlx_error(e: sqlx::Error) -> DomainError {
    if matches!(e, sqlx::Error::RowNotFound) {
        return DomainError::not_found().with_cause(e.into());
    }
    let is_unique_violation = matches!(
        &e,
        sqlx::Error::Database(de) if matches!(de.kind(), sqlx::error::ErrorKind::UniqueViolation)
    );
    if is_unique_violation {
        return DomainError::already_exists().with_cause(e.into());
    }

    DomainError::storage().with_cause(e.into())
}

#[cfg(test)]
mod tests {
    use domain::DomainErrorKind;

    use super::*;

    /// 行が存在しない`sqlx`のエラーを`NotFound`に変換することを確認
    #[test]
    fn row_not_found_is_translated_to_not_found() {
        let translated = translate_sqlx_error(sqlx::Error::RowNotFound);

        assert_eq!(DomainErrorKind::NotFound, translated.kind);
    }

    /// その他の`sqlx`のエラーを`Storage`に変換することを確認
    #[test]
    fn other_sqlx_errors_are_translated_to_storage() {
        let translated = translate_sqlx_error(sqlx::Error::PoolClosed);

        assert_eq!(DomainErrorKind::Storage, translated.kind);
    }
}
