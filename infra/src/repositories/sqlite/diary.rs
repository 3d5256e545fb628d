use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use time::{Date, OffsetDateTime};

use domain::models::diary::{Condition, Diary, DiaryId, DiaryItem, DiaryPage, NewDiary};
use domain::models::diary_image::StoredImagePath;
use domain::models::weather::Weather;
use domain::now_jst;
use domain::repositories::diary::DiaryRepository;
use domain::{DomainError, DomainResult};

use crate::repositories::sqlite::{commit_transaction, translate_sqlx_error, SqliteRepository};

/// SQLite日記リポジトリ
pub type SqliteDiaryRepository = SqliteRepository<Diary>;

#[async_trait]
impl DiaryRepository for SqliteDiaryRepository {
    /// 日記を登録する。
    ///
    /// 日記を登録するとき、作成日時と更新日時には同じ日時を設定する。
    async fn register(&self, diary: NewDiary) -> DomainResult<Diary> {
        let mut tx = self.begin().await?;
        let row = insert_diary_query(&diary, now_jst())
            .fetch_one(&mut *tx)
            .await
            .map_err(translate_sqlx_error)?;
        insert_diary_items(&mut tx, diary.id, &diary.items).await?;
        commit_transaction(tx).await?;

        diary_from_row(row, diary.items)
    }

    /// 日記を更新する。
    ///
    /// 日記を更新するとき、記事のリストをすべて入れ替えて、更新日時を設定し直す。
    async fn update(&self, diary: Diary) -> DomainResult<Diary> {
        let mut tx = self.begin().await?;
        let row = update_diary_query(&diary, now_jst())
            .fetch_optional(&mut *tx)
            .await
            .map_err(translate_sqlx_error)?
            .ok_or_else(|| {
                DomainError::not_found()
                    .with_message(format!("日記({})が登録されていません。", diary.id))
            })?;
        sqlx::query("DELETE FROM diary_items WHERE diary_id = $1")
            .bind(diary.id.value().to_string())
            .execute(&mut *tx)
            .await
            .map_err(translate_sqlx_error)?;
        insert_diary_items(&mut tx, diary.id, &diary.items).await?;
        commit_transaction(tx).await?;

        diary_from_row(row, diary.items)
    }

    /// 日記を削除する。
    ///
    /// 日記の記事は、データベースの外部キー制約によって日記と一緒に削除される。
    async fn delete(&self, id: DiaryId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM diaries WHERE id = $1")
            .bind(id.value().to_string())
            .execute(&self.pool)
            .await
            .map_err(translate_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(
                DomainError::not_found().with_message(format!("日記({})が登録されていません。", id))
            );
        }

        Ok(())
    }

    async fn find_by_id(&self, id: DiaryId) -> DomainResult<Option<Diary>> {
        let row = sqlx::query_as::<Sqlite, DiaryRow>("SELECT * FROM diaries WHERE id = $1")
            .bind(id.value().to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(translate_sqlx_error)?;

        self.attach_items(row).await
    }

    async fn find_by_date(&self, date: Date) -> DomainResult<Option<Diary>> {
        let row = sqlx::query_as::<Sqlite, DiaryRow>("SELECT * FROM diaries WHERE date = $1")
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(translate_sqlx_error)?;

        self.attach_items(row).await
    }

    async fn list(&self, page: DiaryPage) -> DomainResult<Vec<Diary>> {
        let rows = sqlx::query_as::<Sqlite, DiaryRow>(
            "SELECT * FROM diaries ORDER BY date DESC LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(translate_sqlx_error)?;

        self.collect_diaries(rows).await
    }

    async fn search(&self, keyword: &str) -> DomainResult<Vec<Diary>> {
        let rows = sqlx::query_as::<Sqlite, DiaryRow>(
            r#"
            SELECT DISTINCT d.*
            FROM diaries d
            INNER JOIN diary_items i ON i.diary_id = d.id
            WHERE i.body LIKE '%' || $1 || '%'
            ORDER BY d.date DESC
            "#,
        )
        .bind(keyword)
        .fetch_all(&self.pool)
        .await
        .map_err(translate_sqlx_error)?;

        self.collect_diaries(rows).await
    }
}

impl SqliteDiaryRepository {
    /// 日記の行に記事のリストを関連付けて日記に変換する。
    async fn attach_items(&self, row: Option<DiaryRow>) -> DomainResult<Option<Diary>> {
        match row {
            Some(row) => {
                let items = fetch_diary_items(&self.pool, &row.id).await?;
                Ok(Some(diary_from_row(row, items)?))
            }
            None => Ok(None),
        }
    }

    /// 日記の行のリストを日記のリストに変換する。
    async fn collect_diaries(&self, rows: Vec<DiaryRow>) -> DomainResult<Vec<Diary>> {
        let mut diaries = Vec::with_capacity(rows.len());
        for row in rows {
            let items = fetch_diary_items(&self.pool, &row.id).await?;
            diaries.push(diary_from_row(row, items)?);
        }

        Ok(diaries)
    }
}

/// 日記の行
#[derive(Debug, sqlx::FromRow)]
pub struct DiaryRow {
    pub id: String,
    pub date: Date,
    pub weather_code: i16,
    pub condition_code: i16,
    pub image_path: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// 日記の記事の行
#[derive(Debug, sqlx::FromRow)]
struct DiaryItemRow {
    body: String,
}

/// 日記をデータベースに登録するクエリを生成する。
///
/// # 引数
///
/// * `diary` - データベースに登録する日記
/// * `now` - 作成日時と更新日時に設定する日時
///
/// # 戻り値
///
/// 日記をデータベースに登録するクエリ
pub fn insert_diary_query(
    diary: &NewDiary,
    now: OffsetDateTime,
) -> sqlx::query::QueryAs<'static, Sqlite, DiaryRow, sqlx::sqlite::SqliteArguments<'static>> {
    let image_path = diary
        .image
        .as_ref()
        .map(|p| p.value().to_string_lossy().to_string());

    sqlx::query_as::<Sqlite, DiaryRow>(
        r#"
        INSERT INTO diaries (
            id, date, weather_code, condition_code, image_path, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING *
        "#,
    )
    .bind(diary.id.value().to_string())
    .bind(diary.date)
    .bind(diary.weather.code())
    .bind(diary.condition.code())
    .bind(image_path)
    .bind(now)
}

/// 日記をデータベースに更新するクエリを生成する。
fn update_diary_query(
    diary: &Diary,
    now: OffsetDateTime,
) -> sqlx::query::QueryAs<'static, Sqlite, DiaryRow, sqlx::sqlite::SqliteArguments<'static>> {
    let image_path = diary
        .image
        .as_ref()
        .map(|p| p.value().to_string_lossy().to_string());

    sqlx::query_as::<Sqlite, DiaryRow>(
        r#"
        UPDATE diaries
        SET date = $2, weather_code = $3, condition_code = $4, image_path = $5, updated_at = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(diary.id.value().to_string())
    .bind(diary.date)
    .bind(diary.weather.code())
    .bind(diary.condition.code())
    .bind(image_path)
    .bind(now)
}

/// 日記の記事をデータベースに登録する。
async fn insert_diary_items(
    tx: &mut Transaction<'static, Sqlite>,
    diary_id: DiaryId,
    items: &[DiaryItem],
) -> DomainResult<()> {
    for (seq, item) in items.iter().enumerate() {
        sqlx::query("INSERT INTO diary_items (diary_id, seq, body) VALUES ($1, $2, $3)")
            .bind(diary_id.value().to_string())
            .bind(seq as i64)
            .bind(item.value())
            .execute(&mut **tx)
            .await
            .map_err(translate_sqlx_error)?;
    }

    Ok(())
}

/// 日記の記事をデータベースから取得する。
async fn fetch_diary_items(pool: &SqlitePool, diary_id: &str) -> DomainResult<Vec<DiaryItem>> {
    let rows = sqlx::query_as::<Sqlite, DiaryItemRow>(
        "SELECT body FROM diary_items WHERE diary_id = $1 ORDER BY seq",
    )
    .bind(diary_id)
    .fetch_all(pool)
    .await
    .map_err(translate_sqlx_error)?;

    rows.into_iter().map(|row| DiaryItem::new(row.body)).collect()
}

/// 日記の行を日記に変換する。
fn diary_from_row(row: DiaryRow, items: Vec<DiaryItem>) -> DomainResult<Diary> {
    let id: DiaryId = row.id.as_str().try_into()?;

    Ok(Diary {
        id,
        date: row.date,
        weather: Weather::try_from_code(row.weather_code)?,
        condition: Condition::try_from_code(row.condition_code)?,
        items,
        image: row.image_path.map(|p| StoredImagePath::new(PathBuf::from(p))),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[cfg(test)]
pub mod tests {
    use sqlx::sqlite::SqlitePoolOptions;
    use time::macros::date;

    use domain::DomainErrorKind;

    use super::*;
    use crate::repositories::sqlite::MIGRATOR;

    /// テスト用のデータベース接続プールを構築する。
    ///
    /// インメモリーのSQLiteデータベースを作成して、マイグレーションを実行する。
    pub async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("failed to connect to an in-memory database");
        MIGRATOR
            .run(&pool)
            .await
            .expect("failed to run migrations");

        pool
    }

    fn diary_items() -> Vec<DiaryItem> {
        vec![
            DiaryItem::new("朝から良い天気だった。").unwrap(),
            DiaryItem::new("公園まで散歩した。").unwrap(),
        ]
    }

    fn new_diary(date: Date) -> NewDiary {
        NewDiary::new(date, Weather::Sunny, Condition::Good, diary_items(), None).unwrap()
    }

    /// 日記を登録して日付で取得できることを確認
    #[tokio::test]
    async fn a_diary_can_be_registered_and_found_by_date() -> anyhow::Result<()> {
        // 準備
        let repository = SqliteDiaryRepository::new(test_pool().await);
        let diary = new_diary(date!(2024 - 04 - 01));

        // 実行
        let registered = repository.register(diary).await?;
        let found = repository.find_by_date(date!(2024 - 04 - 01)).await?;

        // 検証
        assert_eq!(registered.created_at, registered.updated_at);
        let found = found.expect("the registered diary was not found");
        assert_eq!(registered.id, found.id);
        assert_eq!(diary_items(), found.items);

        Ok(())
    }

    /// 同じ日付の日記を登録できないことを確認
    #[tokio::test]
    async fn diaries_with_the_same_date_can_not_be_registered() -> anyhow::Result<()> {
        // 準備
        let repository = SqliteDiaryRepository::new(test_pool().await);
        repository.register(new_diary(date!(2024 - 04 - 01))).await?;

        // 実行
        let result = repository.register(new_diary(date!(2024 - 04 - 01))).await;

        // 検証
        assert_eq!(
            DomainErrorKind::AlreadyExists,
            result.err().expect("the duplicated date was accepted").kind
        );

        Ok(())
    }

    /// 日記を更新すると記事のリストが入れ替わることを確認
    #[tokio::test]
    async fn updating_a_diary_replaces_the_items() -> anyhow::Result<()> {
        // 準備
        let repository = SqliteDiaryRepository::new(test_pool().await);
        let registered = repository.register(new_diary(date!(2024 - 04 - 01))).await?;
        let new_items = vec![DiaryItem::new("夕方から雨が降った。").unwrap()];

        // 実行
        let mut target = registered.clone();
        target.condition = Condition::Normal;
        target.items = new_items.clone();
        let updated = repository.update(target).await?;
        let found = repository.find_by_id(registered.id).await?;

        // 検証
        assert_eq!(Condition::Normal, updated.condition);
        assert_eq!(new_items, found.expect("the diary was not found").items);

        Ok(())
    }

    /// 登録されていない日記を更新できないことを確認
    #[tokio::test]
    async fn a_diary_that_is_not_registered_can_not_be_updated() -> anyhow::Result<()> {
        // 準備
        let repository = SqliteDiaryRepository::new(test_pool().await);
        let registered = repository.register(new_diary(date!(2024 - 04 - 01))).await?;
        repository.delete(registered.id).await?;

        // 実行
        let result = repository.update(registered).await;

        // 検証
        assert_eq!(
            DomainErrorKind::NotFound,
            result.err().expect("the missing diary was updated").kind
        );

        Ok(())
    }

    /// 日記を削除できることを確認
    #[tokio::test]
    async fn a_diary_can_be_deleted() -> anyhow::Result<()> {
        // 準備
        let repository = SqliteDiaryRepository::new(test_pool().await);
        let registered = repository.register(new_diary(date!(2024 - 04 - 01))).await?;

        // 実行
        repository.delete(registered.id).await?;

        // 検証
        assert!(repository.find_by_id(registered.id).await?.is_none());
        let result = repository.delete(registered.id).await;
        assert_eq!(
            DomainErrorKind::NotFound,
            result.err().expect("the missing diary was deleted").kind
        );

        Ok(())
    }

    /// 日記を日付の新しい順に取得できることを確認
    #[tokio::test]
    async fn diaries_are_listed_in_descending_order_of_the_date() -> anyhow::Result<()> {
        // 準備
        let repository = SqliteDiaryRepository::new(test_pool().await);
        for date in [
            date!(2024 - 04 - 01),
            date!(2024 - 04 - 03),
            date!(2024 - 04 - 02),
        ] {
            repository.register(new_diary(date)).await?;
        }

        // 実行
        let diaries = repository.list(DiaryPage::new(0, 2)?).await?;

        // 検証
        assert_eq!(2, diaries.len());
        assert_eq!(date!(2024 - 04 - 03), diaries[0].date);
        assert_eq!(date!(2024 - 04 - 02), diaries[1].date);

        Ok(())
    }

    /// 記事にキーワードを含む日記を検索できることを確認
    #[tokio::test]
    async fn diaries_can_be_searched_by_a_keyword_in_the_items() -> anyhow::Result<()> {
        // 準備
        let repository = SqliteDiaryRepository::new(test_pool().await);
        repository.register(new_diary(date!(2024 - 04 - 01))).await?;
        let other = NewDiary::new(
            date!(2024 - 04 - 02),
            Weather::Rainy,
            Condition::Normal,
            vec![DiaryItem::new("終日、家で読書をした。").unwrap()],
            None,
        )?;
        repository.register(other).await?;

        // 実行
        let found = repository.search("散歩").await?;
        let not_found = repository.search("旅行").await?;

        // 検証
        assert_eq!(1, found.len());
        assert_eq!(date!(2024 - 04 - 01), found[0].date);
        assert!(not_found.is_empty());

        Ok(())
    }
}
