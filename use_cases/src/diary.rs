use time::Date;

use domain::models::diary::{Condition, Diary, DiaryId, DiaryItem, DiaryPage, NewDiary};
use domain::models::diary_image::CachedImagePath;
use domain::models::weather::Weather;
use domain::repositories::diary::DiaryRepository;
use domain::repositories::diary_image::DiaryImageRepository;
use domain::{DomainError, DomainErrorKind};

use crate::UseCaseResult;

/// 日記登録ユース・ケースのエラー
#[derive(Debug, thiserror::Error)]
pub enum RegisterDiaryError {
    /// 入力が正しくない。
    #[error(transparent)]
    Invalid(DomainError),

    /// 同じ日付の日記がすでに登録されている。
    #[error("日付({0})の日記がすでに登録されています。")]
    AlreadyRegistered(Date),

    /// 日記の画像を保存領域に移動できなかった。
    #[error("日記の画像を保存できませんでした。")]
    ImageStore(#[source] DomainError),

    /// 日記を登録できなかった。
    #[error("日記の登録に失敗しました。")]
    Repository(#[source] DomainError),

    /// 処理がキャンセルされた。
    #[error("処理がキャンセルされました。")]
    Cancelled,
}

/// 日記を登録する。
///
/// 次の手順で日記を登録して、最初に失敗した手順のエラーを返す。
///
/// 1. 入力を検証
/// 2. キャッシュ領域の画像を保存領域に移動（画像が指定された場合）
/// 3. 日記をデータベースに登録
///
/// 日記をデータベースに登録できなかった場合、保存領域に移動した画像を削除して
/// 巻き戻す。巻き戻しに失敗しても、登録に失敗したエラーを優先して返す。
/// このユース・ケースは再実行に対して冪等でない。
///
/// # 引数
///
/// * `date` - 日記の日付
/// * `weather` - 天気
/// * `condition` - 体調
/// * `items` - 記事のリスト
/// * `image` - キャッシュ領域に保存した画像のパス
/// * `diary_repository` - 日記リポジトリ
/// * `image_repository` - 日記画像リポジトリ
///
/// # 戻り値
///
/// 登録した日記
#[tracing::instrument(
    name = "register diary use case",
    skip(items, image, diary_repository, image_repository),
    fields(diary.date = %date)
)]
pub async fn register_diary(
    date: Date,
    weather: Weather,
    condition: Condition,
    items: Vec<DiaryItem>,
    image: Option<CachedImagePath>,
    diary_repository: &impl DiaryRepository,
    image_repository: &impl DiaryImageRepository,
) -> UseCaseResult<Diary, RegisterDiaryError> {
    // 入力を検証
    let mut diary =
        NewDiary::new(date, weather, condition, items, None).map_err(RegisterDiaryError::Invalid)?;

    // キャッシュ領域の画像を保存領域に移動
    if let Some(cached) = image {
        let stored = image_repository.store(cached).await.map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            if e.is_cancelled() {
                RegisterDiaryError::Cancelled
            } else {
                RegisterDiaryError::ImageStore(e)
            }
        })?;
        diary.image = Some(stored);
    }

    // 日記をデータベースに登録
    let stored_image = diary.image.clone();
    match diary_repository.register(diary).await {
        Ok(registered) => Ok(registered),
        Err(e) => {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            // 保存領域に移動した画像を削除して巻き戻す
            if let Some(stored) = stored_image {
                if let Err(re) = image_repository.delete_stored(stored).await {
                    tracing::warn!("{} ({}:{})", re, file!(), line!());
                }
            }
            Err(if e.is_cancelled() {
                RegisterDiaryError::Cancelled
            } else if e.kind == DomainErrorKind::AlreadyExists {
                RegisterDiaryError::AlreadyRegistered(date)
            } else {
                RegisterDiaryError::Repository(e)
            })
        }
    }
}

/// 日記更新ユース・ケースのエラー
#[derive(Debug, thiserror::Error)]
pub enum UpdateDiaryError {
    /// 日記が登録されていない。
    #[error("更新する日記が登録されていません。")]
    NotFound,

    /// 日記の画像を保存領域に移動できなかった。
    #[error("日記の画像を保存できませんでした。")]
    ImageStore(#[source] DomainError),

    /// 日記を更新できなかった。
    #[error("日記の更新に失敗しました。")]
    Repository(#[source] DomainError),

    /// 処理がキャンセルされた。
    #[error("処理がキャンセルされました。")]
    Cancelled,
}

/// 日記を更新する。
///
/// 新しい画像が指定された場合、キャッシュ領域の画像を保存領域に移動してから日記を
/// 更新して、更新に成功した後に以前の画像を削除する。以前の画像の削除に失敗しても、
/// 更新した日記を返す。
///
/// 日記をデータベースに更新できなかった場合、保存領域に移動した新しい画像を削除して
/// 巻き戻す。
///
/// # 引数
///
/// * `diary` - 更新する日記
/// * `new_image` - キャッシュ領域に保存した新しい画像のパス
/// * `diary_repository` - 日記リポジトリ
/// * `image_repository` - 日記画像リポジトリ
///
/// # 戻り値
///
/// 更新した日記
#[tracing::instrument(
    name = "update diary use case",
    skip(diary, new_image, diary_repository, image_repository),
    fields(diary.id = %diary.id)
)]
pub async fn update_diary(
    diary: Diary,
    new_image: Option<CachedImagePath>,
    diary_repository: &impl DiaryRepository,
    image_repository: &impl DiaryImageRepository,
) -> UseCaseResult<Diary, UpdateDiaryError> {
    let previous_image = diary.image.clone();

    // キャッシュ領域の新しい画像を保存領域に移動
    let mut diary = diary;
    let mut replaced = false;
    if let Some(cached) = new_image {
        let stored = image_repository.store(cached).await.map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            if e.is_cancelled() {
                UpdateDiaryError::Cancelled
            } else {
                UpdateDiaryError::ImageStore(e)
            }
        })?;
        diary.image = Some(stored);
        replaced = true;
    }

    // 日記をデータベースに更新
    let stored_image = diary.image.clone();
    let updated = match diary_repository.update(diary).await {
        Ok(updated) => updated,
        Err(e) => {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            // 保存領域に移動した新しい画像を削除して巻き戻す
            if replaced {
                if let Some(stored) = stored_image {
                    if let Err(re) = image_repository.delete_stored(stored).await {
                        tracing::warn!("{} ({}:{})", re, file!(), line!());
                    }
                }
            }
            return Err(if e.is_cancelled() {
                UpdateDiaryError::Cancelled
            } else if e.kind == DomainErrorKind::NotFound {
                UpdateDiaryError::NotFound
            } else {
                UpdateDiaryError::Repository(e)
            });
        }
    };

    // 差し替える前の画像を削除
    if replaced {
        if let Some(previous) = previous_image {
            if let Err(e) = image_repository.delete_stored(previous).await {
                tracing::warn!("{} ({}:{})", e, file!(), line!());
            }
        }
    }

    Ok(updated)
}

/// 日記削除ユース・ケースのエラー
#[derive(Debug, thiserror::Error)]
pub enum DeleteDiaryError {
    /// 日記が登録されていない。
    #[error("削除する日記が登録されていません。")]
    NotFound,

    /// 日記の画像を削除できなかった。
    #[error("日記の画像を削除できませんでした。")]
    ImageStore(#[source] DomainError),

    /// 日記を削除できなかった。
    #[error("日記の削除に失敗しました。")]
    Repository(#[source] DomainError),

    /// 処理がキャンセルされた。
    #[error("処理がキャンセルされました。")]
    Cancelled,
}

impl DeleteDiaryError {
    /// 日記リポジトリが返したドメイン・エラーを、ユース・ケースのエラーに変換する。
    fn from_repository(e: DomainError) -> Self {
        if e.is_cancelled() {
            return Self::Cancelled;
        }
        match e.kind {
            DomainErrorKind::NotFound => Self::NotFound,
            _ => Self::Repository(e),
        }
    }
}

/// 日記を削除する。
///
/// 日記に画像が記録されている場合、日記を削除した後に保存領域の画像を削除する。
/// 画像の削除に失敗した場合、日記の削除は巻き戻さずに`ImageStore`を返す。
///
/// # 引数
///
/// * `id` - 削除する日記の日記ID
/// * `diary_repository` - 日記リポジトリ
/// * `image_repository` - 日記画像リポジトリ
#[tracing::instrument(
    name = "delete diary use case",
    skip(diary_repository, image_repository),
    fields(diary.id = %id)
)]
pub async fn delete_diary(
    id: DiaryId,
    diary_repository: &impl DiaryRepository,
    image_repository: &impl DiaryImageRepository,
) -> UseCaseResult<(), DeleteDiaryError> {
    // 削除する日記を取得
    let diary = diary_repository
        .find_by_id(id)
        .await
        .map_err(DeleteDiaryError::from_repository)?
        .ok_or(DeleteDiaryError::NotFound)?;

    // 日記をデータベースから削除
    diary_repository
        .delete(id)
        .await
        .map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            DeleteDiaryError::from_repository(e)
        })?;

    // 保存領域の画像を削除
    if let Some(image) = diary.image {
        image_repository.delete_stored(image).await.map_err(|e| {
            tracing::error!("{} ({}:{})", e, file!(), line!());
            if e.is_cancelled() {
                DeleteDiaryError::Cancelled
            } else {
                DeleteDiaryError::ImageStore(e)
            }
        })?;
    }

    Ok(())
}

/// 日付を指定して日記を取得する。
///
/// # 引数
///
/// * `date` - 取得する日記の日付
/// * `repository` - 日記リポジトリ
///
/// # 戻り値
///
/// 日記。指定された日付の日記が登録されていない場合は`None`
#[tracing::instrument(name = "find diary by date use case", skip(repository), fields(diary.date = %date))]
pub async fn find_diary_by_date(
    date: Date,
    repository: &impl DiaryRepository,
) -> UseCaseResult<Option<Diary>, DomainError> {
    repository.find_by_date(date).await
}

/// 日記を日付の新しい順に取得する。
///
/// # 引数
///
/// * `page` - 取得する日記リストのページ
/// * `repository` - 日記リポジトリ
///
/// # 戻り値
///
/// 日記のリスト
#[tracing::instrument(name = "list diaries use case", skip(repository))]
pub async fn list_diaries(
    page: DiaryPage,
    repository: &impl DiaryRepository,
) -> UseCaseResult<Vec<Diary>, DomainError> {
    repository.list(page).await
}

/// 記事にキーワードを含む日記を検索する。
///
/// # 引数
///
/// * `keyword` - 検索するキーワード
/// * `repository` - 日記リポジトリ
///
/// # 戻り値
///
/// 日記のリスト
#[tracing::instrument(name = "search diaries use case", skip(repository))]
pub async fn search_diaries(
    keyword: &str,
    repository: &impl DiaryRepository,
) -> UseCaseResult<Vec<Diary>, DomainError> {
    let keyword = keyword.trim();
    // キーワードを検証してから検索
    if keyword.is_empty() {
        return Err(DomainError::validation()
            .with_message("検索するキーワードを指定してください。"));
    }

    repository.search(keyword).await
}
