use async_trait::async_trait;
use time::Date;

use crate::models::diary::{Diary, DiaryId, DiaryPage, NewDiary};
use crate::DomainResult;

/// 日記リポジトリ
///
/// 日記リポジトリの操作が失敗した場合、ドメイン・エラーを返す。データベース固有の
/// エラー型をこのトレイトの境界より上に公開してはならない。
#[async_trait]
pub trait DiaryRepository: Send + Sync + 'static {
    /// 日記を登録する。
    ///
    /// 同じ日付の日記がすでに登録されている場合、`AlreadyExists`のドメイン・エラーを
    /// 返す。
    ///
    /// # 引数
    ///
    /// * `diary` - 登録する日記
    ///
    /// # 戻り値
    ///
    /// 登録した日記
    async fn register(&self, diary: NewDiary) -> DomainResult<Diary>;

    /// 日記を更新する。
    ///
    /// 指定された日記IDの日記が存在しない場合、`NotFound`のドメイン・エラーを返す。
    ///
    /// # 引数
    ///
    /// * `diary` - 更新する日記
    ///
    /// # 戻り値
    ///
    /// 更新した日記
    async fn update(&self, diary: Diary) -> DomainResult<Diary>;

    /// 日記を削除する。
    ///
    /// 指定された日記IDの日記が存在しない場合、`NotFound`のドメイン・エラーを返す。
    async fn delete(&self, id: DiaryId) -> DomainResult<()>;

    /// 日記IDを指定して日記を取得する。
    async fn find_by_id(&self, id: DiaryId) -> DomainResult<Option<Diary>>;

    /// 日付を指定して日記を取得する。
    async fn find_by_date(&self, date: Date) -> DomainResult<Option<Diary>>;

    /// 日記を日付の新しい順に取得する。
    ///
    /// # 引数
    ///
    /// * `page` - 取得する日記リストのページ
    ///
    /// # 戻り値
    ///
    /// 日記のリスト
    async fn list(&self, page: DiaryPage) -> DomainResult<Vec<Diary>>;

    /// 記事にキーワードを含む日記を日付の新しい順に取得する。
    ///
    /// # 引数
    ///
    /// * `keyword` - 検索するキーワード
    ///
    /// # 戻り値
    ///
    /// 日記のリスト
    async fn search(&self, keyword: &str) -> DomainResult<Vec<Diary>>;
}
