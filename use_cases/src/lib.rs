pub mod diary;
pub mod diary_image;
pub mod location;
pub mod reminder;
pub mod settings;
pub mod weather;

#[cfg(test)]
pub(crate) mod test_support;

/// ユース・ケースの結果型
///
/// ユース・ケースの公開エントリ・ポイントは、想定される失敗について必ず`Err`を
/// 返して、呼び出し元が網羅的に処理できるユース・ケース固有のエラー型を設定する。
/// プログラミング・エラーなど想定していない欠陥は、この型で表現せずにパニックとして
/// 伝播する。
pub type UseCaseResult<T, E> = Result<T, E>;
