use tokio::sync::watch;

/// キャンセル・ソース
///
/// 長時間実行する処理にキャンセルを通知する。キャンセルの待機には、`token`メソッドで
/// 取得したキャンセル・トークンを使用する。
#[derive(Debug)]
pub struct CancellationSource {
    tx: watch::Sender<bool>,
}

impl CancellationSource {
    /// キャンセル・ソースを構築する。
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// このソースに接続したキャンセル・トークンを返す。
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            rx: self.tx.subscribe(),
        }
    }

    /// キャンセルを通知する。
    ///
    /// すでに通知している場合は何もしない。
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

/// キャンセル・トークン
///
/// リポジトリの長時間実行する操作に引き渡して、処理を中断する機会を与える。
/// トークンを複製しても、同じキャンセル・ソースに接続したままとなる。
#[derive(Debug, Clone)]
pub struct CancellationToken {
    rx: watch::Receiver<bool>,
}

impl CancellationToken {
    /// キャンセルが通知されないトークンを返す。
    ///
    /// キャンセルする予定がない呼び出し元が使用する。
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        Self { rx }
    }

    /// キャンセルが通知されたか確認する。
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// キャンセルが通知されるまで待機する。
    ///
    /// キャンセル・ソースが破棄された場合、キャンセルは通知されないため、この
    /// メソッドは完了しない。
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// キャンセルを通知する前はキャンセルされていないことを確認
    #[test]
    fn token_is_not_cancelled_before_the_source_cancels() {
        let source = CancellationSource::new();
        let token = source.token();

        assert!(!token.is_cancelled());
    }

    /// キャンセルを通知した後はキャンセルされていることを確認
    #[test]
    fn token_is_cancelled_after_the_source_cancels() {
        let source = CancellationSource::new();
        let token = source.token();
        source.cancel();

        assert!(token.is_cancelled());
    }

    /// キャンセルの通知を待機できることを確認
    #[tokio::test]
    async fn token_can_wait_for_a_cancellation() {
        let source = CancellationSource::new();
        let token = source.token();

        let handle = tokio::spawn(async move {
            token.cancelled().await;
        });
        source.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("cancellation was not delivered")
            .unwrap();
    }

    /// キャンセルが通知されないトークンが完了しないことを確認
    #[tokio::test]
    async fn never_token_does_not_complete() {
        let token = CancellationToken::never();

        let result =
            tokio::time::timeout(Duration::from_millis(10), token.cancelled()).await;

        assert!(result.is_err());
        assert!(!token.is_cancelled());
    }
}
