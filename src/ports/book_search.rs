use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 検索結果1件分の書籍風レコード
///
/// 外部コラボレータのレスポンスのうち、類似書籍の表示に使う
/// 部分だけを保持する。カタログの`Book`とは別物で、IDを持たない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

/// 書籍検索ポート
///
/// 類似書籍の検索に使う外部テキスト検索コラボレータとの境界。
/// 相手は信頼できないものとして扱い、失敗の縮退は呼び出し側
/// （アプリケーション層）が行う。
#[async_trait]
pub trait BookSearch: Send + Sync {
    /// 自由形式のクエリ文字列で書籍を検索する
    ///
    /// 結果が0件でも成功として空のリストを返す。レスポンスに結果
    /// リストが含まれない場合はエラー。
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}
