use serde::{Deserialize, Serialize};

use super::BookId;

/// 書籍レコード - カタログの1エントリ
///
/// 追加フォームから作成された後は不変。削除操作は存在しない。
/// 貸出状態は書籍自身には持たせず、貸出台帳からの導出に委ねる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub language: Option<String>,
    pub pages: Option<u32>,
    pub price: Option<f64>,
    /// 表紙画像のURL
    pub image: Option<String>,
}
