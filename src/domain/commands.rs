use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, LoanId};

/// コマンド：書籍をカタログに追加する
///
/// 追加フォームの入力に相当する。題名と著者以外は任意。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBook {
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub language: Option<String>,
    pub pages: Option<u32>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

/// コマンド：書籍を借りる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowBook {
    pub book_id: BookId,
    /// 借り手の名前。未入力を許す
    pub borrower_name: Option<String>,
    pub borrowed_at: DateTime<Utc>,
}

/// コマンド：貸出を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnLoan {
    pub loan_id: LoanId,
    pub returned_at: DateTime<Utc>,
}
