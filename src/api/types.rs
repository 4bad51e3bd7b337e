use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::session::{Session, SimilarBooksState};
use crate::domain::commands::{AddBook, BorrowBook};
use crate::domain::{Book, View, loan::Loan};
use crate::ports::SearchHit;

/// フィルタなしを表す著者セレクタの先頭項目
pub const ALL_AUTHORS: &str = "All";

// ============================================================================
// Requests
// ============================================================================

/// 書籍追加リクエスト（POST /books）
#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub language: Option<String>,
    pub pages: Option<u32>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl AddBookRequest {
    pub fn to_command(self) -> AddBook {
        AddBook {
            title: self.title,
            author: self.author,
            publisher: self.publisher,
            publication_year: self.publication_year,
            language: self.language,
            pages: self.pages,
            price: self.price,
            image: self.image,
        }
    }
}

/// 貸出作成リクエスト（POST /loans）
#[derive(Debug, Deserialize)]
pub struct BorrowBookRequest {
    pub book_id: Uuid,
    pub borrower_name: Option<String>,
}

impl BorrowBookRequest {
    pub fn to_command(self) -> BorrowBook {
        BorrowBook {
            book_id: crate::domain::BookId::from_uuid(self.book_id),
            borrower_name: self.borrower_name,
            borrowed_at: Utc::now(),
        }
    }
}

/// 著者フィルタ設定リクエスト（POST /session/filter）
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    /// 著者名。先頭項目の "All" はフィルタなしを意味する
    pub author: String,
}

impl FilterRequest {
    /// "All" をフィルタなし（None）に正規化する
    pub fn to_filter(self) -> Option<String> {
        if self.author == ALL_AUTHORS {
            None
        } else {
            Some(self.author)
        }
    }
}

/// 貸出一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListLoansQuery {
    /// ステータスでフィルタリング（active, returned, all）
    pub status: Option<String>,
}

/// 貸出一覧のステータスフィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Active,
    Returned,
    All,
}

/// ステータスクエリパラメータのパースとバリデーション
pub fn parse_status_filter(status: &str) -> Result<StatusFilter, String> {
    match status {
        "active" => Ok(StatusFilter::Active),
        "returned" => Ok(StatusFilter::Returned),
        "all" => Ok(StatusFilter::All),
        _ => Err(format!("Invalid status filter: {}", status)),
    }
}

// ============================================================================
// Responses
// ============================================================================

/// 書籍レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub language: Option<String>,
    pub pages: Option<u32>,
    pub price: Option<f64>,
    pub image: Option<String>,
    /// 未返却の貸出が存在しないこと
    pub available: bool,
}

impl BookResponse {
    pub fn new(book: &Book, on_loan: bool) -> Self {
        Self {
            id: book.id.value(),
            title: book.title.clone(),
            author: book.author.clone(),
            publisher: book.publisher.clone(),
            publication_year: book.publication_year,
            language: book.language.clone(),
            pages: book.pages,
            price: book.price,
            image: book.image.clone(),
            available: !on_loan,
        }
    }
}

/// カタログレスポンス（GET /catalog と POST /session/filter）
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    /// 著者フィルタ適用後の書籍一覧（挿入順）
    pub books: Vec<BookResponse>,
    /// 著者セレクタの項目。先頭は常に "All"
    pub authors: Vec<String>,
    /// 現在のフィルタ。フィルタなしなら "All"
    pub filter: String,
}

impl From<&Session> for CatalogResponse {
    fn from(session: &Session) -> Self {
        let books = session
            .filtered_books()
            .into_iter()
            .map(|book| BookResponse::new(book, session.is_on_loan(book.id)))
            .collect();

        let mut authors = vec![ALL_AUTHORS.to_string()];
        authors.extend(session.authors().into_iter().map(String::from));

        Self {
            books,
            authors,
            filter: session.author_filter().unwrap_or(ALL_AUTHORS).to_string(),
        }
    }
}

/// 類似書籍1件分のレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarBookResponse {
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

impl From<&SearchHit> for SimilarBookResponse {
    fn from(hit: &SearchHit) -> Self {
        Self {
            title: hit.title.clone(),
            subtitle: hit.subtitle.clone(),
            image: hit.image.clone(),
            url: hit.url.clone(),
        }
    }
}

/// 類似書籍検索の状態レスポンス（GET /session/similar）
#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarBooksResponse {
    /// idle, loading, ready のいずれか
    pub status: String,
    /// 検索の種になった書籍ID（idle のときは null）
    pub book_id: Option<Uuid>,
    /// 検索結果（ready 以外では空）
    pub hits: Vec<SimilarBookResponse>,
}

impl From<&SimilarBooksState> for SimilarBooksResponse {
    fn from(state: &SimilarBooksState) -> Self {
        match state {
            SimilarBooksState::Idle => Self {
                status: "idle".to_string(),
                book_id: None,
                hits: Vec::new(),
            },
            SimilarBooksState::Loading { book_id } => Self {
                status: "loading".to_string(),
                book_id: Some(book_id.value()),
                hits: Vec::new(),
            },
            SimilarBooksState::Ready { book_id, hits } => Self {
                status: "ready".to_string(),
                book_id: Some(book_id.value()),
                hits: hits.iter().map(SimilarBookResponse::from).collect(),
            },
        }
    }
}

/// セッションスナップショット（GET /session とナビゲーション操作）
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// catalog, loans, details のいずれか
    pub view: String,
    /// 詳細画面で注目中の書籍ID（詳細画面以外では null）
    pub viewed_book_id: Option<Uuid>,
    /// 選択中の書籍ID
    pub selected_book_id: Option<Uuid>,
    /// 現在の著者フィルタ。フィルタなしなら "All"
    pub author_filter: String,
    pub similar_books: SimilarBooksResponse,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        let (view, viewed_book_id) = match session.view() {
            View::Catalog => ("catalog", None),
            View::Loans => ("loans", None),
            View::Details { book_id } => ("details", Some(book_id.value())),
        };

        Self {
            view: view.to_string(),
            viewed_book_id,
            selected_book_id: session.selected_book().map(|id| id.value()),
            author_filter: session.author_filter().unwrap_or(ALL_AUTHORS).to_string(),
            similar_books: SimilarBooksResponse::from(session.similar_books()),
        }
    }
}

/// 選択トグルのレスポンス（POST /books/:id/select）
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub selected_book_id: Option<Uuid>,
}

/// 貸出管理画面レスポンス（GET /loans）
///
/// 貸出可能な書籍と貸出一覧をまとめて返す。貸出可能一覧は著者フィルタの
/// 影響を受けない（フィルタはカタログ画面の表示専用）。
#[derive(Debug, Serialize, Deserialize)]
pub struct LoansScreenResponse {
    /// 未返却の貸出がない書籍（挿入順）
    pub available_books: Vec<BookResponse>,
    /// ステータスフィルタ適用後の貸出一覧
    pub loans: Vec<LoanResponse>,
}

/// 貸出1件分のレスポンス
///
/// 台帳は書籍IDしか持たないため、表示用に書籍情報を結合して返す。
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanResponse {
    pub loan_id: Uuid,
    pub book_id: Uuid,
    pub title: String,
    pub author: String,
    pub borrower_name: Option<String>,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    /// active または returned
    pub status: String,
}

impl From<(&Loan, &Book)> for LoanResponse {
    fn from((loan, book): (&Loan, &Book)) -> Self {
        let status = if loan.is_open() { "active" } else { "returned" };

        Self {
            loan_id: loan.loan_id.value(),
            book_id: loan.book_id.value(),
            title: book.title.clone(),
            author: book.author.clone(),
            borrower_name: loan.borrower_name.clone(),
            borrowed_at: loan.borrowed_at,
            due_date: loan.due_date,
            returned_at: loan.returned_at,
            status: status.to_string(),
        }
    }
}

/// 貸出作成レスポンス（POST /loans）
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanCreatedResponse {
    pub loan_id: Uuid,
    pub book_id: Uuid,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

/// 返却レスポンス（POST /loans/:id/return）
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanReturnedResponse {
    pub loan_id: Uuid,
    pub returned_at: DateTime<Utc>,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
