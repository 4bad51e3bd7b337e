use crate::application::session::{Session, SessionError};
use crate::application::similar_books::fetch_similar_books;
use crate::domain::value_objects::{BookId, LoanId};
use crate::ports::BookSearch;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        AddBookRequest, BookResponse, BorrowBookRequest, CatalogResponse, FilterRequest,
        ListLoansQuery, LoanCreatedResponse, LoanResponse, LoanReturnedResponse,
        LoansScreenResponse, SelectionResponse, SessionResponse, SimilarBooksResponse,
        StatusFilter, parse_status_filter,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
///
/// セッションは単一のRwLockの下にあり、すべての操作は排他的に適用される。
pub struct AppState {
    pub session: RwLock<Session>,
    pub book_search: Arc<dyn BookSearch>,
}

impl AppState {
    pub fn new(book_search: Arc<dyn BookSearch>) -> Self {
        Self {
            session: RwLock::new(Session::new()),
            book_search,
        }
    }
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /books - 書籍をカタログに追加
///
/// IDはサーバー側で採番する。追加直後の書籍は常に貸出可能。
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let cmd = req.to_command();

    let mut session = state.session.write().await;
    let book_id = session.add_book(cmd);

    // 追加された書籍を取得して完全な情報を返す
    let book = session
        .book(book_id)
        .ok_or_else(|| ApiError::from(SessionError::BookNotFound))?;

    let response = BookResponse::new(book, false);

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /books/:id/select - 書籍の選択をトグル
///
/// 選択済みの書籍なら選択解除、それ以外なら選択の置き換え。
pub async fn select_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let book_id = BookId::from_uuid(book_id);

    let mut session = state.session.write().await;
    let selected = session.toggle_select(book_id)?;

    Ok(Json(SelectionResponse {
        selected_book_id: selected.map(|id| id.value()),
    }))
}

/// POST /books/:id/view - 書籍詳細画面を開く
///
/// カタログ画面からのみ遷移が成立する。遷移が成立した場合は類似書籍の
/// 検索をバックグラウンドで開始し、画面は待たせない。
pub async fn view_book_details(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let book_id = BookId::from_uuid(book_id);

    let (navigated, response) = {
        let mut session = state.session.write().await;
        let navigated = session.view_details(book_id)?;
        let response = SessionResponse::from(&*session);
        (navigated, response)
    };

    if let Some(book) = navigated {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let hits = fetch_similar_books(&state.book_search, &book).await;

            // 結果は書籍IDで照合され、画面が移っていたら破棄される
            let mut session = state.session.write().await;
            if !session.store_similar_results(book.id, hits) {
                tracing::debug!(
                    book_id = %book.id.value(),
                    "discarded stale similar-books result"
                );
            }
        });
    }

    Ok(Json(response))
}

/// POST /session/loans - 貸出管理画面を開く
pub async fn open_loans(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let mut session = state.session.write().await;
    session.open_loans();

    Json(SessionResponse::from(&*session))
}

/// POST /session/back - 前の画面に戻る
///
/// 詳細画面から戻るときは選択と類似書籍の結果もクリアされる。
pub async fn go_back(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let mut session = state.session.write().await;
    session.back();

    Json(SessionResponse::from(&*session))
}

/// POST /session/filter - 著者フィルタを設定
///
/// "All" はフィルタなしを意味する。適用後のカタログを返す。
pub async fn set_author_filter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FilterRequest>,
) -> Json<CatalogResponse> {
    let mut session = state.session.write().await;
    session.set_author_filter(req.to_filter());

    Json(CatalogResponse::from(&*session))
}

/// POST /loans - 新しい貸出を作成
///
/// 強制されるビジネスルール:
/// - 書籍がカタログに存在すること
/// - 書籍に未返却の貸出がないこと
pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BorrowBookRequest>,
) -> Result<(StatusCode, Json<LoanCreatedResponse>), ApiError> {
    let cmd = req.to_command();
    let book_id = cmd.book_id;

    let mut session = state.session.write().await;
    let loan_id = session.borrow_book(cmd)?;

    // 作成された貸出を取得して完全な情報を返す
    let loan = session
        .loan(loan_id)
        .ok_or_else(|| ApiError::from(SessionError::LoanNotFound))?;

    let response = LoanCreatedResponse {
        loan_id: loan_id.value(),
        book_id: book_id.value(),
        borrowed_at: loan.borrowed_at,
        due_date: loan.due_date,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /loans/:id/return - 貸出を返却
///
/// 強制されるビジネスルール:
/// - 貸出が存在すること
/// - 既に返却済みでないこと（返却は一方向の遷移）
pub async fn return_loan(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<Uuid>,
) -> Result<(StatusCode, Json<LoanReturnedResponse>), ApiError> {
    let loan_id = LoanId::from_uuid(loan_id);

    let cmd = crate::domain::commands::ReturnLoan {
        loan_id,
        returned_at: chrono::Utc::now(),
    };

    let mut session = state.session.write().await;
    session.return_loan(cmd)?;

    // 更新された貸出を取得して返却を確認
    let loan = session
        .loan(loan_id)
        .ok_or_else(|| ApiError::from(SessionError::LoanNotFound))?;

    let response = LoanReturnedResponse {
        loan_id: loan_id.value(),
        returned_at: loan.returned_at.unwrap_or_else(chrono::Utc::now),
    };

    Ok((StatusCode::OK, Json(response)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /session - セッションスナップショットを取得
///
/// 画面状態・選択・フィルタ・類似書籍の状態をまとめて返す。
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = state.session.read().await;

    Json(SessionResponse::from(&*session))
}

/// GET /catalog - カタログを取得
///
/// 著者フィルタ適用後の書籍一覧と著者セレクタの項目を返す。
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    let session = state.session.read().await;

    Json(CatalogResponse::from(&*session))
}

/// GET /books/:id - 書籍詳細をIDで取得
///
/// 見つかった場合は書籍情報を返し、見つからない場合は404を返す。
pub async fn get_book_by_id(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<BookResponse>, QueryError> {
    let book_id = BookId::from_uuid(book_id);

    let session = state.session.read().await;

    match session.book(book_id) {
        Some(book) => Ok(Json(BookResponse::new(book, session.is_on_loan(book_id)))),
        None => Err(QueryError::NotFound(format!(
            "Book {} not found",
            book_id.value()
        ))),
    }
}

/// GET /session/similar - 類似書籍検索の状態を取得
///
/// 検索はバックグラウンドで進むため、クライアントはこのエンドポイントで
/// idle → loading → ready の進行を観測する。
pub async fn get_similar_books(State(state): State<Arc<AppState>>) -> Json<SimilarBooksResponse> {
    let session = state.session.read().await;

    Json(SimilarBooksResponse::from(session.similar_books()))
}

/// GET /loans - 貸出管理画面の表示内容を取得
///
/// 貸出可能な書籍の一覧と、貸出レコードの一覧を返す。
///
/// クエリパラメータ:
/// - status: 貸出一覧をステータスでフィルタリング（active, returned, all）
///   （オプション、省略時は active）
///
/// 貸出可能一覧は著者フィルタの影響を受けない。
pub async fn list_loans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListLoansQuery>,
) -> Result<Json<LoansScreenResponse>, QueryError> {
    let filter = match &query.status {
        Some(status) => parse_status_filter(status).map_err(QueryError::BadRequest)?,
        None => StatusFilter::Active,
    };

    let session = state.session.read().await;

    let available_books: Vec<BookResponse> = session
        .available_books()
        .into_iter()
        .map(|book| BookResponse::new(book, false))
        .collect();

    let loans: Vec<LoanResponse> = match filter {
        StatusFilter::Active => session
            .active_loans()
            .into_iter()
            .map(LoanResponse::from)
            .collect(),
        StatusFilter::Returned => session
            .loans()
            .iter()
            .filter(|loan| loan.is_returned())
            .filter_map(|loan| {
                session
                    .book(loan.book_id)
                    .map(|book| LoanResponse::from((loan, book)))
            })
            .collect(),
        StatusFilter::All => session
            .loans()
            .iter()
            .filter_map(|loan| {
                session
                    .book(loan.book_id)
                    .map(|book| LoanResponse::from((loan, book)))
            })
            .collect(),
    };

    Ok(Json(LoansScreenResponse {
        available_books,
        loans,
    }))
}

// ============================================================================
// Error types
// ============================================================================

/// クエリハンドラー用のエラー型
#[derive(Debug)]
pub enum QueryError {
    NotFound(String),
    BadRequest(String),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            QueryError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            QueryError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
        };

        let body = Json(super::types::ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
