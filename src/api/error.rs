use crate::application::session::SessionError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(SessionError);

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 404 Not Found - リクエストされたリソースが存在しない
            SessionError::BookNotFound => {
                (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", "Book not found")
            }
            SessionError::LoanNotFound => {
                (StatusCode::NOT_FOUND, "LOAN_NOT_FOUND", "Loan not found")
            }

            // 422 Unprocessable Entity - ビジネスルール違反
            SessionError::BookAlreadyOnLoan => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "BOOK_ALREADY_ON_LOAN",
                "Book is already on loan",
            ),
            SessionError::LoanAlreadyReturned => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "LOAN_ALREADY_RETURNED",
                "Loan is already returned",
            ),
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
