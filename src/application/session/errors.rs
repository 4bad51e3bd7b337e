use thiserror::Error;

use crate::domain::{BorrowBookError, ReturnLoanError};

/// セッション操作のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// 書籍がカタログに存在しない
    #[error("Book not found")]
    BookNotFound,

    /// 書籍が貸出中
    #[error("Book is already on loan")]
    BookAlreadyOnLoan,

    /// 貸出が見つからない
    #[error("Loan not found")]
    LoanNotFound,

    /// 貸出が返却済み
    #[error("Loan is already returned")]
    LoanAlreadyReturned,
}

impl From<BorrowBookError> for SessionError {
    fn from(e: BorrowBookError) -> Self {
        match e {
            BorrowBookError::AlreadyOnLoan => SessionError::BookAlreadyOnLoan,
        }
    }
}

impl From<ReturnLoanError> for SessionError {
    fn from(e: ReturnLoanError) -> Self {
        match e {
            ReturnLoanError::LoanNotFound => SessionError::LoanNotFound,
            ReturnLoanError::AlreadyReturned => SessionError::LoanAlreadyReturned,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, SessionError>;
