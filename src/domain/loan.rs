use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::commands::{BorrowBook, ReturnLoan};
use super::{Book, BookId, BorrowBookError, LoanId, ReturnLoanError};

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 30;

/// 貸出レコード - 1冊の書籍の1回の貸出
///
/// `returned_at` が `None` の間は「未返却（open）」。
/// 返却遷移で一度だけ `Some` になり、以後変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: LoanId,

    /// カタログ側の書籍への参照（IDのみ、所有しない）
    pub book_id: BookId,

    pub borrower_name: Option<String>,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl Loan {
    /// 未返却か
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }

    /// 返却済みか
    pub fn is_returned(&self) -> bool {
        self.returned_at.is_some()
    }
}

/// 純粋関数：新しい貸出を起票する
///
/// ビジネスルール：
/// - 貸出期間は30日間（`due_date = borrowed_at + 30日`）
/// - 起票時点では未返却
///
/// 副作用なし。台帳への追記は `LoanLedger::borrow` が行う。
pub fn open_loan(
    book_id: BookId,
    borrower_name: Option<String>,
    borrowed_at: DateTime<Utc>,
) -> Loan {
    let due_date = borrowed_at + Duration::days(LOAN_PERIOD_DAYS);

    Loan {
        loan_id: LoanId::new(),
        book_id,
        borrower_name,
        borrowed_at,
        due_date,
        returned_at: None,
    }
}

/// 貸出台帳
///
/// 貸出レコードを所有する追記専用のリスト。削除操作はなく、
/// 唯一の更新は返却遷移（`returned_at` の一方向の設定）のみ。
#[derive(Debug, Default)]
pub struct LoanLedger {
    loans: Vec<Loan>,
}

impl LoanLedger {
    pub fn new() -> Self {
        Self { loans: Vec::new() }
    }

    /// 書籍を借りる
    ///
    /// ビジネスルール：
    /// - 同一書籍に対する未返却の貸出は同時に1件まで
    ///
    /// # エラー
    /// 対象書籍に未返却の貸出がある場合は `BorrowBookError::AlreadyOnLoan`
    pub fn borrow(&mut self, cmd: BorrowBook) -> Result<LoanId, BorrowBookError> {
        if self.is_on_loan(cmd.book_id) {
            return Err(BorrowBookError::AlreadyOnLoan);
        }

        let loan = open_loan(cmd.book_id, cmd.borrower_name, cmd.borrowed_at);
        let loan_id = loan.loan_id;
        self.loans.push(loan);

        Ok(loan_id)
    }

    /// 貸出を返却する
    ///
    /// ビジネスルール：
    /// - 返却は一方向の遷移。返却済みの貸出を再び開くことはできない
    ///
    /// # エラー
    /// - 貸出が存在しない場合は `ReturnLoanError::LoanNotFound`
    /// - 既に返却済みの場合は `ReturnLoanError::AlreadyReturned`
    pub fn return_loan(&mut self, cmd: ReturnLoan) -> Result<(), ReturnLoanError> {
        let loan = self
            .loans
            .iter_mut()
            .find(|loan| loan.loan_id == cmd.loan_id)
            .ok_or(ReturnLoanError::LoanNotFound)?;

        if loan.is_returned() {
            return Err(ReturnLoanError::AlreadyReturned);
        }

        loan.returned_at = Some(cmd.returned_at);
        Ok(())
    }

    // ========================================================================
    // 導出（読み取り専用）
    // ========================================================================

    /// 書籍が貸出中か
    ///
    /// 定義：その書籍IDを参照する未返却の貸出が存在すること。
    pub fn is_on_loan(&self, book_id: BookId) -> bool {
        self.loans
            .iter()
            .any(|loan| loan.book_id == book_id && loan.is_open())
    }

    /// 書籍の未返却の貸出を取得する（高々1件）
    pub fn open_loan_for(&self, book_id: BookId) -> Option<&Loan> {
        self.loans
            .iter()
            .find(|loan| loan.book_id == book_id && loan.is_open())
    }

    /// 未返却の貸出一覧
    pub fn active_loans(&self) -> Vec<&Loan> {
        self.loans.iter().filter(|loan| loan.is_open()).collect()
    }

    /// 貸出可能な書籍一覧
    ///
    /// 未返却の貸出が存在しない書籍を、入力順を保って返す。
    /// O(書籍数 × 貸出数) だがインメモリの小規模コレクションなので許容。
    pub fn available_books<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books
            .iter()
            .filter(|book| !self.is_on_loan(book.id))
            .collect()
    }

    /// IDで貸出を取得する
    pub fn get(&self, loan_id: LoanId) -> Option<&Loan> {
        self.loans.iter().find(|loan| loan.loan_id == loan_id)
    }

    /// 全貸出レコード（返却済みを含む、追記順）
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }
}
