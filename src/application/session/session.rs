use crate::domain::commands::{AddBook, BorrowBook, ReturnLoan};
use crate::domain::{
    Book, BookId, LoanId, NavAction, View,
    catalog::Catalog,
    loan::{Loan, LoanLedger},
    navigate, toggle_selection,
};
use crate::ports::SearchHit;

use super::errors::{Result, SessionError};

/// 類似書籍検索の状態
///
/// 実行中の検索は注目中の書籍IDをキーとして持つ。画面が切り替わった後に
/// 届いた結果はキー不一致として破棄される（遅延到着による上書きを防ぐ）。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SimilarBooksState {
    /// 検索していない（詳細画面を開いていない）
    #[default]
    Idle,

    /// 検索実行中
    Loading { book_id: BookId },

    /// 検索完了（結果は空のこともある）
    Ready { book_id: BookId, hits: Vec<SearchHit> },
}

/// アプリケーションセッション
///
/// カタログ・貸出台帳・画面状態を所有する単一のルートコントローラ。
/// すべての状態変更はここのメソッドを経由する。グローバル変数は持たない。
#[derive(Debug, Default)]
pub struct Session {
    catalog: Catalog,
    ledger: LoanLedger,
    view: View,
    selected_book: Option<BookId>,
    author_filter: Option<String>,
    similar_books: SimilarBooksState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // 状態変更（ミューテータ）
    // ========================================================================

    /// 書籍をカタログに追加する
    pub fn add_book(&mut self, cmd: AddBook) -> BookId {
        self.catalog.add(cmd)
    }

    /// 書籍の選択をトグルする
    ///
    /// 選択済みの書籍なら選択解除、それ以外なら選択の置き換え。
    ///
    /// # エラー
    /// 書籍がカタログに存在しない場合は `SessionError::BookNotFound`
    pub fn toggle_select(&mut self, book_id: BookId) -> Result<Option<BookId>> {
        if !self.catalog.contains(book_id) {
            return Err(SessionError::BookNotFound);
        }

        self.selected_book = toggle_selection(self.selected_book, book_id);
        Ok(self.selected_book)
    }

    /// 書籍詳細画面を開く
    ///
    /// カタログ画面からのみ遷移できる。遷移が成立した場合は注目中の書籍を
    /// 選択状態にし、類似書籍検索を実行中に切り替えたうえで、検索の種に
    /// なる書籍のコピーを返す。遷移が成立しない画面では何も変えず `None`。
    ///
    /// # エラー
    /// 書籍がカタログに存在しない場合は `SessionError::BookNotFound`
    pub fn view_details(&mut self, book_id: BookId) -> Result<Option<Book>> {
        // 1. 対象書籍の存在確認
        let book = self
            .catalog
            .get(book_id)
            .cloned()
            .ok_or(SessionError::BookNotFound)?;

        // 2. 画面遷移（成立しない組み合わせは現状維持）
        let next = navigate(self.view, NavAction::ViewDetails(book_id));
        if next == self.view {
            return Ok(None);
        }
        self.view = next;

        // 3. 注目中の書籍を選択状態にし、類似書籍検索を開始
        self.selected_book = Some(book_id);
        self.similar_books = SimilarBooksState::Loading { book_id };

        Ok(Some(book))
    }

    /// 貸出管理画面を開く
    pub fn open_loans(&mut self) {
        self.view = navigate(self.view, NavAction::OpenLoans);
    }

    /// 前の画面に戻る
    ///
    /// 詳細画面から戻るときは選択と類似書籍の結果をクリアする。
    pub fn back(&mut self) {
        let leaving_details = matches!(self.view, View::Details { .. });

        self.view = navigate(self.view, NavAction::Back);

        if leaving_details && self.view == View::Catalog {
            self.selected_book = None;
            self.similar_books = SimilarBooksState::Idle;
        }
    }

    /// 著者フィルタを設定する
    ///
    /// `None` はフィルタなし（全書籍）を意味する。
    pub fn set_author_filter(&mut self, author: Option<String>) {
        self.author_filter = author;
    }

    /// 書籍を借りる
    ///
    /// 画面状態には依存しない。貸出管理とカタログのどちらからでも呼べる。
    ///
    /// # エラー
    /// - 書籍が存在しない場合は `SessionError::BookNotFound`
    /// - 貸出中の場合は `SessionError::BookAlreadyOnLoan`
    pub fn borrow_book(&mut self, cmd: BorrowBook) -> Result<LoanId> {
        if !self.catalog.contains(cmd.book_id) {
            return Err(SessionError::BookNotFound);
        }

        let loan_id = self.ledger.borrow(cmd)?;
        Ok(loan_id)
    }

    /// 貸出を返却する
    ///
    /// # エラー
    /// - 貸出が存在しない場合は `SessionError::LoanNotFound`
    /// - 返却済みの場合は `SessionError::LoanAlreadyReturned`
    pub fn return_loan(&mut self, cmd: ReturnLoan) -> Result<()> {
        self.ledger.return_loan(cmd)?;
        Ok(())
    }

    /// 類似書籍の検索結果を格納する
    ///
    /// 結果は書籍IDをキーとして照合し、その書籍の詳細画面が表示中の
    /// 場合だけ受け入れる。画面が切り替わった後に届いた結果は破棄し、
    /// `false` を返す。
    pub fn store_similar_results(&mut self, book_id: BookId, hits: Vec<SearchHit>) -> bool {
        let current = matches!(self.view, View::Details { book_id: focal } if focal == book_id);
        if !current {
            return false;
        }

        self.similar_books = SimilarBooksState::Ready { book_id, hits };
        true
    }

    // ========================================================================
    // 読み取り
    // ========================================================================

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_book(&self) -> Option<BookId> {
        self.selected_book
    }

    pub fn author_filter(&self) -> Option<&str> {
        self.author_filter.as_deref()
    }

    pub fn similar_books(&self) -> &SimilarBooksState {
        &self.similar_books
    }

    /// 全書籍（挿入順）
    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    /// IDで書籍を取得する
    pub fn book(&self, book_id: BookId) -> Option<&Book> {
        self.catalog.get(book_id)
    }

    /// カタログに登場する著者名の一覧（初出順、重複なし）
    pub fn authors(&self) -> Vec<&str> {
        self.catalog.authors()
    }

    /// 著者フィルタを適用した書籍一覧
    ///
    /// フィルタなしなら全書籍。順序はカタログの挿入順のまま。
    pub fn filtered_books(&self) -> Vec<&Book> {
        match &self.author_filter {
            Some(author) => self.catalog.filter_by_author(author),
            None => self.catalog.books().iter().collect(),
        }
    }

    /// 貸出可能な書籍一覧
    pub fn available_books(&self) -> Vec<&Book> {
        self.ledger.available_books(self.catalog.books())
    }

    /// 書籍が貸出中か
    pub fn is_on_loan(&self, book_id: BookId) -> bool {
        self.ledger.is_on_loan(book_id)
    }

    /// 未返却の貸出と対応する書籍の組
    ///
    /// 貸出管理画面の表示用。台帳は書籍IDしか持たないため、ここで
    /// カタログと突き合わせる。
    pub fn active_loans(&self) -> Vec<(&Loan, &Book)> {
        self.ledger
            .active_loans()
            .into_iter()
            .filter_map(|loan| self.catalog.get(loan.book_id).map(|book| (loan, book)))
            .collect()
    }

    /// 全貸出レコード（返却済みを含む、追記順）
    pub fn loans(&self) -> &[Loan] {
        self.ledger.loans()
    }

    /// IDで貸出を取得する
    pub fn loan(&self, loan_id: LoanId) -> Option<&Loan> {
        self.ledger.get(loan_id)
    }
}
