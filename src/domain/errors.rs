/// 貸出のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowBookError {
    /// 対象の書籍に未返却の貸出が既に存在する
    ///
    /// 画面は貸出可能な書籍だけを提示するため通常は到達しないが、
    /// 暗黙の無視ではなく型付きエラーとして返す。
    AlreadyOnLoan,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnLoanError {
    /// 指定されたIDの貸出が存在しない
    LoanNotFound,
    /// 既に返却済み（返却は一方向の遷移で、取り消し不可）
    AlreadyReturned,
}
