use super::BookId;

/// 画面状態
///
/// カタログ・貸出管理・書籍詳細の3画面を持つ長命のUIセッション。
/// 終端状態はない。詳細画面は注目中の書籍IDを保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Catalog,
    Loans,
    Details { book_id: BookId },
}

impl Default for View {
    /// 初期状態はカタログ画面
    fn default() -> Self {
        View::Catalog
    }
}

/// 画面遷移アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// 貸出管理画面を開く
    OpenLoans,
    /// 書籍詳細画面を開く
    ViewDetails(BookId),
    /// 前の画面に戻る
    Back,
}

/// 純粋関数：画面遷移
///
/// 遷移表：
/// - `Catalog` --OpenLoans--> `Loans`
/// - `Catalog` --ViewDetails(b)--> `Details(b)`
/// - `Loans`   --Back--> `Catalog`
/// - `Details` --Back--> `Catalog`
///
/// 表にない組み合わせは現在の画面に留まる（全域関数、エラーなし）。
pub fn navigate(view: View, action: NavAction) -> View {
    match (view, action) {
        (View::Catalog, NavAction::OpenLoans) => View::Loans,
        (View::Catalog, NavAction::ViewDetails(book_id)) => View::Details { book_id },
        (View::Loans, NavAction::Back) => View::Catalog,
        (View::Details { .. }, NavAction::Back) => View::Catalog,
        (view, _) => view,
    }
}

/// 純粋関数：選択トグル
///
/// 選択済みの書籍を再選択すると選択解除、別の書籍を選択すると置き換え。
/// 画面遷移とは独立したカタログ画面上のハイライト状態。
pub fn toggle_selection(current: Option<BookId>, book_id: BookId) -> Option<BookId> {
    if current == Some(book_id) {
        None
    } else {
        Some(book_id)
    }
}
