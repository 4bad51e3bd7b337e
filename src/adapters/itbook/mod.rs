pub mod book_search;

// パブリックに型を再エクスポート
pub use book_search::BookSearch as ItBookStoreSearch;
