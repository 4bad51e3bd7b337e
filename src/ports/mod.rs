pub mod book_search;

pub use book_search::*;
