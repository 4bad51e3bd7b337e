pub mod session;
pub mod similar_books;
