mod errors;
mod session;

pub use errors::{Result, SessionError};
pub use session::{Session, SimilarBooksState};
