pub mod book;
pub mod catalog;
pub mod commands;
pub mod errors;
pub mod loan;
pub mod value_objects;
pub mod view;

pub use book::*;
pub use errors::*;
pub use value_objects::*;
pub use view::*;
