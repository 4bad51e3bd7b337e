pub mod itbook;
pub mod mock;
