//! Record types served by the API.

mod book;
pub use book::Book;
