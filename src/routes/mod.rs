//! Router assembly.

mod books;
mod ready;

pub use books::book_routes;
pub use ready::ready_routes;
