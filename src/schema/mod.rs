//! Record descriptors: which fields of a record type are persisted, under which column, and how.

mod descriptor;
mod record;
mod validator;

pub use descriptor::*;
pub use record::*;
pub use validator::*;
