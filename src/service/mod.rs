//! RecordStore: generic CRUD using the descriptor-driven SQL builder.

mod crud;
pub use crud::RecordStore;
