//! Storage module.
//!
//! Event models, the persistence interface the engines depend on, an
//! in-memory implementation, and SQL builders for database-backed hosts.

pub mod memory;
pub mod models;
pub mod queries;
pub mod seed;
pub mod store;

pub use memory::*;
pub use models::*;
pub use queries::*;
pub use seed::*;
pub use store::*;
