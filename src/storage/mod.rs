//! Storage abstraction and backends for the order ledger.

pub mod json;
pub mod traits;

pub use json::JsonConnection;
pub use traits::{Connection, EmployerStorage, OrderStorage, ViewStateStorage};
