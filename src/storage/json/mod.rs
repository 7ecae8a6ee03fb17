//! # JSON Storage Module
//!
//! File-based storage implementation mapping each of the tracker's storage
//! keys to one JSON file in a data directory. A user-scoped connection
//! variant prefixes file names per login, replacing the old inheritance-based
//! "authenticated tracker" layering with plain composition.

pub mod connection;
pub mod employer_repository;
pub mod order_repository;
pub mod view_state_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use employer_repository::EmployerRepository;
pub use order_repository::OrderRepository;
pub use view_state_repository::ViewStateRepository;
