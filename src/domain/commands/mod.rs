//! Command structures passed from the host application into the domain.

pub mod orders;

pub use orders::{
    CreateOrderCommand, DeleteEmployerResult, PaymentCommand, RestoreSummary, UpdateOrderCommand,
};
