use anyhow::Result;
use log::debug;

use super::connection::JsonConnection;
use crate::domain::models::order::Order;
use crate::storage::traits::OrderStorage;

/// Storage key shared with the original web tracker.
const ORDERS_KEY: &str = "freelance_orders";

/// JSON-file-backed order repository.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    connection: JsonConnection,
}

impl OrderRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl OrderStorage for OrderRepository {
    fn load_orders(&self) -> Result<Vec<Order>> {
        let orders: Vec<Order> = self
            .connection
            .read_json_file(ORDERS_KEY)?
            .unwrap_or_default();
        debug!("Loaded {} orders", orders.len());
        Ok(orders)
    }

    fn save_orders(&self, orders: &[Order]) -> Result<()> {
        self.connection.write_json_file(ORDERS_KEY, &orders)?;
        debug!("Saved {} orders", orders.len());
        Ok(())
    }
}
