use async_trait::async_trait;

use crate::errors::order::OrderError;
use crate::models::order::{Order, OrderStatus};

/// The order store collaborator. Orders are owned elsewhere; this interface
/// covers exactly the mutations checkout and settlement need. All mutations
/// must be safe to repeat: the provider redelivers webhooks.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, OrderError>;

    /// Marks the order paid. Must no-op on an already-completed order.
    async fn payment_complete(&self, order_id: i64) -> Result<(), OrderError>;

    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<(), OrderError>;

    async fn add_order_note(&self, order_id: i64, note: &str) -> Result<(), OrderError>;

    async fn reduce_stock(&self, order_id: i64) -> Result<(), OrderError>;

    async fn empty_cart(&self, order_id: i64) -> Result<(), OrderError>;
}
