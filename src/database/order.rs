use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::errors::order::OrderError;
use crate::models::order::{Order, OrderStatus};
use crate::orders::OrderStore;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    status: String,
    total: Decimal,
    currency: String,
    paid_at: Option<DateTime<Utc>>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, OrderError> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|_| OrderError::UnknownStatus(self.id, self.status.clone()))?;

        Ok(Order {
            id: self.id,
            status,
            total: self.total,
            currency: self.currency,
            paid_at: self.paid_at,
        })
    }
}

/// Postgres-backed order store.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        PgOrderStore { pool }
    }

    async fn set_flag(&self, order_id: i64, column: &str) -> Result<(), OrderError> {
        // Column names are fixed by the two call sites below, never user input.
        let q = format!("UPDATE orders SET {column} = TRUE WHERE id = $1");

        sqlx::query(&q).bind(order_id).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, OrderError> {
        let q = "SELECT id, status, total, currency, paid_at FROM orders WHERE id = $1";

        let row: Option<OrderRow> = sqlx::query_as(q)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(OrderRow::into_order).transpose()
    }

    async fn payment_complete(&self, order_id: i64) -> Result<(), OrderError> {
        // Guarded on paid_at so redelivered webhooks no-op.
        let q = r#"
        UPDATE orders
        SET status = 'completed', paid_at = NOW()
        WHERE id = $1 AND paid_at IS NULL
        "#;

        sqlx::query(q).bind(order_id).execute(&self.pool).await?;
        Ok(())
    }

    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<(), OrderError> {
        let q = "UPDATE orders SET status = $1 WHERE id = $2";

        sqlx::query(q)
            .bind(status.as_str())
            .bind(order_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_order_note(&self, order_id: i64, note: &str) -> Result<(), OrderError> {
        let q = "INSERT INTO order_notes(order_id, note, created_at) VALUES ($1, $2, NOW())";

        sqlx::query(q)
            .bind(order_id)
            .bind(note)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn reduce_stock(&self, order_id: i64) -> Result<(), OrderError> {
        self.set_flag(order_id, "stock_reduced").await
    }

    async fn empty_cart(&self, order_id: i64) -> Result<(), OrderError> {
        self.set_flag(order_id, "cart_emptied").await
    }
}
