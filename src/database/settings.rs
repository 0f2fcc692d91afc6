use serde_json::Value;
use sqlx::PgPool;

/// One persisted gateway setting. The admin surface writes these; the
/// per-request `GatewayConfig` reads them all at once.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Model {
    pub key: String,
    pub value: Value,
}

impl Model {
    pub async fn fetch_all(pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        let q = "SELECT key, value FROM gateway_settings";

        sqlx::query_as(q).fetch_all(pool).await
    }

    pub async fn fetch_by_key(pool: &PgPool, key: &str) -> sqlx::Result<Option<Self>> {
        let q = "SELECT key, value FROM gateway_settings WHERE key = $1";

        sqlx::query_as(q).bind(key).fetch_optional(pool).await
    }

    pub async fn upsert(pool: &PgPool, key: &str, value: &Value) -> sqlx::Result<()> {
        let q = r#"
        INSERT INTO gateway_settings(key, value) VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
        "#;

        sqlx::query(q).bind(key).bind(value).execute(pool).await?;
        Ok(())
    }
}
