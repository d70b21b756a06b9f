use super::items::attach_items;
use crate::{
    abstract_trait::order::repository::OrderQueryRepositoryTrait,
    model::order::{Order as OrderModel, OrderWithItems},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(&self) -> Result<Vec<OrderWithItems>, RepositoryError> {
        info!("📦 Fetching all active orders");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let orders = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, ordered_at, customer_name, created_at, updated_at, deleted_at
            FROM orders
            WHERE deleted_at IS NULL
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        attach_items(&mut conn, orders).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithItems>, RepositoryError> {
        info!("🔍 Fetching order by id: {}", id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, ordered_at, customer_name, created_at, updated_at, deleted_at
            FROM orders
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        let Some(order) = order else {
            return Ok(None);
        };

        Ok(attach_items(&mut conn, vec![order]).await?.pop())
    }
}
