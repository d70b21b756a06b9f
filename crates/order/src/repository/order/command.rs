use super::items::insert_items;
use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    domain::requests::order::{CreateOrderRecordRequest, UpdateOrderRecordRequest},
    model::order::{Order as OrderModel, OrderWithItems},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderWithItems, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (customer_name, ordered_at, created_at, updated_at)
            VALUES ($1, COALESCE($2, current_timestamp), current_timestamp, current_timestamp)
            RETURNING id, ordered_at, customer_name, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&req.customer_name)
        .bind(req.ordered_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order for customer {:?}: {:?}",
                req.customer_name, err
            );
            RepositoryError::from(err)
        })?;

        let items = insert_items(&mut tx, order.id, &req.items).await?;

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit order {}: {:?}", order.id, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created order ID {} with {} item(s)",
            order.id,
            items.len()
        );

        Ok(OrderWithItems { order, items })
    }

    async fn replace_order(
        &self,
        req: &UpdateOrderRecordRequest,
    ) -> Result<OrderWithItems, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        // row lock held until commit, so readers never see the order without items
        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET customer_name = $2,
                updated_at    = current_timestamp
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, ordered_at, customer_name, created_at, updated_at, deleted_at
            "#,
        )
        .bind(req.order_id)
        .bind(&req.customer_name)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to update order ID {}: {:?}", req.order_id, err);
            RepositoryError::from(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        let removed = sqlx::query(
            r#"
            DELETE FROM items WHERE order_id = $1
            "#,
        )
        .bind(order.id)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to clear items of order {}: {:?}", order.id, err);
            RepositoryError::from(err)
        })?
        .rows_affected();

        let items = insert_items(&mut tx, order.id, &req.items).await?;

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit order {}: {:?}", order.id, err);
            RepositoryError::from(err)
        })?;

        info!(
            "🔄 Updated order ID {}: replaced {} item(s) with {}",
            order.id,
            removed,
            items.len()
        );

        Ok(OrderWithItems { order, items })
    }

    async fn trash_order(&self, id: i32) -> Result<OrderModel, RepositoryError> {
        info!("🗑️ Trashing order: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET deleted_at = current_timestamp
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, ordered_at, customer_name, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to trash order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        Ok(order)
    }
}
