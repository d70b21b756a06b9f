use crate::{
    domain::requests::item::CreateItemRecordRequest,
    model::{
        item::Item as ItemModel,
        order::{Order as OrderModel, OrderWithItems},
    },
};
use shared::errors::RepositoryError;
use sqlx::PgConnection;
use std::collections::HashMap;
use tracing::error;

pub(super) async fn insert_items(
    conn: &mut PgConnection,
    order_id: i32,
    items: &[CreateItemRecordRequest],
) -> Result<Vec<ItemModel>, RepositoryError> {
    let mut created = Vec::with_capacity(items.len());

    for item in items {
        let row = sqlx::query_as::<_, ItemModel>(
            r#"
            INSERT INTO items (order_id, item_code, description, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, current_timestamp, current_timestamp)
            RETURNING id, order_id, item_code, description, quantity, created_at, updated_at
            "#,
        )
        .bind(order_id)
        .bind(&item.item_code)
        .bind(&item.description)
        .bind(item.quantity)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to insert item for order {}: {:?}", order_id, err);
            RepositoryError::from(err)
        })?;

        created.push(row);
    }

    Ok(created)
}

/// Loads the items of every given order in one round trip and pairs them up,
/// preserving the order of `orders`.
pub(super) async fn attach_items(
    conn: &mut PgConnection,
    orders: Vec<OrderModel>,
) -> Result<Vec<OrderWithItems>, RepositoryError> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();

    let rows = sqlx::query_as::<_, ItemModel>(
        r#"
        SELECT id, order_id, item_code, description, quantity, created_at, updated_at
        FROM items
        WHERE order_id = ANY($1)
        ORDER BY id ASC
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(|err| {
        error!("❌ Failed to fetch items for orders {:?}: {:?}", ids, err);
        RepositoryError::from(err)
    })?;

    let mut by_order: HashMap<i32, Vec<ItemModel>> = HashMap::new();
    for item in rows {
        by_order.entry(item.order_id).or_default().push(item);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            OrderWithItems { order, items }
        })
        .collect())
}
