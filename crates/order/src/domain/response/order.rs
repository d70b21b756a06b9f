use crate::model::{item::Item as ItemModel, order::OrderWithItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i32,
    pub item_code: String,
    pub description: String,
    pub quantity: i64,
}

// model to response
impl From<ItemModel> for ItemResponse {
    fn from(value: ItemModel) -> Self {
        ItemResponse {
            id: value.id,
            item_code: value.item_code,
            description: value.description,
            quantity: value.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub ordered_at: DateTime<Utc>,
    pub customer_name: String,
    pub items: Vec<ItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// model to response
impl From<OrderWithItems> for OrderResponse {
    fn from(value: OrderWithItems) -> Self {
        let OrderWithItems { order, items } = value;

        OrderResponse {
            id: order.id,
            ordered_at: order.ordered_at,
            customer_name: order.customer_name,
            items: items.into_iter().map(ItemResponse::from).collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order::Order;

    fn sample() -> OrderWithItems {
        let now = Utc::now();
        OrderWithItems {
            order: Order {
                id: 7,
                ordered_at: now,
                customer_name: "Alice".into(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
            items: vec![ItemModel {
                id: 3,
                order_id: 7,
                item_code: "X1".into(),
                description: "widget".into(),
                quantity: 2,
                created_at: now,
                updated_at: now,
            }],
        }
    }

    #[test]
    fn serializes_camel_case_without_parent_link() {
        let json = serde_json::to_value(OrderResponse::from(sample())).unwrap();

        assert_eq!(json["customerName"], "Alice");
        assert!(json.get("orderedAt").is_some());
        assert!(json.get("deletedAt").is_none());

        let item = &json["items"][0];
        assert_eq!(item["itemCode"], "X1");
        assert_eq!(item["quantity"], 2);
        assert!(item.get("orderId").is_none());
        assert!(item.get("order_id").is_none());
    }
}
