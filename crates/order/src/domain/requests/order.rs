use crate::domain::requests::item::{CreateItemRecordRequest, OrderItemRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub customer_name: String,

    /// Defaults to the creation time when omitted.
    #[serde(default)]
    pub ordered_at: Option<DateTime<Utc>>,

    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

/// Full replacement of an order: omitted fields become empty.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(skip)]
    pub order_id: i32,

    #[serde(default)]
    pub customer_name: String,

    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderRecordRequest {
    pub customer_name: String,
    pub ordered_at: Option<DateTime<Utc>>,
    pub items: Vec<CreateItemRecordRequest>,
}

impl From<&CreateOrderRequest> for CreateOrderRecordRequest {
    fn from(value: &CreateOrderRequest) -> Self {
        CreateOrderRecordRequest {
            customer_name: value.customer_name.clone(),
            ordered_at: value.ordered_at,
            items: value.items.iter().map(CreateItemRecordRequest::from).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateOrderRecordRequest {
    pub order_id: i32,
    pub customer_name: String,
    pub items: Vec<CreateItemRecordRequest>,
}

impl From<&UpdateOrderRequest> for UpdateOrderRecordRequest {
    fn from(value: &UpdateOrderRequest) -> Self {
        UpdateOrderRecordRequest {
            order_id: value.order_id,
            customer_name: value.customer_name.clone(),
            items: value.items.iter().map(CreateItemRecordRequest::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_empty_values() {
        let req: UpdateOrderRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.customer_name, "");
        assert!(req.items.is_empty());
    }

    #[test]
    fn client_supplied_id_is_ignored() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"id": 99, "customerName": "Alice"}"#).unwrap();
        assert_eq!(req.customer_name, "Alice");
    }

    #[test]
    fn zero_quantity_and_empty_strings_are_accepted() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"customerName": "", "items": [{"itemCode": "", "description": "", "quantity": 0}]}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn negative_quantity_fails_validation() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"customerName": "Bob", "items": [{"itemCode": "X", "quantity": -1}]}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn ordered_at_parses_rfc3339() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"orderedAt": "2024-03-01T10:00:00Z"}"#).unwrap();
        let ordered_at = req.ordered_at.unwrap();
        assert_eq!(ordered_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn record_request_copies_items_in_order() {
        let req = CreateOrderRequest {
            customer_name: "Alice".into(),
            ordered_at: None,
            items: vec![
                OrderItemRequest {
                    item_code: "A".into(),
                    description: "first".into(),
                    quantity: 1,
                },
                OrderItemRequest {
                    item_code: "B".into(),
                    description: "second".into(),
                    quantity: 2,
                },
            ],
        };

        let record = CreateOrderRecordRequest::from(&req);
        let codes: Vec<_> = record.items.iter().map(|i| i.item_code.as_str()).collect();
        assert_eq!(codes, ["A", "B"]);
    }
}
