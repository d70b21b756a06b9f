use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[serde(default)]
    pub item_code: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct CreateItemRecordRequest {
    pub item_code: String,
    pub description: String,
    pub quantity: i64,
}

impl From<&OrderItemRequest> for CreateItemRecordRequest {
    fn from(value: &OrderItemRequest) -> Self {
        CreateItemRecordRequest {
            item_code: value.item_code.clone(),
            description: value.description.clone(),
            quantity: value.quantity,
        }
    }
}
