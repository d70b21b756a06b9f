use crate::domain::{
    requests::order::{CreateOrderRequest, UpdateOrderRequest},
    response::order::OrderResponse,
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderResponse, ServiceError>;
    async fn update_order(&self, req: &UpdateOrderRequest) -> Result<OrderResponse, ServiceError>;
    async fn delete_order(&self, id: i32) -> Result<(), ServiceError>;
}
