use crate::{
    domain::requests::order::{CreateOrderRecordRequest, UpdateOrderRecordRequest},
    model::order::{Order as OrderModel, OrderWithItems},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Inserts the order and all of its items atomically.
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderWithItems, RepositoryError>;

    /// Replaces the customer name and the whole item set of an active order atomically.
    /// Returns `RepositoryError::NotFound` when the order is absent or trashed.
    async fn replace_order(
        &self,
        req: &UpdateOrderRecordRequest,
    ) -> Result<OrderWithItems, RepositoryError>;

    /// Soft-deletes an active order. Returns `RepositoryError::NotFound` when the
    /// order is absent or already trashed.
    async fn trash_order(&self, id: i32) -> Result<OrderModel, RepositoryError>;
}
