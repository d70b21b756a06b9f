use crate::model::order::OrderWithItems;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<OrderWithItems>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithItems>, RepositoryError>;
}
