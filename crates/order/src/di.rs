use crate::{
    abstract_trait::order::{
        repository::{DynOrderCommandRepository, DynOrderQueryRepository},
        service::{DynOrderCommandService, DynOrderQueryService},
    },
    repository::order::{OrderCommandRepository, OrderQueryRepository},
    service::order::{OrderCommandService, OrderQueryService},
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .finish()
    }
}

/// Storage handles the services are built from. Swapping these is how tests run
/// the full HTTP stack without Postgres.
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
}

impl DependenciesInjectDeps {
    pub fn from_pool(pool: ConnectionPool) -> Self {
        Self {
            query: Arc::new(OrderQueryRepository::new(pool.clone())),
            command: Arc::new(OrderCommandRepository::new(pool)),
        }
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps { query, command } = deps;

        let order_query: DynOrderQueryService = Arc::new(OrderQueryService::new(query, registry));
        let order_command: DynOrderCommandService =
            Arc::new(OrderCommandService::new(command, registry));

        Self {
            order_query,
            order_command,
        }
    }
}
