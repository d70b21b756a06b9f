#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use order::{
    abstract_trait::order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    di::DependenciesInjectDeps,
    domain::requests::{
        item::CreateItemRecordRequest,
        order::{CreateOrderRecordRequest, UpdateOrderRecordRequest},
    },
    handler::AppRouter,
    model::{
        item::Item,
        order::{Order, OrderWithItems},
    },
    state::AppState,
};
use shared::errors::RepositoryError;
use std::sync::{Arc, Mutex};

fn is_active(order: &Order) -> bool {
    order.deleted_at.is_none()
}

#[derive(Default)]
struct Tables {
    orders: Vec<Order>,
    items: Vec<Item>,
    next_order_id: i32,
    next_item_id: i32,
}

impl Tables {
    fn active(&self, id: i32) -> Option<&Order> {
        self.orders
            .iter()
            .find(|o| o.id == id && is_active(o))
    }

    fn with_items(&self, order: &Order) -> OrderWithItems {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .filter(|i| i.order_id == order.id)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.id);

        OrderWithItems {
            order: order.clone(),
            items,
        }
    }

    fn insert_items(&mut self, order_id: i32, items: &[CreateItemRecordRequest]) {
        let now = Utc::now();
        for item in items {
            self.next_item_id += 1;
            self.items.push(Item {
                id: self.next_item_id,
                order_id,
                item_code: item.item_code.clone(),
                description: item.description.clone(),
                quantity: item.quantity,
                created_at: now,
                updated_at: now,
            });
        }
    }
}

/// Mirrors the Postgres repositories: soft-deleted rows are invisible and
/// item replacement happens under one lock.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows including trashed orders.
    pub fn raw_order_count(&self) -> usize {
        self.tables.lock().unwrap().orders.len()
    }

    pub fn is_trashed(&self, id: i32) -> bool {
        self.tables
            .lock()
            .unwrap()
            .orders
            .iter()
            .any(|o| o.id == id && !is_active(o))
    }

    pub fn raw_item_count(&self) -> usize {
        self.tables.lock().unwrap().items.len()
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryOrderStore {
    async fn find_all(&self) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .orders
            .iter()
            .filter(|o| is_active(o))
            .map(|o| tables.with_items(o))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithItems>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.active(id).map(|o| tables.with_items(o)))
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryOrderStore {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderWithItems, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();

        tables.next_order_id += 1;
        let order = Order {
            id: tables.next_order_id,
            ordered_at: req.ordered_at.unwrap_or(now),
            customer_name: req.customer_name.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.orders.push(order.clone());
        tables.insert_items(order.id, &req.items);

        Ok(tables.with_items(&order))
    }

    async fn replace_order(
        &self,
        req: &UpdateOrderRecordRequest,
    ) -> Result<OrderWithItems, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();

        let order = {
            let order = tables
                .orders
                .iter_mut()
                .find(|o| o.id == req.order_id && is_active(o))
                .ok_or(RepositoryError::NotFound)?;
            order.customer_name = req.customer_name.clone();
            order.updated_at = Utc::now();
            order.clone()
        };

        tables.items.retain(|i| i.order_id != order.id);
        tables.insert_items(order.id, &req.items);

        Ok(tables.with_items(&order))
    }

    async fn trash_order(&self, id: i32) -> Result<Order, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();

        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == id && is_active(o))
            .ok_or(RepositoryError::NotFound)?;
        order.deleted_at = Some(Utc::now());

        Ok(order.clone())
    }
}

/// Every call fails as if the pool could not reach Postgres.
#[derive(Clone, Default)]
pub struct UnreachableStore;

fn unreachable_store() -> RepositoryError {
    RepositoryError::Unavailable("pool timed out while waiting for an open connection".into())
}

#[async_trait]
impl OrderQueryRepositoryTrait for UnreachableStore {
    async fn find_all(&self) -> Result<Vec<OrderWithItems>, RepositoryError> {
        Err(unreachable_store())
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<OrderWithItems>, RepositoryError> {
        Err(unreachable_store())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for UnreachableStore {
    async fn create_order(
        &self,
        _req: &CreateOrderRecordRequest,
    ) -> Result<OrderWithItems, RepositoryError> {
        Err(unreachable_store())
    }

    async fn replace_order(
        &self,
        _req: &UpdateOrderRecordRequest,
    ) -> Result<OrderWithItems, RepositoryError> {
        Err(unreachable_store())
    }

    async fn trash_order(&self, _id: i32) -> Result<Order, RepositoryError> {
        Err(unreachable_store())
    }
}

pub fn server_with_store(store: InMemoryOrderStore) -> TestServer {
    let deps = DependenciesInjectDeps {
        query: Arc::new(store.clone()),
        command: Arc::new(store),
    };

    TestServer::new(AppRouter::build(AppState::from_deps(deps))).expect("test server")
}

pub fn test_server() -> (TestServer, InMemoryOrderStore) {
    let store = InMemoryOrderStore::new();
    (server_with_store(store.clone()), store)
}

pub fn unreachable_server() -> TestServer {
    let deps = DependenciesInjectDeps {
        query: Arc::new(UnreachableStore),
        command: Arc::new(UnreachableStore),
    };

    TestServer::new(AppRouter::build(AppState::from_deps(deps))).expect("test server")
}
