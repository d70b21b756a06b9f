use crate::{
    abstract_trait::order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
    domain::response::order::OrderResponse,
};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_query_service", "OrderQueryService");

        Self { query, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("order-query-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    fn complete_tracing(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(&self) -> Result<Vec<OrderResponse>, ServiceError> {
        info!("📦 Finding all active orders");

        let tracing_ctx = self.start_tracing(
            "find_all_orders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        match self.query.find_all().await {
            Ok(orders) => {
                let response: Vec<OrderResponse> =
                    orders.into_iter().map(OrderResponse::from).collect();

                self.complete_tracing(
                    &tracing_ctx,
                    Method::Get,
                    true,
                    &format!("Found {} order(s)", response.len()),
                );

                Ok(response)
            }
            Err(e) => {
                error!("❌ Failed to fetch orders: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Get, false, "Failed to fetch orders");
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<OrderResponse, ServiceError> {
        info!("🔍 Finding order by ID: {id}");

        let tracing_ctx = self.start_tracing(
            "find_order_by_id",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(order)) => {
                self.complete_tracing(&tracing_ctx, Method::Get, true, "Order found");
                Ok(OrderResponse::from(order))
            }
            Ok(None) => {
                self.complete_tracing(&tracing_ctx, Method::Get, false, "Order not found");
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(e) => {
                error!("❌ Failed to fetch order ID={id}: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Get, false, "Failed to fetch order");
                Err(ServiceError::Repo(e))
            }
        }
    }
}
