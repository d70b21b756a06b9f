use crate::{
    abstract_trait::order::{
        repository::DynOrderCommandRepository, service::OrderCommandServiceTrait,
    },
    domain::{
        requests::order::{
            CreateOrderRecordRequest, CreateOrderRequest, UpdateOrderRecordRequest,
            UpdateOrderRequest,
        },
        response::order::OrderResponse,
    },
};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    metrics: Metrics,
}

impl OrderCommandService {
    pub fn new(command: DynOrderCommandRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_command_service", "OrderCommandService");

        Self { command, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("order-command-service")
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

    fn complete_tracing_success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete_tracing_internal(tracing_ctx, method, true, message);
    }

    fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, false, error_message);
    }

    fn complete_tracing_internal(
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
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderResponse, ServiceError> {
        info!(
            "🏗️ Creating new order for customer={:?} with {} item(s)",
            req.customer_name,
            req.items.len()
        );

        let method = Method::Post;

        let tracing_ctx = self.start_tracing(
            "create_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "create"),
                KeyValue::new("order.items", req.items.len() as i64),
            ],
        );

        let record = CreateOrderRecordRequest::from(req);

        let created = match self.command.create_order(&record).await {
            Ok(order) => order,
            Err(e) => {
                error!("❌ Failed to create order: {e:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to create order");
                return Err(ServiceError::Repo(e));
            }
        };

        self.complete_tracing_success(
            &tracing_ctx,
            method,
            &format!("Order {} created", created.order.id),
        );

        Ok(OrderResponse::from(created))
    }

    async fn update_order(&self, req: &UpdateOrderRequest) -> Result<OrderResponse, ServiceError> {
        info!("✏️ Updating order ID={}", req.order_id);

        let method = Method::Put;

        let tracing_ctx = self.start_tracing(
            "update_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "update"),
                KeyValue::new("order.id", req.order_id.to_string()),
                KeyValue::new("order.items", req.items.len() as i64),
            ],
        );

        let record = UpdateOrderRecordRequest::from(req);

        let updated = match self.command.replace_order(&record).await {
            Ok(order) => order,
            Err(e) => {
                error!("❌ Failed to update order ID={}: {e:?}", req.order_id);
                self.complete_tracing_error(&tracing_ctx, method, "Failed to update order");
                return Err(ServiceError::Repo(e));
            }
        };

        self.complete_tracing_success(
            &tracing_ctx,
            method,
            &format!("Order {} updated", updated.order.id),
        );

        Ok(OrderResponse::from(updated))
    }

    async fn delete_order(&self, id: i32) -> Result<(), ServiceError> {
        info!("🗑️ Soft deleting order with ID: {id}");

        let method = Method::Delete;

        let tracing_ctx = self.start_tracing(
            "delete_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "trash"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        match self.command.trash_order(id).await {
            Ok(order) => {
                info!("✅ Order {} trashed at {:?}", order.id, order.deleted_at);
                self.complete_tracing_success(&tracing_ctx, method, "Order moved to trash");
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to trash order ID={id}: {e:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to trash order");
                Err(ServiceError::Repo(e))
            }
        }
    }
}
