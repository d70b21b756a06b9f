use crate::{
    abstract_trait::order::service::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::order::{CreateOrderRequest, UpdateOrderRequest},
        response::order::OrderResponse,
    },
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

/// Ids that are not a valid integer can never match a row.
fn parse_order_id(raw: &str) -> Result<i32, HttpError> {
    raw.parse::<i32>().map_err(|_| HttpError::not_found())
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "Order",
    responses(
        (status = 200, description = "All active orders with their items", body = Vec<OrderResponse>),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    )
)]
pub async fn list_orders(
    Extension(service): Extension<DynOrderQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_order_id(&id)?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "Order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse)
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_order(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order replaced", body = OrderResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn update_order(
    Extension(query): Extension<DynOrderQueryService>,
    Extension(command): Extension<DynOrderCommandService>,
    Path(id): Path<String>,
    body: Result<SimpleValidatedJson<UpdateOrderRequest>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_order_id(&id)?;

    let SimpleValidatedJson(mut body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            // an unknown order is reported before a bad body
            query.find_by_id(id).await?;
            return Err(rejection);
        }
    };

    body.order_id = id;
    let response = command.update_order(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order soft-deleted"),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn delete_order(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_order_id(&id)?;
    service.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/orders", get(list_orders).post(create_order))
        .route(
            "/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_order_id("42").unwrap(), 42);
    }

    #[test]
    fn non_numeric_ids_are_not_found() {
        for raw in ["abc", "1.5", "", "99999999999"] {
            let err = parse_order_id(raw).unwrap_err();
            assert_eq!(err.status(), StatusCode::NOT_FOUND);
        }
    }
}
