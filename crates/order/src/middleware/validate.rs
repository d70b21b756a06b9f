use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::errors::{HttpError, ServiceError};
use tracing::warn;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// JSON body extractor that deserializes and validates in one step.
/// Every rejection is a 400 with an `{"error": ...}` body.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(raw) = axum::Json::<Value>::from_request(req, state)
            .await
            .map_err(json_rejection_to_http)?;

        let json_value = decode_object::<T>(raw)?;

        json_value.validate().map_err(|validation_errors| {
            HttpError::from(ServiceError::Validation(flatten_validation_errors(
                &validation_errors,
            )))
        })?;

        Ok(Self(json_value))
    }
}

/// Only a top-level JSON object decodes into a request, never a positional array.
fn decode_object<T: DeserializeOwned>(raw: Value) -> Result<T, HttpError> {
    if !raw.is_object() {
        warn!("Rejected request body: top-level JSON is not an object");
        return Err(HttpError::BadRequest(
            "Invalid request payload: expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(raw).map_err(|err| {
        warn!("Rejected request body: {err}");
        HttpError::BadRequest(format!("Invalid request payload: {err}"))
    })
}

fn json_rejection_to_http(rejection: JsonRejection) -> HttpError {
    warn!("Rejected request body: {}", rejection.body_text());

    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid request payload: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(_) => "Invalid request payload: malformed JSON".to_string(),
        JsonRejection::MissingJsonContentType(_) => {
            "Invalid request payload: expected `Content-Type: application/json`".to_string()
        }
        _ => "Invalid request payload".to_string(),
    };

    HttpError::BadRequest(message)
}

/// Produces one `path: message` entry per failed rule, descending into nested
/// structs and lists (`items[1].quantity: Value out of range`).
pub fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort();

    if out.is_empty() {
        out.push("Validation failed".to_string());
    }

    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| match error.code.as_ref() {
                            "length" => "Invalid length".to_string(),
                            "range" => "Value out of range".to_string(),
                            "custom" => "Custom validation failed".to_string(),
                            _ => format!("Invalid {field}"),
                        });
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(list) => {
                for (index, inner) in list {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::{item::OrderItemRequest, order::CreateOrderRequest};
    use serde_json::json;

    fn bad_request_message(err: HttpError) -> String {
        match err {
            HttpError::BadRequest(msg) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn arrays_are_not_orders() {
        for raw in [json!([]), json!(["Bob", null, []]), json!("Bob"), json!(7), Value::Null] {
            let err = decode_object::<CreateOrderRequest>(raw).unwrap_err();
            assert_eq!(
                bad_request_message(err),
                "Invalid request payload: expected a JSON object"
            );
        }
    }

    #[test]
    fn objects_decode_with_defaults() {
        let req = decode_object::<CreateOrderRequest>(json!({"customerName": "Bob"})).unwrap();
        assert_eq!(req.customer_name, "Bob");
        assert!(req.items.is_empty());
    }

    #[test]
    fn wrong_field_type_names_the_problem() {
        let err = decode_object::<CreateOrderRequest>(
            json!({"items": [{"itemCode": "A1", "quantity": "two"}]}),
        )
        .unwrap_err();
        assert!(bad_request_message(err).starts_with("Invalid request payload: invalid type"));
    }

    #[test]
    fn nested_item_errors_carry_their_index() {
        let req = CreateOrderRequest {
            customer_name: "Alice".into(),
            ordered_at: None,
            items: vec![
                OrderItemRequest {
                    item_code: "A".into(),
                    description: String::new(),
                    quantity: 1,
                },
                OrderItemRequest {
                    item_code: "B".into(),
                    description: String::new(),
                    quantity: -4,
                },
            ],
        };

        let errors = req.validate().unwrap_err();
        let messages = flatten_validation_errors(&errors);

        assert_eq!(messages, vec!["items[1].quantity: Value out of range"]);
    }
}
