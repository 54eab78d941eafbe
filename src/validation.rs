//! Declarative field rules and the route middleware that runs them.
//!
//! Each route declares an ordered rule chain. The middleware buffers the
//! JSON body, evaluates every rule, and short-circuits with 400 plus the
//! full failure-message list before the handler is ever invoked. On
//! success the buffered body is restored and the handler runs unchanged.

use crate::error::AppError;
use axum::{
    body::{to_bytes, Body},
    extract::{Path, Request},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde_json::Value;

/// Request body size cap, shared by the router's limit layer and the
/// buffering bound below.
pub const BODY_LIMIT: usize = 1024 * 1024;

/// One field-level rule: a predicate over the field's JSON value (absent
/// fields see `None`) plus the message reported when it fails.
pub struct FieldRule {
    pub field: &'static str,
    pub check: fn(Option<&Value>) -> bool,
    pub message: &'static str,
}

fn present(v: Option<&Value>) -> bool {
    matches!(v, Some(v) if !v.is_null())
}

fn non_empty_string(v: Option<&Value>) -> bool {
    matches!(v, Some(Value::String(s)) if !s.trim().is_empty())
}

fn numeric(v: Option<&Value>) -> bool {
    matches!(v, Some(Value::Number(_)))
}

fn positive_number(v: Option<&Value>) -> bool {
    v.and_then(Value::as_f64).map(|n| n > 0.0).unwrap_or(false)
}

fn boolean(v: Option<&Value>) -> bool {
    matches!(v, Some(Value::Bool(_)))
}

/// Rules for `POST /`.
pub const CREATE_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        check: non_empty_string,
        message: "name must not be empty",
    },
    FieldRule {
        field: "price",
        check: present,
        message: "price must not be empty",
    },
    FieldRule {
        field: "price",
        check: numeric,
        message: "price must be numeric",
    },
    FieldRule {
        field: "price",
        check: positive_number,
        message: "price must be greater than zero",
    },
];

/// Rules for `PUT /:id`: the create chain plus an explicit availability.
pub const UPDATE_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        check: non_empty_string,
        message: "name must not be empty",
    },
    FieldRule {
        field: "price",
        check: present,
        message: "price must not be empty",
    },
    FieldRule {
        field: "price",
        check: numeric,
        message: "price must be numeric",
    },
    FieldRule {
        field: "price",
        check: positive_number,
        message: "price must be greater than zero",
    },
    FieldRule {
        field: "availability",
        check: boolean,
        message: "availability must be a boolean",
    },
];

/// Evaluate every rule against the body, collecting failure messages in
/// declaration order.
pub fn run_rules(rules: &[FieldRule], body: &Value) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| !(rule.check)(body.get(rule.field)))
        .map(|rule| rule.message.to_string())
        .collect()
}

fn json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false)
}

async fn validate_body(
    rules: &[FieldRule],
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|_| AppError::Validation(vec!["request body unreadable".into()]))?;
    // A missing or malformed body fails the declared rules, not the parser.
    // Non-JSON content types read as empty, like a JSON-only body parser,
    // so the failure surfaces here as rule messages and never downstream.
    let value: Value = if json_content_type(&parts.headers) {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    } else {
        Value::Null
    };
    let errors = run_rules(rules, &value);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

pub async fn validate_create(req: Request, next: Next) -> Result<Response, AppError> {
    validate_body(CREATE_RULES, req, next).await
}

pub async fn validate_update(req: Request, next: Next) -> Result<Response, AppError> {
    validate_body(UPDATE_RULES, req, next).await
}

/// `:id` must parse as a strictly positive integer; rejects before the
/// handler (and therefore the store) is ever reached.
pub async fn validate_id(
    Path(id): Path<String>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match id.parse::<i32>() {
        Ok(n) if n > 0 => Ok(next.run(req).await),
        _ => Err(AppError::Validation(vec![
            "id must be a positive integer".into(),
        ])),
    }
}
