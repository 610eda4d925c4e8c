//! Admin-token authentication module.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, ErrorDetails, ErrorResponse};

/// Header name for the admin API token.
pub const API_TOKEN_HEADER: &str = "x-api-key";

/// Admin auth layer guarding mutating routes; the expected token comes from
/// `ADMIN_API_TOKEN`.
pub async fn admin_auth_layer(
    expected_token: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // If no token is configured, allow all requests (dev mode)
    let Some(expected) = expected_token else {
        return next.run(request).await;
    };

    // Get the token from the request header
    let provided = request
        .headers()
        .get(API_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    match provided {
        Some(provided_token) => {
            // Constant-time comparison to prevent timing attacks
            if constant_time_compare(&provided_token, &expected) {
                next.run(request).await
            } else {
                unauthorized_response("Invalid admin token")
            }
        }
        None => {
            // Also check Authorization header as bearer token
            let bearer = request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
                .map(|s| s.to_string());

            match bearer {
                Some(bearer_token) if constant_time_compare(&bearer_token, &expected) => {
                    next.run(request).await
                }
                _ => unauthorized_response("Missing or invalid admin token"),
            }
        }
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    a_bytes.ct_eq(b_bytes).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        message: message.to_string(),
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
        },
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
