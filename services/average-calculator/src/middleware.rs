//! Request logging and CORS middleware

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::{fmt::Display, str::FromStr, time::Duration};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::config::CorsConfig;

/// Proxy headers consulted for the caller address, most trusted first
const CLIENT_IP_HEADERS: [&str; 2] = ["x-forwarded-for", "x-real-ip"];

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client_ip = client_ip(request.headers()).unwrap_or("-").to_string();

    let response = next.run(request).await;

    info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = start.elapsed().as_millis(),
        client_ip = %client_ip,
        "Request processed"
    );

    response
}

/// Build the CORS layer for dashboard callers. Entries that fail to parse are logged and
/// skipped; a `*` origin allows any origin.
#[must_use]
pub fn create_cors_layer(cors_config: &CorsConfig) -> CorsLayer {
    let origins = if cors_config.allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_entries::<HeaderValue>(
            "origin",
            &cors_config.allowed_origins,
        ))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list(parse_entries::<Method>(
            "method",
            &cors_config.allowed_methods,
        )))
        .allow_headers(AllowHeaders::list(parse_entries::<HeaderName>(
            "header",
            &cors_config.allowed_headers,
        )))
        .max_age(Duration::from_secs(cors_config.max_age_seconds))
}

fn parse_entries<T>(what: &str, entries: &[String]) -> Vec<T>
where
    T: FromStr,
    T::Err: Display,
{
    entries
        .iter()
        .filter_map(|entry| match entry.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Ignoring invalid CORS {} '{}': {}", what, entry, e);
                None
            }
        })
        .collect()
}

/// Caller address as reported by a fronting proxy, if any
fn client_ip(headers: &HeaderMap) -> Option<&str> {
    CLIENT_IP_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    })
}
