//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: preflight handling, body limits,
//! prefix stripping and dispatch to either the todo store or the greeting.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::todo;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_entry = state
        .config
        .logging
        .access_log
        .then(|| build_access_entry(&req, peer_addr));

    let mut response = route_request(req, &state).await;

    if let Ok(server_name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server_name);
    }

    if let Some(mut entry) = access_entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request to the todo store or the greeting
async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let http_config = &state.config.http;
    let enable_cors = http_config.enable_cors;

    // 1. CORS preflight, any path
    if req.method() == Method::OPTIONS {
        return http::build_options_response(enable_cors);
    }

    // 2. Everything outside the collection gets the greeting
    let path = http_config.strip_prefix(req.uri().path()).to_string();
    if !todo::is_todo_path(&path) {
        return http::build_greeting_response();
    }

    // 3. Declared body size
    if let Some(resp) = check_body_size(&req, http_config.max_body_size, enable_cors) {
        return resp;
    }

    // 4. Read the whole body before the store is touched
    let method = req.method().clone();
    let body = match read_body(req.into_body(), http_config.max_body_size).await {
        Ok(body) => body,
        Err(BodyReadError::TooLarge) => return http::build_413_response(enable_cors),
        Err(BodyReadError::Failed) => {
            return http::build_400_response("Failed to read request body", enable_cors)
        }
    };

    match todo::dispatch(&state.store, &method, &path, &body).await {
        Ok(reply) => http::build_todo_response(&reply, enable_cors),
        Err(err) => {
            logger::log_debug(&format!("[Todo] {method} {path} rejected: {err}"));
            http::build_todo_error_response(err, enable_cors)
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(
    req: &Request<B>,
    max_body_size: u64,
    enable_cors: bool,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response(enable_cors))
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

enum BodyReadError {
    TooLarge,
    Failed,
}

/// Collect the request body, enforcing `max_body_size` on the actual bytes
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, BodyReadError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_warning(&format!("Request body exceeded {max_body_size} bytes"));
            Err(BodyReadError::TooLarge)
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(BodyReadError::Failed)
        }
    }
}

fn build_access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr,
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}

fn version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_09 {
        "0.9"
    } else if version == Version::HTTP_2 {
        "2"
    } else if version == Version::HTTP_3 {
        "3"
    } else {
        "1.1"
    }
}
