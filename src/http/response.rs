//! HTTP response building module
//!
//! Turns todo replies and errors into hyper responses, plus the handful of
//! fixed responses the transport answers on its own.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::todo::{TodoError, TodoReply};

pub const ALLOWED_METHODS: &str = "GET, POST, DELETE, OPTIONS";
pub const GREETING: &str = "Hello, World!";

const JSON: &str = "application/json";
const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Attach CORS headers when enabled
fn with_cors(builder: Builder, enable_cors: bool) -> Builder {
    if enable_cors {
        builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type")
    } else {
        builder
    }
}

/// Build JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    enable_cors: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response();
        }
    };

    with_cors(Response::builder().status(status), enable_cors)
        .header("Content-Type", JSON)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the response for a successful todo operation
pub fn build_todo_response(reply: &TodoReply, enable_cors: bool) -> Response<Full<Bytes>> {
    let status = reply.status();
    match reply {
        TodoReply::List(items) => json_response(status, items, enable_cors),
        TodoReply::Found(item) | TodoReply::Created(item) => {
            json_response(status, item, enable_cors)
        }
        TodoReply::Deleted => with_cors(Response::builder().status(status), enable_cors)
            .header("Content-Type", JSON)
            .body(Full::new(Bytes::new()))
            .unwrap_or_else(|e| {
                log_build_error("204", &e);
                Response::new(Full::new(Bytes::new()))
            }),
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Build the `{"error": ...}` response for a failed todo operation
pub fn build_todo_error_response(err: TodoError, enable_cors: bool) -> Response<Full<Bytes>> {
    let mut response = json_response(
        err.status(),
        &ErrorBody {
            error: err.message(),
        },
        enable_cors,
    );
    if err == TodoError::MethodNotAllowed {
        response.headers_mut().insert(
            hyper::header::ALLOW,
            hyper::header::HeaderValue::from_static(ALLOWED_METHODS),
        );
    }
    response
}

/// Build 400 response for a request body that could not be read
pub fn build_400_response(message: &str, enable_cors: bool) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::BAD_REQUEST,
        &ErrorBody { error: message },
        enable_cors,
    )
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    with_cors(Response::builder().status(StatusCode::OK), enable_cors)
        .header("Allow", ALLOWED_METHODS)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the plain-text greeting served for every non-todo path
pub fn build_greeting_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", PLAIN_TEXT)
        .body(Full::new(Bytes::from(GREETING)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::from(GREETING)))
        })
}

/// Build 413 Payload Too Large response for a todo request
pub fn build_413_response(enable_cors: bool) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &ErrorBody {
            error: "Payload too large",
        },
        enable_cors,
    )
}

/// Build 500 Internal Server Error response
fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", JSON)
        .body(Full::new(Bytes::from(r#"{"error":"Internal server error"}"#)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))))
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
