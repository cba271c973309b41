//! Logger module
//!
//! Provides logging utilities for the todo server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogLevel;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config
        .logging
        .level
        .parse::<LogLevel>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) if w.enabled(level) => w.write_info(message),
        Some(_) => {}
        None if level >= LogLevel::Info => println!("{message}"),
        None => {}
    }
}

/// Write to error log
fn write_error(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) if w.enabled(level) => w.write_error(message),
        Some(_) => {}
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    let lines = [
        "======================================".to_string(),
        "Todo server started successfully".to_string(),
        format!("Listening on: http://{addr}"),
        format!("Log level: {}", config.logging.level),
        config
            .server
            .workers
            .map_or_else(
                || "Worker threads: default (CPU cores)".to_string(),
                |workers| format!("Worker threads: {workers}"),
            ),
        format!(
            "Route prefix: {}",
            config.http.route_prefix.as_deref().unwrap_or("(none)")
        ),
        format!("Max body size: {} bytes", config.http.max_body_size),
        format!("Max connections: {:?}", config.performance.max_connections),
        "======================================".to_string(),
    ];
    for line in &lines {
        write_info(LogLevel::Info, line);
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(LogLevel::Info, &format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(LogLevel::Info, &format!("Error log: {path}"));
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(LogLevel::Debug, &format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(
        LogLevel::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_debug(message: &str) {
    write_info(LogLevel::Debug, &format!("[DEBUG] {message}"));
}

pub fn log_info(message: &str) {
    write_info(LogLevel::Info, &format!("[INFO] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(LogLevel::Warn, &format!("[WARN] {message}"));
}

pub fn log_error(message: &str) {
    write_error(LogLevel::Error, &format!("[ERROR] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown_started(active: usize) {
    write_info(
        LogLevel::Info,
        &format!("[Shutdown] Listener closed, waiting for {active} active connection(s)"),
    );
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        write_info(LogLevel::Info, "[Shutdown] All connections drained, exiting");
    } else {
        log_warning(&format!(
            "[Shutdown] Drain timeout, exiting with {remaining} connection(s) still open"
        ));
    }
}
