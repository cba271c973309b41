//! Request handler module
//!
//! Responsible for request routing dispatch. Todo paths go to the in-memory
//! store; every other path gets a plain-text greeting.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
