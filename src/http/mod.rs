//! HTTP protocol layer module
//!
//! Response builders shared by the request router, decoupled from the todo store.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_413_response, build_greeting_response, build_options_response,
    build_todo_error_response, build_todo_response,
};
