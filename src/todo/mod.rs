//! Todo collection module
//!
//! The in-memory todo store and the request classifier that maps
//! `{method, path, body}` onto store operations.

mod error;
pub mod model;
mod route;
mod service;
mod store;

pub use error::TodoError;
pub use route::is_todo_path;
pub use service::{dispatch, TodoReply};
pub use store::TodoStore;
