// Todo data types

use serde::{Deserialize, Serialize};

/// Identifier issued by the store, always >= 1
pub type TodoId = u64;

/// A single todo item as stored and serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub done: bool,
}

/// Fields read from a create request object
///
/// A missing or `null` title is `None` so it is rejected as "title required"
/// rather than as malformed JSON. Unknown fields are ignored. The body must be
/// checked to be an object first: a derived struct also accepts arrays.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: Option<String>,
}
