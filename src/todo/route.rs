//! Request classification
//!
//! Maps a method and an already-normalized path onto one of the four store
//! operations.

use hyper::Method;

use super::error::TodoError;
use super::model::TodoId;

const COLLECTION_PATH: &str = "/todos";
const ITEM_PREFIX: &str = "/todos/";

/// Store operation selected by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoOperation {
    List,
    GetOne(TodoId),
    Create,
    Delete(TodoId),
}

/// Whether `path` belongs to the todo collection (`/todos` or `/todos/...`)
pub fn is_todo_path(path: &str) -> bool {
    path == COLLECTION_PATH || path.starts_with(ITEM_PREFIX)
}

fn is_collection_path(path: &str) -> bool {
    path == COLLECTION_PATH || path == ITEM_PREFIX
}

/// Classify a request on a todo path
pub fn classify(method: &Method, path: &str) -> Result<TodoOperation, TodoError> {
    match *method {
        Method::GET if is_collection_path(path) => Ok(TodoOperation::List),
        Method::GET => parse_id(path).map(TodoOperation::GetOne),
        Method::POST if is_collection_path(path) => Ok(TodoOperation::Create),
        Method::POST => Err(TodoError::BadPath),
        Method::DELETE => parse_id(path).map(TodoOperation::Delete),
        _ => Err(TodoError::MethodNotAllowed),
    }
}

/// Extract the id from `/todos/{id}` (one trailing slash tolerated)
///
/// The segment must be a signed 64-bit integer >= 1; anything outside that
/// range is an invalid id, never a lookup miss.
fn parse_id(path: &str) -> Result<TodoId, TodoError> {
    let segment = path.strip_prefix(ITEM_PREFIX).ok_or(TodoError::InvalidId)?;
    let segment = segment.strip_suffix('/').unwrap_or(segment);
    segment
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .and_then(|id| TodoId::try_from(id).ok())
        .ok_or(TodoError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_todo_path() {
        assert!(is_todo_path("/todos"));
        assert!(is_todo_path("/todos/"));
        assert!(is_todo_path("/todos/3"));
        assert!(!is_todo_path("/todosx"));
        assert!(!is_todo_path("/"));
        assert!(!is_todo_path("/hello"));
    }

    #[test]
    fn test_classify_collection() {
        assert_eq!(classify(&Method::GET, "/todos"), Ok(TodoOperation::List));
        assert_eq!(classify(&Method::GET, "/todos/"), Ok(TodoOperation::List));
        assert_eq!(classify(&Method::POST, "/todos"), Ok(TodoOperation::Create));
        assert_eq!(classify(&Method::POST, "/todos/"), Ok(TodoOperation::Create));
    }

    #[test]
    fn test_classify_item() {
        assert_eq!(classify(&Method::GET, "/todos/5"), Ok(TodoOperation::GetOne(5)));
        assert_eq!(classify(&Method::GET, "/todos/5/"), Ok(TodoOperation::GetOne(5)));
        assert_eq!(
            classify(&Method::DELETE, "/todos/12"),
            Ok(TodoOperation::Delete(12))
        );
    }

    #[test]
    fn test_classify_invalid_ids() {
        for path in ["/todos/0", "/todos/-1", "/todos/abc", "/todos/1/2", "/todos/1.5"] {
            assert_eq!(classify(&Method::GET, path), Err(TodoError::InvalidId), "{path}");
            assert_eq!(classify(&Method::DELETE, path), Err(TodoError::InvalidId), "{path}");
        }
    }

    #[test]
    fn test_id_range_is_signed_64_bit() {
        assert_eq!(
            classify(&Method::GET, "/todos/9223372036854775807"),
            Ok(TodoOperation::GetOne(9_223_372_036_854_775_807))
        );
        for path in ["/todos/9223372036854775808", "/todos/18446744073709551615"] {
            assert_eq!(classify(&Method::GET, path), Err(TodoError::InvalidId), "{path}");
        }
    }

    #[test]
    fn test_delete_on_collection_is_invalid_id() {
        assert_eq!(classify(&Method::DELETE, "/todos"), Err(TodoError::InvalidId));
        assert_eq!(classify(&Method::DELETE, "/todos/"), Err(TodoError::InvalidId));
    }

    #[test]
    fn test_post_on_item_is_bad_path() {
        assert_eq!(classify(&Method::POST, "/todos/3"), Err(TodoError::BadPath));
    }

    #[test]
    fn test_other_methods_not_allowed() {
        for method in [Method::PUT, Method::PATCH, Method::HEAD] {
            assert_eq!(classify(&method, "/todos"), Err(TodoError::MethodNotAllowed));
            assert_eq!(classify(&method, "/todos/1"), Err(TodoError::MethodNotAllowed));
        }
    }
}
