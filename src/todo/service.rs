// Todo request dispatch
// Runs a classified request against the store and returns a typed reply

use hyper::{Method, StatusCode};
use serde_json::Value;

use super::error::TodoError;
use super::model::{CreateTodo, TodoItem};
use super::route::{classify, TodoOperation};
use super::store::TodoStore;
use crate::logger;

/// Successful outcome of a todo operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoReply {
    List(Vec<TodoItem>),
    Found(TodoItem),
    Created(TodoItem),
    Deleted,
}

impl TodoReply {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::List(_) | Self::Found(_) => StatusCode::OK,
            Self::Created(_) => StatusCode::CREATED,
            Self::Deleted => StatusCode::NO_CONTENT,
        }
    }
}

/// Handle one request on a normalized todo path
///
/// `body` is fully read before this is called, so the create path parses and
/// validates it before touching the store lock.
pub async fn dispatch(
    store: &TodoStore,
    method: &Method,
    path: &str,
    body: &[u8],
) -> Result<TodoReply, TodoError> {
    match classify(method, path)? {
        TodoOperation::List => Ok(TodoReply::List(store.list().await)),
        TodoOperation::GetOne(id) => store.get(id).await.map(TodoReply::Found),
        TodoOperation::Create => {
            let title = parse_create(body)?;
            let item = store.create(title).await;
            logger::log_debug(&format!("[Todo] Created #{}", item.id));
            Ok(TodoReply::Created(item))
        }
        TodoOperation::Delete(id) => {
            store.delete(id).await?;
            logger::log_debug(&format!("[Todo] Deleted #{id}"));
            Ok(TodoReply::Deleted)
        }
    }
}

/// Extract a non-empty title from a create body
///
/// Only the first JSON value is read; anything after it is ignored. That value
/// must be an object or `null` (which carries no title). Arrays, strings and
/// numbers are malformed bodies.
fn parse_create(body: &[u8]) -> Result<String, TodoError> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .ok_or(TodoError::InvalidBody)?
        .map_err(|_| TodoError::InvalidBody)?;

    let input = match value {
        Value::Null => CreateTodo::default(),
        fields @ Value::Object(_) => {
            serde_json::from_value(fields).map_err(|_| TodoError::InvalidBody)?
        }
        _ => return Err(TodoError::InvalidBody),
    };

    match input.title {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(TodoError::MissingTitle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create(store: &TodoStore, body: &str) -> Result<TodoReply, TodoError> {
        dispatch(store, &Method::POST, "/todos", body.as_bytes()).await
    }

    #[tokio::test]
    async fn test_round_trip() {
        let store = TodoStore::new();
        let reply = create(&store, r#"{"title":"buy milk"}"#).await.unwrap();
        assert_eq!(reply.status(), StatusCode::CREATED);

        let TodoReply::Created(item) = reply else {
            panic!("expected Created, got {reply:?}");
        };
        assert_eq!(item.title, "buy milk");
        assert!(!item.done);
        assert!(item.id >= 1);

        let path = format!("/todos/{}", item.id);
        let found = dispatch(&store, &Method::GET, &path, b"").await.unwrap();
        assert_eq!(found, TodoReply::Found(item));
    }

    #[tokio::test]
    async fn test_empty_list() {
        let store = TodoStore::new();
        let reply = dispatch(&store, &Method::GET, "/todos", b"").await.unwrap();
        assert_eq!(reply, TodoReply::List(Vec::new()));
        assert_eq!(reply.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_insertion_order() {
        let store = TodoStore::new();
        create(&store, r#"{"title":"A"}"#).await.unwrap();
        create(&store, r#"{"title":"B"}"#).await.unwrap();

        let TodoReply::List(items) = dispatch(&store, &Method::GET, "/todos/", b"").await.unwrap()
        else {
            panic!("expected List");
        };
        let titles: Vec<_> = items.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[tokio::test]
    async fn test_invalid_body() {
        let store = TodoStore::new();
        for body in ["", "  ", "not json", "[]", r#"{"title":1}"#, r#""buy milk""#, "42"] {
            assert_eq!(create(&store, body).await, Err(TodoError::InvalidBody), "{body}");
        }
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_array_body_is_invalid() {
        let store = TodoStore::new();
        for body in [r#"["buy milk"]"#, r#"[{"title":"buy milk"}]"#] {
            assert_eq!(create(&store, body).await, Err(TodoError::InvalidBody), "{body}");
        }
        assert!(store.list().await.is_empty());
        assert_eq!(store.next_id().await, 1);
    }

    #[tokio::test]
    async fn test_null_body_has_no_title() {
        let store = TodoStore::new();
        assert_eq!(create(&store, "null").await, Err(TodoError::MissingTitle));
        assert_eq!(
            create(&store, r#"{"title":null}"#).await,
            Err(TodoError::MissingTitle)
        );
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_trailing_bytes_after_object_ignored() {
        let store = TodoStore::new();
        let reply = create(&store, r#"{"title":"a"} x"#).await.unwrap();
        let TodoReply::Created(item) = reply else {
            panic!("expected Created, got {reply:?}");
        };
        assert_eq!(item.title, "a");

        // a broken first value is still rejected
        assert_eq!(
            create(&store, r#"{"title":"b" x"#).await,
            Err(TodoError::InvalidBody)
        );
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_title() {
        let store = TodoStore::new();
        assert_eq!(create(&store, "{}").await, Err(TodoError::MissingTitle));
        assert_eq!(
            create(&store, r#"{"title":""}"#).await,
            Err(TodoError::MissingTitle)
        );
        assert!(store.list().await.is_empty());
        assert_eq!(store.next_id().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_id_never_not_found() {
        let store = TodoStore::new();
        for id in ["0", "-1", "abc", "9223372036854775808"] {
            let path = format!("/todos/{id}");
            assert_eq!(
                dispatch(&store, &Method::GET, &path, b"").await,
                Err(TodoError::InvalidId)
            );
        }
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let store = TodoStore::new();
        create(&store, r#"{"title":"x"}"#).await.unwrap();

        let reply = dispatch(&store, &Method::DELETE, "/todos/1", b"").await;
        assert_eq!(reply, Ok(TodoReply::Deleted));
        assert_eq!(TodoReply::Deleted.status(), StatusCode::NO_CONTENT);

        assert_eq!(
            dispatch(&store, &Method::GET, "/todos/1", b"").await,
            Err(TodoError::NotFound)
        );
        assert_eq!(
            dispatch(&store, &Method::DELETE, "/todos/1", b"").await,
            Err(TodoError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let store = TodoStore::new();
        assert_eq!(
            dispatch(&store, &Method::PUT, "/todos/1", br#"{"title":"x"}"#).await,
            Err(TodoError::MethodNotAllowed)
        );
    }
}
