//! In-memory todo store
//!
//! The collection and the id allocator live behind one mutex. Every operation
//! takes the lock exactly once, does pure in-memory work and releases it, so
//! operations are linearizable and no lock is ever held across I/O.

use tokio::sync::Mutex;

use super::error::TodoError;
use super::model::{TodoId, TodoItem};

/// Lock-protected state: live items in insertion order plus the next id
#[derive(Debug)]
struct Collection {
    items: Vec<TodoItem>,
    next_id: TodoId,
}

/// Shared todo collection
#[derive(Debug)]
pub struct TodoStore {
    inner: Mutex<Collection>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Collection {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Snapshot of all items in insertion order
    pub async fn list(&self) -> Vec<TodoItem> {
        let collection = self.inner.lock().await;
        collection.items.clone()
    }

    /// Copy of the item with `id`
    pub async fn get(&self, id: TodoId) -> Result<TodoItem, TodoError> {
        let collection = self.inner.lock().await;
        collection
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(TodoError::NotFound)
    }

    /// Allocate an id, append the new item and advance the allocator
    ///
    /// The title must already be validated; the caller does that before the
    /// lock is taken.
    pub async fn create(&self, title: String) -> TodoItem {
        let mut collection = self.inner.lock().await;
        let item = TodoItem {
            id: collection.next_id,
            title,
            done: false,
        };
        collection.items.push(item.clone());
        collection.next_id += 1;
        item
    }

    /// Remove the item with `id`, keeping the order of the rest
    pub async fn delete(&self, id: TodoId) -> Result<(), TodoError> {
        let mut collection = self.inner.lock().await;
        let index = collection
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TodoError::NotFound)?;
        collection.items.remove(index);
        Ok(())
    }

    #[cfg(test)]
    pub async fn next_id(&self) -> TodoId {
        self.inner.lock().await.next_id
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}
