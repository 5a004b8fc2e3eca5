use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A todo item as stored in the database. The store owns these; the service
/// never caches them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// New todo with a fresh id, not yet done.
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            done: false,
            created_at: Utc::now(),
        }
    }
}

/// Payload for creating a todo. Title is required and bounded.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoCreateRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}

/// Payload for toggling a todo's done flag. The id travels in the body.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoModifyRequest {
    pub id: Uuid,
    pub done: bool,
}

/// Read-only view of a single todo for listing responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
}

impl From<&Todo> for TodoDetailResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            done: todo.done,
        }
    }
}

/// Container returned by every service operation: the full current list.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub todos: Vec<TodoDetailResponse>,
}
