//! The todo CRUD service.
//!
//! Every operation answers with the full current list, so clients never have
//! to merge partial responses after a mutation.

use crate::error::AppError;
use crate::models::{Todo, TodoCreateRequest, TodoDetailResponse, TodoListResponse, TodoModifyRequest};
use crate::store::TodoStore;
use uuid::Uuid;
use validator::Validate;

pub struct TodoService<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists a new todo (not done) and returns the full list.
    pub async fn create(&self, request: TodoCreateRequest) -> Result<TodoListResponse, AppError> {
        request.validate()?;

        let todo = Todo::new(request.title);
        self.store.save(&todo).await?;
        log::info!("todo saved, title: {}", todo.title);

        self.retrieve().await
    }

    /// All todos as detail projections, in the store's natural order.
    pub async fn retrieve(&self) -> Result<TodoListResponse, AppError> {
        let todos = self.store.find_all().await?;
        Ok(TodoListResponse {
            todos: todos.iter().map(TodoDetailResponse::from).collect(),
        })
    }

    /// Removes a todo by id and returns the updated list.
    ///
    /// A store failure (including a missing id) is logged with its detail
    /// and re-signaled as a generic failure with a fixed message; the
    /// underlying error never reaches the caller.
    pub async fn delete(&self, todo_id: Uuid) -> Result<TodoListResponse, AppError> {
        if let Err(e) = self.store.delete_by_id(todo_id).await {
            log::error!("failed to delete todo, id: {}, err: {}", todo_id, e);
            return Err(AppError::Internal("no id found".into()));
        }

        self.retrieve().await
    }

    /// Sets the done flag of an existing todo and returns the full list.
    ///
    /// An unknown id is a silent no-op: the unchanged list comes back with
    /// no error. Deliberately asymmetric with `delete`, which fails on a
    /// missing id.
    pub async fn update(&self, request: TodoModifyRequest) -> Result<TodoListResponse, AppError> {
        if let Some(mut todo) = self.store.find_by_id(request.id).await? {
            todo.done = request.done;
            self.store.save(&todo).await?;
        }

        self.retrieve().await
    }
}
