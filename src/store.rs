//! Persistence collaborator for todos.
//!
//! `TodoService` talks to exactly these four operations. The Postgres
//! implementation lives here; tests supply an in-memory one.

use crate::error::AppError;
use crate::models::Todo;
use sqlx::PgPool;
use uuid::Uuid;

/// The four operations the todo store exposes.
///
/// `save` upserts (a new todo and a done-flag change go through the same
/// call), `delete_by_id` fails if the id is absent.
#[allow(async_fn_in_trait)]
pub trait TodoStore: Send + Sync {
    async fn save(&self, todo: &Todo) -> Result<(), AppError>;
    async fn find_all(&self) -> Result<Vec<Todo>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, AppError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError>;
}

/// Postgres-backed store. Each mutating operation is one transaction:
/// committed on success, rolled back when the transaction is dropped on an
/// error path.
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TodoStore for PgTodoStore {
    async fn save(&self, todo: &Todo) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO todos (id, title, done, created_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET title = EXCLUDED.title, done = EXCLUDED.done",
        )
        .bind(todo.id)
        .bind(&todo.title)
        .bind(todo.done)
        .bind(todo.created_at)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, AppError> {
        // Insertion order; the list carries no semantic ordering.
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, done, created_at FROM todos ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, AppError> {
        let todo =
            sqlx::query_as::<_, Todo>("SELECT id, title, done, created_at FROM todos WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(todo)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No todo with id {}", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}
