use crate::{
    auth::AuthUser,
    error::AppError,
    models::{TodoCreateRequest, TodoModifyRequest},
    service::TodoService,
    store::PgTodoStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;

/// Lists every todo.
///
/// ## Responses:
/// - `200 OK`: the full `TodoListResponse`.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn list_todos(
    service: web::Data<TodoService<PgTodoStore>>,
    user: AuthUser,
) -> Result<impl Responder, AppError> {
    log::debug!("{} listing todos", user.0.email);
    let list = service.retrieve().await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Creates a todo and answers with the full updated list.
///
/// ## Request Body:
/// `{ "title": "..." }` — title required, 1 to 200 characters.
///
/// ## Responses:
/// - `201 Created`: the full list, including the new entry with `done: false`.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `422 Unprocessable Entity`: title fails validation.
#[post("")]
pub async fn create_todo(
    service: web::Data<TodoService<PgTodoStore>>,
    user: AuthUser,
    todo_data: web::Json<TodoCreateRequest>,
) -> Result<impl Responder, AppError> {
    log::debug!("{} creating a todo", user.0.email);
    let list = service.create(todo_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(list))
}

/// Sets a todo's done flag; the id travels in the body.
///
/// An unknown id is not an error: the unchanged list comes back.
///
/// ## Responses:
/// - `200 OK`: the (possibly unchanged) full list.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[put("")]
pub async fn update_todo(
    service: web::Data<TodoService<PgTodoStore>>,
    user: AuthUser,
    todo_data: web::Json<TodoModifyRequest>,
) -> Result<impl Responder, AppError> {
    log::debug!("{} updating todo {}", user.0.email, todo_data.id);
    let list = service.update(todo_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Deletes a todo by id and answers with the remaining list.
///
/// ## Responses:
/// - `200 OK`: the full list without the deleted entry.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `500 Internal Server Error`: the id did not exist.
#[delete("/{id}")]
pub async fn delete_todo(
    service: web::Data<TodoService<PgTodoStore>>,
    user: AuthUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let todo_id = todo_id.into_inner();
    log::debug!("{} deleting todo {}", user.0.email, todo_id);
    let list = service.delete(todo_id).await?;
    Ok(HttpResponse::Ok().json(list))
}
