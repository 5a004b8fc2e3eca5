pub mod todo;
pub mod user;

pub use todo::{Todo, TodoCreateRequest, TodoDetailResponse, TodoListResponse, TodoModifyRequest};
pub use user::{ParseRoleError, Role, User};
