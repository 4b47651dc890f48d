// handlers/protected/todos/mod.rs - Todo CRUD with ownership enforcement
//
// Reads are open to any authenticated caller (GET /todos lists every todo,
// GET /todos/:id fetches any todo). Writes are bound to the owner:
// - create: the submitted user_id must be the caller
// - update/delete: the todo's current owner must be the caller

pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use create::todo_post;
pub use delete::todo_delete;
pub use list::todos_get;
pub use show::todo_get;
pub use update::todo_put;

use serde::Deserialize;

/// Todo body shared by create and update; every field is checked by hand so
/// that a missing one is a 400 rather than an extractor rejection
#[derive(Debug, Default, Deserialize)]
pub struct TodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_time: Option<String>,
    pub user_id: Option<i64>,
    pub status: Option<String>,
}
