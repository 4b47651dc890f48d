// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`, which rejects the
// request with 401 or inserts the caller's `AuthUser` into the request
// extensions. Handlers then decide per operation what that caller may touch
// (see `auth::policy`).
//
// Security Level: JWT Authentication Required
// Route Prefix: <base path> (e.g., /api/user, /api/users/:id, /api/todos)

pub mod todos; // Todo CRUD, owner-bound writes
pub mod user;  // The caller's own account and todos
pub mod users; // Account lookup and self-only management

pub use todos::{todo_delete, todo_get, todo_post, todo_put, todos_get};
pub use user::{me_get, my_todos_get};
pub use users::{user_delete, user_get, user_put};
