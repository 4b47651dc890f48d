pub mod todo;
pub mod user;

pub use todo::{Todo, TodoInput, TodoStatus};
pub use user::{PublicUser, User, UserInput};
