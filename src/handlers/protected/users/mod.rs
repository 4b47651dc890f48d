// handlers/protected/users/mod.rs - Account lookup and self-service management

pub mod delete;
pub mod show;
pub mod update;

pub use delete::user_delete;
pub use show::user_get;
pub use update::user_put;
