use async_trait::async_trait;

use crate::database::models::{Todo, TodoInput, User, UserInput};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Record already exists")]
    AlreadyExists,
    #[error("Referenced record does not exist")]
    InvalidReference,
    #[error("Value does not fit its column")]
    InvalidValue,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Credential store: accounts keyed by id and by unique email
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the email is taken
    async fn create(&self, input: &UserInput) -> RepositoryResult<User>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    /// Replaces every column; `NotFound` if the id is unknown
    async fn update(&self, id: i64, input: &UserInput) -> RepositoryResult<User>;
    /// Removes the account and, by cascade, every todo it owns
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}

/// Todo persistence. Collection reads are ordered by `due_time` ascending,
/// ties broken by id.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn list_all(&self) -> RepositoryResult<Vec<Todo>>;
    async fn list_by_owner(&self, user_id: i64) -> RepositoryResult<Vec<Todo>>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Todo>>;
    /// `InvalidReference` if `input.user_id` names no account
    async fn create(&self, input: &TodoInput) -> RepositoryResult<Todo>;
    async fn update(&self, id: i64, input: &TodoInput) -> RepositoryResult<Todo>;
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}

/// Translate constraint violations into repository outcomes
pub(crate) fn map_write_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            // unique_violation
            Some("23505") => return RepositoryError::AlreadyExists,
            // foreign_key_violation
            Some("23503") => return RepositoryError::InvalidReference,
            // string_data_right_truncation, check_violation
            Some("22001") | Some("23514") => return RepositoryError::InvalidValue,
            _ => {}
        }
    }
    RepositoryError::Database(err)
}
