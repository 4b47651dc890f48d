use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::{Todo, TodoInput, User, UserInput};
use crate::database::repository::{
    map_write_error, RepositoryError, RepositoryResult, TodoRepository, UserRepository,
};

const USER_COLUMNS: &str = "id, email, password_hash, name, firstname, created_at";
const TODO_COLUMNS: &str = "id, title, description, created_at, due_time, user_id, status";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: &UserInput) -> RepositoryResult<User> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name, firstname) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.firstname)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update(&self, id: i64, input: &UserInput) -> RepositoryResult<User> {
        let query = format!(
            "UPDATE users SET email = $1, password_hash = $2, name = $3, firstname = $4 WHERE id = $5 RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.firstname)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Todo>> {
        let query = format!("SELECT {} FROM todos ORDER BY due_time ASC, id ASC", TODO_COLUMNS);

        let todos = sqlx::query_as::<_, Todo>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(todos)
    }

    async fn list_by_owner(&self, user_id: i64) -> RepositoryResult<Vec<Todo>> {
        let query = format!(
            "SELECT {} FROM todos WHERE user_id = $1 ORDER BY due_time ASC, id ASC",
            TODO_COLUMNS
        );

        let todos = sqlx::query_as::<_, Todo>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(todos)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Todo>> {
        let query = format!("SELECT {} FROM todos WHERE id = $1", TODO_COLUMNS);

        let todo = sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(todo)
    }

    async fn create(&self, input: &TodoInput) -> RepositoryResult<Todo> {
        let query = format!(
            "INSERT INTO todos (title, description, due_time, user_id, status) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            TODO_COLUMNS
        );

        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_time)
            .bind(input.user_id)
            .bind(input.status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn update(&self, id: i64, input: &TodoInput) -> RepositoryResult<Todo> {
        let query = format!(
            "UPDATE todos SET title = $1, description = $2, due_time = $3, user_id = $4, status = $5 WHERE id = $6 RETURNING {}",
            TODO_COLUMNS
        );

        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_time)
            .bind(input.user_id)
            .bind(input.status.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
