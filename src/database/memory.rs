use async_trait::async_trait;
use chrono::{NaiveDateTime, Timelike, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::models::{Todo, TodoInput, User, UserInput};
use crate::database::repository::{
    RepositoryError, RepositoryResult, TodoRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    todos: BTreeMap<i64, Todo>,
    last_user_id: i64,
    last_todo_id: i64,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Process-local store with the same observable semantics as the Postgres
/// schema: unique emails, owner foreign key, cascading account delete.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Matches the TIMESTAMP(0) column default
fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

// Width of the VARCHAR(255) columns
const SHORT_TEXT_WIDTH: usize = 255;

fn fits(values: &[&str]) -> RepositoryResult<()> {
    if values.iter().any(|v| v.chars().count() > SHORT_TEXT_WIDTH) {
        return Err(RepositoryError::InvalidValue);
    }
    Ok(())
}

fn sorted_by_due_time<'a>(todos: impl Iterator<Item = &'a Todo>) -> Vec<Todo> {
    let mut list: Vec<Todo> = todos.cloned().collect();
    // BTreeMap iteration is id-ordered and sort_by_key is stable
    list.sort_by_key(|t| t.due_time);
    list
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, input: &UserInput) -> RepositoryResult<User> {
        fits(&[&input.email, &input.password_hash, &input.name, &input.firstname])?;
        let mut tables = self.tables.write().await;
        if tables.email_taken(&input.email, None) {
            return Err(RepositoryError::AlreadyExists);
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            name: input.name.clone(),
            firstname: input.firstname.clone(),
            created_at: now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: i64, input: &UserInput) -> RepositoryResult<User> {
        fits(&[&input.email, &input.password_hash, &input.name, &input.firstname])?;
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Err(RepositoryError::NotFound);
        }
        if tables.email_taken(&input.email, Some(id)) {
            return Err(RepositoryError::AlreadyExists);
        }

        let user = tables.users.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        user.email = input.email.clone();
        user.password_hash = input.password_hash.clone();
        user.name = input.name.clone();
        user.firstname = input.firstname.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id).ok_or(RepositoryError::NotFound)?;
        tables.todos.retain(|_, todo| todo.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn list_all(&self) -> RepositoryResult<Vec<Todo>> {
        let tables = self.tables.read().await;
        Ok(sorted_by_due_time(tables.todos.values()))
    }

    async fn list_by_owner(&self, user_id: i64) -> RepositoryResult<Vec<Todo>> {
        let tables = self.tables.read().await;
        Ok(sorted_by_due_time(
            tables.todos.values().filter(|t| t.user_id == user_id),
        ))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Todo>> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn create(&self, input: &TodoInput) -> RepositoryResult<Todo> {
        fits(&[&input.title])?;
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&input.user_id) {
            return Err(RepositoryError::InvalidReference);
        }

        tables.last_todo_id += 1;
        let todo = Todo {
            id: tables.last_todo_id,
            title: input.title.clone(),
            description: input.description.clone(),
            created_at: now(),
            due_time: input.due_time,
            user_id: input.user_id,
            status: input.status,
        };
        tables.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: i64, input: &TodoInput) -> RepositoryResult<Todo> {
        fits(&[&input.title])?;
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&input.user_id) {
            return Err(RepositoryError::InvalidReference);
        }

        let todo = tables.todos.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        todo.title = input.title.clone();
        todo.description = input.description.clone();
        todo.due_time = input.due_time;
        todo.user_id = input.user_id;
        todo.status = input.status;
        Ok(todo.clone())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables.todos.remove(&id).ok_or(RepositoryError::NotFound)?;
        Ok(())
    }
}
