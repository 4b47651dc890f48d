use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TodoStatus {
    #[default]
    #[serde(rename = "not started")]
    NotStarted,
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 4] = [
        TodoStatus::NotStarted,
        TodoStatus::Todo,
        TodoStatus::InProgress,
        TodoStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::NotStarted => "not started",
            TodoStatus::Todo => "todo",
            TodoStatus::InProgress => "in progress",
            TodoStatus::Done => "done",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown todo status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TodoStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TodoStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for TodoStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "crate::api::format::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "crate::api::format::timestamp")]
    pub due_time: NaiveDateTime,
    pub user_id: i64,
    #[sqlx(try_from = "String")]
    pub status: TodoStatus,
}

/// Whole-record todo write. Updates replace every field at once.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoInput {
    pub title: String,
    pub description: String,
    pub due_time: NaiveDateTime,
    pub user_id: i64,
    pub status: TodoStatus,
}
