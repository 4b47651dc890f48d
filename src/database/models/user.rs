use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Account row as stored, password hash included. Deliberately not
/// `Serialize`: only [`PublicUser`] may be written to a response.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub firstname: String,
    pub created_at: NaiveDateTime,
}

/// Account view with the password hash stripped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub firstname: String,
    #[serde(with = "crate::api::format::timestamp")]
    pub created_at: NaiveDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            firstname: user.firstname,
            created_at: user.created_at,
        }
    }
}

/// Whole-record account write, used for both insert and update
#[derive(Debug, Clone)]
pub struct UserInput {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub firstname: String,
}
