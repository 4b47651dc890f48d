//! Ownership rules applied after authentication.
//!
//! For a targeted todo the checks always run in the same order: the record
//! must exist (404), then belong to the caller (403). Payload validation (400)
//! only happens after both pass, so a caller can never learn more about a
//! foreign record from a malformed body than from a well-formed one.

use crate::database::models::Todo;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Resolve a looked-up record, reporting absence as 404
pub fn require_found<T>(record: Option<T>) -> Result<T, ApiError> {
    record.ok_or_else(ApiError::not_found)
}

/// The caller must be the account named by `owner_id`
pub fn ensure_owner(caller: &AuthUser, owner_id: i64) -> Result<(), ApiError> {
    if caller.id != owner_id {
        tracing::warn!("User {} denied access to resource owned by {}", caller.id, owner_id);
        return Err(ApiError::forbidden());
    }
    Ok(())
}

/// Existence, then current ownership, of a todo about to be mutated
pub fn authorize_todo_mutation(caller: &AuthUser, todo: Option<Todo>) -> Result<Todo, ApiError> {
    let todo = require_found(todo)?;
    ensure_owner(caller, todo.user_id)?;
    Ok(todo)
}

/// Account routes are self-only. A path id that is not a number can never
/// name the caller and is refused the same way as someone else's id.
pub fn ensure_self(caller: &AuthUser, raw_id: &str) -> Result<i64, ApiError> {
    match raw_id.trim().parse::<i64>() {
        Ok(id) if id == caller.id => Ok(id),
        _ => {
            tracing::warn!("User {} denied access to account '{}'", caller.id, raw_id);
            Err(ApiError::forbidden())
        }
    }
}
