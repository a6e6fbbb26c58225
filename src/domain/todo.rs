//! Todo record, its creation input, and the update-merge rule.
//!
//! The only invariant is the completion coupling: `completed_at` is
//! `Some` exactly when `completed` is `true`. [`NewTodo`] and
//! [`TodoPatch::resolve`] are the only ways to produce stored field
//! values, and both uphold it.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::RecordId;
use crate::error::ApiError;

/// A stored todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Record key assigned by storage.
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "5a0b1c2d3e4f5a6b7c8d9e0f")]
    pub id: RecordId,
    /// Task description, never empty.
    pub text: String,
    /// Whether the task is done.
    pub completed: bool,
    /// Completion time in epoch milliseconds; omitted unless `completed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

/// Validated input for inserting a todo. The key is minted by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    /// Trimmed, non-empty text.
    pub text: String,
    /// Initial completion flag.
    pub completed: bool,
    /// Initial completion time, set only together with `completed`.
    pub completed_at: Option<i64>,
}

impl NewTodo {
    /// Creates an incomplete todo from raw text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the text is empty after trimming.
    pub fn new(text: &str) -> Result<Self, ApiError> {
        Ok(Self {
            text: required_text(text)?,
            completed: false,
            completed_at: None,
        })
    }

    /// Marks the todo as completed at `at_ms`.
    #[must_use]
    pub fn completed_at(mut self, at_ms: i64) -> Self {
        self.completed = true;
        self.completed_at = Some(at_ms);
        self
    }

    /// Attaches a storage key, producing the stored record.
    #[must_use]
    pub fn into_todo(self, id: RecordId) -> Todo {
        Todo {
            id,
            text: self.text,
            completed: self.completed,
            completed_at: self.completed_at,
        }
    }
}

/// Client-supplied partial update for `PATCH /todo/{id}`.
///
/// Only `text` and `completed` are recognized; any other field in the
/// body, `_id` and `completedAt` included, is dropped during
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct TodoPatch {
    /// Replacement text.
    #[serde(default)]
    pub text: Option<String>,
    /// Completion flag. Anything other than the JSON literal `true`
    /// counts as `false`.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub completed: bool,
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(matches!(value, serde_json::Value::Bool(true)))
}

/// Field set to persist after applying the merge rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    /// New text, or `None` to keep the stored text.
    pub text: Option<String>,
    /// New completion flag.
    pub completed: bool,
    /// New completion time; `Some` exactly when `completed`.
    pub completed_at: Option<i64>,
}

impl TodoPatch {
    /// Applies the merge rule with `now_ms` as the current time.
    ///
    /// A patch without `completed: true` always clears completion, so an
    /// empty patch resets a finished todo to open.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `text` is present but empty
    /// after trimming.
    pub fn resolve(self, now_ms: i64) -> Result<TodoChanges, ApiError> {
        let text = self.text.as_deref().map(required_text).transpose()?;
        let completed_at = self.completed.then_some(now_ms);
        Ok(TodoChanges {
            text,
            completed: self.completed,
            completed_at,
        })
    }
}

impl TodoChanges {
    /// Writes the changes into a stored record.
    pub fn apply(self, todo: &mut Todo) {
        if let Some(text) = self.text {
            todo.text = text;
        }
        todo.completed = self.completed;
        todo.completed_at = self.completed_at;
    }
}

fn required_text(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("text must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
