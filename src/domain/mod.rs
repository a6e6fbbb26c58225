//! Domain layer: record keys and the todo and user records.
//!
//! Everything here is pure: key validation, record shapes, and the merge
//! rule that couples `completed` to `completedAt`.

pub mod record_id;
pub mod todo;
pub mod user;

pub use record_id::{RecordId, is_valid_id};
pub use todo::{NewTodo, Todo, TodoChanges, TodoPatch};
pub use user::{NewUser, User};
