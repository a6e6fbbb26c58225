//! Service layer: business logic orchestration.
//!
//! [`TodoService`] and [`UserService`] validate input, apply the merge
//! rule, and delegate to the shared [`crate::persistence::Store`].

pub mod todo_service;
pub mod user_service;

pub use todo_service::TodoService;
pub use user_service::UserService;
