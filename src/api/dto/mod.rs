//! Data Transfer Objects for REST request/response serialization.
//!
//! Single-record responses wrap the record under its collection's
//! singular name (`{"todo": ...}`); lists use the plural.

pub mod todo_dto;
pub mod user_dto;

pub use todo_dto::*;
pub use user_dto::*;
