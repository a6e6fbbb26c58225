//! # todo-gateway
//!
//! REST API for creating, listing, fetching, updating and deleting todo
//! records, backed by a document-style record store.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP/JSON)
//!     │
//!     ├── REST Handlers (api/)      record key validation, body extraction
//!     │
//!     ├── TodoService / UserService (service/)
//!     ├── Records + merge rule (domain/)
//!     │
//!     └── Store (persistence/)
//!           ├── MemoryStore
//!           └── PostgresStore (sqlx)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
