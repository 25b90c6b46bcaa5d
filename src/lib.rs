//! Named document store management for MongoDB.
//!
//! This library keeps a registry of named server configurations and lazily
//! builds one shared driver [`Client`](mongodb::Client) per server name, with
//! single-flight initialization under concurrent first access. Callers get
//! either the store itself, a database handle, or a [`DocumentSession`]
//! scoped to a server and database.
//!
//! Compose a [`DocumentStoreManager`] explicitly (no global state) via
//! [`DocumentStoreBuilder`], inline [`ServerConfig`] values, or a JSON
//! options file.

pub mod config;
pub mod error;
pub mod registration;
pub mod store;

pub use config::{Conventions, ManagerOptions, ServerConfig};
pub use error::{StoreError, StoreResult};
pub use registration::DocumentStoreBuilder;
pub use store::{DatabaseTarget, DocumentSession, DocumentStore, DocumentStoreManager};
