//! Document store management: named stores, lazy initialization, sessions.

pub mod handle;
pub mod manager;
pub mod session;

pub use handle::DocumentStore;
pub use manager::DocumentStoreManager;
pub use session::{DatabaseTarget, DocumentSession};
