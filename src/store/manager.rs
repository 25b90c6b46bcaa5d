//! Named document store management.
//!
//! The manager owns a registry of named server configurations and a cache of
//! lazily initialized [`DocumentStore`] objects, one per server name.
//!
//! # Concurrency Safety
//!
//! - `OnceCell` per server name: single-flight store initialization, so at
//!   most one build completes even under concurrent first access
//! - `RwLock` protects the registry HashMap for concurrent read access
//! - Registry reads are released before any driver await; the only await
//!   under a cell is the single-flight initialization itself
//! - Removal tolerates in-flight initialization: the removed cell stays alive
//!   through its `Arc`, the in-flight caller gets a working store, and the
//!   name is gone from the registry for everyone after
//! - `AtomicBool` disposed flag checked at every entry point

use crate::config::{validate_server_name, ManagerOptions, ServerConfig};
use crate::error::{StoreError, StoreResult};
use crate::store::handle::DocumentStore;
use crate::store::session::{DatabaseTarget, DocumentSession};
use mongodb::Database;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info};

/// Registry entry for one named server: its configuration plus the lazy
/// store cell. Evicting the entry evicts both.
struct ServerEntry {
    config: ServerConfig,
    /// Lazy store. OnceCell ensures single-flight initialization.
    cell: Arc<OnceCell<Arc<DocumentStore>>>,
}

impl ServerEntry {
    fn new(config: ServerConfig) -> Self {
        Self {
            config,
            cell: Arc::new(OnceCell::new()),
        }
    }
}

/// Manages named document stores and hands out session handles.
///
/// Stores are initialized on first access and shared by all callers
/// requesting the same server name. The manager is cheap to share behind an
/// `Arc`; no singleton is required.
pub struct DocumentStoreManager {
    servers: RwLock<HashMap<String, ServerEntry>>,
    default_server: Option<String>,
    disposed: AtomicBool,
}

impl DocumentStoreManager {
    /// Create a manager from validated options.
    pub fn new(options: ManagerOptions) -> StoreResult<Self> {
        options.validate()?;
        let servers = options
            .servers
            .into_iter()
            .map(|(name, config)| (name, ServerEntry::new(config)))
            .collect();
        Ok(Self {
            servers: RwLock::new(servers),
            default_server: options.default_server,
            disposed: AtomicBool::new(false),
        })
    }

    /// The configured default server name, if any.
    pub fn default_server(&self) -> Option<&str> {
        self.default_server.as_deref()
    }

    fn ensure_live(&self) -> StoreResult<()> {
        if self.disposed.load(Ordering::Acquire) {
            Err(StoreError::Disposed)
        } else {
            Ok(())
        }
    }

    /// Resolve an optional server name against the configured default.
    fn resolve_server(&self, server: Option<&str>) -> StoreResult<String> {
        match server {
            Some("") => Err(StoreError::invalid_input("Server name cannot be empty")),
            Some(name) => Ok(name.to_string()),
            None => self
                .default_server
                .clone()
                .ok_or(StoreError::NoDefaultServer),
        }
    }

    /// Get the store for a server, initializing it on first access.
    ///
    /// Passing `None` targets the default server. Initialization is
    /// single-flight: concurrent first-time callers share one build and all
    /// receive the same store instance.
    pub async fn get_store(&self, server: Option<&str>) -> StoreResult<Arc<DocumentStore>> {
        self.ensure_live()?;
        let name = self.resolve_server(server)?;

        // Clone the cell and config under a brief read lock; initialize
        // outside it.
        let (cell, config) = {
            let servers = self.servers.read().await;
            let entry = servers
                .get(&name)
                .ok_or_else(|| StoreError::unknown_server(&name))?;
            (Arc::clone(&entry.cell), entry.config.clone())
        };

        let store = cell
            .get_or_try_init(|| async {
                debug!(server = %name, "Initializing document store");
                let store = DocumentStore::initialize(&name, &config).await?;
                Ok::<_, StoreError>(Arc::new(store))
            })
            .await?;

        Ok(Arc::clone(store))
    }

    /// Get a database handle on a server, without opening a session.
    ///
    /// The database is the explicitly named one, else the server's
    /// configured database.
    pub async fn get_database(
        &self,
        server: Option<&str>,
        database: Option<&str>,
    ) -> StoreResult<Database> {
        let target = DatabaseTarget::from_option(database)?;
        let store = self.get_store(server).await?;
        store.database(&target)
    }

    /// Open a session on a server, optionally scoped to a named database.
    pub async fn get_session(
        &self,
        server: Option<&str>,
        database: Option<&str>,
    ) -> StoreResult<DocumentSession> {
        let target = DatabaseTarget::from_option(database)?;
        let store = self.get_store(server).await?;
        store.open_session(&target).await
    }

    /// Register a server. Returns false (and changes nothing) when the name
    /// is already registered.
    pub async fn add_server(&self, name: &str, config: ServerConfig) -> StoreResult<bool> {
        self.ensure_live()?;
        validate_server_name(name).map_err(StoreError::invalid_input)?;
        config.validate().map_err(StoreError::invalid_input)?;

        let mut servers = self.servers.write().await;
        if servers.contains_key(name) {
            debug!(server = %name, "Server already registered, skipping");
            return Ok(false);
        }
        info!(server = %name, url = %config.masked_url(), "Registered server");
        servers.insert(name.to_string(), ServerEntry::new(config));
        Ok(true)
    }

    /// Remove a server, evicting both its registry entry and any cached
    /// store. Returns whether removal occurred.
    pub async fn remove_server(&self, name: &str) -> StoreResult<bool> {
        self.ensure_live()?;

        // Evict under a brief write lock; shut the store down outside it.
        let removed = {
            let mut servers = self.servers.write().await;
            servers.remove(name)
        };

        match removed {
            Some(entry) => {
                if let Some(store) = entry.cell.get() {
                    info!(server = %name, "Shutting down removed document store");
                    store.shutdown().await;
                } else {
                    debug!(server = %name, "Removed server (store never initialized)");
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The configuration for a registered server.
    pub async fn get_config(&self, name: &str) -> StoreResult<ServerConfig> {
        self.ensure_live()?;
        let servers = self.servers.read().await;
        servers
            .get(name)
            .map(|entry| entry.config.clone())
            .ok_or_else(|| StoreError::unknown_server(name))
    }

    /// Check whether a server name is registered.
    pub async fn has_server(&self, name: &str) -> StoreResult<bool> {
        self.ensure_live()?;
        let servers = self.servers.read().await;
        Ok(servers.contains_key(name))
    }

    /// All registered server names.
    pub async fn server_names(&self) -> StoreResult<Vec<String>> {
        self.ensure_live()?;
        let servers = self.servers.read().await;
        let mut names: Vec<_> = servers.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Number of registered servers.
    pub async fn server_count(&self) -> StoreResult<usize> {
        self.ensure_live()?;
        let servers = self.servers.read().await;
        Ok(servers.len())
    }

    /// Number of initialized stores (registered servers whose store has been
    /// built).
    pub async fn store_count(&self) -> StoreResult<usize> {
        self.ensure_live()?;
        let servers = self.servers.read().await;
        Ok(servers
            .values()
            .filter(|entry| entry.cell.initialized())
            .count())
    }

    /// Tear the manager down. Every subsequent call fails with `Disposed`.
    ///
    /// Idempotent. Drains the registry under a brief write lock and shuts
    /// initialized stores down outside it.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        let drained: Vec<(String, ServerEntry)> = {
            let mut servers = self.servers.write().await;
            servers.drain().collect()
        };

        for (name, entry) in drained {
            if let Some(store) = entry.cell.get() {
                info!(server = %name, "Shutting down document store");
                store.shutdown().await;
            }
        }
        info!("Document store manager disposed");
    }
}

impl std::fmt::Debug for DocumentStoreManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStoreManager")
            .field("default_server", &self.default_server)
            .field("disposed", &self.disposed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
