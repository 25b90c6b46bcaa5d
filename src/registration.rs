//! Registration helpers: compose a manager from inline servers, parsed
//! entries, or an external options source.
//!
//! The builder is the glue the host uses to wire configuration into a
//! [`DocumentStoreManager`]; it has no logic beyond collecting options and
//! delegating validation to [`ManagerOptions`].

use crate::config::{ManagerOptions, ServerConfig};
use crate::error::{StoreError, StoreResult};
use crate::store::DocumentStoreManager;
use std::path::Path;

/// Builder for a [`DocumentStoreManager`].
///
/// ```no_run
/// use docstore_manager::DocumentStoreBuilder;
///
/// # async fn run() -> docstore_manager::StoreResult<()> {
/// let manager = DocumentStoreBuilder::new()
///     .entry("primary=mongodb://localhost:27017/app")?
///     .default_server("primary")
///     .build()?;
///
/// let session = manager.get_session(None, None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DocumentStoreBuilder {
    options: ManagerOptions,
}

impl DocumentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-bound options (e.g. deserialized from a config file).
    pub fn from_options(options: ManagerOptions) -> Self {
        Self { options }
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_options(ManagerOptions::from_json_file(path)?))
    }

    /// Register a server inline. Registering the same name twice keeps the
    /// last configuration.
    pub fn server(mut self, name: impl Into<String>, config: ServerConfig) -> Self {
        self.options.servers.insert(name.into(), config);
        self
    }

    /// Register a server from an entry string, `"name=mongodb://..."` or a
    /// bare URL (see [`ServerConfig::parse`]).
    pub fn entry(mut self, s: &str) -> StoreResult<Self> {
        let (name, config) = ServerConfig::parse(s).map_err(StoreError::invalid_input)?;
        self.options.servers.insert(name, config);
        Ok(self)
    }

    /// Set the server used when callers pass no explicit name.
    pub fn default_server(mut self, name: impl Into<String>) -> Self {
        self.options.default_server = Some(name.into());
        self
    }

    /// Validate the collected options and build the manager.
    pub fn build(self) -> StoreResult<DocumentStoreManager> {
        DocumentStoreManager::new(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_servers() {
        let builder = DocumentStoreBuilder::new()
            .server("primary", ServerConfig::new("mongodb://a:27017"))
            .server("metrics", ServerConfig::new("mongodb://b:27017"));
        assert_eq!(builder.options.servers.len(), 2);
    }

    #[test]
    fn test_builder_entry_parses_name() {
        let builder = DocumentStoreBuilder::new()
            .entry("analytics=mongodb://host:27017/events")
            .unwrap();
        assert!(builder.options.servers.contains_key("analytics"));
        assert_eq!(
            builder.options.servers["analytics"].database,
            Some("events".to_string())
        );
    }

    #[test]
    fn test_builder_entry_rejects_bad_url() {
        let result = DocumentStoreBuilder::new().entry("redis://host:6379");
        assert!(matches!(result, Err(StoreError::InvalidInput { .. })));
    }

    #[test]
    fn test_builder_last_registration_wins() {
        let builder = DocumentStoreBuilder::new()
            .server("primary", ServerConfig::new("mongodb://old:27017"))
            .server("primary", ServerConfig::new("mongodb://new:27017"));
        assert_eq!(builder.options.servers["primary"].url, "mongodb://new:27017");
    }

    #[test]
    fn test_build_rejects_unknown_default() {
        let result = DocumentStoreBuilder::new()
            .server("primary", ServerConfig::new("mongodb://a:27017"))
            .default_server("missing")
            .build();
        assert!(matches!(result, Err(StoreError::InvalidInput { .. })));
    }

    #[test]
    fn test_build_without_default_is_allowed() {
        let manager = DocumentStoreBuilder::new()
            .server("primary", ServerConfig::new("mongodb://a:27017"))
            .build()
            .unwrap();
        assert!(manager.default_server().is_none());
    }
}
