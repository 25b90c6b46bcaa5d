//! Session handles scoped to a server and database.

use crate::error::{StoreError, StoreResult};
use mongodb::{ClientSession, Collection, Database};

/// Target database for a session or database handle.
///
/// Distinguishes between the server's configured default database and an
/// explicitly named one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DatabaseTarget {
    /// Use the database configured for the server.
    Default,
    /// Target a specific database by name.
    Named(String),
}

impl std::fmt::Display for DatabaseTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseTarget::Default => write!(f, "default"),
            DatabaseTarget::Named(name) => write!(f, "{}", name),
        }
    }
}

impl DatabaseTarget {
    /// Create a database target from an optional string.
    /// Returns an error for an empty string (use None for the default).
    pub fn from_option(database: Option<&str>) -> StoreResult<Self> {
        match database {
            None => Ok(DatabaseTarget::Default),
            Some("") => Err(StoreError::invalid_input(
                "Database name cannot be empty. Use None for the server's configured database.",
            )),
            Some(db) => Ok(DatabaseTarget::Named(db.to_string())),
        }
    }
}

/// A unit-of-work handle for reading and writing documents against one
/// database on one named server.
///
/// Wraps a driver [`ClientSession`] together with the resolved [`Database`].
/// Reads and writes that should be causally consistent run through the
/// session via [`DocumentSession::client_session`].
pub struct DocumentSession {
    server: String,
    database: Database,
    session: ClientSession,
}

impl DocumentSession {
    pub(crate) fn new(server: String, database: Database, session: ClientSession) -> Self {
        Self {
            server,
            database,
            session,
        }
    }

    /// Name of the server this session was opened against.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Name of the database this session is scoped to.
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// The database handle this session is scoped to.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Get a typed collection from the session's database.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    /// Mutable access to the underlying driver session, for passing to
    /// driver operations (`.session(&mut ...)`).
    pub fn client_session(&mut self) -> &mut ClientSession {
        &mut self.session
    }

    /// Start a transaction on this session.
    pub async fn start_transaction(&mut self) -> StoreResult<()> {
        self.session.start_transaction().await?;
        Ok(())
    }

    /// Commit the active transaction.
    pub async fn commit_transaction(&mut self) -> StoreResult<()> {
        self.session.commit_transaction().await?;
        Ok(())
    }

    /// Abort the active transaction.
    pub async fn abort_transaction(&mut self) -> StoreResult<()> {
        self.session.abort_transaction().await?;
        Ok(())
    }
}

impl std::fmt::Debug for DocumentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSession")
            .field("server", &self.server)
            .field("database", &self.database.name())
            .finish_non_exhaustive()
    }
}
