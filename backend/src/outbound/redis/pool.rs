//! Async connection pool for Redis connections.
//!
//! Wraps `bb8-redis` so the adapter checks connections out of a bounded pool
//! instead of sharing one multiplexed connection. Failures surface as
//! [`PoolError`], which converts into [`StorageError::Backend`] for request
//! paths and into [`ConnectError`] at startup.

use std::time::Duration;

use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};
use url::Url;

use crate::domain::ports::StorageError;
use crate::outbound::ConnectError;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

impl From<PoolError> for StorageError {
    fn from(err: PoolError) -> Self {
        StorageError::backend(format!("redis {err}"))
    }
}

impl From<PoolError> for ConnectError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Build { message } => ConnectError::configuration("redis", message),
            PoolError::Checkout { message } => ConnectError::unreachable("redis", message),
        }
    }
}

/// Configuration for the Redis connection pool.
///
/// # Example
///
/// ```
/// use search_admin::outbound::redis::RedisPoolConfig;
///
/// let config = RedisPoolConfig::new("localhost:6379")
///     .with_password(Some("secret".to_owned()))
///     .with_database(2);
/// assert_eq!(config.database(), 2);
/// ```
#[derive(Clone)]
pub struct RedisPoolConfig {
    addr: String,
    password: Option<String>,
    database: i64,
    max_size: u32,
    connection_timeout: Duration,
}

impl RedisPoolConfig {
    /// Create a configuration for the server at `addr` (`host:port`).
    ///
    /// Defaults: logical database `0`, 10 connections, 30 second checkout
    /// timeout.
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            password: None,
            database: 0,
            max_size: 10,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the `AUTH` password.
    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    /// Select the logical database index.
    pub fn with_database(mut self, database: i64) -> Self {
        self.database = database;
        self
    }

    /// Logical database index.
    pub fn database(&self) -> i64 {
        self.database
    }

    /// Server address as configured.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Connection URL with the password percent-encoded.
    pub(crate) fn connection_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("redis://{}", self.addr))?;
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            // `set_password` only fails for cannot-be-a-base URLs.
            url.set_password(Some(password))
                .map_err(|()| url::ParseError::EmptyHost)?;
        }
        url.set_path(&format!("/{}", self.database));
        Ok(url)
    }
}

impl std::fmt::Debug for RedisPoolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPoolConfig")
            .field("addr", &self.addr)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("max_size", &self.max_size)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

/// Bounded pool of Redis connections.
#[derive(Clone)]
pub struct RedisPool {
    inner: Pool<RedisConnectionManager>,
}

impl RedisPool {
    /// Build the pool. Connections are opened lazily on checkout.
    ///
    /// # Errors
    /// Returns [`PoolError::Build`] when the address is invalid or the driver
    /// rejects the connection parameters.
    pub async fn new(config: &RedisPoolConfig) -> Result<Self, PoolError> {
        let url = config
            .connection_url()
            .map_err(|err| PoolError::build(err.to_string()))?;
        let manager = RedisConnectionManager::new(url.as_str())
            .map_err(|err| PoolError::build(err.to_string()))?;
        let inner = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check a connection out of the pool.
    ///
    /// # Errors
    /// Returns [`PoolError::Checkout`] when no connection can be opened within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, RedisConnectionManager>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
