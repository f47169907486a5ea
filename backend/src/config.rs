//! Service configuration loaded via OrthoConfig.
//!
//! Every field can be set with a `SEARCH_ADMIN_<FIELD>` environment variable
//! or the matching command-line flag. Unset fields fall back to defaults that
//! depend on the selected storage backend.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};

use crate::outbound::mongo::MongoSettings;
use crate::outbound::redis::RedisPoolConfig;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_MONGO_ADDR: &str = "localhost:27017";
const DEFAULT_MONGO_AUTH_DB: &str = "admin";
const DEFAULT_REDIS_ADDR: &str = "localhost:6379";
const DEFAULT_REDIS_DB: i64 = 0;

/// Invalid configuration value. Aborts startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown storage backend {0:?}; expected \"mongo\" or \"redis\"")]
    UnknownStorage(String),
    #[error("invalid listen address {value:?}: {reason}")]
    ListenAddr { value: String, reason: String },
    #[error("redis database index must be a non-negative integer, got {0:?}")]
    RedisDatabase(String),
}

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    Mongo,
    Redis,
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "redis" => Ok(Self::Redis),
            _ => Err(ConfigError::UnknownStorage(s.to_owned())),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mongo => "mongo",
            Self::Redis => "redis",
        })
    }
}

/// Connection settings for the selected backend.
#[derive(Debug, Clone)]
pub enum BackendSettings {
    Mongo(MongoSettings),
    Redis(RedisPoolConfig),
}

/// Environment values that look like numbers, booleans or comma lists reach
/// serde typed; text fields take them back verbatim where possible.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Flag(bool),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    List(Vec<String>),
}

fn text_or_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(text) => text,
        Scalar::Flag(flag) => flag.to_string(),
        Scalar::Signed(number) => number.to_string(),
        Scalar::Unsigned(number) => number.to_string(),
        Scalar::Float(number) => number.to_string(),
        Scalar::List(items) => items.join(","),
    }))
}

/// Raw configuration values.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SEARCH_ADMIN")]
pub struct AppSettings {
    /// Storage backend: `mongo` or `redis`.
    #[ortho_config(default = StorageKind::Mongo.to_string())]
    pub storage: Option<String>,
    /// Backend address as `host:port`.
    pub db_addr: Option<String>,
    /// Mongo authentication database, or Redis logical database index.
    #[serde(default, deserialize_with = "text_or_scalar")]
    pub db: Option<String>,
    /// Mongo user name.
    #[serde(default, deserialize_with = "text_or_scalar")]
    pub db_user: Option<String>,
    /// Backend password.
    #[serde(default, deserialize_with = "text_or_scalar")]
    pub db_password: Option<String>,
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = DEFAULT_LISTEN_ADDR.to_owned())]
    pub listen_addr: Option<String>,
    /// Tracing filter directive used when `RUST_LOG` is unset.
    #[ortho_config(default = DEFAULT_LOG_LEVEL.to_owned())]
    pub log_level: Option<String>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("storage", &self.storage)
            .field("db_addr", &self.db_addr)
            .field("db", &self.db)
            .field("db_user", &self.db_user)
            .field("db_password", &self.db_password.as_ref().map(|_| "***"))
            .field("listen_addr", &self.listen_addr)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AppSettings {
    /// Selected backend, `mongo` when unset.
    pub fn storage_kind(&self) -> Result<StorageKind, ConfigError> {
        non_empty(&self.storage).map_or(Ok(StorageKind::default()), str::parse)
    }

    /// Socket address to bind, `0.0.0.0:8080` when unset.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = non_empty(&self.listen_addr).unwrap_or(DEFAULT_LISTEN_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| ConfigError::ListenAddr {
            value: raw.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Tracing filter directive, `info` when unset.
    pub fn log_level(&self) -> &str {
        non_empty(&self.log_level).unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Connection settings for the selected backend, defaults filled in.
    pub fn backend(&self) -> Result<BackendSettings, ConfigError> {
        let password = non_empty(&self.db_password).map(str::to_owned);
        match self.storage_kind()? {
            StorageKind::Mongo => Ok(BackendSettings::Mongo(MongoSettings {
                addr: non_empty(&self.db_addr)
                    .unwrap_or(DEFAULT_MONGO_ADDR)
                    .to_owned(),
                auth_database: non_empty(&self.db)
                    .unwrap_or(DEFAULT_MONGO_AUTH_DB)
                    .to_owned(),
                user: non_empty(&self.db_user).map(str::to_owned),
                password,
            })),
            StorageKind::Redis => {
                let database = match non_empty(&self.db) {
                    None => DEFAULT_REDIS_DB,
                    Some(raw) => raw
                        .parse::<i64>()
                        .ok()
                        .filter(|db| *db >= 0)
                        .ok_or_else(|| ConfigError::RedisDatabase(raw.to_owned()))?,
                };
                Ok(BackendSettings::Redis(
                    RedisPoolConfig::new(non_empty(&self.db_addr).unwrap_or(DEFAULT_REDIS_ADDR))
                        .with_password(password)
                        .with_database(database),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "SEARCH_ADMIN_STORAGE",
        "SEARCH_ADMIN_DB_ADDR",
        "SEARCH_ADMIN_DB",
        "SEARCH_ADMIN_DB_USER",
        "SEARCH_ADMIN_DB_PASSWORD",
        "SEARCH_ADMIN_LISTEN_ADDR",
        "SEARCH_ADMIN_LOG_LEVEL",
    ];

    /// Every variable unset except `overrides`.
    fn env(overrides: &[(&str, &str)]) -> [(&'static str, Option<String>); 7] {
        VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        })
    }

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("search-admin")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(env(&[]));

        let settings = load_from_empty_args();
        assert_eq!(settings.storage_kind(), Ok(StorageKind::Mongo));
        assert_eq!(
            settings.listen_addr(),
            Ok("0.0.0.0:8080".parse().expect("valid addr"))
        );
        assert_eq!(settings.log_level(), "info");
        let Ok(BackendSettings::Mongo(mongo)) = settings.backend() else {
            panic!("expected mongo settings");
        };
        assert_eq!(mongo.addr, "localhost:27017");
        assert_eq!(mongo.auth_database, "admin");
        assert!(mongo.user.is_none());
    }

    #[rstest]
    fn environment_selects_redis() {
        let _guard = lock_env(env(&[
            ("SEARCH_ADMIN_STORAGE", "redis"),
            ("SEARCH_ADMIN_DB", "3"),
            ("SEARCH_ADMIN_DB_PASSWORD", "secret"),
        ]));

        let settings = load_from_empty_args();
        let Ok(BackendSettings::Redis(redis)) = settings.backend() else {
            panic!("expected redis settings");
        };
        assert_eq!(redis.addr(), "localhost:6379");
        assert_eq!(redis.database(), 3);
    }

    #[rstest]
    fn numeric_credentials_stay_text() {
        let _guard = lock_env(env(&[
            ("SEARCH_ADMIN_DB_USER", "1000"),
            ("SEARCH_ADMIN_DB_PASSWORD", "12345"),
        ]));

        let settings = load_from_empty_args();
        let Ok(BackendSettings::Mongo(mongo)) = settings.backend() else {
            panic!("expected mongo settings");
        };
        assert_eq!(mongo.user.as_deref(), Some("1000"));
        assert_eq!(mongo.password.as_deref(), Some("12345"));
    }

    #[rstest]
    fn redis_database_index_and_password_accept_digits() {
        let _guard = lock_env(env(&[
            ("SEARCH_ADMIN_STORAGE", "redis"),
            ("SEARCH_ADMIN_DB_ADDR", "cache:6380"),
            ("SEARCH_ADMIN_DB", "15"),
            ("SEARCH_ADMIN_DB_PASSWORD", "2024"),
        ]));

        let settings = load_from_empty_args();
        let Ok(BackendSettings::Redis(redis)) = settings.backend() else {
            panic!("expected redis settings");
        };
        assert_eq!(redis.addr(), "cache:6380");
        assert_eq!(redis.database(), 15);
        assert_eq!(
            redis.connection_url().map(String::from),
            Ok("redis://:2024@cache:6380/15".to_owned())
        );
    }

    #[rstest]
    fn environment_overrides_mongo_connection() {
        let _guard = lock_env(env(&[
            ("SEARCH_ADMIN_DB_ADDR", "mongo:27018"),
            ("SEARCH_ADMIN_DB", "users"),
            ("SEARCH_ADMIN_DB_USER", "admin"),
            ("SEARCH_ADMIN_DB_PASSWORD", "secret"),
            ("SEARCH_ADMIN_LISTEN_ADDR", "127.0.0.1:9000"),
        ]));

        let settings = load_from_empty_args();
        let Ok(BackendSettings::Mongo(mongo)) = settings.backend() else {
            panic!("expected mongo settings");
        };
        assert_eq!(mongo.addr, "mongo:27018");
        assert_eq!(mongo.auth_database, "users");
        assert_eq!(mongo.user.as_deref(), Some("admin"));
        assert_eq!(mongo.password.as_deref(), Some("secret"));
        assert_eq!(
            settings.listen_addr().map(|addr| addr.port()),
            Ok(9000)
        );
    }

    #[rstest]
    #[case(&[("SEARCH_ADMIN_STORAGE", "postgres")])]
    #[case(&[("SEARCH_ADMIN_STORAGE", "redis"), ("SEARCH_ADMIN_DB", "-1")])]
    #[case(&[("SEARCH_ADMIN_STORAGE", "redis"), ("SEARCH_ADMIN_DB", "admin")])]
    fn invalid_backend_values_are_rejected(#[case] overrides: &[(&str, &str)]) {
        let _guard = lock_env(env(overrides));
        assert!(load_from_empty_args().backend().is_err());
    }

    #[rstest]
    fn invalid_listen_addr_is_rejected() {
        let _guard = lock_env(env(&[("SEARCH_ADMIN_LISTEN_ADDR", "not-an-addr")]));
        assert!(matches!(
            load_from_empty_args().listen_addr(),
            Err(ConfigError::ListenAddr { .. })
        ));
    }

    #[rstest]
    #[case("Redis", StorageKind::Redis)]
    #[case("mongodb", StorageKind::Mongo)]
    fn storage_kind_parses_case_insensitively(#[case] raw: &str, #[case] expected: StorageKind) {
        assert_eq!(raw.parse::<StorageKind>(), Ok(expected));
    }

    #[rstest]
    fn debug_redacts_password() {
        let settings = AppSettings {
            storage: None,
            db_addr: None,
            db: None,
            db_user: None,
            db_password: Some("hunter2".into()),
            listen_addr: None,
            log_level: None,
        };
        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}
