//! Builders connecting the configured storage backend to HTTP state.

use std::sync::Arc;

use tracing::info;

use search_admin::config::BackendSettings;
use search_admin::domain::IdFormat;
use search_admin::domain::ports::{FilterRepository, UserRepository};
use search_admin::inbound::http::state::HttpState;
use search_admin::inbound::http::validation::RequestValidator;
use search_admin::outbound::ConnectError;
use search_admin::outbound::mongo::MongoStorage;
use search_admin::outbound::redis::RedisStorage;

/// Storage ports exposed by one connected backend.
pub(crate) struct StoragePorts {
    pub users: Arc<dyn UserRepository>,
    pub filters: Option<Arc<dyn FilterRepository>>,
    pub id_format: IdFormat,
}

impl StoragePorts {
    /// Document store: users and filters, object-id identifiers.
    pub(crate) fn document_store(storage: MongoStorage) -> Self {
        let storage = Arc::new(storage);
        Self {
            users: storage.clone(),
            filters: Some(storage),
            id_format: IdFormat::ObjectId,
        }
    }

    /// Key-value store: users only, counter identifiers.
    pub(crate) fn key_value(storage: RedisStorage) -> Self {
        Self {
            users: Arc::new(storage),
            filters: None,
            id_format: IdFormat::Counter,
        }
    }
}

/// Connect the configured backend and verify it answers.
///
/// # Errors
/// Returns [`ConnectError`] when the backend cannot be reached.
pub(crate) async fn connect_storage(settings: &BackendSettings) -> Result<StoragePorts, ConnectError> {
    match settings {
        BackendSettings::Mongo(mongo) => {
            MongoStorage::connect(mongo).await.map(StoragePorts::document_store)
        }
        BackendSettings::Redis(redis) => {
            RedisStorage::connect(redis).await.map(StoragePorts::key_value)
        }
    }
}

/// Build handler state, including the request validator for the backend's
/// identifier format.
pub(crate) fn build_http_state(ports: StoragePorts) -> HttpState {
    let StoragePorts {
        users,
        filters,
        id_format,
    } = ports;
    info!(
        ?id_format,
        filters = filters.is_some(),
        "storage ports ready"
    );
    HttpState::new(users, filters, RequestValidator::new(id_format))
}
