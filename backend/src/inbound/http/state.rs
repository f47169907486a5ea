//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::Error;
use crate::domain::ports::{FilterRepository, UserRepository};

use super::validation::RequestValidator;

pub(crate) const FILTERS_UNSUPPORTED_MESSAGE: &str =
    "Filters are not supported by the configured storage backend";

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    /// `None` when the backend has no filter capability.
    pub filters: Option<Arc<dyn FilterRepository>>,
    pub validator: Arc<RequestValidator>,
}

impl HttpState {
    /// Construct state from storage ports and the request validator.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use search_admin::domain::IdFormat;
    /// use search_admin::domain::ports::FilterRepository;
    /// use search_admin::inbound::http::state::HttpState;
    /// use search_admin::inbound::http::validation::RequestValidator;
    /// use search_admin::outbound::mongo::{MongoSettings, MongoStorage};
    ///
    /// # async fn build(settings: MongoSettings) -> Result<(), Box<dyn std::error::Error>> {
    /// let storage = Arc::new(MongoStorage::connect(&settings).await?);
    /// let state = HttpState::new(
    ///     storage.clone(),
    ///     Some(storage as Arc<dyn FilterRepository>),
    ///     RequestValidator::new(IdFormat::ObjectId),
    /// );
    /// assert!(state.filters().is_ok());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        users: Arc<dyn UserRepository>,
        filters: Option<Arc<dyn FilterRepository>>,
        validator: RequestValidator,
    ) -> Self {
        Self {
            users,
            filters,
            validator: Arc::new(validator),
        }
    }

    /// Filter port, or a not-implemented error when the backend lacks it.
    pub fn filters(&self) -> Result<&Arc<dyn FilterRepository>, Error> {
        self.filters
            .as_ref()
            .ok_or_else(|| Error::not_implemented(FILTERS_UNSUPPORTED_MESSAGE))
    }
}
