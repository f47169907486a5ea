//! Document-store adapter backed by MongoDB.
//!
//! Implements both [`UserRepository`] and [`FilterRepository`]. Identifiers
//! are MongoDB `ObjectId`s rendered as lowercase hex; a string that does not
//! parse as an `ObjectId` is reported as [`StorageError::InvalidId`] before any
//! round trip to the server.

mod documents;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection};
use tracing::{debug, info};

use crate::domain::ports::{FilterRepository, StorageError, UserRepository};
use crate::domain::{Filter, FilterDraft, IdFormat, RecordId, User, UserDraft};

use self::documents::{FilterDocument, UserDocument};
use super::ConnectError;

/// Database holding the application collections.
pub const APP_DATABASE: &str = "search_app";
const USERS_COLLECTION: &str = "users";
const FILTERS_COLLECTION: &str = "filters";

/// Connection parameters for [`MongoStorage`].
#[derive(Clone)]
pub struct MongoSettings {
    pub addr: String,
    pub auth_database: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for MongoSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoSettings")
            .field("addr", &self.addr)
            .field("auth_database", &self.auth_database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// MongoDB-backed storage for users and filters.
#[derive(Clone)]
pub struct MongoStorage {
    users: Collection<UserDocument>,
    filters: Collection<FilterDocument>,
}

impl MongoStorage {
    /// Connect and verify the server answers a `ping`.
    ///
    /// # Errors
    /// Returns [`ConnectError`] when the address cannot be parsed or the
    /// server does not answer the liveness probe.
    pub async fn connect(settings: &MongoSettings) -> Result<Self, ConnectError> {
        let uri = format!("mongodb://{}", settings.addr);
        let mut options = ClientOptions::parse(uri.as_str())
            .await
            .map_err(|err| ConnectError::configuration("mongo", err.to_string()))?;
        if let Some(user) = &settings.user {
            options.credential = Some(
                Credential::builder()
                    .username(user.clone())
                    .password(settings.password.clone())
                    .source(settings.auth_database.clone())
                    .build(),
            );
        }

        let client = Client::with_options(options)
            .map_err(|err| ConnectError::configuration("mongo", err.to_string()))?;
        client
            .database(&settings.auth_database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| ConnectError::unreachable("mongo", err.to_string()))?;
        info!(addr = %settings.addr, database = APP_DATABASE, "connected to document store");

        let database = client.database(APP_DATABASE);
        Ok(Self {
            users: database.collection(USERS_COLLECTION),
            filters: database.collection(FILTERS_COLLECTION),
        })
    }
}

fn parse_object_id(id: &RecordId) -> Result<ObjectId, StorageError> {
    if !IdFormat::ObjectId.accepts(id.as_str()) {
        return Err(StorageError::invalid_id(id.as_str()));
    }
    ObjectId::parse_str(id.as_str()).map_err(|_| StorageError::invalid_id(id.as_str()))
}

/// Zero matched or deleted documents means the id named no record.
fn affected(count: u64, id: &RecordId) -> Result<(), StorageError> {
    if count == 0 {
        Err(StorageError::not_found(id.as_str()))
    } else {
        Ok(())
    }
}

fn map_driver_error(operation: &'static str, error: mongodb::error::Error) -> StorageError {
    debug!(operation, kind = ?error.kind, "document store operation failed");
    StorageError::backend(format!("{operation}: {error}"))
}

fn inserted_object_id(inserted: &mongodb::bson::Bson) -> Result<ObjectId, StorageError> {
    inserted
        .as_object_id()
        .ok_or_else(|| StorageError::backend("document store did not return an object id"))
}

#[async_trait]
impl UserRepository for MongoStorage {
    async fn create(&self, draft: UserDraft) -> Result<User, StorageError> {
        let document = UserDocument::from_draft(draft.clone());
        let result = self
            .users
            .insert_one(&document)
            .await
            .map_err(|err| map_driver_error("insert user", err))?;
        let id = inserted_object_id(&result.inserted_id)?;
        Ok(draft.with_id(RecordId::new(id.to_hex())))
    }

    async fn list(&self) -> Result<Vec<User>, StorageError> {
        let cursor = self
            .users
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|err| map_driver_error("find users", err))?;
        let documents: Vec<UserDocument> = cursor
            .try_collect()
            .await
            .map_err(|err| map_driver_error("read users", err))?;
        documents.into_iter().map(UserDocument::into_user).collect()
    }

    async fn get(&self, id: &RecordId) -> Result<User, StorageError> {
        let oid = parse_object_id(id)?;
        self.users
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|err| map_driver_error("find user", err))?
            .ok_or_else(|| StorageError::not_found(id.as_str()))?
            .into_user()
    }

    async fn update(&self, user: &User) -> Result<(), StorageError> {
        let oid = parse_object_id(&user.id)?;
        let (_, draft) = user.clone().into_parts();
        let result = self
            .users
            .replace_one(doc! { "_id": oid }, UserDocument::from_draft(draft))
            .await
            .map_err(|err| map_driver_error("replace user", err))?;
        affected(result.matched_count, &user.id)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), StorageError> {
        let oid = parse_object_id(id)?;
        let result = self
            .users
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|err| map_driver_error("delete user", err))?;
        affected(result.deleted_count, id)
    }
}

#[async_trait]
impl FilterRepository for MongoStorage {
    async fn create(&self, draft: FilterDraft) -> Result<Filter, StorageError> {
        let result = self
            .filters
            .insert_one(FilterDocument::from_draft(&draft))
            .await
            .map_err(|err| map_driver_error("insert filter", err))?;
        let id = inserted_object_id(&result.inserted_id)?;
        Ok(draft.with_id(RecordId::new(id.to_hex())))
    }

    async fn list(&self) -> Result<Vec<Filter>, StorageError> {
        let cursor = self
            .filters
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|err| map_driver_error("find filters", err))?;
        let documents: Vec<FilterDocument> = cursor
            .try_collect()
            .await
            .map_err(|err| map_driver_error("read filters", err))?;
        documents
            .into_iter()
            .map(FilterDocument::into_filter)
            .collect()
    }

    async fn get(&self, id: &RecordId) -> Result<Filter, StorageError> {
        let oid = parse_object_id(id)?;
        self.filters
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|err| map_driver_error("find filter", err))?
            .ok_or_else(|| StorageError::not_found(id.as_str()))?
            .into_filter()
    }

    async fn delete(&self, id: &RecordId) -> Result<(), StorageError> {
        let oid = parse_object_id(id)?;
        let result = self
            .filters
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|err| map_driver_error("delete filter", err))?;
        affected(result.deleted_count, id)
    }
}
