//! BSON document shapes for the document-store adapter.
//!
//! Documents mirror the domain records but keep the storage-native
//! `ObjectId` under `_id` and store the index limit as `indexlimit`.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::ports::StorageError;
use crate::domain::{
    Filter, FilterDraft, FilterPattern, Index, RecordId, User, UserDraft,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct IndexDocument {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub login: String,
    pub password: String,
    #[serde(rename = "indexlimit")]
    pub index_limit: i64,
    #[serde(default)]
    pub indexes: Vec<IndexDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct FilterDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub regex: String,
}

impl From<Index> for IndexDocument {
    fn from(value: Index) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<IndexDocument> for Index {
    fn from(value: IndexDocument) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl UserDocument {
    /// Document for `draft` without an `_id`, so the server assigns one.
    pub fn from_draft(draft: UserDraft) -> Self {
        let UserDraft {
            login,
            password,
            index_limit,
            indexes,
        } = draft;
        Self {
            id: None,
            login,
            password,
            index_limit: i64::from(index_limit),
            indexes: indexes.into_iter().map(IndexDocument::from).collect(),
        }
    }

    pub fn into_user(self) -> Result<User, StorageError> {
        let id = self
            .id
            .ok_or_else(|| StorageError::backend("stored user has no _id"))?;
        let index_limit = u32::try_from(self.index_limit).map_err(|_| {
            StorageError::backend(format!(
                "stored user {id} has out-of-range index limit {}",
                self.index_limit
            ))
        })?;
        Ok(UserDraft {
            login: self.login,
            password: self.password,
            index_limit,
            indexes: self.indexes.into_iter().map(Index::from).collect(),
        }
        .with_id(RecordId::new(id.to_hex())))
    }
}

impl FilterDocument {
    pub fn from_draft(draft: &FilterDraft) -> Self {
        Self {
            id: None,
            regex: draft.regex.as_str().to_owned(),
        }
    }

    pub fn into_filter(self) -> Result<Filter, StorageError> {
        let id = self
            .id
            .ok_or_else(|| StorageError::backend("stored filter has no _id"))?;
        let regex = FilterPattern::parse(&self.regex)
            .map_err(|err| StorageError::backend(format!("stored filter {id}: {err}")))?;
        Ok(FilterDraft { regex }.with_id(RecordId::new(id.to_hex())))
    }
}
