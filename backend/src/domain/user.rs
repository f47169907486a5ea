//! User accounts managed by the admin service.
//!
//! A user owns a login, a plaintext password, a limit on the number of search
//! indexes it may own and the list of indexes it currently owns.
//!
//! ## Invariants
//! - A [`UserDraft`] has no identifier; a [`User`] always carries the one the
//!   storage backend assigned.
//! - `indexes` is always a list, empty when the client sent none.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RecordId;

const REDACTED: &str = "***";

/// Search index owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub id: String,
    pub name: String,
}

/// Mutable user fields, before the storage backend assigns an identifier.
#[derive(Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub login: String,
    pub password: String,
    pub index_limit: u32,
    pub indexes: Vec<Index>,
}

impl UserDraft {
    /// Attach the identifier assigned by storage.
    pub fn with_id(self, id: RecordId) -> User {
        let Self {
            login,
            password,
            index_limit,
            indexes,
        } = self;
        User {
            id,
            login,
            password,
            index_limit,
            indexes,
        }
    }
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("login", &self.login)
            .field("password", &REDACTED)
            .field("index_limit", &self.index_limit)
            .field("indexes", &self.indexes)
            .finish()
    }
}

/// Persisted user.
///
/// Serializes to the wire shape
/// `{"id","login","password","index_limit","indexes"}`. The password is kept
/// and returned in plaintext; `Debug` output redacts it so it never reaches
/// logs.
///
/// # Examples
/// ```
/// use search_admin::domain::{RecordId, UserDraft};
///
/// let user = UserDraft {
///     login: "mary".into(),
///     password: "12345".into(),
///     index_limit: 5,
///     indexes: Vec::new(),
/// }
/// .with_id(RecordId::new("1"));
/// assert_eq!(user.id.as_str(), "1");
/// assert!(!format!("{user:?}").contains("12345"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub login: String,
    pub password: String,
    pub index_limit: u32,
    #[serde(default)]
    pub indexes: Vec<Index>,
}

impl User {
    /// Split the user into its identifier and mutable fields.
    pub fn into_parts(self) -> (RecordId, UserDraft) {
        let Self {
            id,
            login,
            password,
            index_limit,
            indexes,
        } = self;
        (
            id,
            UserDraft {
                login,
                password,
                index_limit,
                indexes,
            },
        )
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("password", &REDACTED)
            .field("index_limit", &self.index_limit)
            .field("indexes", &self.indexes)
            .finish()
    }
}
