//! Key-value adapter backed by Redis.
//!
//! Only users are stored here. Each user lives as a JSON string under
//! `user:<id>`; ids come from `INCR user_id_seq` and every live id is a member
//! of the `user_ids` set so listings need no key scan.

mod pool;

use async_trait::async_trait;
use bb8_redis::redis::{self, AsyncCommands, ExistenceCheck, SetOptions};
use tracing::{debug, info};

use crate::domain::ports::{StorageError, UserRepository};
use crate::domain::{IdFormat, RecordId, User, UserDraft};

pub use self::pool::{PoolError, RedisPool, RedisPoolConfig};
use super::ConnectError;

const USER_ID_SEQUENCE: &str = "user_id_seq";
const USER_IDS: &str = "user_ids";

fn user_key(id: &str) -> String {
    format!("user:{id}")
}

fn map_redis_error(operation: &'static str, error: redis::RedisError) -> StorageError {
    debug!(operation, kind = ?error.kind(), "key-value operation failed");
    StorageError::backend(format!("{operation}: {error}"))
}

/// Reject ids the counter could never have produced.
fn check_counter_id(id: &RecordId) -> Result<(), StorageError> {
    if IdFormat::Counter.accepts(id.as_str()) {
        Ok(())
    } else {
        Err(StorageError::invalid_id(id.as_str()))
    }
}

/// `SET ... XX` answers nil when the key did not exist.
fn replaced(reply: Option<String>, id: &RecordId) -> Result<(), StorageError> {
    match reply {
        Some(_) => Ok(()),
        None => Err(StorageError::not_found(id.as_str())),
    }
}

fn removed(count: i64, id: &RecordId) -> Result<(), StorageError> {
    if count == 0 {
        Err(StorageError::not_found(id.as_str()))
    } else {
        Ok(())
    }
}

fn encode_user(user: &User) -> Result<String, StorageError> {
    serde_json::to_string(user)
        .map_err(|err| StorageError::backend(format!("encode user {}: {err}", user.id)))
}

fn decode_user(id: &str, raw: &str) -> Result<User, StorageError> {
    serde_json::from_str(raw)
        .map_err(|err| StorageError::backend(format!("decode user {id}: {err}")))
}

/// Member ids in ascending numeric order; members that are not counter values
/// sort last, lexically.
fn sort_ids(ids: &mut [String]) {
    ids.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
}

/// Redis-backed user storage.
#[derive(Clone)]
pub struct RedisStorage {
    pool: RedisPool,
}

impl RedisStorage {
    /// Build the pool and verify the server answers `PING`.
    ///
    /// # Errors
    /// Returns [`ConnectError`] when the address is invalid or the server is
    /// unreachable.
    pub async fn connect(config: &RedisPoolConfig) -> Result<Self, ConnectError> {
        let pool = RedisPool::new(config).await?;
        {
            let mut conn = pool.get().await?;
            redis::cmd("PING")
                .query_async::<String>(&mut *conn)
                .await
                .map_err(|err| ConnectError::unreachable("redis", err.to_string()))?;
        }
        info!(addr = config.addr(), database = config.database(), "connected to key-value store");
        Ok(Self { pool })
    }
}

#[async_trait]
impl UserRepository for RedisStorage {
    async fn create(&self, draft: UserDraft) -> Result<User, StorageError> {
        let mut conn = self.pool.get().await?;
        let next: u64 = conn
            .incr(USER_ID_SEQUENCE, 1_u64)
            .await
            .map_err(|err| map_redis_error("allocate user id", err))?;
        let user = draft.with_id(RecordId::new(next.to_string()));
        let payload = encode_user(&user)?;
        redis::pipe()
            .atomic()
            .set(user_key(user.id.as_str()), payload)
            .ignore()
            .sadd(USER_IDS, user.id.as_str())
            .ignore()
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|err| map_redis_error("store user", err))?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StorageError> {
        let mut conn = self.pool.get().await?;
        let mut ids: Vec<String> = conn
            .smembers(USER_IDS)
            .await
            .map_err(|err| map_redis_error("list user ids", err))?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sort_ids(&mut ids);
        let keys: Vec<String> = ids.iter().map(|id| user_key(id)).collect();
        let values: Vec<Option<String>> = conn
            .mget(&keys)
            .await
            .map_err(|err| map_redis_error("read users", err))?;

        // A member whose key vanished was deleted between SMEMBERS and MGET.
        ids.iter()
            .zip(values)
            .filter_map(|(id, raw)| raw.map(|raw| decode_user(id, &raw)))
            .collect()
    }

    async fn get(&self, id: &RecordId) -> Result<User, StorageError> {
        check_counter_id(id)?;
        let mut conn = self.pool.get().await?;
        let raw: Option<String> = conn
            .get(user_key(id.as_str()))
            .await
            .map_err(|err| map_redis_error("read user", err))?;
        let raw = raw.ok_or_else(|| StorageError::not_found(id.as_str()))?;
        decode_user(id.as_str(), &raw)
    }

    async fn update(&self, user: &User) -> Result<(), StorageError> {
        check_counter_id(&user.id)?;
        let payload = encode_user(user)?;
        let mut conn = self.pool.get().await?;
        let options = SetOptions::default().conditional_set(ExistenceCheck::XX);
        let reply: Option<String> = conn
            .set_options(user_key(user.id.as_str()), payload, options)
            .await
            .map_err(|err| map_redis_error("replace user", err))?;
        replaced(reply, &user.id)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), StorageError> {
        check_counter_id(id)?;
        let mut conn = self.pool.get().await?;
        let (count, _): (i64, i64) = redis::pipe()
            .atomic()
            .del(user_key(id.as_str()))
            .srem(USER_IDS, id.as_str())
            .query_async(&mut *conn)
            .await
            .map_err(|err| map_redis_error("delete user", err))?;
        removed(count, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Index;
    use rstest::rstest;

    fn sample_user(id: &str) -> User {
        UserDraft {
            login: "mary".into(),
            password: "12345".into(),
            index_limit: 5,
            indexes: vec![Index {
                id: "aaa".into(),
                name: "bbb".into(),
            }],
        }
        .with_id(RecordId::new(id))
    }

    #[rstest]
    fn user_key_is_namespaced() {
        assert_eq!(user_key("42"), "user:42");
    }

    #[rstest]
    #[case("1", true)]
    #[case("18446744073709551615", true)]
    #[case("66d8420df6e5311a791e0a08", false)]
    #[case("-1", false)]
    #[case("", false)]
    fn counter_ids_are_checked_before_io(#[case] raw: &str, #[case] ok: bool) {
        let result = check_counter_id(&RecordId::new(raw));
        if ok {
            assert!(result.is_ok());
        } else {
            assert_eq!(result, Err(StorageError::invalid_id(raw)));
        }
    }

    #[rstest]
    #[case(Some("OK".to_owned()), Ok(()))]
    #[case(None, Err(StorageError::not_found("7")))]
    fn conditional_replace_reply(
        #[case] reply: Option<String>,
        #[case] expected: Result<(), StorageError>,
    ) {
        assert_eq!(replaced(reply, &RecordId::new("7")), expected);
    }

    #[rstest]
    #[case(1, Ok(()))]
    #[case(0, Err(StorageError::not_found("7")))]
    fn delete_count(#[case] count: i64, #[case] expected: Result<(), StorageError>) {
        assert_eq!(removed(count, &RecordId::new("7")), expected);
    }

    #[rstest]
    fn transport_failure_is_a_backend_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let err = map_redis_error("read user", redis::RedisError::from(io));
        let StorageError::Backend { message } = err else {
            panic!("expected backend error, got {err:?}");
        };
        assert!(message.starts_with("read user: "), "{message}");
    }

    #[rstest]
    fn stored_user_round_trips_through_json() {
        let user = sample_user("7");
        let raw = encode_user(&user).expect("encode");
        assert_eq!(decode_user("7", &raw).expect("decode"), user);
    }

    #[rstest]
    fn corrupt_payload_is_a_backend_error() {
        let err = decode_user("7", "{not json").expect_err("corrupt");
        assert!(matches!(err, StorageError::Backend { .. }));
    }

    #[rstest]
    fn ids_sort_numerically() {
        let mut ids = vec!["10".to_owned(), "2".to_owned(), "x".to_owned(), "1".to_owned()];
        sort_ids(&mut ids);
        assert_eq!(ids, ["1", "2", "10", "x"]);
    }
}
