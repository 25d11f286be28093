//! Durable local store contract and SQLite slot implementation.
//!
//! # Responsibility
//! - Persist the list of locally-created user records as one JSON payload
//!   under a well-known slot.
//! - Keep SQL and JSON codec details inside the persistence boundary.
//!
//! # Invariants
//! - `save` replaces the whole payload in a single statement; partial
//!   writes are never observable.
//! - An absent slot is an empty list, not an error; a present-but-corrupt
//!   slot is a `Decode` error for the caller to police.

use crate::db::DbError;
use crate::model::user::UserRecord;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot name holding the locally-created user list.
pub const LOCAL_USERS_SLOT: &str = "localUsers";

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable local store failure.
#[derive(Debug)]
pub enum StoreError {
    /// Slot payload exists but is not a valid user list.
    Decode { detail: String },
    /// Outgoing list could not be serialized. Practically unreachable for
    /// this record shape, kept so the write path never panics.
    Encode { detail: String },
    /// SQLite read/write failure.
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode { detail } => {
                write!(
                    f,
                    "stored user list in `{LOCAL_USERS_SLOT}` is corrupt: {detail}"
                )
            }
            Self::Encode { detail } => write!(f, "user list failed to serialize: {detail}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode { .. } => None,
            Self::Encode { .. } => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Injected persistence seam for the locally-created record list.
///
/// Implementations return honest errors; the reconciliation engine decides
/// whether those are swallowed or surfaced (its storage policy), so that
/// persistence failures never block a working session.
pub trait LocalUserRepository {
    /// Loads the stored list; an absent slot yields an empty list.
    fn load(&self) -> StoreResult<Vec<UserRecord>>;
    /// Replaces the stored list wholesale.
    fn save(&self, users: &[UserRecord]) -> StoreResult<()>;
}

/// SQLite-backed slot store.
pub struct SqliteLocalUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLocalUserRepository<'conn> {
    /// Wraps a migrated/ready connection from [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl LocalUserRepository for SqliteLocalUserRepository<'_> {
    fn load(&self) -> StoreResult<Vec<UserRecord>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE slot = ?1;",
                params![LOCAL_USERS_SLOT],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(payload) => serde_json::from_str(&payload).map_err(|err| StoreError::Decode {
                detail: err.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, users: &[UserRecord]) -> StoreResult<()> {
        let payload = serde_json::to_string(users).map_err(|err| StoreError::Encode {
            detail: err.to_string(),
        })?;

        self.conn.execute(
            "INSERT INTO slots (slot, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(slot) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![LOCAL_USERS_SLOT, payload],
        )?;

        Ok(())
    }
}
