//! Core domain logic for Rolodex, a user-directory client.
//! This crate is the single source of truth for reconciliation invariants.

pub mod db;
pub mod identity;
pub mod logging;
pub mod model;
pub mod query;
pub mod remote;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::user::{
    Address, Company, Geo, NewUser, UserPatch, UserRecord, UserValidationError, NOT_PROVIDED,
};
pub use query::view::{SortField, SortOrder};
pub use remote::{
    FetchError, FetchResult, HttpRemoteSource, RemoteConfig, RemoteSource,
};
pub use repo::local_user_repo::{
    LocalUserRepository, SqliteLocalUserRepository, StoreError, StoreResult,
};
pub use service::directory::{DirectoryError, StoragePolicy, StorageWarning, UserDirectory};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
