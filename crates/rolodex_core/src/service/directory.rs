//! User directory reconciliation engine.
//!
//! # Responsibility
//! - Own the authoritative in-memory collection, merged from the durable
//!   local store and the remote source.
//! - Funnel every mutation through one place and mirror local-classified
//!   changes into the durable store.
//! - Hold the search term and sort state the presentation layer renders.
//!
//! # Invariants
//! - Merge order is local records first, then remote records, each group
//!   in its source order.
//! - Record ids are unique in the collection by construction of the two id
//!   spaces; same-millisecond local creates are the accepted exception.
//! - The durable store only ever receives locally-classified records.
//! - A failed remote fetch leaves the collection untouched; a failed store
//!   interaction never aborts an operation.

use crate::identity;
use crate::model::user::{NewUser, UserPatch, UserRecord};
use crate::query::view::{filter_users, sort_users, SortField, SortOrder};
use crate::remote::{FetchError, RemoteSource};
use crate::repo::local_user_repo::LocalUserRepository;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// How the engine treats durable-store failures.
///
/// Either way the failure is logged and the operation continues; local
/// persistence is best-effort, never a hard dependency for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoragePolicy {
    /// Log and move on. Matches per-browser-storage semantics where a full
    /// or corrupt store silently degrades to a memory-only session.
    #[default]
    SwallowAndLog,
    /// Log, move on, and keep the most recent failure readable through
    /// [`UserDirectory::last_storage_warning`].
    SurfaceWarning,
}

/// Non-blocking note that persistence degraded during an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageWarning {
    /// The stored local list could not be read; an empty list was used.
    LoadFailed(String),
    /// The local list could not be written; changes may not survive a
    /// restart.
    SaveFailed(String),
}

impl Display for StorageWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadFailed(detail) => write!(f, "local records could not be read: {detail}"),
            Self::SaveFailed(detail) => write!(f, "local records could not be saved: {detail}"),
        }
    }
}

/// Engine misuse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// A mutation arrived while an initialize was still in flight.
    LoadInProgress,
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadInProgress => {
                write!(f, "directory load in progress; mutations are disabled until it settles")
            }
        }
    }
}

impl Error for DirectoryError {}

/// Reconciliation engine over an injected store and remote source.
///
/// The composition root owns one instance and passes it to the presentation
/// layer; neither the store nor the remote source is reachable any other
/// way.
pub struct UserDirectory<S: LocalUserRepository, R: RemoteSource> {
    store: S,
    remote: R,
    policy: StoragePolicy,
    users: Vec<UserRecord>,
    loading: bool,
    last_error: Option<FetchError>,
    last_storage_warning: Option<StorageWarning>,
    search_term: String,
    sort_field: Option<SortField>,
    sort_order: SortOrder,
}

impl<S: LocalUserRepository, R: RemoteSource> UserDirectory<S, R> {
    /// Creates an engine with the default swallow-and-log storage policy.
    pub fn new(store: S, remote: R) -> Self {
        Self::with_policy(store, remote, StoragePolicy::default())
    }

    pub fn with_policy(store: S, remote: R, policy: StoragePolicy) -> Self {
        Self {
            store,
            remote,
            policy,
            users: Vec::new(),
            loading: false,
            last_error: None,
            last_storage_warning: None,
            search_term: String::new(),
            sort_field: None,
            sort_order: SortOrder::default(),
        }
    }

    /// Rebuilds the collection from the remote baseline plus stored locals.
    ///
    /// Local records come first, then remote records, preserving each
    /// group's internal order. On fetch failure the collection is left
    /// untouched and the error is recorded for the retry affordance; a
    /// store read failure only degrades to "no local records".
    pub fn initialize(&mut self) -> Result<(), FetchError> {
        self.loading = true;
        self.last_error = None;
        info!("event=directory_init module=directory status=start");

        match self.remote.fetch_all() {
            Ok(remote_users) => {
                let mut merged = self.load_local_or_empty();
                let local_count = merged.len();
                let remote_count = remote_users.len();
                merged.extend(remote_users);

                self.users = merged;
                self.loading = false;
                info!(
                    "event=directory_init module=directory status=ok local={local_count} remote={remote_count}"
                );
                Ok(())
            }
            Err(err) => {
                self.loading = false;
                self.last_error = Some(err.clone());
                error!("event=directory_init module=directory status=error error={err}");
                Err(err)
            }
        }
    }

    /// Creates a local record and inserts it at the front of the collection
    /// and of the durable list.
    ///
    /// Input is taken as already validated; the creation boundary owns
    /// validation.
    pub fn create(&mut self, input: &NewUser) -> Result<UserRecord, DirectoryError> {
        self.ensure_idle()?;

        let record = UserRecord::new_local(identity::generate_id(), input);
        self.users.insert(0, record.clone());

        let mut stored = self.load_local_or_empty();
        stored.insert(0, record.clone());
        self.persist_local(&stored);

        info!(
            "event=user_create module=directory status=ok id={} username={}",
            record.id, record.username
        );
        Ok(record)
    }

    /// Applies a shallow patch to the record with `id`.
    ///
    /// Unknown ids are a logged no-op; the caller is expected to have
    /// verified existence. Local-classified records are also patched in the
    /// durable list; remote-origin records change in memory only and revert
    /// on the next [`Self::initialize`].
    pub fn update(&mut self, id: i64, patch: &UserPatch) -> Result<(), DirectoryError> {
        self.ensure_idle()?;

        let Some(record) = self.users.iter_mut().find(|user| user.id == id) else {
            warn!("event=user_update module=directory status=skip reason=not_found id={id}");
            return Ok(());
        };
        record.apply_patch(patch);

        if identity::is_local(id, identity::now_epoch_ms()) {
            let mut stored = self.load_local_or_empty();
            for user in stored.iter_mut().filter(|user| user.id == id) {
                user.apply_patch(patch);
            }
            self.persist_local(&stored);
            info!("event=user_update module=directory status=ok id={id} origin=local");
        } else {
            info!("event=user_update module=directory status=ok id={id} origin=remote scope=memory");
        }
        Ok(())
    }

    /// Removes the record with `id` from the collection.
    ///
    /// Local-classified ids are also removed from the durable list;
    /// remote-origin records reappear on the next [`Self::initialize`].
    pub fn delete(&mut self, id: i64) -> Result<(), DirectoryError> {
        self.ensure_idle()?;

        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        if self.users.len() == before {
            warn!("event=user_delete module=directory status=skip reason=not_found id={id}");
        }

        // The durable list is filtered even when the in-memory collection
        // had no match.
        if identity::is_local(id, identity::now_epoch_ms()) {
            let stored = self.load_local_or_empty();
            let remaining: Vec<UserRecord> =
                stored.into_iter().filter(|user| user.id != id).collect();
            self.persist_local(&remaining);
            info!("event=user_delete module=directory status=ok id={id} origin=local");
        } else {
            info!("event=user_delete module=directory status=ok id={id} origin=remote scope=memory");
        }
        Ok(())
    }

    /// Sets the live search term; empty shows everything.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Selects the sort field; re-selecting the current field toggles the
    /// direction, switching fields resets to ascending.
    pub fn set_sort_by(&mut self, field: SortField) {
        if self.sort_field == Some(field) {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_field = Some(field);
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Clears the sort selection and resets the direction to ascending.
    pub fn clear_sort(&mut self) {
        self.sort_field = None;
        self.sort_order = SortOrder::Asc;
    }

    /// Clears the recorded fetch error once the caller has shown it.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Clears the recorded storage warning once the caller has shown it.
    pub fn clear_storage_warning(&mut self) {
        self.last_storage_warning = None;
    }

    /// The collection filtered by the search term, then sorted; what a
    /// presentation layer should render.
    pub fn visible_users(&self) -> Vec<&UserRecord> {
        sort_users(
            filter_users(&self.users, &self.search_term),
            self.sort_field,
            self.sort_order,
        )
    }

    /// Looks up one record by id, local or remote.
    pub fn find_user(&self, id: i64) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == id)
    }

    /// The unfiltered collection in merge order.
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn last_storage_warning(&self) -> Option<&StorageWarning> {
        self.last_storage_warning.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_field(&self) -> Option<SortField> {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    fn ensure_idle(&self) -> Result<(), DirectoryError> {
        if self.loading {
            return Err(DirectoryError::LoadInProgress);
        }
        Ok(())
    }

    fn load_local_or_empty(&mut self) -> Vec<UserRecord> {
        match self.store.load() {
            Ok(users) => users,
            Err(err) => {
                error!("event=local_store_load module=directory status=error error={err}");
                self.note_storage_failure(StorageWarning::LoadFailed(err.to_string()));
                Vec::new()
            }
        }
    }

    fn persist_local(&mut self, users: &[UserRecord]) {
        if let Err(err) = self.store.save(users) {
            error!("event=local_store_save module=directory status=error error={err}");
            self.note_storage_failure(StorageWarning::SaveFailed(err.to_string()));
        }
    }

    fn note_storage_failure(&mut self, warning: StorageWarning) {
        if self.policy == StoragePolicy::SurfaceWarning {
            self.last_storage_warning = Some(warning);
        }
    }
}
