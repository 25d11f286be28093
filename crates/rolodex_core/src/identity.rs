//! Record identity scheme: minting local ids and classifying origin.
//!
//! # Responsibility
//! - Mint identifiers for locally-created records from the wall clock.
//! - Classify an id as local-origin or remote-origin.
//!
//! # Invariants
//! - `generate_id` is monotonically non-decreasing within a process, even
//!   when the wall clock steps backwards.
//! - Classification is derived, never stored: an id is local iff it is
//!   newer than the 24-hour window below.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Window after which a timestamp id stops classifying as local (24h in ms).
pub const LOCAL_ID_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// Mints an id for a locally-created record.
///
/// Returns the current epoch-millisecond timestamp, clamped so consecutive
/// calls never go backwards. Two calls within the same millisecond return
/// the same id; that collision is an accepted limitation of the scheme and
/// is not mitigated further.
pub fn generate_id() -> i64 {
    let now = now_epoch_ms();
    let previous = LAST_ISSUED.fetch_max(now, Ordering::SeqCst);
    previous.max(now)
}

/// Returns whether `id` classifies as local-origin at time `now_ms`.
///
/// The rule is a heuristic: any id numerically newer than `now_ms - 24h`
/// counts as local. Freshly minted ids always classify local; a remote id
/// would only misclassify if the remote source ever issued ids in the
/// epoch-millisecond range, which the demo API does not.
pub fn is_local(id: i64, now_ms: i64) -> bool {
    id > now_ms - LOCAL_ID_WINDOW_MS
}

#[cfg(test)]
mod tests {
    use super::{generate_id, is_local, now_epoch_ms, LOCAL_ID_WINDOW_MS};

    #[test]
    fn generated_id_classifies_local_immediately() {
        let id = generate_id();
        assert!(is_local(id, now_epoch_ms()));
    }

    #[test]
    fn generated_ids_never_decrease() {
        let mut previous = 0;
        for _ in 0..64 {
            let id = generate_id();
            assert!(id >= previous);
            previous = id;
        }
    }

    #[test]
    fn small_remote_ids_classify_remote() {
        let now = now_epoch_ms();
        for id in [1, 7, 10] {
            assert!(!is_local(id, now));
        }
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let now = now_epoch_ms();
        let boundary = now - LOCAL_ID_WINDOW_MS;
        assert!(!is_local(boundary, now));
        assert!(is_local(boundary + 1, now));
    }
}
