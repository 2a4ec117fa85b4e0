//! A filter that also keeps approximate counts of what it holds

use crate::filter::{Exchange, FilterError, OppoFilter, Outcome};
use crate::hash::HashFn;

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Like [`OppoFilter`], but additionally tracks how many identifiers were added and how many bytes
/// the current occupants take up
///
/// Both counters are updated independently after each exchange. A reader may see one reflect a call
/// before the other does.
pub struct SizeTrackingFilter {
    underlying: OppoFilter,
    num_entries: AtomicU64,
    bytes_used: AtomicU64,
}

impl SizeTrackingFilter {
    pub fn new(size: i64) -> Result<SizeTrackingFilter, FilterError> {
        Ok(SizeTrackingFilter::wrap(OppoFilter::new(size)?))
    }

    pub fn with_hash(size: i64, hash: HashFn) -> Result<SizeTrackingFilter, FilterError> {
        Ok(SizeTrackingFilter::wrap(OppoFilter::with_hash(size, hash)?))
    }

    fn wrap(underlying: OppoFilter) -> SizeTrackingFilter {
        SizeTrackingFilter {
            underlying,
            num_entries: AtomicU64::new(0),
            bytes_used: AtomicU64::new(0),
        }
    }

    pub fn size(&self) -> usize {
        self.underlying.size()
    }

    pub fn slot_index(&self, id: &[u8]) -> usize {
        self.underlying.slot_index(id)
    }

    /// See [`OppoFilter::test_and_insert`]
    pub fn test_and_insert(&self, id: &[u8]) -> Outcome {
        self.exchange(id).outcome
    }

    /// Mutates like [`test_and_insert`](Self::test_and_insert); not a read-only probe
    pub fn contains_and_insert(&self, id: &[u8]) -> bool {
        self.test_and_insert(id).contains
    }

    /// See [`OppoFilter::exchange`]
    pub fn exchange(&self, id: &[u8]) -> Exchange {
        let exchange = self.underlying.exchange(id);
        if exchange.outcome.is_fresh() {
            self.num_entries.fetch_add(1, Ordering::Relaxed);
        }
        let old_len = exchange.previous.as_ref().map_or(0, |old| old.len());
        let delta = id.len() as i64 - old_len as i64;
        // Atomic add wraps, so a negative delta subtracts
        self.bytes_used.fetch_add(delta as u64, Ordering::Relaxed);
        exchange
    }

    /// Number of identifiers added to an empty slot
    ///
    /// Collisions neither add nor remove, so under churn this counts fresh inserts ever observed
    /// rather than current members.
    pub fn count_entries(&self) -> u64 {
        self.num_entries.load(Ordering::Relaxed)
    }

    /// Total length of the identifiers currently held
    pub fn bytes_used(&self) -> u64 {
        self.bytes_used.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for SizeTrackingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeTrackingFilter")
            .field("size", &self.size())
            .field("num_entries", &self.count_entries())
            .field("bytes_used", &self.bytes_used())
            .finish()
    }
}

/* -------------------- Unit Tests -------------------- */
