//! # Opportunistic filter
//!
//! A fixed array of slots, each holding the last identifier whose hash landed on it. Testing an
//! identifier swaps it into its slot and compares it against the identifier it displaced:
//!
//! - equal bytes mean the identifier was seen before and has not been displaced since (`contains`)
//! - different bytes mean another identifier owned the slot (`collision`), and the answer may be a
//!   false negative
//! - an empty slot means neither
//!
//! A `contains` answer is never wrong. A `false` answer may be.

use crate::hash::{HashFn, DEFAULT_HASH};
use crate::slot::SlotArray;

use core::fmt;
use tracing::{debug, trace, warn};

/// Largest size a filter may be created with. Checked against the requested size, before rounding.
pub const MAX_FILTER_SIZE: usize = 1 << 30;

/// Possible errors when creating a filter
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// Requested size was zero or negative
    #[error("filter cannot have a zero or negative size")]
    SizeTooSmall,
    /// Requested size exceeds `MAX_FILTER_SIZE`
    #[error("size given too large to round to a power of 2")]
    SizeTooLarge,
}

/// Result of testing one identifier
///
/// At most one flag is set. Neither set means the slot was empty and the identifier is a definite
/// first sighting.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Outcome {
    /// The slot already held exactly these bytes
    pub contains: bool,
    /// The slot held a different identifier, which has now been displaced
    pub collision: bool,
}

impl Outcome {
    fn classify(previous: Option<&[u8]>, id: &[u8]) -> Outcome {
        match previous {
            None => Outcome::default(),
            Some(old) => {
                let contains = old == id;
                Outcome {
                    contains,
                    collision: !contains,
                }
            }
        }
    }

    /// The slot was empty before this call
    pub fn is_fresh(&self) -> bool {
        !self.contains && !self.collision
    }
}

/// An [`Outcome`] together with the identifier the call displaced from its slot
///
/// The previous occupant is owned by the caller and is no longer reachable from the filter.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Exchange {
    pub outcome: Outcome,
    pub previous: Option<Box<[u8]>>,
}

/// A membership filter with no false positives
///
/// Safe to share between threads (`&self` everywhere). Operations on one slot are linearizable;
/// operations on different slots are unordered with respect to each other.
pub struct OppoFilter {
    slots: SlotArray,
    index_mask: u32,
    hash: HashFn,
}

impl OppoFilter {
    /// Create a filter using [`DEFAULT_HASH`] (MurmurHash3 x86_32, seed 0)
    ///
    /// The size is rounded up to the next power of two so slot indices can be taken with a mask.
    /// Fails with `SizeTooSmall` for `size <= 0` and `SizeTooLarge` for `size > MAX_FILTER_SIZE`.
    pub fn new(size: i64) -> Result<OppoFilter, FilterError> {
        OppoFilter::with_hash(size, DEFAULT_HASH)
    }

    /// Create a filter that places identifiers with `hash`
    pub fn with_hash(size: i64, hash: HashFn) -> Result<OppoFilter, FilterError> {
        if size <= 0 {
            warn!(size, "rejected filter size");
            return Err(FilterError::SizeTooSmall);
        }
        if size > MAX_FILTER_SIZE as i64 {
            warn!(size, max = MAX_FILTER_SIZE, "rejected filter size");
            return Err(FilterError::SizeTooLarge);
        }
        let capacity = (size as usize).next_power_of_two();
        debug!(requested = size, capacity, "creating filter");
        Ok(OppoFilter {
            slots: SlotArray::new(capacity),
            // capacity <= 2^30, so the mask fits in 32 bits
            index_mask: (capacity - 1) as u32,
            hash,
        })
    }

    /// Number of slots, fixed at construction
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Slot an identifier maps to. Pure; does not touch the slots.
    pub fn slot_index(&self, id: &[u8]) -> usize {
        ((self.hash)(id) & self.index_mask) as usize
    }

    /// Record `id` and report whether its slot already held it
    ///
    /// The filter keeps its own copy of `id`.
    pub fn test_and_insert(&self, id: &[u8]) -> Outcome {
        self.exchange(id).outcome
    }

    /// Like [`test_and_insert`](Self::test_and_insert), discarding the collision flag
    ///
    /// This is not a read-only probe: the identifier is inserted as a side effect, exactly as with
    /// `test_and_insert`.
    pub fn contains_and_insert(&self, id: &[u8]) -> bool {
        self.test_and_insert(id).contains
    }

    /// Record `id` and hand back the identifier it displaced
    pub fn exchange(&self, id: &[u8]) -> Exchange {
        let index = self.slot_index(id);
        let previous = self.slots.get_and_set(index, Box::from(id));
        let outcome = Outcome::classify(previous.as_deref(), id);
        if outcome.collision {
            trace!(index, "slot collision");
        }
        Exchange { outcome, previous }
    }
}

impl fmt::Debug for OppoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OppoFilter")
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

/* -------------------- Unit Tests -------------------- */
