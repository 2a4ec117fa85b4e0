//! # Opportunistic membership filter
//!
//! The opposite of a Bloom filter: answers "have I seen this identifier before?" without ever
//! reporting a false positive, at the cost of occasional false negatives. Each identifier hashes to
//! one slot of a fixed power-of-two array and replaces whatever was there, so a later identifier
//! landing on the same slot makes the filter forget the earlier one.
//!
//! Useful for dedup and repeat-delivery detection where an exact set costs too much memory and a
//! Bloom filter's false positives would drop real work.
//!
//! All operations take `&self` and are lock-free; a filter can be shared across threads as is.
//! Slots are placed with MurmurHash3 x86_32 (seed 0) unless another [`HashFn`] is supplied.

mod filter;
mod hash;
mod murmur3;
mod slot;
mod tracking;

pub use filter::Exchange;
pub use filter::FilterError;
pub use filter::OppoFilter;
pub use filter::Outcome;
pub use filter::MAX_FILTER_SIZE;
pub use hash::hash_djb2;
pub use hash::murmur3_32;
pub use hash::HashFn;
pub use hash::DEFAULT_HASH;
pub use tracking::SizeTrackingFilter;
