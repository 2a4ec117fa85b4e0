//! Atomic slot storage
//!
//! Each slot owns at most one identifier behind an `AtomicPtr`. A null pointer is an empty slot.
//! The only mutation is [`Slot::get_and_set`], which moves a new occupant in and hands the previous
//! one back to the caller as an owned value.

use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

/// An identifier owned by a slot
pub(crate) type Occupant = Box<[u8]>;

pub(crate) struct Slot {
    occupant: AtomicPtr<Occupant>,
}

impl Slot {
    fn empty() -> Slot {
        Slot {
            occupant: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Store `id` and return whatever the slot held immediately before
    ///
    /// Exchanges on one slot serialize in the order their compare-exchange succeeds. A pointer leaves
    /// the slot through exactly one successful exchange, and only that caller rebuilds the box, so
    /// an occupant is never freed twice or read after it has been handed out.
    pub(crate) fn get_and_set(&self, id: Occupant) -> Option<Occupant> {
        let new = Box::into_raw(Box::new(id));
        // The loaded pointer is never dereferenced before the exchange succeeds, so Relaxed is enough here
        let mut current = self.occupant.load(Ordering::Relaxed);
        loop {
            match self.occupant.compare_exchange_weak(
                current,
                new,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(previous) => {
                    current = previous;
                    break;
                }
                Err(actual) => {
                    current = actual;
                    core::hint::spin_loop();
                }
            }
        }
        if current.is_null() {
            None
        } else {
            // SAFETY: `current` came from `Box::into_raw` in an earlier exchange and the successful
            // compare-exchange above removed it from the slot, making this call its sole owner.
            Some(*unsafe { Box::from_raw(current) })
        }
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        let current = *self.occupant.get_mut();
        if !current.is_null() {
            // SAFETY: `&mut self` rules out concurrent exchanges; the slot still owns `current`.
            drop(unsafe { Box::from_raw(current) });
        }
    }
}

/// Fixed-length array of slots, indexed by a masked hash
pub(crate) struct SlotArray {
    slots: Box<[Slot]>,
}

impl SlotArray {
    /// All slots start empty
    pub(crate) fn new(capacity: usize) -> SlotArray {
        SlotArray {
            slots: (0..capacity).map(|_| Slot::empty()).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Callers guarantee `index < len()`; the filter masks every index with `len() - 1`
    pub(crate) fn get_and_set(&self, index: usize, id: Occupant) -> Option<Occupant> {
        self.slots[index].get_and_set(id)
    }
}

/* -------------------- Unit Tests -------------------- */
