//! A 64-bit word packing a 48-bit node address and a 16-bit version tag.
//!
//! Mainstream 64-bit platforms (x86-64, AArch64 in their standard
//! configurations) address user-space memory with 48 bits, leaving the top
//! 16 bits of a pointer-sized word free. Every successful atomic update to
//! a tagged-pointer field bumps the version, so a thread that reloads the
//! same address later can tell whether the field was untouched, touched and
//! restored to the same address, or genuinely unchanged — closing the ABA
//! window that a bare `compare_exchange` on the address alone would leave
//! open.

#[cfg(loom)]
use loom::sync::atomic::{AtomicU64, Ordering};
#[cfg(not(loom))]
use std::sync::atomic::{AtomicU64, Ordering};

use std::marker::PhantomData;

const PTR_MASK: u64 = 0x0000_FFFF_FFFF_FFFF;
const TAG_SHIFT: u32 = 48;

#[inline]
fn pack<T>(ptr: *mut T, tag: u16) -> u64 {
    let addr = ptr as u64;
    debug_assert_eq!(
        addr & !PTR_MASK,
        0,
        "node address does not fit in 48 bits on this platform"
    );
    (addr & PTR_MASK) | ((tag as u64) << TAG_SHIFT)
}

#[inline]
fn unpack<T>(word: u64) -> (*mut T, u16) {
    let addr = (word & PTR_MASK) as usize;
    let tag = (word >> TAG_SHIFT) as u16;
    (addr as *mut T, tag)
}

/// An atomic `(pointer, version)` pair stored in a single 64-bit word.
pub(crate) struct AtomicTaggedPtr<T> {
    word: AtomicU64,
    _marker: PhantomData<*mut T>,
}

// SAFETY: the only state is the atomic word; `T` is never touched here.
unsafe impl<T> Send for AtomicTaggedPtr<T> {}
unsafe impl<T> Sync for AtomicTaggedPtr<T> {}

impl<T> AtomicTaggedPtr<T> {
    pub(crate) fn new(ptr: *mut T, tag: u16) -> Self {
        AtomicTaggedPtr {
            word: AtomicU64::new(pack(ptr, tag)),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn load(&self, order: Ordering) -> (*mut T, u16) {
        unpack(self.word.load(order))
    }

    #[inline]
    pub(crate) fn store(&self, ptr: *mut T, tag: u16, order: Ordering) {
        self.word.store(pack(ptr, tag), order);
    }

    /// Strong compare-and-set on the `(pointer, version)` pair.
    ///
    /// On success the stored tag is `new_tag`, chosen by the caller as
    /// `expected_tag + 1` so every successful update advances the version.
    /// On failure, returns the word's current `(pointer, version)`.
    #[inline]
    pub(crate) fn compare_and_set(
        &self,
        expected_ptr: *mut T,
        expected_tag: u16,
        new_ptr: *mut T,
        new_tag: u16,
        success: Ordering,
        failure: Ordering,
    ) -> Result<(), (*mut T, u16)> {
        let expected = pack(expected_ptr, expected_tag);
        let desired = pack(new_ptr, new_tag);
        match self
            .word
            .compare_exchange(expected, desired, success, failure)
        {
            Ok(_) => Ok(()),
            Err(current) => Err(unpack(current)),
        }
    }
}
