//! Debug-build accounting of limb-buffer allocations.
//!
//! Release builds compile these hooks away. The counters track
//! cumulative limbs and buffers requested through the crate's buffer
//! factory; frees are owned by `Vec`, so leak hunting compares
//! successive snapshots rather than a live count.

#[cfg(debug_assertions)]
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(debug_assertions)]
static BUFFERS_ALLOCATED: AtomicU64 = AtomicU64::new(0);
#[cfg(debug_assertions)]
static LIMBS_ALLOCATED: AtomicU64 = AtomicU64::new(0);

#[inline]
pub(crate) fn record_alloc(len: usize) {
    #[cfg(debug_assertions)]
    {
        BUFFERS_ALLOCATED.fetch_add(1, Ordering::Relaxed);
        LIMBS_ALLOCATED.fetch_add(len as u64, Ordering::Relaxed);
    }
    #[cfg(not(debug_assertions))]
    let _ = len;
}

/// Cumulative `(buffers, limbs)` allocated so far in this process.
#[cfg(debug_assertions)]
pub fn allocation_snapshot() -> (u64, u64) {
    (
        BUFFERS_ALLOCATED.load(Ordering::Relaxed),
        LIMBS_ALLOCATED.load(Ordering::Relaxed),
    )
}

#[cfg(all(test, debug_assertions))]
mod tests {
    #[test]
    fn counters_advance() {
        let before = super::allocation_snapshot();
        let _buf = crate::mag::alloc_limbs(8);
        let after = super::allocation_snapshot();
        assert!(after.0 > before.0);
        assert!(after.1 >= before.1 + 8);
    }
}
