use std::sync::Arc;

use core::{
    fmt::{self, Debug, Formatter},
    ptr::NonNull,
};

use parking_lot::Mutex;

use ark_mem::{Allocator, GlobalAlloc};

use ark_log::{debug, error, trace};

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct AllocStats {
    pub allocations: usize,
    pub frees: usize,
    pub live_bytes: usize,
    pub peak_bytes: usize,
}

/// Debug allocator that logs every allocation and release.
///
/// Clones share one set of [`AllocStats`]. No two instances ever compare
/// equal, not even a clone with its origin, so containers on tracing
/// allocators always take the element-wise paths when copied, moved or
/// swapped.
pub struct TracingAlloc<A: Allocator = GlobalAlloc> {
    label: &'static str,
    stats: Arc<Mutex<AllocStats>>,
    inner: A,
}

impl TracingAlloc {

    /// Traces the process heap under `label`.
    pub fn named(label: &'static str) -> Self {
        Self::wrapping(label, GlobalAlloc)
    }
}

impl<A: Allocator> TracingAlloc<A> {

    pub fn wrapping(label: &'static str, inner: A) -> Self {
        Self {
            label,
            stats: Default::default(),
            inner,
        }
    }

    #[inline(always)]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[inline(always)]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    #[inline(always)]
    pub fn stats(&self) -> AllocStats {
        *self.stats.lock()
    }

    #[inline(always)]
    pub fn live_bytes(&self) -> usize {
        self.stats.lock().live_bytes
    }
}

impl<A: Allocator> Clone for TracingAlloc<A> {

    fn clone(&self) -> Self {
        Self {
            label: self.label,
            stats: self.stats.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<A: Allocator> Debug for TracingAlloc<A> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingAlloc")
            .field("label", &self.label)
            .field("stats", &self.stats())
            .finish()
    }
}

impl<A: Allocator> Allocator for TracingAlloc<A> {

    const PROPAGATION: ark_mem::Propagation = A::PROPAGATION;

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let Some(ptr) = (unsafe { self.inner.allocate_raw(size, align) }) else {
            error!("{}: failed to allocate {} bytes aligned to {}", self.label, size, align);
            return None
        };
        let live = {
            let mut stats = self.stats.lock();
            stats.allocations += 1;
            stats.live_bytes += size;
            stats.peak_bytes = stats.peak_bytes.max(stats.live_bytes);
            stats.live_bytes
        };
        debug!("{}: allocated {} bytes at {:p}, {} live", self.label, size, ptr, live);
        Some(ptr)
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        let live = {
            let mut stats = self.stats.lock();
            stats.frees += 1;
            if stats.live_bytes < size {
                error!(
                    "{}: freeing {} bytes at {:p} with only {} live",
                    self.label, size, ptr, stats.live_bytes,
                );
            }
            stats.live_bytes = stats.live_bytes.saturating_sub(size);
            stats.live_bytes
        };
        trace!("{}: freed {} bytes at {:p}, {} live", self.label, size, ptr, live);
        unsafe { self.inner.free_raw(ptr, size, align) }
    }

    #[inline(always)]
    fn equals(&self, _other: &Self) -> bool {
        false
    }
}
