use std::alloc::{alloc, dealloc, Layout};

use core::{
    cell::Cell,
    fmt::{self, Debug, Formatter},
    mem,
    ptr::{self, NonNull},
};

use ark_mem::{Allocator, align_up};

use ark_log::{trace, warn};

/// Fixed block of memory handed out front to back.
///
/// Allocation goes through [`ArenaHandle`]s. Freeing is a no-op; the whole
/// block is reclaimed by [`reset`](ArenaAlloc::reset) or on drop. Since
/// every handle borrows the arena, neither can happen while a container
/// still holds memory from it.
pub struct ArenaAlloc {
    data: NonNull<u8>,
    size: usize,
    pos: Cell<usize>,
}

impl ArenaAlloc {

    /// Reserves `size` bytes from the process heap. Returns `None` for an
    /// empty or unobtainable block.
    pub fn new(size: usize) -> Option<Self> {
        if size == 0 {
            return None
        }
        let layout = Layout::from_size_align(size, mem::align_of::<usize>()).ok()?;
        let ptr = unsafe { alloc(layout) };
        Some(
            Self {
                data: NonNull::new(ptr)?,
                size,
                pos: Cell::new(0),
            }
        )
    }

    #[inline(always)]
    pub fn handle(&self) -> ArenaHandle<'_> {
        ArenaHandle {
            arena: self,
        }
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn used(&self) -> usize {
        self.pos.get()
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.size - self.used()
    }

    /// Makes the whole block available again.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.pos.set(0);
    }

    fn bump(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let base = self.data.as_ptr() as usize;
        let start = align_up(base + self.used(), align);
        let end = start.checked_add(size)?;
        if end > base + self.size {
            return None
        }
        self.pos.set(end - base);
        Some(unsafe { self.data.add(start - base) })
    }
}

impl Debug for ArenaAlloc {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaAlloc")
            .field("size", &self.size)
            .field("used", &self.used())
            .finish()
    }
}

impl Drop for ArenaAlloc {

    fn drop(&mut self) {
        unsafe {
            let layout = Layout::from_size_align_unchecked(self.size, mem::align_of::<usize>());
            dealloc(self.data.as_ptr(), layout);
        }
    }
}

/// Copyable allocator borrowing an [`ArenaAlloc`].
///
/// Handles of the same arena are interchangeable, so containers on them
/// exchange buffers without relocating.
#[derive(Clone, Copy)]
pub struct ArenaHandle<'a> {
    arena: &'a ArenaAlloc,
}

impl<'a> ArenaHandle<'a> {

    #[inline(always)]
    pub fn arena(&self) -> &'a ArenaAlloc {
        self.arena
    }
}

impl Debug for ArenaHandle<'_> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArenaHandle").field(&(self.arena as *const ArenaAlloc)).finish()
    }
}

impl Allocator for ArenaHandle<'_> {

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let ptr = self.arena.bump(size, align);
        if ptr.is_none() {
            warn!(
                "arena exhausted: requested {} bytes with {} of {} remaining",
                size, self.arena.remaining(), self.arena.size(),
            );
        }
        ptr
    }

    #[inline(always)]
    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, _align: usize) {
        trace!("arena release of {} bytes at {:p} deferred to reset", size, ptr);
    }

    #[inline(always)]
    fn equals(&self, other: &Self) -> bool {
        ptr::eq(self.arena, other.arena)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocations_are_aligned_and_bumped() {
        let arena = ArenaAlloc::new(256).unwrap();
        let handle = arena.handle();
        unsafe {
            let a = handle.allocate_raw(3, 1).unwrap();
            let b = handle.allocate_uninit::<u64>(2).unwrap();
            assert_eq!(b.as_ptr() as usize % mem::align_of::<u64>(), 0);
            assert!(b.as_ptr() as usize > a.as_ptr() as usize);
        }
        assert!(arena.used() >= 3 + 16);
        assert_eq!(arena.remaining(), arena.size() - arena.used());
    }

    #[test]
    fn exhaustion_yields_none() {
        let arena = ArenaAlloc::new(32).unwrap();
        let handle = arena.handle();
        unsafe {
            assert!(handle.allocate_raw(32, 1).is_some());
            assert!(handle.allocate_raw(1, 1).is_none());
        }
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn reset_reclaims_block() {
        let mut arena = ArenaAlloc::new(64).unwrap();
        unsafe {
            arena.handle().allocate_raw(40, 8).unwrap();
        }
        arena.reset();
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn handles_compare_by_arena() {
        let first = ArenaAlloc::new(16).unwrap();
        let second = ArenaAlloc::new(16).unwrap();
        assert!(first.handle().equals(&first.handle()));
        assert!(!first.handle().equals(&second.handle()));
    }

    #[test]
    fn empty_arena_is_rejected() {
        assert!(ArenaAlloc::new(0).is_none());
    }
}
