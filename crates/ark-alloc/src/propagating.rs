use core::ptr::NonNull;

use ark_mem::{Allocator, Propagation};

/// Wraps `A` and replaces its propagation policy.
///
/// Memory and equality come from `A` unchanged.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Propagating<A, const COPY: bool, const MOVE: bool, const SWAP: bool>(pub A);

impl<A, const COPY: bool, const MOVE: bool, const SWAP: bool> Propagating<A, COPY, MOVE, SWAP> {

    #[inline(always)]
    pub fn into_inner(self) -> A {
        self.0
    }
}

impl<A, const COPY: bool, const MOVE: bool, const SWAP: bool> Allocator for Propagating<A, COPY, MOVE, SWAP>
    where
        A: Allocator,
{

    const PROPAGATION: Propagation = Propagation {
        on_copy: COPY,
        on_move: MOVE,
        on_swap: SWAP,
    };

    #[inline(always)]
    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        unsafe { self.0.allocate_raw(size, align) }
    }

    #[inline(always)]
    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        unsafe { self.0.free_raw(ptr, size, align) }
    }

    #[inline(always)]
    fn equals(&self, other: &Self) -> bool {
        self.0.equals(&other.0)
    }

    #[inline(always)]
    fn select_on_copy(&self) -> Self {
        Self(self.0.select_on_copy())
    }
}

#[cfg(test)]
mod tests {
    use ark_mem::GlobalAlloc;

    use super::*;

    #[test]
    fn overrides_only_propagation() {
        type SwapOnly = Propagating<GlobalAlloc, false, false, true>;
        assert_eq!(SwapOnly::PROPAGATION, Propagation { on_copy: false, on_move: false, on_swap: true });
        assert_eq!(GlobalAlloc::PROPAGATION, Propagation::NONE);
        let alloc = SwapOnly::default();
        assert!(alloc.equals(&alloc.clone()));
        unsafe {
            let ptr = alloc.allocate_uninit::<u16>(3).unwrap();
            alloc.free_uninit(ptr, 3);
        }
    }
}
