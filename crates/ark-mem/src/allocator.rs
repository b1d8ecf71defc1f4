use core::{
    ptr::NonNull,
    mem,
};

/// Whether an allocator travels with the elements when a container is
/// copy-assigned, move-assigned or swapped.
///
/// When a flag is unset the destination keeps its own allocator and the
/// elements are relocated into storage obtained from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Propagation {
    pub on_copy: bool,
    pub on_move: bool,
    pub on_swap: bool,
}

impl Propagation {

    pub const NONE: Self = Self {
        on_copy: false,
        on_move: false,
        on_swap: false,
    };

    pub const ALL: Self = Self {
        on_copy: true,
        on_move: true,
        on_swap: true,
    };
}

/// Source of raw storage for containers.
///
/// Allocators are untyped: [`allocate_uninit`](Allocator::allocate_uninit)
/// works for any element type, so an allocator serving one element type
/// serves every other one as well.
///
/// A clone must be able to free memory handed out by the instance it was
/// cloned from. [`equals`](Allocator::equals) is stronger: it reports that
/// two instances are interchangeable, which lets containers exchange
/// buffers without relocating elements.
pub trait Allocator: Clone {

    const PROPAGATION: Propagation = Propagation::NONE;

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>>;

    unsafe fn allocate_uninit<T>(&self, count: usize) -> Option<NonNull<T>> {
        let size = mem::size_of::<T>().checked_mul(count)?;
        let align = mem::align_of::<T>();
        unsafe { self.allocate_raw(size, align).map(|ptr| ptr.cast::<T>()) }
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize);

    unsafe fn free_uninit<T>(&self, ptr: NonNull<T>, count: usize) {
        let size = mem::size_of::<T>() * count;
        let align = mem::align_of::<T>();
        unsafe { self.free_raw(ptr.cast::<u8>(), size, align) }
    }

    fn equals(&self, other: &Self) -> bool;

    /// Allocator used by a copy constructed from a container owning `self`.
    #[inline(always)]
    fn select_on_copy(&self) -> Self {
        self.clone()
    }
}

impl<A: Allocator> Allocator for &A {

    const PROPAGATION: Propagation = A::PROPAGATION;

    #[inline(always)]
    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        unsafe { (**self).allocate_raw(size, align) }
    }

    #[inline(always)]
    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        unsafe { (**self).free_raw(ptr, size, align) }
    }

    #[inline(always)]
    fn equals(&self, other: &Self) -> bool {
        (**self).equals(*other)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        DynArray,
        testing::Sticky,
    };

    #[test]
    fn borrowed_allocator_shares_accounting() {
        let alloc = Sticky::new(1);
        let mut values = DynArray::<u32, _>::new_in(&alloc).unwrap();
        values.push(3).unwrap();
        assert_eq!(alloc.outstanding(), 1);
        let copy = values.try_clone().unwrap();
        assert_eq!(alloc.outstanding(), 2);
        assert_eq!(copy, [3]);
        drop(values);
        drop(copy);
        assert_eq!(alloc.outstanding(), 0);
    }

    #[test]
    fn borrowed_allocators_compare_through_the_referent() {
        let alloc = Sticky::new(1);
        let sibling = alloc.sibling(1);
        let mut left = DynArray::<u32, _>::new_in(&alloc).unwrap();
        let mut right = DynArray::<u32, _>::new_in(&sibling).unwrap();
        left.push(1).unwrap();
        let ptr = left.as_ptr();
        left.swap(&mut right).unwrap();
        assert_eq!(right.as_ptr(), ptr);
        assert!(left.is_empty());
    }
}
