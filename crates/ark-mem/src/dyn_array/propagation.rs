use core::mem;

use crate::{
    Allocator,
    CapacityPolicy,
    Result,
};

use super::{
    DynArray,
    strategies,
};

impl<T, A, P> DynArray<T, A, P>
    where
        A: Allocator,
        P: CapacityPolicy,
{

    /// Copy with the allocator chosen by [`Allocator::select_on_copy`].
    /// The copy's capacity equals its length.
    pub fn try_clone(&self) -> Result<Self>
        where
            T: Clone
    {
        self.clone_in(self.alloc.select_on_copy())
    }

    /// Copy whose storage comes from `alloc`.
    pub fn clone_in(&self, alloc: A) -> Result<Self>
        where
            T: Clone
    {
        Self::from_slice_in(self.as_slice(), alloc)
    }

    /// Replaces the contents with copies of `other`'s elements.
    ///
    /// The copy is built with `other`'s allocator when the policy
    /// propagates on copy, otherwise with this array's own allocator. On
    /// error this array is unchanged.
    pub fn copy_assign(&mut self, other: &Self) -> Result<()>
        where
            T: Clone
    {
        let alloc =
            if A::PROPAGATION.on_copy {
                other.alloc.clone()
            }
            else {
                self.alloc.clone()
            };
        let mut copy = other.clone_in(alloc)?;
        mem::swap(self, &mut copy);
        Ok(())
    }

    /// Takes the buffer, leaving this array empty and without storage.
    pub fn take(&mut self) -> Self {
        let empty = Self::unallocated(self.alloc.clone());
        mem::replace(self, empty)
    }

    /// Moves the elements of `source` into an array owned by `alloc`.
    ///
    /// If `alloc` is interchangeable with `source`'s allocator the buffer
    /// changes hands as is. Otherwise the elements are moved one by one into
    /// fresh storage of exactly `source.len()` slots, and `source` keeps its
    /// now empty buffer.
    pub fn take_in(source: &mut Self, alloc: A) -> Result<Self> {
        if alloc.equals(&source.alloc) {
            return Ok(source.take())
        }
        let mut moved = Self::with_capacity_in(source.len, alloc)?;
        unsafe {
            strategies::relocate(source.data, moved.data, source.len);
        }
        moved.len = source.len;
        source.len = 0;
        Ok(moved)
    }

    /// Replaces the contents with the elements of `other`, leaving `other`
    /// empty.
    ///
    /// The buffer changes hands as is when the allocators are
    /// interchangeable, or when the policy propagates on move, in which case
    /// the allocator comes along. Otherwise the elements are moved into
    /// storage from this array's allocator. On error neither array changes.
    pub fn move_assign(&mut self, other: &mut Self) -> Result<()> {
        if self.alloc.equals(&other.alloc) || A::PROPAGATION.on_move {
            mem::swap(self, other);
            other.release();
            return Ok(())
        }
        let mut moved = Self::take_in(other, self.alloc.clone())?;
        mem::swap(self, &mut moved);
        Ok(())
    }

    /// Exchanges the contents of two arrays.
    ///
    /// Interchangeable allocators, or a policy that propagates on swap,
    /// make this O(1). Otherwise each side's elements are moved into storage
    /// from the other side's allocator, and each array keeps its own
    /// allocator. Both buffers are allocated before any element moves, so on
    /// error neither array changes.
    pub fn swap(&mut self, other: &mut Self) -> Result<()> {
        if self.alloc.equals(&other.alloc) || A::PROPAGATION.on_swap {
            mem::swap(self, other);
            return Ok(())
        }
        let mut to_them = Self::with_capacity_in(self.len, other.alloc.clone())?;
        let mut to_us = Self::with_capacity_in(other.len, self.alloc.clone())?;
        unsafe {
            strategies::relocate(self.data, to_them.data, self.len);
            strategies::relocate(other.data, to_us.data, other.len);
        }
        mem::swap(&mut to_them.len, &mut self.len);
        mem::swap(&mut to_us.len, &mut other.len);
        mem::swap(self, &mut to_us);
        mem::swap(other, &mut to_them);
        Ok(())
    }
}

impl<T: Clone, A: Allocator, P: CapacityPolicy> Clone for DynArray<T, A, P> {

    /// # Panics
    ///
    /// If the copy cannot be allocated.
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| panic!("{err}"))
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_assign(source).unwrap_or_else(|err| panic!("{err}"))
    }
}
