use core::{
    mem,
    ptr::NonNull,
};

use crate::{
    Allocator,
    CapacityError,
    CapacityPolicy,
    Result,
};

use super::{
    DynArray,
    strategies,
};

use CapacityError::{MaxCapacityExceeded, AllocFailed};

impl<T, A, P> DynArray<T, A, P>
    where
        A: Allocator,
        P: CapacityPolicy,
{

    /// Zero-sized buffers never reach the allocator.
    pub(super) fn allocate_buffer(alloc: &A, capacity: usize) -> Result<NonNull<T>> {
        if capacity > Self::MAX_LEN {
            return Err(MaxCapacityExceeded {
                requested: capacity,
                max_capacity: Self::MAX_LEN,
            })
        }
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return Ok(NonNull::dangling())
        }
        unsafe { alloc.allocate_uninit(capacity) }
            .ok_or(AllocFailed { new_capacity: capacity })
    }

    pub(super) unsafe fn free_buffer(alloc: &A, data: NonNull<T>, capacity: usize) {
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return
        }
        unsafe { alloc.free_uninit(data, capacity) }
    }

    /// Moves the live elements into a new buffer of exactly `new_capacity`
    /// slots and frees the old one.
    ///
    /// Nothing changes if the new buffer cannot be allocated.
    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(self.len <= new_capacity);
        let data = Self::allocate_buffer(&self.alloc, new_capacity)?;
        unsafe {
            strategies::relocate(self.data, data, self.len);
            Self::free_buffer(&self.alloc, self.data, self.capacity);
        }
        self.data = data;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Drops every element and frees the buffer, leaving the array without
    /// storage.
    pub(super) fn release(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe {
            strategies::drop_in_place(self.data, len);
            Self::free_buffer(&self.alloc, self.data, self.capacity);
        }
        self.data = NonNull::dangling();
        self.capacity = 0;
    }

    /// Makes the capacity at least `capacity`, allocating exactly that
    /// many slots if it has to grow.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity {
            return Ok(())
        }
        self.reallocate(capacity)
    }

    /// Makes room for `count` more elements, growing according to the
    /// capacity policy.
    ///
    /// Fails without touching the array if `len + count` exceeds
    /// [`MAX_LEN`](Self::MAX_LEN).
    pub fn ensure_can_add(&mut self, count: usize) -> Result<()> {
        let required = self.len
            .checked_add(count)
            .filter(|&required| required <= Self::MAX_LEN)
            .ok_or(MaxCapacityExceeded {
                requested: self.len.saturating_add(count),
                max_capacity: Self::MAX_LEN,
            })?;
        if required <= self.capacity {
            return Ok(())
        }
        let new_capacity = P::grow(self.capacity, required, Self::MAX_LEN)
            .ok_or(MaxCapacityExceeded {
                requested: required,
                max_capacity: Self::MAX_LEN,
            })?;
        self.reallocate(new_capacity)
    }

    #[inline(always)]
    pub(super) fn ensure_can_add_one(&mut self) -> Result<()> {
        if self.len < self.capacity {
            return Ok(())
        }
        self.ensure_can_add(1)
    }

    /// Reallocates so that the capacity equals the length. An empty array
    /// gets the default capacity instead of no storage.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        let target =
            if self.len == 0 {
                P::DEFAULT_CAPACITY
            }
            else {
                self.len
            };
        if target == self.capacity {
            return Ok(())
        }
        self.reallocate(target)
    }

    /// Drops every element and returns to the default capacity.
    ///
    /// If the default buffer cannot be allocated the array is left without
    /// storage, which is still a valid empty state.
    pub fn clear(&mut self) {
        if self.capacity == P::DEFAULT_CAPACITY {
            let len = self.len;
            self.len = 0;
            unsafe { strategies::drop_in_place(self.data, len); }
            return
        }
        self.release();
        if let Ok(data) = Self::allocate_buffer(&self.alloc, P::DEFAULT_CAPACITY) {
            self.data = data;
            self.capacity = P::DEFAULT_CAPACITY;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        DynArray,
        CapacityPolicy,
        CapacityError,
        GlobalAlloc,
        testing::{Snitch, Tracker, Sticky, scores},
    };

    struct Exact {}

    impl CapacityPolicy for Exact {

        const DEFAULT_CAPACITY: usize = 1;

        fn grow(_current: usize, required: usize, max: usize) -> Option<usize> {
            (required <= max).then_some(required)
        }
    }

    #[test]
    fn reserve_then_push_keeps_order() {
        let mut values = dyn_array![4, 15, 125, 1125, 2451, 5012].unwrap();
        values.reserve(20).unwrap();
        assert_eq!(values.capacity(), 20);
        let mut expected = vec![4, 15, 125, 1125, 2451, 5012];
        for i in 0..15 {
            values.push(i).unwrap();
            expected.push(i);
        }
        assert_eq!(values.len(), 21);
        assert_eq!(values.as_slice(), expected.as_slice());
    }

    #[test]
    fn reserve_is_exact_and_idempotent() {
        let tracker = Tracker::new();
        let mut balls = DynArray::from_slice(&[
            Snitch::new(&tracker, 1),
            Snitch::new(&tracker, 2),
            Snitch::new(&tracker, 3),
        ]).unwrap();
        balls.reserve(30).unwrap();
        assert_eq!(balls.capacity(), 30);
        let ptr = balls.as_ptr();
        balls.reserve(30).unwrap();
        balls.reserve(4).unwrap();
        assert_eq!(balls.capacity(), 30);
        assert_eq!(balls.as_ptr(), ptr);
        assert_eq!(scores(&balls), [1, 2, 3]);
        drop(balls);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn relocation_does_not_drop_elements() {
        let tracker = Tracker::new();
        let mut balls = DynArray::<Snitch>::new().unwrap();
        for i in 0..100 {
            balls.push(Snitch::new(&tracker, i)).unwrap();
        }
        assert_eq!(tracker.dropped(), 0);
        assert_eq!(tracker.live(), 100);
        drop(balls);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn reserve_past_max_leaves_array_untouched() {
        let mut values = dyn_array![1u64, 2, 3].unwrap();
        let max = values.max_len();
        let err = values.reserve(max + 1).unwrap_err();
        assert_eq!(err, CapacityError::MaxCapacityExceeded { requested: max + 1, max_capacity: max });
        assert_eq!(values, [1, 2, 3]);
        assert_eq!(values.capacity(), 3);
    }

    #[test]
    fn overflowing_growth_leaves_array_untouched() {
        let mut values = dyn_array![1u8, 2].unwrap();
        let err = values.ensure_can_add(usize::MAX).unwrap_err();
        assert_eq!(err, CapacityError::MaxCapacityExceeded {
            requested: usize::MAX,
            max_capacity: isize::MAX as usize,
        });
        assert_eq!(values, [1, 2]);
        assert_eq!(values.capacity(), 2);
    }

    #[test]
    fn growth_uses_power_of_two_multiples() {
        let mut values = DynArray::<u32>::new().unwrap();
        values.ensure_can_add(11).unwrap();
        assert_eq!(values.capacity(), 20);
        values.ensure_can_add(70).unwrap();
        assert_eq!(values.capacity(), 80);
        values.ensure_can_add(80).unwrap();
        assert_eq!(values.capacity(), 80);
    }

    #[test]
    fn pushing_past_capacity_doubles() {
        let mut values = DynArray::<u32>::new().unwrap();
        for i in 0..11 {
            values.push(i).unwrap();
        }
        assert_eq!(values.capacity(), 20);
    }

    #[test]
    fn capacity_policy_is_pluggable() {
        let mut values = DynArray::<u32, GlobalAlloc, Exact>::new_in(GlobalAlloc).unwrap();
        assert_eq!(values.capacity(), 1);
        for i in 0..5 {
            values.push(i).unwrap();
            assert_eq!(values.capacity(), values.len());
        }
    }

    #[test]
    fn shrink_to_fit_matches_len() {
        let mut values = dyn_array![1, 2, 3].unwrap();
        values.reserve(10).unwrap();
        values.shrink_to_fit().unwrap();
        assert_eq!(values.capacity(), 3);
        assert_eq!(values, [1, 2, 3]);
    }

    #[test]
    fn shrink_to_fit_on_empty_keeps_default_capacity() {
        let mut values = DynArray::<i32>::with_capacity(64).unwrap();
        values.shrink_to_fit().unwrap();
        assert_eq!(values.capacity(), 10);
    }

    #[test]
    fn clear_returns_to_default_capacity() {
        let alloc = Sticky::new(0);
        let tracker = Tracker::new();
        let mut balls = DynArray::<_, _>::with_len_in(40, Snitch::new(&tracker, 15), alloc.clone()).unwrap();
        balls.clear();
        assert_eq!(balls.len(), 0);
        assert_eq!(balls.capacity(), 10);
        assert!(balls.is_empty());
        assert_eq!(tracker.live(), 0);
        assert_eq!(alloc.outstanding(), 1);
        balls.push(Snitch::new(&tracker, 1)).unwrap();
        assert_eq!(scores(&balls), [1]);
    }

    #[test]
    fn clear_on_default_capacity_keeps_buffer() {
        let mut values = dyn_array![1, 2].unwrap();
        values.reserve(10).unwrap();
        let ptr = values.as_ptr();
        values.clear();
        assert_eq!(values.as_ptr(), ptr);
        assert_eq!(values.capacity(), 10);
    }

    #[test]
    fn failed_growth_reports_allocation_failure() {
        let mut values = DynArray::<u8, _>::with_capacity_in(0, crate::testing::Exhausted).unwrap();
        assert_eq!(values.push(1).unwrap_err(), CapacityError::AllocFailed { new_capacity: 10 });
        assert_eq!(values.len(), 0);
        assert_eq!(values.capacity(), 0);
    }
}
