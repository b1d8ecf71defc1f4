use core::{
    mem,
    ops::{Bound, RangeBounds},
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

use CapacityError::IndexOutOfBounds;

impl<T, A, P> DynArray<T, A, P>
    where
        A: Allocator,
        P: CapacityPolicy,
{

    #[inline(always)]
    fn check_position(&self, index: usize) -> Result<()> {
        if index > self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        Ok(())
    }

    fn bounds<R>(&self, range: R) -> Result<(usize, usize)>
        where
            R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        if end > self.len {
            return Err(IndexOutOfBounds { index: end, len: self.len })
        }
        if start > end {
            return Err(IndexOutOfBounds { index: start, len: self.len })
        }
        Ok((start, end))
    }

    /// Appends `value`, growing if the array is full.
    #[inline(always)]
    pub fn push(&mut self, value: T) -> Result<&mut T> {
        self.ensure_can_add_one()?;
        unsafe {
            let mut ptr = self.data.add(self.len);
            ptr.write(value);
            self.len += 1;
            Ok(ptr.as_mut())
        }
    }

    /// Appends the value returned by `f`. `f` runs after any growth has
    /// succeeded.
    pub fn emplace_back<F>(&mut self, f: F) -> Result<&mut T>
        where
            F: FnOnce() -> T,
    {
        self.ensure_can_add_one()?;
        let value = f();
        unsafe {
            let mut ptr = self.data.add(self.len);
            ptr.write(value);
            self.len += 1;
            Ok(ptr.as_mut())
        }
    }

    /// Constructs a value with `f` and places it at `index`, shifting the
    /// tail one slot to the right.
    ///
    /// `index` may equal `len`. The value is built before anything moves,
    /// so a panicking `f` leaves the array as it was.
    pub fn emplace<F>(&mut self, index: usize, f: F) -> Result<&mut T>
        where
            F: FnOnce() -> T,
    {
        self.check_position(index)?;
        self.ensure_can_add_one()?;
        let value = f();
        unsafe {
            strategies::shift_right(self.data, index, self.len, 1);
            let mut ptr = self.data.add(index);
            ptr.write(value);
            self.len += 1;
            Ok(ptr.as_mut())
        }
    }

    #[inline(always)]
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T> {
        self.emplace(index, || value)
    }

    /// Opens a gap of `count` slots at `index` and fills it from `values`.
    ///
    /// While the gap is being filled `len` only covers the prefix before
    /// it, so a panic from `values` leaks the tail instead of dropping
    /// uninitialized slots.
    fn fill_gap<I>(&mut self, index: usize, count: usize, values: I)
        where
            I: Iterator<Item = T>,
    {
        debug_assert!(self.len + count <= self.capacity);
        let len = self.len;
        unsafe {
            strategies::shift_right(self.data, index, len, count);
        }
        self.len = index;
        let mut written = 0;
        for value in values.take(count) {
            unsafe { self.data.add(index + written).write(value) };
            written += 1;
        }
        debug_assert!(written == count);
        self.len = len + count;
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// Returns the position of the first inserted element.
    pub fn insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<usize>
        where
            T: Clone
    {
        self.check_position(index)?;
        self.ensure_can_add(count)?;
        self.fill_gap(index, count, core::iter::repeat_with(|| value.clone()));
        Ok(index)
    }

    /// Inserts clones of `values` at `index`, keeping their order.
    pub fn insert_slice(&mut self, index: usize, values: &[T]) -> Result<usize>
        where
            T: Clone
    {
        self.check_position(index)?;
        self.ensure_can_add(values.len())?;
        self.fill_gap(index, values.len(), values.iter().cloned());
        Ok(index)
    }

    /// Inserts every item of `iter` at `index`, keeping their order.
    ///
    /// The items are collected into storage from this array's allocator
    /// first, so the iterator never observes a half-shifted array.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> Result<usize>
        where
            I: IntoIterator<Item = T>,
    {
        self.check_position(index)?;
        let mut staged = Self::from_iter_in(iter, self.alloc.clone())?;
        let count = staged.len;
        self.ensure_can_add(count)?;
        unsafe {
            strategies::shift_right(self.data, index, self.len, count);
            strategies::relocate(staged.data, self.data.add(index), count);
        }
        staged.len = 0;
        self.len += count;
        Ok(index)
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None
        }
        self.len -= 1;
        Some(unsafe { self.data.add(self.len).read() })
    }

    /// Drops the element at `index` and closes the gap.
    ///
    /// Returns the position that now holds the element after the removed
    /// one.
    pub fn erase(&mut self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        self.erase_range(index..index + 1)
    }

    /// Drops the elements in `range` and closes the gap.
    ///
    /// Returns the start of the range, which now holds the first element
    /// after it.
    pub fn erase_range<R>(&mut self, range: R) -> Result<usize>
        where
            R: RangeBounds<usize>,
    {
        let (start, end) = self.bounds(range)?;
        let count = end - start;
        if count == 0 {
            return Ok(start)
        }
        let len = self.len;
        self.len = start;
        unsafe {
            strategies::drop_in_place(self.data.add(start), count);
            strategies::shift_left(self.data, start, len, count);
        }
        self.len = len - count;
        Ok(start)
    }

    /// Moves the element at `index` out and closes the gap.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        unsafe {
            let value = self.data.add(index).read();
            strategies::shift_left(self.data, index, self.len, 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Drops the elements past `len`. Does nothing if the array is not
    /// longer than that.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return
        }
        let old_len = self.len;
        self.len = len;
        unsafe {
            strategies::drop_in_place(self.data.add(len), old_len - len);
        }
    }

    pub fn resize(&mut self, len: usize, value: T) -> Result<()>
        where
            T: Clone
    {
        if len <= self.len {
            self.truncate(len);
            return Ok(())
        }
        self.reserve(len)?;
        let count = len - self.len;
        self.fill_tail(core::iter::repeat_with(|| value.clone()).take(count));
        Ok(())
    }

    pub fn resize_with<F>(&mut self, len: usize, f: F) -> Result<()>
        where
            F: FnMut() -> T,
    {
        if len <= self.len {
            self.truncate(len);
            return Ok(())
        }
        self.reserve(len)?;
        let count = len - self.len;
        self.fill_tail(core::iter::repeat_with(f).take(count));
        Ok(())
    }

    #[inline(always)]
    pub fn resize_default(&mut self, len: usize) -> Result<()>
        where
            T: Default
    {
        self.resize_with(len, T::default)
    }

    fn replace_with(&mut self, mut fresh: Self) {
        mem::swap(self, &mut fresh);
    }

    /// Replaces the contents with `len` clones of `value`.
    ///
    /// The new contents live in a fresh buffer from this array's allocator
    /// with capacity equal to `len`. On error the array is unchanged.
    pub fn assign_n(&mut self, len: usize, value: T) -> Result<()>
        where
            T: Clone
    {
        let fresh = Self::with_len_in(len, value, self.alloc.clone())?;
        self.replace_with(fresh);
        Ok(())
    }

    pub fn assign_slice(&mut self, values: &[T]) -> Result<()>
        where
            T: Clone
    {
        let fresh = Self::from_slice_in(values, self.alloc.clone())?;
        self.replace_with(fresh);
        Ok(())
    }

    pub fn assign_iter<I>(&mut self, iter: I) -> Result<()>
        where
            I: IntoIterator<Item = T>,
    {
        let fresh = Self::from_iter_in(iter, self.alloc.clone())?;
        self.replace_with(fresh);
        Ok(())
    }
}
