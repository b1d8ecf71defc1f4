use core::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ptr::{self, NonNull},
    slice,
};

use crate::{
    Allocator,
    CapacityPolicy,
};

use super::{
    DynArray,
    strategies,
};

/// Borrowing iterator over a run of live elements.
///
/// `R` is the reference type handed out, which also carries the borrow's
/// lifetime and variance. Counting the remaining elements instead of
/// comparing pointers keeps zero-sized elements working.
pub struct IterBase<T, R> {
    ptr: NonNull<T>,
    remaining: usize,
    _marker: PhantomData<R>,
}

pub type Iter<'a, T> = IterBase<T, &'a T>;
pub type IterMut<'a, T> = IterBase<T, &'a mut T>;

unsafe impl<T, R: Send> Send for IterBase<T, R> {}

unsafe impl<T, R: Sync> Sync for IterBase<T, R> {}

impl<T, R> IterBase<T, R> {

    /// # Safety
    ///
    /// `ptr` must point at `len` live elements that stay valid, and are
    /// borrowed as `R` allows, for the iterator's lifetime.
    #[inline(always)]
    pub(super) unsafe fn new(ptr: NonNull<T>, len: usize) -> Self {
        Self {
            ptr,
            remaining: len,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    fn step_front(&mut self) -> Option<NonNull<T>> {
        if self.remaining == 0 {
            return None
        }
        let item = self.ptr;
        self.ptr = unsafe { self.ptr.add(1) };
        self.remaining -= 1;
        Some(item)
    }

    #[inline(always)]
    fn step_back(&mut self) -> Option<NonNull<T>> {
        if self.remaining == 0 {
            return None
        }
        self.remaining -= 1;
        Some(unsafe { self.ptr.add(self.remaining) })
    }
}

impl<'a, T> Iter<'a, T> {

    /// The elements not yet yielded.
    #[inline(always)]
    pub fn as_slice(&self) -> &'a [T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.remaining) }
    }
}

impl<T> Clone for Iter<'_, T> {

    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<T: Debug> Debug for Iter<'_, T> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.as_slice()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {

    type Item = &'a T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.step_front().map(|ptr| unsafe { ptr.as_ref() })
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {

    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.step_back().map(|ptr| unsafe { ptr.as_ref() })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {

    type Item = &'a mut T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.step_front().map(|mut ptr| unsafe { ptr.as_mut() })
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {

    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.step_back().map(|mut ptr| unsafe { ptr.as_mut() })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator. Elements not yielded are dropped together with the
/// buffer, which goes back to the allocator that handed it out.
pub struct IntoIter<T, A: Allocator> {
    data: NonNull<T>,
    capacity: usize,
    start: usize,
    end: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator + Send> Send for IntoIter<T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Sync for IntoIter<T, A> {}

impl<T, A: Allocator> IntoIter<T, A> {

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            slice::from_raw_parts(self.data.add(self.start).as_ptr(), self.end - self.start)
        }
    }

    #[inline(always)]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {

    type Item = T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None
        }
        let value = unsafe { self.data.add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {

    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None
        }
        self.end -= 1;
        Some(unsafe { self.data.add(self.end).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: Debug, A: Allocator> Debug for IntoIter<T, A> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {

    fn drop(&mut self) {
        let remaining = self.end - self.start;
        self.end = self.start;
        unsafe {
            strategies::drop_in_place(self.data.add(self.start), remaining);
            if self.capacity != 0 && mem::size_of::<T>() != 0 {
                self.alloc.free_uninit(self.data, self.capacity);
            }
        }
    }
}

impl<T, A: Allocator, P: CapacityPolicy> IntoIterator for DynArray<T, A, P> {

    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);
        let alloc = unsafe { ptr::read(&this.alloc) };
        IntoIter {
            data: this.data,
            capacity: this.capacity,
            start: 0,
            end: this.len,
            alloc,
            _marker: PhantomData,
        }
    }
}
