//! Growable contiguous array parameterized over its [`Allocator`].
//!
//! A [`DynArray`] owns one buffer, one allocator instance and a live-element
//! count. The first `len` slots of the buffer hold live values; the rest of
//! the `capacity` slots are uninitialized. The buffer is released through
//! the allocator that handed it out, exactly once.
//!
//! Copying, moving and swapping arrays consult
//! [`Allocator::PROPAGATION`] and [`Allocator::equals`] to decide whether a
//! buffer may change hands as is or whether the elements have to be
//! relocated into storage owned by the destination's allocator.

mod strategies;
mod storage;
mod propagation;
mod mutation;
mod iter;
mod cursor;

use core::{
    fmt::{self, Debug, Formatter},
    marker::PhantomData,
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr::NonNull,
    slice::{self, SliceIndex},
};

use crate::{
    Allocator,
    CapacityError,
    CapacityPolicy,
    Doubling,
    GlobalAlloc,
    Result,
    size_of,
    const_assert,
};

pub use iter::{Iter, IterMut, IntoIter};
pub use cursor::Cursor;

use CapacityError::IndexOutOfBounds;

pub struct DynArray<T, A = GlobalAlloc, P = Doubling>
    where
        A: Allocator,
        P: CapacityPolicy,
{
    data: NonNull<T>,
    capacity: usize,
    len: usize,
    alloc: A,
    _markers: PhantomData<(T, fn() -> P)>,
}

const_assert!(size_of!(DynArray<u32>) == 3 * size_of!(usize));
const_assert!(size_of!(DynArray<u32>) == size_of!(Option<DynArray<u32>>));

unsafe impl<T: Send, A: Allocator + Send, P: CapacityPolicy> Send for DynArray<T, A, P> {}

unsafe impl<T: Sync, A: Allocator + Sync, P: CapacityPolicy> Sync for DynArray<T, A, P> {}

impl<T> DynArray<T> {

    /// Empty array on the global heap with the default capacity.
    pub fn new() -> Result<Self> {
        Self::new_in(GlobalAlloc)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_in(capacity, GlobalAlloc)
    }

    pub fn with_len(len: usize, value: T) -> Result<Self>
        where
            T: Clone
    {
        Self::with_len_in(len, value, GlobalAlloc)
    }

    pub fn from_slice(values: &[T]) -> Result<Self>
        where
            T: Clone
    {
        Self::from_slice_in(values, GlobalAlloc)
    }

    pub fn from_array<const N: usize>(values: [T; N]) -> Result<Self> {
        Self::from_iter_in(values, GlobalAlloc)
    }
}

impl<T, A, P> DynArray<T, A, P>
    where
        A: Allocator,
        P: CapacityPolicy,
{

    /// Largest number of elements a single buffer can hold.
    pub const MAX_LEN: usize =
        if size_of!(T) == 0 {
            usize::MAX
        }
        else {
            isize::MAX as usize / size_of!(T)
        };

    /// Array with no buffer at all. Only reachable through moves, swaps and
    /// zero-length construction.
    #[inline(always)]
    fn unallocated(alloc: A) -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
            len: 0,
            alloc,
            _markers: PhantomData,
        }
    }

    /// Empty array with [`CapacityPolicy::DEFAULT_CAPACITY`] slots.
    pub fn new_in(alloc: A) -> Result<Self> {
        Self::with_capacity_in(P::DEFAULT_CAPACITY, alloc)
    }

    /// Empty array with exactly `capacity` slots.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self> {
        let data = Self::allocate_buffer(&alloc, capacity)?;
        Ok(Self {
            data,
            capacity,
            len: 0,
            alloc,
            _markers: PhantomData,
        })
    }

    /// `len` clones of `value`, with capacity equal to `len`.
    pub fn with_len_in(len: usize, value: T, alloc: A) -> Result<Self>
        where
            T: Clone
    {
        let mut array = Self::with_capacity_in(len, alloc)?;
        array.fill_tail(core::iter::repeat_with(|| value.clone()).take(len));
        Ok(array)
    }

    pub fn with_len_with_in<F>(len: usize, f: F, alloc: A) -> Result<Self>
        where
            F: FnMut() -> T,
    {
        let mut array = Self::with_capacity_in(len, alloc)?;
        array.fill_tail(core::iter::repeat_with(f).take(len));
        Ok(array)
    }

    pub fn with_len_default_in(len: usize, alloc: A) -> Result<Self>
        where
            T: Default
    {
        Self::with_len_with_in(len, T::default, alloc)
    }

    /// Clones every element of `values`, with capacity equal to their count.
    pub fn from_slice_in(values: &[T], alloc: A) -> Result<Self>
        where
            T: Clone
    {
        let mut array = Self::with_capacity_in(values.len(), alloc)?;
        array.fill_tail(values.iter().cloned());
        Ok(array)
    }

    /// Collects `iter`, reserving its lower size hint up front.
    pub fn from_iter_in<I>(iter: I, alloc: A) -> Result<Self>
        where
            I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut array = Self::with_capacity_in(lower, alloc)?;
        for value in iter {
            array.push(value)?;
        }
        Ok(array)
    }

    /// Writes `values` into the free slots one by one. The caller has
    /// ensured the capacity.
    fn fill_tail<I>(&mut self, values: I)
        where
            I: Iterator<Item = T>,
    {
        for value in values {
            debug_assert!(self.len < self.capacity);
            unsafe { self.data.add(self.len).write(value) };
            self.len += 1;
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn max_len(&self) -> usize {
        Self::MAX_LEN
    }

    #[inline(always)]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        Ok(unsafe { self.data.add(index).as_ref() })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        Ok(unsafe { self.data.add(index).as_mut() })
    }

    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[inline(always)]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline(always)]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    pub fn contains(&self, value: &T) -> bool
        where
            T: PartialEq
    {
        self.as_slice().contains(value)
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T> {
        unsafe { Iter::new(self.data, self.len) }
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        unsafe { IterMut::new(self.data, self.len) }
    }

    /// Cursor positioned at `index`, which may equal `len` (the end position).
    pub fn cursor(&self, index: usize) -> Result<Cursor<'_, T>> {
        if index > self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        Ok(Cursor::new(self.as_slice(), index))
    }
}

impl<T, A: Allocator, P: CapacityPolicy> Drop for DynArray<T, A, P> {

    fn drop(&mut self) {
        self.release();
    }
}

impl<T, A: Allocator, P: CapacityPolicy> Deref for DynArray<T, A, P> {

    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: Allocator, P: CapacityPolicy> DerefMut for DynArray<T, A, P> {

    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator, P: CapacityPolicy> AsRef<[T]> for DynArray<T, A, P> {

    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator, P: CapacityPolicy> AsMut<[T]> for DynArray<T, A, P> {

    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I, A, P> Index<I> for DynArray<T, A, P>
    where
        I: SliceIndex<[T]>,
        A: Allocator,
        P: CapacityPolicy,
{

    type Output = I::Output;

    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, I, A, P> IndexMut<I> for DynArray<T, A, P>
    where
        I: SliceIndex<[T]>,
        A: Allocator,
        P: CapacityPolicy,
{

    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Debug, A: Allocator, P: CapacityPolicy> Debug for DynArray<T, A, P> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A, P, B, Q> PartialEq<DynArray<T, B, Q>> for DynArray<T, A, P>
    where
        T: PartialEq,
        A: Allocator,
        P: CapacityPolicy,
        B: Allocator,
        Q: CapacityPolicy,
{

    fn eq(&self, other: &DynArray<T, B, Q>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator, P: CapacityPolicy> Eq for DynArray<T, A, P> {}

impl<T, A, P, const N: usize> PartialEq<[T; N]> for DynArray<T, A, P>
    where
        T: PartialEq,
        A: Allocator,
        P: CapacityPolicy,
{

    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, A, P> PartialEq<[T]> for DynArray<T, A, P>
    where
        T: PartialEq,
        A: Allocator,
        P: CapacityPolicy,
{

    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T, A, P> Default for DynArray<T, A, P>
    where
        A: Allocator + Default,
        P: CapacityPolicy,
{

    /// # Panics
    ///
    /// If the default capacity cannot be allocated.
    fn default() -> Self {
        Self::new_in(A::default()).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl<T, A, P> FromIterator<T> for DynArray<T, A, P>
    where
        A: Allocator + Default,
        P: CapacityPolicy,
{

    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, A::default()).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl<T, A: Allocator, P: CapacityPolicy> Extend<T> for DynArray<T, A, P> {

    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        if let Err(err) = self.ensure_can_add(iter.size_hint().0) {
            panic!("{err}")
        }
        for value in iter {
            if let Err(err) = self.push(value) {
                panic!("{err}")
            }
        }
    }
}

impl<'a, T, A: Allocator, P: CapacityPolicy> IntoIterator for &'a DynArray<T, A, P> {

    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator, P: CapacityPolicy> IntoIterator for &'a mut DynArray<T, A, P> {

    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
