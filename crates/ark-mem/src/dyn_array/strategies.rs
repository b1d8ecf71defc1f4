//! Raw element relocation.
//!
//! Moving a Rust value is a bitwise copy that leaves the source slot
//! logically uninitialized, so every element type is relocatable with
//! `ptr::copy`. None of these functions drop the source slots.

use core::{
    mem::needs_drop,
    ptr::{self, NonNull},
};

/// Moves `len` elements from `src` into the non-overlapping `dst`.
#[inline(always)]
pub(super) unsafe fn relocate<T>(src: NonNull<T>, dst: NonNull<T>, len: usize) {
    unsafe {
        src.copy_to_nonoverlapping(dst, len);
    }
}

/// Moves the `[index, len)` tail `count` slots to the right, leaving
/// `[index, index + count)` uninitialized.
#[inline(always)]
pub(super) unsafe fn shift_right<T>(ptr: NonNull<T>, index: usize, len: usize, count: usize) {
    debug_assert!(index <= len);
    unsafe {
        ptr.add(index).copy_to(ptr.add(index + count), len - index);
    }
}

/// Moves the `[index + count, len)` tail `count` slots to the left over
/// the already vacated `[index, index + count)`.
#[inline(always)]
pub(super) unsafe fn shift_left<T>(ptr: NonNull<T>, index: usize, len: usize, count: usize) {
    debug_assert!(index + count <= len);
    unsafe {
        ptr.add(index + count).copy_to(ptr.add(index), len - index - count);
    }
}

#[inline(always)]
pub(super) unsafe fn drop_in_place<T>(ptr: NonNull<T>, len: usize) {
    if needs_drop::<T>() {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), len));
        }
    }
}
