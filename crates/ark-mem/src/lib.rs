//! Allocator-aware collections.
//!
//! The centerpiece is [`DynArray`], a growable contiguous array that owns
//! one instance of an [`Allocator`] and honours the allocator's
//! [`Propagation`] policy when it is copied, moved or swapped.

#[macro_use]
mod macros;

pub mod capacity_policy;
pub mod const_fn;
pub mod dyn_array;

mod allocator;
mod errors;
mod global_alloc;

#[cfg(test)]
mod testing;

pub use errors::CapacityError;
pub use allocator::{Allocator, Propagation};
pub use global_alloc::GlobalAlloc;
pub use capacity_policy::{CapacityPolicy, Doubling};
pub use dyn_array::{DynArray, Iter, IterMut, IntoIter, Cursor};
pub use const_fn::align_up;

pub type Result<T> = core::result::Result<T, CapacityError>;
