//! Concrete [`Allocator`](ark_mem::Allocator)s.
//!
//! * [`TracingAlloc`] logs every allocation and release and keeps live byte
//!   counts, which makes leaks and double frees visible.
//! * [`ArenaAlloc`] hands out [`ArenaHandle`]s that bump-allocate from one
//!   fixed block.
//! * [`Propagating`] overrides the propagation policy of another allocator.

mod arena_alloc;
mod tracing_alloc;
mod propagating;

pub use arena_alloc::{ArenaAlloc, ArenaHandle};
pub use tracing_alloc::{TracingAlloc, AllocStats};
pub use propagating::Propagating;
