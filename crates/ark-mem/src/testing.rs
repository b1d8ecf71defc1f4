use std::{
    alloc::{Layout, alloc, dealloc},
    cell::Cell,
    rc::Rc,
};

use core::ptr::NonNull;

use crate::{Allocator, Propagation};

/// Counts constructions and drops of [`Snitch`]es.
#[derive(Default)]
pub struct Tracker {
    created: Cell<usize>,
    dropped: Cell<usize>,
}

impl Tracker {

    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn live(&self) -> usize {
        self.created.get() - self.dropped.get()
    }

    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }
}

/// Element type whose drops are observable.
pub struct Snitch {
    pub score: i32,
    tracker: Rc<Tracker>,
}

impl Snitch {

    pub fn new(tracker: &Rc<Tracker>, score: i32) -> Self {
        tracker.created.set(tracker.created.get() + 1);
        Self {
            score,
            tracker: tracker.clone(),
        }
    }
}

impl Clone for Snitch {

    fn clone(&self) -> Self {
        Self::new(&self.tracker, self.score)
    }
}

impl Drop for Snitch {

    fn drop(&mut self) {
        self.tracker.dropped.set(self.tracker.dropped.get() + 1);
    }
}

impl PartialEq for Snitch {

    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl core::fmt::Debug for Snitch {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Snitch {{{}}}", self.score)
    }
}

pub fn scores<'a>(items: impl IntoIterator<Item = &'a Snitch>) -> Vec<i32> {
    items.into_iter().map(|s| s.score).collect()
}

/// Heap allocator with an identity and configurable propagation.
///
/// Instances compare equal when their ids match. All instances built from
/// the same [`TestAlloc::new`] share one count of outstanding buffers.
#[derive(Clone)]
pub struct TestAlloc<const COPY: bool, const MOVE: bool, const SWAP: bool> {
    pub id: u32,
    outstanding: Rc<Cell<usize>>,
}

pub type Sticky = TestAlloc<false, false, false>;
pub type Travelling = TestAlloc<true, true, true>;

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> TestAlloc<COPY, MOVE, SWAP> {

    pub fn new(id: u32) -> Self {
        Self {
            id,
            outstanding: Rc::new(Cell::new(0)),
        }
    }

    pub fn sibling(&self, id: u32) -> Self {
        Self {
            id,
            outstanding: self.outstanding.clone(),
        }
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.get()
    }
}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> Allocator for TestAlloc<COPY, MOVE, SWAP> {

    const PROPAGATION: Propagation = Propagation {
        on_copy: COPY,
        on_move: MOVE,
        on_swap: SWAP,
    };

    unsafe fn allocate_raw(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let layout = Layout::from_size_align(size, align).ok()?;
        if layout.size() == 0 {
            return None
        }
        let ptr = NonNull::new(unsafe { alloc(layout) })?;
        self.outstanding.set(self.outstanding.get() + 1);
        Some(ptr)
    }

    unsafe fn free_raw(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        let layout = Layout::from_size_align(size, align).unwrap();
        self.outstanding.set(self.outstanding.get() - 1);
        unsafe { dealloc(ptr.as_ptr(), layout) }
    }

    fn equals(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Allocator that never hands out memory.
#[derive(Clone, Default)]
pub struct Exhausted;

impl Allocator for Exhausted {

    unsafe fn allocate_raw(&self, _size: usize, _align: usize) -> Option<NonNull<u8>> {
        None
    }

    unsafe fn free_raw(&self, _ptr: NonNull<u8>, _size: usize, _align: usize) {
        unreachable!("nothing was allocated")
    }

    fn equals(&self, _other: &Self) -> bool {
        true
    }
}
