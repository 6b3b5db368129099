// fixed-capacity ring part of a bounded channel.

use std::fmt::{self, Formatter, Debug};


// fixed-capacity FIFO ring. externally-safe, not itself concurrent.
//
// memory layout:
//
// - there are `capacity + 1` storage slots. one slot is always left free so that full and empty
//   can be told apart by the cursors alone.
// - empty iff write == read.
// - full iff (write + 1) % storage len == read.
// - slots in [read, write) (wrapping) are Some, all others are None.
pub(crate) struct Ring<T> {
    slots: Box<[Option<T>]>,
    // next slot to write to.
    write: usize,
    // next slot to read from.
    read: usize,
}

impl<T> Ring<T> {
    // construct empty ring able to hold `capacity` elements.
    //
    // panics if capacity is 0.
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Ring capacity must be non-zero");
        assert!(capacity < usize::MAX, "Ring capacity overflowed");
        Ring {
            slots: (0..=capacity).map(|_| None).collect(),
            write: 0,
            read: 0,
        }
    }

    // maximum number of elements.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    // current number of elements.
    pub(crate) fn len(&self) -> usize {
        (self.write + self.slots.len() - self.read) % self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.write == self.read
    }

    pub(crate) fn is_full(&self) -> bool {
        self.advance(self.write) == self.read
    }

    // cursor position after `idx`, wrapping around.
    fn advance(&self, idx: usize) -> usize {
        (idx + 1) % self.slots.len()
    }

    // push to back. returns the element back if full.
    pub(crate) fn push(&mut self, elem: T) -> Result<(), T> {
        if self.is_full() {
            return Err(elem);
        }
        debug_assert!(self.slots[self.write].is_none(), "Ring write slot occupied (internal bug)");
        self.slots[self.write] = Some(elem);
        self.write = self.advance(self.write);
        Ok(())
    }

    // pop from front.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let elem = self.slots[self.read].take();
        debug_assert!(elem.is_some(), "Ring read slot empty (internal bug)");
        self.read = self.advance(self.read);
        elem
    }
}

impl<T: Debug> Debug for Ring<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut f = f.debug_list();
        let mut i = self.read;
        while i != self.write {
            if let Some(elem) = &self.slots[i] {
                f.entry(elem);
            }
            i = self.advance(i);
        }
        f.finish()
    }
}
