use core::cmp::Ordering;

/// A position in `[0, len]` over a borrowed array.
///
/// The end position `len` is valid and reads as `None`. Moving past either
/// end saturates. Cursors over the same array order by offset.
#[derive(Debug)]
pub struct Cursor<'a, T> {
    slice: &'a [T],
    index: usize,
}

impl<'a, T> Cursor<'a, T> {

    #[inline(always)]
    pub(super) fn new(slice: &'a [T], index: usize) -> Self {
        debug_assert!(index <= slice.len());
        Self {
            slice,
            index,
        }
    }

    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.index
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.index == self.slice.len()
    }

    #[inline(always)]
    pub fn get(&self) -> Option<&'a T> {
        self.slice.get(self.index)
    }

    /// Element `delta` slots away from the cursor, if it is live.
    pub fn peek(&self, delta: isize) -> Option<&'a T> {
        self.index
            .checked_add_signed(delta)
            .and_then(|index| self.slice.get(index))
    }

    /// Steps forward. Returns `false` if the cursor already was at the end.
    pub fn move_next(&mut self) -> bool {
        if self.is_end() {
            return false
        }
        self.index += 1;
        true
    }

    /// Steps back. Returns `false` if the cursor already was at the front.
    pub fn move_prev(&mut self) -> bool {
        if self.index == 0 {
            return false
        }
        self.index -= 1;
        true
    }

    #[inline(always)]
    pub fn advance(&mut self, count: usize) {
        self.index = self.index.saturating_add(count).min(self.slice.len());
    }

    #[inline(always)]
    pub fn retreat(&mut self, count: usize) {
        self.index = self.index.saturating_sub(count);
    }

    /// Signed distance from `other` to `self`.
    pub fn distance_from(&self, other: &Self) -> isize {
        self.index as isize - other.index as isize
    }

    /// Elements from the cursor up to the end.
    #[inline(always)]
    pub fn rest(&self) -> &'a [T] {
        &self.slice[self.index..]
    }
}

impl<T> Clone for Cursor<'_, T> {

    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {

    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {

    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<'_, T> {

    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

#[cfg(test)]
mod tests {
    use crate::CapacityError;

    #[test]
    fn walks_forward_to_the_end() {
        let values = dyn_array![15, 21, 36].unwrap();
        let mut cursor = values.cursor(0).unwrap();
        let mut seen = vec![];
        while let Some(&value) = cursor.get() {
            seen.push(value);
            cursor.move_next();
        }
        assert_eq!(seen, [15, 21, 36]);
        assert!(cursor.is_end());
        assert_eq!(cursor.offset(), 3);
        assert!(!cursor.move_next());
    }

    #[test]
    fn random_access_saturates() {
        let values = dyn_array![1, 2, 3, 4, 5].unwrap();
        let mut cursor = values.cursor(2).unwrap();
        assert_eq!(cursor.peek(-2), Some(&1));
        assert_eq!(cursor.peek(3), None);
        assert_eq!(cursor.peek(-3), None);
        cursor.advance(10);
        assert!(cursor.is_end());
        cursor.retreat(2);
        assert_eq!(cursor.get(), Some(&4));
        assert_eq!(cursor.rest(), &[4, 5]);
        cursor.retreat(7);
        assert_eq!(cursor.offset(), 0);
        assert!(!cursor.move_prev());
    }

    #[test]
    fn cursors_order_by_offset() {
        let values = dyn_array![1, 2, 3].unwrap();
        let begin = values.cursor(0).unwrap();
        let end = values.cursor(values.len()).unwrap();
        assert!(begin < end);
        assert_eq!(end.distance_from(&begin), 3);
        let mut walker = begin;
        walker.advance(3);
        assert_eq!(walker, end);
    }

    #[test]
    fn cursor_past_end_is_rejected() {
        let values = dyn_array![1].unwrap();
        assert_eq!(
            values.cursor(2).unwrap_err(),
            CapacityError::IndexOutOfBounds { index: 2, len: 1 },
        );
    }

    #[test]
    fn offset_survives_reallocation() {
        let mut values = dyn_array![15, 21, 36].unwrap();
        let offset = values.cursor(2).unwrap().offset();
        values.insert(0, 1).unwrap();
        assert_ne!(values.capacity(), 3);
        assert_eq!(values[offset + 1], 36);
    }
}
