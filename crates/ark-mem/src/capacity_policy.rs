//! Growth rules for [`DynArray`](crate::DynArray).

pub trait CapacityPolicy {

    /// Capacity of a freshly constructed or cleared array.
    const DEFAULT_CAPACITY: usize;

    /// Returns the capacity to grow to from `current` so that at least
    /// `required` elements fit, never exceeding `max`.
    ///
    /// Returns `None` if `required` is larger than `max`.
    fn grow(current: usize, required: usize, max: usize) -> Option<usize>;
}

/// Multiplies the capacity by the smallest power of two that makes the
/// required length fit, saturating at the maximum.
pub struct Doubling {}

impl CapacityPolicy for Doubling {

    const DEFAULT_CAPACITY: usize = 10;

    fn grow(current: usize, required: usize, max: usize) -> Option<usize> {
        if required > max {
            return None
        }
        if required <= current {
            return Some(current)
        }
        let mut capacity =
            if current == 0 {
                Self::DEFAULT_CAPACITY.max(1)
            }
            else {
                current
            };
        while capacity < required {
            if capacity > max / 2 {
                return Some(max)
            }
            capacity *= 2;
        }
        Some(capacity.min(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_more_element_doubles() {
        assert_eq!(Doubling::grow(10, 11, usize::MAX), Some(20));
        assert_eq!(Doubling::grow(1, 2, usize::MAX), Some(2));
    }

    #[test]
    fn uses_smallest_power_of_two_multiple() {
        assert_eq!(Doubling::grow(10, 21, usize::MAX), Some(40));
        assert_eq!(Doubling::grow(10, 40, usize::MAX), Some(40));
        assert_eq!(Doubling::grow(3, 100, usize::MAX), Some(192));
    }

    #[test]
    fn grows_from_zero_through_default() {
        assert_eq!(Doubling::grow(0, 1, usize::MAX), Some(10));
        assert_eq!(Doubling::grow(0, 15, usize::MAX), Some(20));
    }

    #[test]
    fn saturates_at_max() {
        assert_eq!(Doubling::grow(600, 700, 1000), Some(1000));
        assert_eq!(Doubling::grow(usize::MAX / 2 + 1, usize::MAX, usize::MAX), Some(usize::MAX));
    }

    #[test]
    fn refuses_past_max() {
        assert_eq!(Doubling::grow(10, 1001, 1000), None);
    }

    #[test]
    fn never_shrinks() {
        assert_eq!(Doubling::grow(64, 3, usize::MAX), Some(64));
    }
}
