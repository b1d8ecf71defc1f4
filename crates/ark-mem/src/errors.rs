#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityError {
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
    MaxCapacityExceeded {
        requested: usize,
        max_capacity: usize,
    },
    AllocFailed {
        new_capacity: usize,
    },
}

impl core::fmt::Display for CapacityError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {} was out of bounds of len {}", index, len)
            },
            Self::MaxCapacityExceeded { requested, max_capacity } => {
                write!(f, "requested capacity {} exceeds maximum capacity of {}", requested, max_capacity)
            },
            Self::AllocFailed { new_capacity } => {
                write!(f, "allocation failed with new capacity {}", new_capacity)
            },
        }
    }
}

impl core::error::Error for CapacityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_numbers() {
        let err = CapacityError::IndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 was out of bounds of len 3");
        let err = CapacityError::MaxCapacityExceeded { requested: 10, max_capacity: 4 };
        assert_eq!(err.to_string(), "requested capacity 10 exceeds maximum capacity of 4");
        let err = CapacityError::AllocFailed { new_capacity: 32 };
        assert_eq!(err.to_string(), "allocation failed with new capacity 32");
    }
}
