#[macro_export]
macro_rules! const_assert {
    ($check:expr $(,$msg:tt)*) => {
        const _: () = assert!($check $(,$msg)*);
    };
}

#[macro_export]
macro_rules! size_of {
    ($t:ty) => {
        core::mem::size_of::<$t>()
    };
}

/// Builds a [`DynArray`](crate::DynArray) on the global allocator.
///
/// Every form evaluates to a [`Result`](crate::Result), since building the
/// array allocates.
///
/// ```
/// use ark_mem::dyn_array;
///
/// let values = dyn_array![15, 21, 36].unwrap();
/// assert_eq!(values.capacity(), 3);
///
/// let zeros = dyn_array![0u8; 4].unwrap();
/// assert_eq!(zeros, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynArray::<_>::new()
    };
    ($value:expr; $n:expr) => {
        $crate::DynArray::<_>::with_len($n, $value)
    };
    [$($elem:expr),+ $(,)?] => {
        $crate::DynArray::<_>::from_array([$($elem),+])
    };
}
