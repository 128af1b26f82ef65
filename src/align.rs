/// Every block size handed out by the arena is a multiple of this.
pub const ALIGNMENT: usize = 4;

/// Rounds the given size up to the arena's 4-byte granularity.
///
/// # Examples
///
/// ```rust
/// use rarena::align;
///
/// assert_eq!(align!(0), 0);
/// assert_eq!(align!(13), 16);
/// assert_eq!(align!(12), 12);
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    ($value + $crate::align::ALIGNMENT - 1) & !($crate::align::ALIGNMENT - 1)
  };
}
