/// Rounds a size up to a multiple of the machine word, or of an explicit
/// power-of-two alignment when a second argument is given.
///
/// Block sizes handed to the raw allocator and the stack slot capacities are
/// both computed with this, so a `Block` header that follows a payload in a
/// neighbouring region always lands on a word boundary.
///
/// # Examples
///
/// ```rust
/// use std::mem;
/// use blocklist::align;
///
/// match mem::size_of::<usize>() {
///     8 => assert_eq!(align!(13), 16), // 64 bit machine.
///     4 => assert_eq!(align!(11), 12), // 32 bit machine.
///     _ => {},
/// };
///
/// assert_eq!(align!(17, 64), 64);
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    $crate::align!($value, ::core::mem::size_of::<usize>())
  };
  ($value:expr, $to:expr) => {
    ($value + $to - 1) & !($to - 1)
  };
}

#[cfg(test)]
mod tests {
  use std::mem;

  #[test]
  fn test_align_to_word() {
    let ptr_size = mem::size_of::<usize>();

    for i in 0..10 {
      let sizes = (ptr_size * i + 1)..=(ptr_size * (i + 1));
      let expected = ptr_size * (i + 1);

      for size in sizes {
        assert_eq!(expected, align!(size));
      }
    }
  }

  #[test]
  fn test_align_to_explicit_boundary() {
    assert_eq!(align!(0usize, 16), 0);
    assert_eq!(align!(1usize, 16), 16);
    assert_eq!(align!(16usize, 16), 16);
    assert_eq!(align!(1025usize, 1024), 2048);
  }

  #[test]
  fn test_align_is_usable_in_const() {
    const SIZE: usize = align!(3usize);
    assert_eq!(SIZE, mem::size_of::<usize>());
  }
}
