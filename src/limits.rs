//! Process stack limit.

/// Soft stack limit of the current process in bytes, or `None` when it is
/// unlimited or cannot be read.
#[cfg(unix)]
pub fn stack_limit() -> Option<usize> {
  let mut limit = libc::rlimit {
    rlim_cur: 0,
    rlim_max: 0,
  };

  if unsafe { libc::getrlimit(libc::RLIMIT_STACK, &mut limit) } != 0 {
    return None;
  }

  if limit.rlim_cur == libc::RLIM_INFINITY {
    return None;
  }

  usize::try_from(limit.rlim_cur).ok()
}

#[cfg(not(unix))]
pub fn stack_limit() -> Option<usize> {
  None
}
