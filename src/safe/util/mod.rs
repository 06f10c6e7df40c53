//! Shared plumbing for the safe wrappers
//!
//! Every object kind goes through the same two seams: `OclInfo` for
//! information queries and `Handle` for reference counting.

pub use handle::*;
#[cfg(test)]
pub(crate) use handle::tests as fake_handles;
pub(crate) use info::sealed::OclInfoInternal;
pub use info::*;

use crate::raw::{functions, RawOpenCL};
use crate::{Error, Result};

mod handle;
mod info;

/// Get the loaded OpenCL entry points, loading the library if necessary.
pub(crate) fn api() -> Result<&'static RawOpenCL> {
    functions::api().map_err(Error::LoadError)
}

/// Reject a slice of work sizes, offsets, or counts that OpenCL would refuse.
pub(crate) fn check_dimensions(global: &[usize]) -> Result<()> {
    if global.is_empty() || global.len() > 3 {
        return Err(Error::InvalidArgument(format!(
            "work size must have 1 to 3 dimensions, got {}",
            global.len()
        )));
    }

    if global.contains(&0) {
        return Err(Error::InvalidArgument(format!(
            "work size {:?} has a zero-sized dimension",
            global
        )));
    }

    Ok(())
}

/// Check that `len` elements starting at `offset` fit in a buffer of
/// `capacity` elements
pub(crate) fn check_range(offset: usize, len: usize, capacity: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(Error::InvalidArgument(format!(
            "range {}..{} is out of bounds for buffer of length {}",
            offset,
            offset.saturating_add(len),
            capacity
        ))),
    }
}

/// Convert a list of key/value pairs into a zero-terminated property list
pub(crate) fn properties_list<P: Copy + Default>(pairs: &[(P, P)]) -> Vec<P> {
    let mut list = Vec::with_capacity(pairs.len() * 2 + 1);
    for (k, v) in pairs {
        list.push(*k);
        list.push(*v);
    }
    list.push(P::default());
    list
}

/// Split a raw property list into key/value pairs, stopping at the first zero
/// key
pub(crate) fn properties_pairs(list: &[isize]) -> Vec<(isize, isize)> {
    list.chunks_exact(2)
        .take_while(|c| c[0] != 0)
        .map(|c| (c[0], c[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(&[64]).is_ok());
        assert!(check_dimensions(&[8, 8, 8]).is_ok());
        assert!(check_dimensions(&[]).is_err());
        assert!(check_dimensions(&[1, 1, 1, 1]).is_err());
        assert!(check_dimensions(&[16, 0]).is_err());
    }

    #[test]
    fn test_check_range() {
        assert!(check_range(0, 16, 16).is_ok());
        assert!(check_range(8, 8, 16).is_ok());
        assert!(check_range(16, 0, 16).is_ok());
        assert!(check_range(9, 8, 16).is_err());
        assert!(check_range(usize::MAX, 2, 16).is_err());
    }

    #[test]
    fn test_properties_roundtrip() {
        let list = properties_list(&[(0x1084isize, 0xbeef), (0x1088, 1)]);
        assert_eq!(list, vec![0x1084, 0xbeef, 0x1088, 1, 0]);
        assert_eq!(properties_pairs(&list), vec![(0x1084, 0xbeef), (0x1088, 1)]);
        assert!(properties_pairs(&[]).is_empty());
        assert!(properties_pairs(&[0]).is_empty());
    }
}
