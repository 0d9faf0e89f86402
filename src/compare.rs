//! Null-tolerant comparison helpers used by the string and memory assertions.
//!
//! Every comparator treats "absent" (`None`) as a first-class value: two absent
//! operands are equal, one absent operand never equals a present one.

use std::ptr;

/// Full string equality, tolerant of absent operands.
pub fn equal_strings(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) if ptr::eq(a, b) => true,
        (Some(a), Some(b)) => a.as_bytes() == b.as_bytes(),
        _ => false,
    }
}

/// Compares at most `n` bytes, stopping at the end of either string.
///
/// The end of a string (or an embedded NUL) acts as a terminator: both
/// operands ending at the same offset is a match, one ending earlier is not.
pub fn equal_string_prefix(a: Option<&str>, b: Option<&str>, n: usize) -> bool {
    if n == 0 {
        return true;
    }
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) if ptr::eq(a, b) => true,
        (Some(a), Some(b)) => {
            let (a, b) = (a.as_bytes(), b.as_bytes());
            for i in 0..n {
                let x = a.get(i).copied().unwrap_or(0);
                let y = b.get(i).copied().unwrap_or(0);
                if x != y {
                    return false;
                }
                if x == 0 {
                    break;
                }
            }
            true
        }
        _ => false,
    }
}

/// Exact comparison of the first `n` bytes.
///
/// A slice shorter than `n` has nothing to compare past its end and is
/// therefore never equal.
pub fn equal_bytes(a: Option<&[u8]>, b: Option<&[u8]>, n: usize) -> bool {
    if n == 0 {
        return true;
    }
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) if ptr::eq(a, b) => true,
        (Some(a), Some(b)) => a.len() >= n && b.len() >= n && a[..n] == b[..n],
        _ => false,
    }
}

/// Strips everything up to the last path separator.
pub fn truncate_path(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Anything an assertion can view as an optional string.
pub trait MaybeStr {
    fn maybe_str(&self) -> Option<&str>;
}

impl MaybeStr for str {
    fn maybe_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl MaybeStr for String {
    fn maybe_str(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: AsRef<str>> MaybeStr for Option<T> {
    fn maybe_str(&self) -> Option<&str> {
        self.as_ref().map(AsRef::as_ref)
    }
}

impl<T: MaybeStr + ?Sized> MaybeStr for &T {
    fn maybe_str(&self) -> Option<&str> {
        (**self).maybe_str()
    }
}

/// Anything an assertion can view as an optional byte range.
pub trait MaybeBytes {
    fn maybe_bytes(&self) -> Option<&[u8]>;
}

impl MaybeBytes for [u8] {
    fn maybe_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl<const N: usize> MaybeBytes for [u8; N] {
    fn maybe_bytes(&self) -> Option<&[u8]> {
        Some(self.as_slice())
    }
}

impl MaybeBytes for Vec<u8> {
    fn maybe_bytes(&self) -> Option<&[u8]> {
        Some(self.as_slice())
    }
}

impl MaybeBytes for str {
    fn maybe_bytes(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl MaybeBytes for String {
    fn maybe_bytes(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl<T: AsRef<[u8]>> MaybeBytes for Option<T> {
    fn maybe_bytes(&self) -> Option<&[u8]> {
        self.as_ref().map(AsRef::as_ref)
    }
}

impl<T: MaybeBytes + ?Sized> MaybeBytes for &T {
    fn maybe_bytes(&self) -> Option<&[u8]> {
        (**self).maybe_bytes()
    }
}
