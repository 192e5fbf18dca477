//! Borrowed views of single fields.

use core::fmt;
use core::ops::Deref;
use std::borrow::Cow;

/// The raw bytes of one field, borrowed from the index that produced it.
///
/// The trailing delimiter or record separator is not included. No unquoting
/// or decoding is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell<'a> {
    bytes: &'a [u8],
}

impl<'a> Cell<'a> {
    #[inline]
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Raw field bytes.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Field as a string slice, if it is valid UTF-8.
    pub fn to_str(&self) -> Result<&'a str, core::str::Utf8Error> {
        core::str::from_utf8(self.bytes)
    }

    /// Field as a string, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.bytes)
    }
}

impl Deref for Cell<'_> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.bytes
    }
}

impl AsRef<[u8]> for Cell<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl fmt::Debug for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cell")
            .field(&self.to_string_lossy())
            .finish()
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl PartialEq<[u8]> for Cell<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl PartialEq<&[u8]> for Cell<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.bytes == *other
    }
}

impl PartialEq<str> for Cell<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Cell<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_views() {
        let cell = Cell::new(b"hello");
        assert_eq!(cell.len(), 5);
        assert_eq!(cell.as_bytes(), b"hello");
        assert_eq!(cell.to_str(), Ok("hello"));
        assert_eq!(cell, "hello");
        assert_eq!(cell, b"hello".as_slice());
        assert_eq!(cell.to_string(), "hello");
        assert_eq!(format!("{cell:?}"), "Cell(\"hello\")");
    }

    #[test]
    fn test_cell_invalid_utf8() {
        let cell = Cell::new(&[0x66, 0xff, 0x6f]);
        assert!(cell.to_str().is_err());
        assert_eq!(cell.to_string_lossy(), "f\u{fffd}o");
    }

    #[test]
    fn test_empty_cell() {
        let cell = Cell::default();
        assert!(cell.is_empty());
        assert_eq!(cell, "");
    }
}
