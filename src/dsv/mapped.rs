//! Read-only byte buffer backing an index.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::{IndexError, Result};

#[derive(Debug)]
enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

/// An immutable, fixed-length byte buffer shared by all indexing workers.
///
/// Files are memory-mapped read-only. Zero-length files cannot be mapped on
/// every platform, so they (and in-memory data) are held as an owned buffer.
#[derive(Debug)]
pub struct MappedFile {
    backing: Backing,
    path: Option<PathBuf>,
}

impl MappedFile {
    /// Map `path` read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IndexError::io(path, e))?;
        let len = file.metadata().map_err(|e| IndexError::io(path, e))?.len();

        let backing = if len == 0 {
            Backing::Owned(Vec::new())
        } else {
            // SAFETY: the mapping is read-only and the index never mutates it.
            // Truncating the file while it is mapped is outside our contract.
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| IndexError::io(path, e))?;
            Backing::Mapped(mmap)
        };

        log::debug!("mapped {} ({} bytes)", path.display(), len);

        Ok(Self {
            backing,
            path: Some(path.to_path_buf()),
        })
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            backing: Backing::Owned(bytes),
            path: None,
        }
    }

    /// The whole buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(mmap) => &mmap[..],
            Backing::Owned(bytes) => bytes.as_slice(),
        }
    }

    /// Buffer length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the buffer holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at `offset`. Panics if `offset >= len()`.
    #[inline]
    pub fn byte_at(&self, offset: usize) -> u8 {
        self.as_bytes()[offset]
    }

    /// Bytes in `[start, end)`. Panics if the range is out of bounds.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &[u8] {
        &self.as_bytes()[start..end]
    }

    /// Path of the mapped file, `None` for in-memory buffers.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the bytes come from an OS mapping.
    pub fn is_mapped(&self) -> bool {
        matches!(self.backing, Backing::Mapped(_))
    }
}
