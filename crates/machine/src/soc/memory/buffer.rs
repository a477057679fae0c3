//! Raw storage behind the RAM device.
//!
//! On Unix the bytes come from an anonymous private `mmap`, so a machine
//! with the default 128 MiB region starts instantly and only touches host
//! pages the guest actually uses. Elsewhere the storage is a plain zeroed
//! allocation.

use std::slice;

/// An owned byte buffer addressed by offset.
///
/// Accessors assert their offsets against the allocation size. The bus
/// checks device claims before handing an offset down here, so tripping
/// an assert means harness misuse, not a guest-visible fault.
pub struct DramBuffer {
    ptr: *mut u8,
    size: usize,
    is_mmap: bool,
}

// SAFETY: the buffer owns its allocation exclusively and all access goes
// through offset-checked methods.
unsafe impl Send for DramBuffer {}
unsafe impl Sync for DramBuffer {}

impl DramBuffer {
    /// Allocates `size` bytes, via `mmap` on Unix and a leaked `Vec`
    /// elsewhere. Panics if the mapping cannot be created.
    pub fn new(size: usize) -> Self {
        #[cfg(unix)]
        {
            use std::ptr;
            // SAFETY: anonymous private mapping with null hint; the result is
            // checked against MAP_FAILED before use.
            let ptr = unsafe {
                libc::mmap(
                    ptr::null_mut(),
                    size,
                    libc::PROT_READ | libc::PROT_WRITE,
                    libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                    -1,
                    0,
                )
            };

            if ptr == libc::MAP_FAILED {
                panic!("mmap of {} byte DRAM buffer failed", size);
            }

            Self {
                ptr: ptr as *mut u8,
                size,
                is_mmap: true,
            }
        }

        #[cfg(not(unix))]
        {
            let mut vec = vec![0u8; size];
            let ptr = vec.as_mut_ptr();
            std::mem::forget(vec);
            Self {
                ptr,
                size,
                is_mmap: false,
            }
        }
    }

    /// Buffer size in bytes.
    pub fn len(&self) -> usize {
        self.size
    }

    /// True for a zero-size buffer.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Reads the byte at `offset`.
    pub fn read_u8(&self, offset: usize) -> u8 {
        assert!(offset < self.size, "DRAM read out of bounds");
        // SAFETY: offset is checked against the allocation size above.
        unsafe { *self.ptr.add(offset) }
    }

    /// Writes the byte at `offset`.
    pub fn write_u8(&self, offset: usize, val: u8) {
        assert!(offset < self.size, "DRAM write out of bounds");
        // SAFETY: offset is checked against the allocation size above.
        unsafe {
            *self.ptr.add(offset) = val;
        }
    }

    /// Borrows `len` bytes starting at `offset`.
    pub fn read_slice(&self, offset: usize, len: usize) -> &[u8] {
        assert!(offset + len <= self.size, "DRAM read out of bounds");
        // SAFETY: the range [offset, offset + len) is checked above.
        unsafe { slice::from_raw_parts(self.ptr.add(offset), len) }
    }

    /// Copies `data` into the buffer starting at `offset`.
    pub fn write_slice(&self, offset: usize, data: &[u8]) {
        assert!(offset + data.len() <= self.size, "DRAM write out of bounds");
        // SAFETY: the destination range is checked above and the source slice
        // cannot overlap a freshly mmap'd private mapping.
        unsafe {
            let dest = self.ptr.add(offset);
            std::ptr::copy_nonoverlapping(data.as_ptr(), dest, data.len());
        }
    }
}

impl Drop for DramBuffer {
    /// Returns the allocation the way it was obtained: `munmap`, or a
    /// rebuilt `Vec` dropped in place.
    fn drop(&mut self) {
        if self.is_mmap {
            #[cfg(unix)]
            // SAFETY: ptr/size describe the mapping created in `new`.
            unsafe {
                let _ = libc::munmap(self.ptr as *mut _, self.size);
            }
        } else {
            #[cfg(not(unix))]
            // SAFETY: ptr/size describe the Vec allocation leaked in `new`.
            unsafe {
                let _ = Vec::from_raw_parts(self.ptr, self.size, self.size);
            }
        }
    }
}

impl std::fmt::Debug for DramBuffer {
    /// Size and backing only, never the contents.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DramBuffer")
            .field("size", &self.size)
            .field("is_mmap", &self.is_mmap)
            .finish()
    }
}
