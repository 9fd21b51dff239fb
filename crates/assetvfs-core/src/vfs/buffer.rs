//! Owned asset buffers.

use std::ffi::CStr;
use std::fmt;
use std::ops::Deref;
use std::str::Utf8Error;

/// Contents of a file read through the registry.
///
/// Holds exactly [`len`](Self::len) content bytes followed by one zero byte
/// that is not counted in the length. Text consumers (shader compilers, INI
/// parsers) can hand [`as_bytes_with_nul`](Self::as_bytes_with_nul) to
/// anything expecting a terminated string without copying.
///
/// Derefs to the content bytes only.
#[derive(Clone, PartialEq, Eq)]
pub struct AssetBuffer {
    // Invariant: non-empty, last byte is 0.
    data: Vec<u8>,
}

impl AssetBuffer {
    /// Take ownership of backend content and append the sentinel byte.
    pub fn from_content(mut content: Vec<u8>) -> Self {
        content.reserve_exact(1);
        content.push(0);
        Self { data: content }
    }

    /// Number of content bytes, excluding the sentinel.
    pub fn len(&self) -> usize {
        self.data.len() - 1
    }

    /// Returns true if the file was empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Content bytes without the sentinel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    /// Content bytes followed by the zero sentinel.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.data
    }

    /// Content as UTF-8 text.
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    /// View as a C string, stopping at the first zero byte.
    ///
    /// Always succeeds because of the sentinel; content containing interior
    /// zeros is truncated at the first one.
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.data).unwrap_or_default()
    }

    /// Consume the buffer, returning the content without the sentinel.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.pop();
        self.data
    }
}

impl Deref for AssetBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for AssetBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for AssetBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetBuffer")
            .field("len", &self.len())
            .finish()
    }
}
