//! Chunk tags shared by the TPI and container layouts.
//!
//! Tags are stored as four ASCII bytes written back to front (`DAEH` on disk
//! is the `HEAD` tag), so read as a little-endian `u32` they spell the chunk
//! name most significant byte first.

use core::fmt::{self, Debug, Display};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(u32);

impl Tag {
    pub const HEAD: Tag = Tag::from_le_bytes(*b"DAEH");
    pub const DATA: Tag = Tag::from_le_bytes(*b"ATAD");
    pub const FILE: Tag = Tag::from_le_bytes(*b"ELIF");
    pub const PACKAGE: Tag = Tag::from_le_bytes(*b"GKCP");

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Bytes as they appear in the stream.
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl From<u32> for Tag {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.0.to_be_bytes();
        match core::str::from_utf8(&name) {
            Ok(name) if name.bytes().all(|b| b.is_ascii_graphic()) => f.write_str(name),
            _ => write!(f, "0x{:08X}", self.0),
        }
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}
