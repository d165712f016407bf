//! Layout of `packages.dat`:
//! repeated until the end of the buffer,
//! - `GKCP` ([Tag::PACKAGE])
//! - [BlobLength]: `u32` whose top byte is a stray terminator, not part of the length
//! - that many bytes of one complete TPI stream

use bytes::Bytes;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::{
    chunk::Tag,
    cursor::{ByteCursor, ByteWriter},
    error::{TtfsError, TtfsResult},
    tpi::{decode_package, encode_package, DecodeOptions, Package},
};

/// Terminator byte written on top of every blob length.
pub const LENGTH_TERMINATOR: u8 = 0x80;

/// Largest blob a [BlobLength] can describe.
pub const MAX_BLOB_LEN: usize = 0x00FF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct BlobLength {
    low: [u8; 3],
    pub terminator: u8,
}

impl BlobLength {
    pub fn new(len: usize, terminator: u8) -> TtfsResult<Self> {
        if len > MAX_BLOB_LEN {
            return Err(TtfsError::BlobTooLarge {
                len,
                max: MAX_BLOB_LEN,
            });
        }

        let [a, b, c, _] = (len as u32).to_le_bytes();
        Ok(Self {
            low: [a, b, c],
            terminator,
        })
    }

    /// Length with the terminator byte masked out.
    pub fn get(&self) -> usize {
        let [a, b, c] = self.low;
        u32::from_le_bytes([a, b, c, 0]) as usize
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub packages: Vec<Package>,
}

impl Container {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub length_terminator: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            length_terminator: LENGTH_TERMINATOR,
        }
    }
}

/// Parses a whole container, handing every blob to [decode_package].
///
/// # Errors
/// A tag other than [Tag::PACKAGE] is [TtfsError::InvalidContainerHeader];
/// a failing blob is wrapped in [TtfsError::NestedDecodeFailure] with its
/// index and the offset of its tag.
pub fn decode_container(data: &[u8], options: DecodeOptions) -> TtfsResult<Container> {
    let mut cursor = ByteCursor::new(data);
    let mut container = Container::default();

    while cursor.has_remaining() {
        let offset = cursor.position();
        let tag = cursor.read_tag()?;
        if tag != Tag::PACKAGE {
            return Err(TtfsError::InvalidContainerHeader { tag, offset });
        }

        let len = cursor.read_as::<BlobLength>()?.get();
        let blob = cursor.read_exact(len)?;

        let package = decode_package(blob, options).map_err(|source| TtfsError::NestedDecodeFailure {
            index: container.packages.len(),
            offset,
            source: Box::new(source),
        })?;
        container.packages.push(package);
    }

    Ok(container)
}

pub fn encode_container(container: &Container, options: EncodeOptions) -> TtfsResult<Bytes> {
    let mut out = ByteWriter::new();

    for package in &container.packages {
        let blob = encode_package(package)?;

        out.put_tag(Tag::PACKAGE);
        out.put_as(&BlobLength::new(blob.len(), options.length_terminator)?);
        out.put_slice(&blob);
    }

    Ok(out.freeze())
}

/// True when `data` starts with a container tag rather than a TPI chunk.
pub fn looks_like_container(data: &[u8]) -> bool {
    data.starts_with(&Tag::PACKAGE.to_le_bytes())
}
