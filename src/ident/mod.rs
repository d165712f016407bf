//! Package and file identifiers (the "CRC" strings).
//!
//! Four stored bytes render as eight uppercase hex digits in reverse byte
//! order: `[0x01, 0x02, 0x03, 0x04]` is `04030201`.

use core::{
    fmt::{self, Debug, Display},
    str::FromStr,
};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::{TtfsError, TtfsResult};

pub fn format_id(bytes: &[u8]) -> TtfsResult<String> {
    let bytes: [u8; 4] = bytes.try_into().map_err(|_| TtfsError::InvalidIdentifier {
        input: format!("{bytes:02X?}"),
    })?;

    Ok(Identifier(bytes).to_string())
}

pub fn parse_id(text: &str) -> TtfsResult<[u8; 4]> {
    let invalid = || TtfsError::InvalidIdentifier {
        input: text.to_owned(),
    };

    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let mut out = [0u8; 4];
    for (slot, group) in out.iter_mut().zip(text.as_bytes().rchunks(2)) {
        let group = core::str::from_utf8(group).map_err(|_| invalid())?;
        *slot = u8::from_str_radix(group, 16).map_err(|_| invalid())?;
    }

    Ok(out)
}

/// Identifier in storage byte order.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned,
)]
#[repr(transparent)]
pub struct Identifier(pub [u8; 4]);

impl Identifier {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; 4] {
        self.0
    }
}

impl From<[u8; 4]> for Identifier {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().rev().try_for_each(|b| write!(f, "{b:02X}"))
    }
}

impl Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({self})")
    }
}

impl FromStr for Identifier {
    type Err = TtfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id(s).map(Self)
    }
}
