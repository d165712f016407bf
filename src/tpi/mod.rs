//! Layout:
//! a TPI stream is a run of chunks until the end of the buffer, each one a
//! [Tag](crate::chunk::Tag) followed by a `u32` length:
//! - `HEAD`: length `L`, then `L` bytes: [Identifier] and an `i32` file count
//! - `DATA`: name, version and owner as `u16`-prefixed text, then an `i32` [PackageType]
//! - `FILE`: [Identifier], `u32` size, `u16`-prefixed name
//!
//! Only the `HEAD` length bounds its payload; `DATA` and `FILE` payloads end
//! where their last field ends.

use crate::ident::Identifier;

mod reader;
#[cfg(test)]
pub(crate) mod strategy;
mod writer;

pub use reader::decode_package;
pub use writer::encode_package;

/// Visibility of a package, stored as a raw `i32`.
///
/// Values outside [PackageType::SECRET], [PackageType::HIDDEN] and
/// [PackageType::NORMAL] are kept as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageType(i32);

impl PackageType {
    pub const SECRET: PackageType = PackageType(0);
    pub const HIDDEN: PackageType = PackageType(1);
    pub const NORMAL: PackageType = PackageType(2);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// Name of a known visibility, `None` for anything else.
    pub const fn known(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("Secret"),
            1 => Some("Hidden"),
            2 => Some("Normal"),
            _ => None,
        }
    }
}

impl From<i32> for PackageType {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<PackageType> for i32 {
    fn from(value: PackageType) -> Self {
        value.0
    }
}

impl core::fmt::Display for PackageType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.known() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown({})", self.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub id: Identifier,
    /// Declared size, never checked against any payload.
    pub size: u32,
    pub name: String,
}

impl FileEntry {
    pub fn new(id: [u8; 4], size: u32, name: impl Into<String>) -> Self {
        Self {
            id: Identifier(id),
            size,
            name: name.into(),
        }
    }

    /// `<id>.<name>`, the name the file is stored under on the server.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.id, self.name)
    }

    /// Length of [FileEntry::full_name] in UTF-8 bytes.
    pub fn full_name_len(&self) -> usize {
        self.full_name().len()
    }

    /// Length of the name in UTF-8 bytes, as written in the `FILE` chunk.
    pub fn name_len(&self) -> usize {
        self.name.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub id: Identifier,
    pub name: String,
    pub version: String,
    pub owner: String,
    pub kind: PackageType,
    pub files: Vec<FileEntry>,
}

impl Default for Package {
    fn default() -> Self {
        Self {
            id: Identifier::default(),
            name: String::new(),
            version: String::new(),
            owner: String::new(),
            kind: PackageType::NORMAL,
            files: Vec::new(),
        }
    }
}

impl Package {
    pub fn new(
        id: [u8; 4],
        name: impl Into<String>,
        version: impl Into<String>,
        owner: impl Into<String>,
        kind: PackageType,
    ) -> Self {
        Self {
            id: Identifier(id),
            name: name.into(),
            version: version.into(),
            owner: owner.into(),
            kind,
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: FileEntry) -> Self {
        self.files.push(file);
        self
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Sum of the declared file sizes.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size as u64).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTagPolicy {
    /// Fail with [crate::TtfsError::UnknownChunk].
    #[default]
    Strict,
    /// Consume the four tag bytes and carry on with the next tag.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub unknown_tags: UnknownTagPolicy,
    /// Check `DATA` and `FILE` declared lengths against the bytes their fields
    /// took, and reject bytes left over in a `HEAD` payload.
    pub verify_lengths: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            unknown_tags: UnknownTagPolicy::Strict,
            verify_lengths: true,
        }
    }
}

impl DecodeOptions {
    /// Skips unknown tags and trusts no declared `DATA`/`FILE` length.
    pub fn lenient() -> Self {
        Self {
            unknown_tags: UnknownTagPolicy::Skip,
            verify_lengths: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_type_keeps_unknown_values() {
        assert_eq!(PackageType::from(0), PackageType::SECRET);
        assert_eq!(PackageType::from(1), PackageType::HIDDEN);
        assert_eq!(PackageType::from(2), PackageType::NORMAL);
        assert_eq!(PackageType::from(7).known(), None);
        assert_eq!(i32::from(PackageType::new(-3)), -3);
        assert_eq!(PackageType::new(9).to_string(), "Unknown(9)");
        assert_eq!(PackageType::new(2).to_string(), "Normal");
    }

    #[test]
    fn package_type_raw_value_is_its_identity() {
        for raw in [-1, 0, 1, 2, 3, i32::MIN, i32::MAX] {
            let kind = PackageType::new(raw);
            assert_eq!(PackageType::from(i32::from(kind)), kind);
        }
        assert_eq!(PackageType::new(2), PackageType::NORMAL);
    }

    #[test]
    fn derived_file_facts() {
        let file = FileEntry::new([0xAA, 0xBB, 0xCC, 0xDD], 1024, "texture.dds");

        assert_eq!(file.full_name(), "DDCCBBAA.texture.dds");
        assert_eq!(file.full_name_len(), 20);
        assert_eq!(file.name_len(), 11);

        let file = FileEntry::new([1, 0, 0, 0], 1, "été.ini");
        assert_eq!(file.name.chars().count(), 7);
        assert_eq!(file.name_len(), 9);
        assert_eq!(file.full_name_len(), 18);
    }

    #[test]
    fn file_count_follows_files() {
        let package = Package::default()
            .with_file(FileEntry::new([1, 0, 0, 0], 10, "a"))
            .with_file(FileEntry::new([2, 0, 0, 0], 32, "b"));

        assert_eq!(package.file_count(), 2);
        assert_eq!(package.total_size(), 42);
        assert_eq!(package.kind, PackageType::NORMAL);
        assert_eq!(package.id.to_string(), "00000000");
    }
}
