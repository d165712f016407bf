//! proptest generators shared by the TPI and container tests.

use proptest::{collection::vec, prelude::*};

use super::{FileEntry, Package, PackageType};

/// Arbitrary text of up to `max_chars` chars, multi-byte ones included.
pub(crate) fn text(max_chars: usize) -> impl Strategy<Value = String> {
    vec(any::<char>(), 0..=max_chars).prop_map(String::from_iter)
}

pub(crate) fn kind() -> impl Strategy<Value = PackageType> {
    prop_oneof![0..3i32, any::<i32>()].prop_map(PackageType::new)
}

pub(crate) fn file_entry() -> impl Strategy<Value = FileEntry> {
    (any::<[u8; 4]>(), any::<u32>(), text(40))
        .prop_map(|(id, size, name)| FileEntry::new(id, size, name))
}

pub(crate) fn package() -> impl Strategy<Value = Package> {
    (
        any::<[u8; 4]>(),
        text(24),
        text(12),
        text(24),
        kind(),
        vec(file_entry(), 0..8),
    )
        .prop_map(|(id, name, version, owner, kind, files)| Package {
            files,
            ..Package::new(id, name, version, owner, kind)
        })
}

/// Offsets at which an encoded `package` can be cut between whole chunks.
pub(crate) fn chunk_ends(package: &Package) -> Vec<usize> {
    let head = 8 + 8;
    let data = 8 + 3 * 2 + package.name.len() + package.version.len() + package.owner.len() + 4;
    let files = package.files.iter().map(|f| 8 + 10 + f.name.len());

    [0, head, data]
        .into_iter()
        .chain(files)
        .scan(0, |end, len| {
            *end += len;
            Some(*end)
        })
        .collect()
}
