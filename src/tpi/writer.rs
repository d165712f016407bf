use bytes::Bytes;

use crate::{
    chunk::Tag,
    cursor::ByteWriter,
    error::{TtfsError, TtfsResult},
};

use super::{FileEntry, Package};

/// Serializes `package` as `HEAD`, `DATA`, then one `FILE` per entry.
///
/// Every length field is computed from what is written; the `HEAD` file
/// count is `package.files.len()`.
pub fn encode_package(package: &Package) -> TtfsResult<Bytes> {
    let mut out = ByteWriter::with_capacity(64 + package.files.len() * 32);

    let files = i32::try_from(package.file_count()).map_err(|_| TtfsError::FieldTooLong {
        field: "file count",
        len: package.file_count(),
        max: i32::MAX as usize,
    })?;

    let mut head = ByteWriter::with_capacity(8);
    head.put_as(&package.id);
    head.put_i32_le(files);
    out.put_tag(Tag::HEAD);
    out.put_sized("HEAD payload", head.as_slice())?;

    let mut data = ByteWriter::new();
    data.put_text_u16("package name", &package.name)?;
    data.put_text_u16("package version", &package.version)?;
    data.put_text_u16("package owner", &package.owner)?;
    data.put_i32_le(package.kind.into());
    out.put_tag(Tag::DATA);
    out.put_sized("DATA payload", data.as_slice())?;

    for file in &package.files {
        out.put_tag(Tag::FILE);
        out.put_sized("FILE payload", file_payload(file)?.as_slice())?;
    }

    Ok(out.freeze())
}

fn file_payload(file: &FileEntry) -> TtfsResult<ByteWriter> {
    let mut payload = ByteWriter::with_capacity(10 + file.name.len());
    payload.put_as(&file.id);
    payload.put_u32_le(file.size);
    payload.put_text_u16("file name", &file.name)?;
    Ok(payload)
}
