use crate::{
    chunk::Tag,
    cursor::ByteCursor,
    error::{TtfsError, TtfsResult},
    ident::Identifier,
};

use super::{DecodeOptions, FileEntry, Package, PackageType, UnknownTagPolicy};

const ID_LEN: usize = core::mem::size_of::<Identifier>();

/// Parses one TPI stream.
///
/// Chunks are applied in the order they appear, on top of [Package::default]:
/// a later `HEAD` or `DATA` overwrites an earlier one and every `FILE` is
/// appended. The declared file count in `HEAD` is not used.
///
/// # Errors
/// Anything that goes wrong inside a chunk is reported as
/// [TtfsError::MalformedChunk] with the chunk's tag and offset; a buffer that
/// ends inside a tag is a bare [TtfsError::TruncatedInput].
pub fn decode_package(data: &[u8], options: DecodeOptions) -> TtfsResult<Package> {
    let mut cursor = ByteCursor::new(data);
    let mut package = Package::default();

    while cursor.has_remaining() {
        let offset = cursor.position();
        let tag = cursor.read_tag()?;

        let chunk = match tag {
            Tag::HEAD => read_head(&mut cursor, &mut package, options),
            Tag::DATA => read_data(&mut cursor, &mut package, options),
            Tag::FILE => read_file(&mut cursor, options).map(|file| package.files.push(file)),
            tag => match options.unknown_tags {
                UnknownTagPolicy::Strict => return Err(TtfsError::UnknownChunk { tag, offset }),
                UnknownTagPolicy::Skip => continue,
            },
        };

        chunk.map_err(|source| TtfsError::MalformedChunk {
            chunk: tag,
            offset,
            source: Box::new(source),
        })?;
    }

    Ok(package)
}

/// `HEAD` is bounded by its length: 4 bytes of identifier, optionally followed
/// by the declared file count.
fn read_head(
    cursor: &mut ByteCursor<'_>,
    package: &mut Package,
    options: DecodeOptions,
) -> TtfsResult<()> {
    let len = cursor.read_u32_le()?;
    let mut payload = ByteCursor::new(cursor.read_exact(len as usize)?);

    if payload.remaining() < ID_LEN {
        return Err(TtfsError::LengthMismatch {
            declared: len,
            consumed: ID_LEN,
        });
    }

    package.id = payload.read_as::<Identifier>()?;
    if payload.remaining() >= 4 {
        let _declared_files = payload.read_i32_le()?;
    }

    if options.verify_lengths && payload.has_remaining() {
        return Err(TtfsError::LengthMismatch {
            declared: len,
            consumed: payload.position(),
        });
    }

    Ok(())
}

fn read_data(
    cursor: &mut ByteCursor<'_>,
    package: &mut Package,
    options: DecodeOptions,
) -> TtfsResult<()> {
    let declared = cursor.read_u32_le()?;
    let start = cursor.position();

    package.name = cursor.read_text_u16()?;
    package.version = cursor.read_text_u16()?;
    package.owner = cursor.read_text_u16()?;
    package.kind = PackageType::from(cursor.read_i32_le()?);

    check_length(options, declared, cursor.position() - start)
}

fn read_file(cursor: &mut ByteCursor<'_>, options: DecodeOptions) -> TtfsResult<FileEntry> {
    let declared = cursor.read_u32_le()?;
    let start = cursor.position();

    let id = cursor.read_as::<Identifier>()?;
    let size = cursor.read_u32_le()?;
    let name = cursor.read_text_u16()?;

    check_length(options, declared, cursor.position() - start)?;
    Ok(FileEntry { id, size, name })
}

fn check_length(options: DecodeOptions, declared: u32, consumed: usize) -> TtfsResult<()> {
    if options.verify_lengths && declared as usize != consumed {
        return Err(TtfsError::LengthMismatch { declared, consumed });
    }

    Ok(())
}
