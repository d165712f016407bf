use thiserror::Error;

use crate::chunk::Tag;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TtfsError {
    #[error("truncated input: needed {needed} bytes at offset {offset}, only {remaining} left")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("invalid identifier {input:?}: expected 4 bytes or 8 hex digits")]
    InvalidIdentifier { input: String },

    #[error("text at offset {offset} is not valid utf-8")]
    InvalidEncoding {
        offset: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("malformed {chunk} chunk at offset {offset}")]
    MalformedChunk {
        chunk: Tag,
        offset: usize,
        #[source]
        source: Box<TtfsError>,
    },

    #[error("unknown chunk tag {tag} at offset {offset}")]
    UnknownChunk { tag: Tag, offset: usize },

    #[error("declared length {declared} does not match the {consumed} bytes consumed")]
    LengthMismatch { declared: u32, consumed: usize },

    #[error("invalid container header {tag} at offset {offset}, expected {}", Tag::PACKAGE)]
    InvalidContainerHeader { tag: Tag, offset: usize },

    #[error("failed to decode package #{index} at offset {offset}")]
    NestedDecodeFailure {
        index: usize,
        offset: usize,
        #[source]
        source: Box<TtfsError>,
    },

    #[error("{field} is {len} bytes long, at most {max} fit")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("package blob is {len} bytes long, container lengths hold at most {max}")]
    BlobTooLarge { len: usize, max: usize },
}

impl TtfsError {
    /// Innermost error of a `MalformedChunk`/`NestedDecodeFailure` chain.
    pub fn root_cause(&self) -> &TtfsError {
        match self {
            TtfsError::MalformedChunk { source, .. }
            | TtfsError::NestedDecodeFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.root_cause(), TtfsError::TruncatedInput { .. })
    }
}

pub type TtfsResult<T> = Result<T, TtfsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_walks_nested_chain() {
        let err = TtfsError::NestedDecodeFailure {
            index: 1,
            offset: 40,
            source: Box::new(TtfsError::MalformedChunk {
                chunk: Tag::FILE,
                offset: 12,
                source: Box::new(TtfsError::TruncatedInput {
                    offset: 20,
                    needed: 4,
                    remaining: 1,
                }),
            }),
        };

        assert!(err.is_truncated());
        assert!(matches!(
            err.root_cause(),
            TtfsError::TruncatedInput { offset: 20, .. }
        ));
    }

    #[test]
    fn messages_name_the_chunk() {
        let err = TtfsError::MalformedChunk {
            chunk: Tag::DATA,
            offset: 16,
            source: Box::new(TtfsError::LengthMismatch {
                declared: 9,
                consumed: 8,
            }),
        };

        assert_eq!(err.to_string(), "malformed DATA chunk at offset 16");
        assert!(!err.is_truncated());

        let err = TtfsError::InvalidContainerHeader {
            tag: Tag::HEAD,
            offset: 0,
        };
        assert_eq!(
            err.to_string(),
            "invalid container header HEAD at offset 0, expected PCKG"
        );
    }
}
