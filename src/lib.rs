//! Reader and writer for TT package descriptions (`.tpi`) and the
//! `packages.dat` container that bundles them.
//!
//! Both formats are decoded from a fully materialized buffer and encoded back
//! into one; nothing here touches the file system.

pub mod chunk;
pub mod cursor;
pub mod error;
pub mod ident;
pub mod size;
pub mod tpi;
pub mod ttfs;

pub use error::{TtfsError, TtfsResult};
pub use ident::{format_id, parse_id, Identifier};
pub use size::format_size;
pub use tpi::{decode_package, encode_package, DecodeOptions, FileEntry, Package, PackageType, UnknownTagPolicy};
pub use ttfs::{decode_container, encode_container, Container, EncodeOptions};
