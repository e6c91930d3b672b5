use thiserror::Error;

use crate::tlv::Tag;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("required field `{0}` is missing or empty")]
    MissingRequiredField(&'static str),
    #[error("value for tag {tag} is {len} characters long, at most 99 fit in a length field")]
    ValueTooLong { tag: Tag, len: usize },
    #[error("invalid tag `{0}`, expected two ASCII digits")]
    InvalidTag(String),
    #[error("invalid length `{0}`, expected two ASCII digits")]
    InvalidLength(String),
    #[error("truncated TLV at offset {0}")]
    Truncated(usize),
    #[error("payload does not end with a checksum field")]
    MissingChecksum,
    #[error("checksum mismatch: computed {expected}, payload carries {found}")]
    ChecksumMismatch { expected: String, found: String },
    #[error("rendering failed: {0}")]
    Rendering(String),
}
