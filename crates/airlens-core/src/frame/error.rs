use thiserror::Error;

/// Errors returned by frame validation and decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("frame header mismatch: got {first:#04x} {second:#04x}")]
    HeaderMismatch { first: u8, second: u8 },
    #[error("declared length mismatch: got {length}, expected {expected}")]
    LengthMismatch { length: u16, expected: u16 },
    #[error("checksum mismatch: declared {declared:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { declared: u16, computed: u16 },
}
