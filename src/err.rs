use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlpError>;
pub type DeserializationResult<T> = std::result::Result<T, DeserializationError>;

/// Buffer-level failures raised while walking raw bytes.
///
/// Offsets are relative to the start of the event data (the slice the
/// decoder walks), not the whole file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeserializationError {
    #[error("Offset {offset}: needed {need} bytes to read {what}, only {have} available")]
    EndOfBuffer {
        what: &'static str,
        offset: u64,
        need: usize,
        have: usize,
    },

    #[error("Offset {offset}: variable-length integer continues past the end of the buffer")]
    MalformedVli { offset: u64 },

    #[error(
        "Offset {offset}: event {id:#04x} declares a {size} byte payload but only {have} bytes remain"
    )]
    TruncatedEvent {
        id: u8,
        offset: u64,
        size: usize,
        have: usize,
    },
}

/// Top-level errors surfaced by `parse` and the typed accessors.
///
/// All decode failures are fatal: a corrupt container cannot produce a
/// trustworthy event sequence, so no partial `FlpFile` is ever returned.
#[derive(Debug, Error)]
pub enum FlpError {
    #[error("Invalid {chunk} chunk magic, expected `{expected:02X?}`, found `{found:02X?}`")]
    BadMagic {
        chunk: &'static str,
        expected: [u8; 4],
        found: [u8; 4],
    },

    #[error("Header chunk declares length {length}, expected 6")]
    BadHeaderSize { length: u32 },

    #[error("Header format field {format} is outside the accepted range [-1, 0x50]")]
    BadFormat { format: i16 },

    #[error(
        "File length {actual} disagrees with the declared event data length ({declared} bytes after offset 22)"
    )]
    LengthMismatch { declared: u32, actual: u64 },

    #[error("Event {id:#04x} holds {actual} data, a {requested} value was requested")]
    KindMismatch {
        id: u8,
        requested: &'static str,
        actual: &'static str,
    },

    #[error(transparent)]
    Deserialization(#[from] DeserializationError),

    #[error("An I/O error has occurred")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
