//! A parser and verifier for a practical subset of OpenPGP (RFC 4880):
//! ASCII-armored messages carrying a V4 RSA signature over an external
//! file.
//!
//! This crate deliberately does not implement all of OpenPGP.  See the
//! module-level documentation of [`packet`] and [`armor`] for the exact
//! subset that is supported.

pub mod armor;
pub mod crc24;
pub mod cursor;
pub mod packet;
pub mod reconstruct;
pub mod types;
pub mod verify;

pub use armor::{dearmor, dearmor_file, AscType, Message};
pub use verify::verify;

/// The crate's result type.
///
/// Internal code returns the concrete [`Error`] so that callers can match
/// on failure kinds; `Error` converts into `anyhow::Error` for free via
/// `?`, which is what the rest of this crate (and the bundled CLI) uses.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// The error type used throughout this crate.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// The armor envelope (BEGIN/END lines, CRC line) did not conform to
    /// the expected shape.
    #[error("malformed armor: {0}")]
    MalformedArmor(String),

    /// The `BEGIN`/`END` blurb did not name one of the four recognized
    /// armor types.
    #[error("unrecognized armor type: {0:?}")]
    UnknownAscType(String),

    /// The `BEGIN` and `END` lines named different armor types.
    #[error("armor header/footer mismatch: begin={begin:?} end={end:?}")]
    HeaderFooterMismatch { begin: String, end: String },

    /// The declared CRC-24 checksum did not match the checksum of the
    /// decoded payload.
    #[error("armor CRC-24 mismatch: declared 0x{declared:06x}, computed 0x{actual:06x}")]
    CrcMismatch { declared: u32, actual: u32 },

    /// A `dearmor_file` caller-supplied size bound was exceeded.
    #[error("input file is {length} bytes, exceeding the {max_bytes} byte limit")]
    FileTooLarge { length: u64, max_bytes: u64 },

    /// A primitive read ran past the end of the available bytes.
    #[error("truncated input: wanted {wanted} bytes, {available} available")]
    Truncated { wanted: usize, available: usize },

    /// Bytes remained after a structure that is required to consume its
    /// input exactly.
    #[error("trailing garbage: {0} unparsed byte(s) remain")]
    TrailingGarbage(usize),

    /// The first octet of a packet header did not have bit 7 set.
    #[error("invalid packet header: octet 0x{0:02x} does not have bit 7 set")]
    BadPacketTag(u8),

    /// A length encoding this crate does not support (partial body
    /// lengths, old-style indeterminate length).
    #[error("unsupported length encoding: {0}")]
    UnsupportedLength(String),

    /// A signature subpacket's length/type framing was malformed.
    #[error("malformed signature subpacket framing: {0}")]
    SubpacketFramingError(String),

    /// A packet declared a version this crate does not implement.
    #[error("unsupported packet version: expected {expected}, found {found}")]
    UnsupportedVersion { expected: u8, found: u8 },

    /// A public-key or signature algorithm ID outside the supported RSA
    /// variants.
    #[error("unsupported public-key algorithm: {0}")]
    UnsupportedAlgorithm(u8),

    /// A signature's hash algorithm is not in the mandatory-to-implement
    /// set this crate verifies against.
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedHash(u8),

    /// A User ID packet's body was not valid UTF-8.
    #[error("invalid UTF-8 in User ID packet: {0}")]
    BadUserId(std::str::Utf8Error),

    /// A signature subpacket's body had the wrong shape for its tag.
    #[error("malformed subpacket (tag {tag}): {reason}")]
    BadSubpacket { tag: u8, reason: String },

    /// An armored message did not contain exactly the expected number of
    /// packets of some tag.
    #[error("expected exactly one {what} packet, found {found}")]
    WrongPacketCount { what: &'static str, found: usize },

    /// The RSA/PKCS#1-v1.5 signature did not verify.
    #[error("signature verification failed")]
    SignatureInvalid,
}
