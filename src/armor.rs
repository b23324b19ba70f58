//! ASCII armor (RFC 4880 §6.2): a `BEGIN`/`END` envelope around a
//! Base64-encoded payload, with a trailing CRC-24 checksum line.

use std::fs;
use std::path::Path;

use base64::Engine as _;

use crate::crc24::crc24;
use crate::packet::{self, Packet};
use crate::{Error, Result};

/// The four block types RFC 4880 §6.2 defines; this crate decodes the
/// packets inside any of them the same way, but records which kind of
/// block it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AscType {
    Message,
    PublicKeyBlock,
    PrivateKeyBlock,
    Signature,
}

impl AscType {
    fn blurb(self) -> &'static str {
        match self {
            AscType::Message => "PGP MESSAGE",
            AscType::PublicKeyBlock => "PGP PUBLIC KEY BLOCK",
            AscType::PrivateKeyBlock => "PGP PRIVATE KEY BLOCK",
            AscType::Signature => "PGP SIGNATURE",
        }
    }

    fn from_blurb(blurb: &str) -> Option<Self> {
        match blurb {
            "PGP MESSAGE" => Some(AscType::Message),
            "PGP PUBLIC KEY BLOCK" => Some(AscType::PublicKeyBlock),
            "PGP PRIVATE KEY BLOCK" => Some(AscType::PrivateKeyBlock),
            "PGP SIGNATURE" => Some(AscType::Signature),
            _ => None,
        }
    }
}

/// A fully decoded armored message.
pub struct Message {
    pub asc_type: AscType,
    /// The raw, decoded (post-Base64, pre-packet-framing) payload.
    pub slab: Vec<u8>,
    pub declared_crc: u32,
    pub packets: Vec<Packet>,
}

impl Message {
    /// Returns the single packet with the given tag, failing if there is
    /// not exactly one.
    pub fn single_packet(&self, what: &'static str, pred: impl Fn(&Packet) -> bool) -> Result<&Packet> {
        let mut matches = self.packets.iter().filter(|p| pred(p));
        let first = matches.next();
        let extra = matches.count();
        match (first, extra) {
            (Some(p), 0) => Ok(p),
            (Some(_), n) => Err(Error::WrongPacketCount { what, found: n + 1 }.into()),
            (None, _) => Err(Error::WrongPacketCount { what, found: 0 }.into()),
        }
    }
}

fn parse_header(line: &str) -> Option<AscType> {
    let rest = line.strip_prefix("-----BEGIN ")?;
    let blurb = rest.strip_suffix("-----")?;
    AscType::from_blurb(blurb)
}

fn parse_footer(line: &str) -> Option<AscType> {
    let rest = line.strip_prefix("-----END ")?;
    let blurb = rest.strip_suffix("-----")?;
    AscType::from_blurb(blurb)
}

fn parse_crc_line(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('=')?;
    if rest.len() == 4
        && rest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/')
    {
        Some(rest)
    } else {
        None
    }
}

/// Decodes an armored message from `text`.
///
/// `text` is split on `\n` (tolerating a preceding `\r`), trailing
/// whitespace is trimmed from each line, and empty lines are dropped
/// before the envelope is parsed; this matches how armor is produced and
/// consumed in practice, where blank separator lines and trailing
/// whitespace carry no meaning.
pub fn dearmor(text: &str) -> Result<Message> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.trim_end_matches('\r').trim_end())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() < 4 {
        return Err(Error::MalformedArmor(format!(
            "expected at least 4 non-empty lines (BEGIN, payload, CRC, END), found {}",
            lines.len()
        ))
        .into());
    }

    let begin = parse_header(lines[0])
        .ok_or_else(|| Error::UnknownAscType(lines[0].to_string()))?;
    let end = parse_footer(lines[lines.len() - 1])
        .ok_or_else(|| Error::UnknownAscType(lines[lines.len() - 1].to_string()))?;
    if begin != end {
        return Err(Error::HeaderFooterMismatch {
            begin: begin.blurb().to_string(),
            end: end.blurb().to_string(),
        }
        .into());
    }

    let crc_line = lines[lines.len() - 2];
    let crc_b64 = parse_crc_line(crc_line).ok_or_else(|| {
        Error::MalformedArmor(
            "the line before END must be a 4-character base64 CRC-24 checksum".into(),
        )
    })?;
    let crc_bytes = base64::engine::general_purpose::STANDARD
        .decode(crc_b64)
        .map_err(|e| Error::MalformedArmor(format!("invalid CRC-24 base64: {e}")))?;
    if crc_bytes.len() != 3 {
        return Err(Error::MalformedArmor(format!(
            "CRC-24 checksum decoded to {} byte(s), expected 3",
            crc_bytes.len()
        ))
        .into());
    }
    let declared_crc =
        (crc_bytes[0] as u32) << 16 | (crc_bytes[1] as u32) << 8 | crc_bytes[2] as u32;

    let payload: String = lines[1..lines.len() - 2].concat();
    let slab = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::MalformedArmor(format!("invalid payload base64: {e}")))?;

    let actual_crc = crc24(&slab);
    if actual_crc != declared_crc {
        return Err(Error::CrcMismatch {
            declared: declared_crc,
            actual: actual_crc,
        }
        .into());
    }

    let packets = packet::parse_all(&slab)?;

    Ok(Message {
        asc_type: begin,
        slab,
        declared_crc,
        packets,
    })
}

/// Reads and decodes an armored file from `path`, refusing files larger
/// than `max_bytes`.
pub fn dearmor_file(path: impl AsRef<Path>, max_bytes: u64) -> Result<Message> {
    let path = path.as_ref();
    let metadata = fs::metadata(path)?;
    if metadata.len() > max_bytes {
        return Err(Error::FileTooLarge {
            length: metadata.len(),
            max_bytes,
        }
        .into());
    }
    let text = fs::read_to_string(path)?;
    dearmor(&text)
}

/// The default `max_bytes` bound for [`dearmor_file`] (16 KiB), matching
/// typical detached-signature and single-key armor sizes.
pub const DEFAULT_MAX_BYTES: u64 = 16 * 1024;
