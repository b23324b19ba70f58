//! Signature subpackets (RFC 4880 §5.2.3.1): a separate, three-form
//! length encoding nested inside a Signature packet's hashed and
//! unhashed areas.

use crate::cursor::Cursor;
use crate::types::SubpacketTag;
use crate::{Error, Result};

/// The decoded value of a subpacket body, grouped by the shape its tag
/// implies. This is advisory: [`Subpacket::raw_header`] and
/// [`Subpacket::raw_body`] are authoritative for hashing and
/// reconstruction, `decoded_value` exists purely for callers who want a
/// structured read of a well-known subpacket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubpacketValue {
    /// A four-octet POSIX timestamp (Signature/Key Creation/Expiration
    /// Time subpackets).
    Timestamp(u32),
    /// A UTF-8 string (Policy URI, Preferred Key Server, Signer's User
    /// ID, and the free-text portion of Reason for Revocation).
    Utf8String(String),
    /// A big-endian integer read over the whole body (boolean and flags
    /// subpackets).
    BigEndianInt(u64),
    /// Anything else, including subpacket bodies this crate has no
    /// structured decoding for.
    Raw(Vec<u8>),
}

/// A single signature subpacket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subpacket {
    /// The exact length-encoding and type octets as they appeared in the
    /// input, required to reconstruct the signed-data octet stream
    /// byte-for-byte (see [`crate::reconstruct`]).
    pub raw_header: Vec<u8>,
    /// The declared subpacket length (the type octet plus the body).
    pub length: u32,
    pub tag: SubpacketTag,
    /// Whether the type octet's high bit (the "critical" flag) was set.
    pub critical: bool,
    pub raw_body: Vec<u8>,
    pub decoded_value: SubpacketValue,
}

fn read_length<'a>(cursor: &mut Cursor<'a>) -> Result<(u32, Vec<u8>)> {
    let mut header = Vec::with_capacity(2);
    let l1 = cursor.read_octet()?;
    header.push(l1);
    let length = if l1 < 0xC0 {
        l1 as u32
    } else if l1 < 0xFF {
        let l2 = cursor.read_octet()?;
        header.push(l2);
        ((l1 as u32 - 0xC0) << 8) + l2 as u32 + 0xC0
    } else {
        let rest = cursor.read_chunk(4)?;
        header.extend_from_slice(rest);
        u32::from_be_bytes(rest.try_into().unwrap())
    };
    Ok((length, header))
}

fn decode_value(tag: SubpacketTag, body: &[u8]) -> Result<SubpacketValue> {
    use SubpacketTag::*;
    match tag {
        SignatureCreationTime | SignatureExpirationTime | KeyExpirationTime => {
            if body.len() != 4 {
                return Err(Error::BadSubpacket {
                    tag: tag.id(),
                    reason: format!("expected a 4-octet timestamp, found {} octet(s)", body.len()),
                }
                .into());
            }
            let bytes: [u8; 4] = body.try_into().unwrap();
            Ok(SubpacketValue::Timestamp(u32::from_be_bytes(bytes)))
        }
        PolicyUri | PreferredKeyServer | SignersUserId => Ok(utf8_or_raw(body)),
        ReasonForRevocation => match body.split_first() {
            Some((_code, text)) => Ok(utf8_or_raw(text)),
            None => Ok(SubpacketValue::Raw(Vec::new())),
        },
        ExportableCertification | Revocable | PrimaryUserId | KeyFlags | Features
        | KeyServerPreferences => {
            let v = body.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
            Ok(SubpacketValue::BigEndianInt(v))
        }
        _ => Ok(SubpacketValue::Raw(body.to_vec())),
    }
}

fn utf8_or_raw(body: &[u8]) -> SubpacketValue {
    match std::str::from_utf8(body) {
        Ok(s) => SubpacketValue::Utf8String(s.to_string()),
        Err(_) => SubpacketValue::Raw(body.to_vec()),
    }
}

fn read_subpacket<'a>(cursor: &mut Cursor<'a>) -> Result<Subpacket> {
    let (declared_length, mut raw_header) = read_length(cursor)?;
    if declared_length == 0 {
        return Err(Error::SubpacketFramingError("subpacket length is zero".into()).into());
    }
    let type_octet = cursor.read_octet()?;
    raw_header.push(type_octet);
    let body_length = declared_length as usize - 1;
    let raw_body = cursor.read_chunk(body_length)?.to_vec();

    let tag = SubpacketTag::from_id(type_octet);
    let critical = type_octet & 0x80 != 0;
    let decoded_value = decode_value(tag, &raw_body)?;

    Ok(Subpacket {
        raw_header,
        length: declared_length,
        tag,
        critical,
        raw_body,
        decoded_value,
    })
}

/// Parses a subpacket area (the hashed or unhashed region of a V4
/// signature) down to its constituent subpackets. The area must be
/// exactly consumed; a subpacket whose declared length runs past the end
/// of `data` is a framing error.
pub fn parse_area(data: &[u8]) -> Result<Vec<Subpacket>> {
    Cursor::read_all(data, |cursor| {
        let mut subpackets = Vec::new();
        while !cursor.is_empty() {
            let subpacket = read_subpacket(cursor)
                .map_err(|e| Error::SubpacketFramingError(e.to_string()))?;
            subpackets.push(subpacket);
        }
        Ok(subpackets)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_byte_length_subpacket(tag: u8, body: &[u8]) -> Vec<u8> {
        let mut v = vec![(body.len() + 1) as u8, tag];
        v.extend_from_slice(body);
        v
    }

    #[test]
    fn parses_signature_creation_time() {
        let area = one_byte_length_subpacket(2, &[0x60, 0x00, 0x00, 0x01]);
        let subpackets = parse_area(&area).unwrap();
        assert_eq!(subpackets.len(), 1);
        assert_eq!(subpackets[0].tag, SubpacketTag::SignatureCreationTime);
        assert_eq!(
            subpackets[0].decoded_value,
            SubpacketValue::Timestamp(0x6000_0001)
        );
    }

    #[test]
    fn bad_timestamp_length_is_an_error() {
        let area = one_byte_length_subpacket(2, &[0x00, 0x01]);
        assert!(parse_area(&area).is_err());
    }

    #[test]
    fn critical_bit_is_tracked_separately_from_tag() {
        let area = one_byte_length_subpacket(16 | 0x80, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let subpackets = parse_area(&area).unwrap();
        assert_eq!(subpackets[0].tag, SubpacketTag::Issuer);
        assert!(subpackets[0].critical);
    }

    #[test]
    fn unknown_tag_decodes_as_raw() {
        let area = one_byte_length_subpacket(99, &[0xDE, 0xAD]);
        let subpackets = parse_area(&area).unwrap();
        assert_eq!(
            subpackets[0].decoded_value,
            SubpacketValue::Raw(vec![0xDE, 0xAD])
        );
    }

    #[test]
    fn two_octet_length_form() {
        let body = vec![0x41u8; 200];
        let mut area = Vec::new();
        // 200 + 1 (type octet) = 201 -> two-octet form: 0xC0 <= l1 < 0xFF
        let declared = 201u32;
        let l1 = ((declared - 0xC0) >> 8) as u8 + 0xC0;
        let l2 = ((declared - 0xC0) & 0xFF) as u8;
        area.push(l1);
        area.push(l2);
        area.push(20); // NotationData
        area.extend_from_slice(&body);
        let subpackets = parse_area(&area).unwrap();
        assert_eq!(subpackets.len(), 1);
        assert_eq!(subpackets[0].raw_body.len(), 200);
    }

    #[test]
    fn zero_length_subpacket_is_rejected() {
        let area = vec![0x00];
        assert!(parse_area(&area).is_err());
    }

    #[test]
    fn trailing_bytes_after_last_subpacket_is_framing_error() {
        let mut area = one_byte_length_subpacket(2, &[0, 0, 0, 1]);
        area.push(0xFF); // declares a 4-octet length form but nothing follows
        assert!(parse_area(&area).is_err());
    }
}
