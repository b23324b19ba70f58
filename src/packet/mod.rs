//! RFC 4880 packet framing (§4.2): old-style and new-style headers over a
//! byte slab, producing a list of typed packets.

pub mod public_key;
pub mod signature;
pub mod subpacket;
pub mod user_id;

use crate::cursor::Cursor;
use crate::{Error, Result};

pub use public_key::PublicKey;
pub use signature::Signature;

/// The packet tag this crate decodes structurally. Any other tag is
/// retained as [`Tag::Unknown`] with its raw bytes kept verbatim in
/// [`Packet::raw_body`]; this crate only needs to find the Signature,
/// Public-Key, and User ID packets inside a larger armored message, not
/// reject everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Signature,
    PublicKey,
    UserId,
    Unknown(u8),
}

impl Tag {
    fn from_id(id: u8) -> Self {
        match id {
            2 => Tag::Signature,
            6 => Tag::PublicKey,
            13 => Tag::UserId,
            other => Tag::Unknown(other),
        }
    }
}

/// The structurally decoded body of a packet this crate understands.
#[derive(Debug, Clone)]
pub enum Body {
    Signature(Signature),
    PublicKey(PublicKey),
    UserId(String),
    /// A packet tag this crate does not structurally decode. Its raw
    /// bytes are still available via [`Packet::raw_body`].
    Opaque,
}

/// A single framed packet.
#[derive(Debug, Clone)]
pub struct Packet {
    pub is_new_format: bool,
    pub tag: Tag,
    pub raw_body: Vec<u8>,
    pub body: Body,
}

fn read_new_style_length(cursor: &mut Cursor) -> Result<u32> {
    let l1 = cursor.read_octet()?;
    if l1 < 0xC0 {
        Ok(l1 as u32)
    } else if l1 < 0xE0 {
        let l2 = cursor.read_octet()?;
        Ok(((l1 as u32 - 0xC0) << 8) + l2 as u32 + 0xC0)
    } else if l1 == 0xFF {
        Ok(cursor.read_uint(4)? as u32)
    } else {
        Err(Error::UnsupportedLength(format!(
            "partial body length (first length octet 0x{l1:02x})"
        ))
        .into())
    }
}

fn read_old_style_length(cursor: &mut Cursor, length_type: u8) -> Result<u32> {
    match length_type {
        0 => Ok(cursor.read_uint(1)? as u32),
        1 => Ok(cursor.read_uint(2)? as u32),
        3 => Ok(cursor.read_uint(4)? as u32),
        2 => Err(Error::UnsupportedLength(
            "old-style indeterminate length (length-type 2)".into(),
        )
        .into()),
        _ => unreachable!("length-type is a 2-bit field"),
    }
}

fn decode_body(tag: Tag, raw_body: &[u8]) -> Result<Body> {
    match tag {
        Tag::Signature => Ok(Body::Signature(signature::decode(raw_body)?)),
        Tag::PublicKey => Ok(Body::PublicKey(public_key::decode(raw_body)?)),
        Tag::UserId => Ok(Body::UserId(user_id::decode(raw_body)?)),
        Tag::Unknown(_) => Ok(Body::Opaque),
    }
}

fn read_packet(cursor: &mut Cursor) -> Result<Packet> {
    let first = cursor.read_octet()?;
    if first & 0x80 == 0 {
        return Err(Error::BadPacketTag(first).into());
    }
    let is_new_format = first & 0x40 != 0;
    let (tag_id, length) = if is_new_format {
        let tag_id = first & 0x3F;
        (tag_id, read_new_style_length(cursor)?)
    } else {
        let tag_id = (first >> 2) & 0x0F;
        let length_type = first & 0x03;
        (tag_id, read_old_style_length(cursor, length_type)?)
    };

    let raw_body = cursor.read_chunk(length as usize)?.to_vec();
    let tag = Tag::from_id(tag_id);
    let body = decode_body(tag, &raw_body)?;

    Ok(Packet {
        is_new_format,
        tag,
        raw_body,
        body,
    })
}

/// Parses every packet in `slab`, from the first octet to the last.
pub fn parse_all(slab: &[u8]) -> Result<Vec<Packet>> {
    Cursor::read_all(slab, |cursor| {
        let mut packets = Vec::new();
        while !cursor.is_empty() {
            packets.push(read_packet(cursor)?);
        }
        Ok(packets)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_tag_without_bit_7() {
        let data = [0x00u8];
        assert!(parse_all(&data).is_err());
    }

    #[test]
    fn old_style_one_octet_length() {
        // tag=13 (User ID), old style, length-type 0
        let mut data = vec![0x80 | (13 << 2)];
        data.push(5); // length
        data.extend_from_slice(b"hello");
        let packets = parse_all(&data).unwrap();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].tag, Tag::UserId);
        assert!(!packets[0].is_new_format);
    }

    #[test]
    fn old_style_indeterminate_length_is_rejected() {
        let data = vec![0x80 | (13 << 2) | 0x02, 0xAA, 0xBB];
        assert!(parse_all(&data).is_err());
    }

    #[test]
    fn new_style_two_octet_length_formula() {
        // From RFC 4880 5.2.1.2: l1=0xC5, l2=0x42 -> ((l1-0xC0)<<8)+l2+0xC0.
        let l1 = 0xC5u8;
        let l2 = 0x42u8;
        let expected_length = ((l1 as u32 - 0xC0) << 8) + l2 as u32 + 0xC0;
        assert_eq!(expected_length, 1538);

        let mut data = vec![0xC0 | 13, l1, l2]; // new-format tag 13
        data.extend(std::iter::repeat(0x41u8).take(expected_length as usize));
        let packets = parse_all(&data).unwrap();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].raw_body.len(), expected_length as usize);
    }

    #[test]
    fn new_style_five_octet_length() {
        let mut data = vec![0xC0 | 13, 0xFF];
        data.extend_from_slice(&10u32.to_be_bytes());
        data.extend_from_slice(b"0123456789");
        let packets = parse_all(&data).unwrap();
        assert_eq!(packets[0].raw_body, b"0123456789");
    }

    #[test]
    fn partial_body_length_is_unsupported() {
        let data = vec![0xC0 | 13, 0xE5];
        assert!(parse_all(&data).is_err());
    }

    #[test]
    fn unknown_tag_is_kept_opaque() {
        let mut data = vec![0x80 | (9 << 2)]; // tag 9 = Compressed Data, unused here
        data.push(3);
        data.extend_from_slice(&[1, 2, 3]);
        let packets = parse_all(&data).unwrap();
        assert!(matches!(packets[0].tag, Tag::Unknown(9)));
        assert!(matches!(packets[0].body, Body::Opaque));
    }

    #[test]
    fn multiple_packets_in_one_slab() {
        let mut data = vec![0x80 | (13 << 2), 2];
        data.extend_from_slice(b"ab");
        data.push(0x80 | (13 << 2));
        data.push(2);
        data.extend_from_slice(b"cd");
        let packets = parse_all(&data).unwrap();
        assert_eq!(packets.len(), 2);
    }
}
