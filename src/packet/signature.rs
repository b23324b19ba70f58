//! Signature packets (tag 2, RFC 4880 §5.2), restricted to the V4 case
//! this crate verifies against.

use crate::cursor::Cursor;
use crate::packet::subpacket::{self, Subpacket};
use crate::types::{HashAlgo, PublicKeyAlgo, SignatureType};
use crate::{Error, Result};

/// A decoded V4 signature.
#[derive(Debug, Clone)]
pub struct Signature {
    pub sig_type: SignatureType,
    pub key_algo: PublicKeyAlgo,
    pub hash_algo: HashAlgo,
    pub hashed_subpackets: Vec<Subpacket>,
    pub unhashed_subpackets: Vec<Subpacket>,
    /// The left 16 bits of the signed hash, included unauthenticated as a
    /// quick sanity check; this crate does not treat a mismatch here as
    /// disqualifying, since the RSA verification below is authoritative.
    pub left16: [u8; 2],
    /// The raw, unmasked signature MPI octets (see
    /// [`Cursor::read_mpi_bytes`]).
    pub signature_mpi: Vec<u8>,
}

/// Decodes a Signature packet body.
///
/// Unlike [`crate::packet::public_key::decode`], this requires the body
/// to be consumed exactly: a V4 Signature packet's fields are fully
/// enumerated by the format, so leftover bytes indicate either a
/// different packet version smuggled past the version check or a
/// corrupted length, and are reported as [`Error::TrailingGarbage`].
pub fn decode(body: &[u8]) -> Result<Signature> {
    Cursor::read_all(body, |cursor| {
        let version = cursor.read_octet()?;
        if version != 4 {
            return Err(Error::UnsupportedVersion {
                expected: 4,
                found: version,
            }
            .into());
        }
        let sig_type = SignatureType::from_id(cursor.read_octet()?);
        let key_algo = PublicKeyAlgo::from_id(cursor.read_octet()?)?;
        let hash_algo = HashAlgo::from_id(cursor.read_octet()?);

        let hashed_count = cursor.read_uint(2)? as usize;
        let hashed_bytes = cursor.read_chunk(hashed_count)?;
        let hashed_subpackets = subpacket::parse_area(hashed_bytes)?;

        let unhashed_count = cursor.read_uint(2)? as usize;
        let unhashed_bytes = cursor.read_chunk(unhashed_count)?;
        let unhashed_subpackets = subpacket::parse_area(unhashed_bytes)?;

        let left16_bytes = cursor.read_chunk(2)?;
        let left16 = [left16_bytes[0], left16_bytes[1]];

        let signature_mpi = cursor.read_mpi_bytes()?;

        Ok(Signature {
            sig_type,
            key_algo,
            hash_algo,
            hashed_subpackets,
            unhashed_subpackets,
            left16,
            signature_mpi,
        })
    })
}
