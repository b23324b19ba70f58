//! Public-Key packets (tag 6, RFC 4880 §5.5.2), restricted to the V4 RSA
//! case this crate verifies against.

use crate::cursor::Cursor;
use crate::types::PublicKeyAlgo;
use crate::{Error, Result};

/// A decoded V4 RSA public key.
#[derive(Debug, Clone)]
pub struct PublicKey {
    pub creation_time: u32,
    pub algo: PublicKeyAlgo,
    pub modulus: num_bigint_dig::BigUint,
    pub exponent: num_bigint_dig::BigUint,
}

/// Decodes a Public-Key packet body.
///
/// Any bytes remaining after the exponent are ignored: a V4 RSA
/// Public-Key packet's body has no further fields, but this crate treats
/// "nothing else we need to understand follows" as acceptable rather
/// than an error, consistent with how `PublicKey::decode` is the only
/// packet decoder in this crate that does not enforce exact consumption
/// (compare [`crate::packet::signature::Signature::decode`]).
pub fn decode(body: &[u8]) -> Result<PublicKey> {
    let mut cursor = Cursor::new(body);
    let version = cursor.read_octet()?;
    if version != 4 {
        return Err(Error::UnsupportedVersion {
            expected: 4,
            found: version,
        }
        .into());
    }
    let creation_time = cursor.read_uint(4)? as u32;
    let algo = PublicKeyAlgo::from_id(cursor.read_octet()?)?;
    let modulus = num_bigint_dig::BigUint::from_bytes_be(&cursor.read_mpi()?);
    let exponent = num_bigint_dig::BigUint::from_bytes_be(&cursor.read_mpi()?);
    Ok(PublicKey {
        creation_time,
        algo,
        modulus,
        exponent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_body() -> Vec<u8> {
        let mut b = vec![4u8]; // version
        b.extend_from_slice(&0x6000_0001u32.to_be_bytes()); // creation_time
        b.push(1); // RSA encrypt-or-sign
                   // modulus: 9 bits -> 0x01FF
        b.extend_from_slice(&[0x00, 0x09, 0x01, 0xFF]);
        // exponent: 17 (0x11), fits in 5 bits
        b.extend_from_slice(&[0x00, 0x05, 0x11]);
        b
    }

    #[test]
    fn decodes_a_well_formed_key() {
        let key = decode(&sample_body()).unwrap();
        assert_eq!(key.creation_time, 0x6000_0001);
        assert_eq!(key.algo, PublicKeyAlgo::RsaEncryptOrSign);
        assert_eq!(key.exponent, num_bigint_dig::BigUint::from(17u32));
    }

    #[test]
    fn rejects_non_v4() {
        let mut body = sample_body();
        body[0] = 3;
        assert!(decode(&body).is_err());
    }

    #[test]
    fn rejects_non_rsa_algo() {
        let mut body = sample_body();
        body[5] = 17; // DSA
        assert!(decode(&body).is_err());
    }

    #[test]
    fn ignores_trailing_bytes() {
        let mut body = sample_body();
        body.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(decode(&body).is_ok());
    }
}
