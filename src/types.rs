//! The small, closed algorithm registries this crate understands: public
//! key algorithms, hash algorithms, signature types, and signature
//! subpacket tags (RFC 4880 §5.2.1, §9, §5.2.3.1).

use crate::{Error, Result};

/// A public-key algorithm ID. Only the three RSA variants from RFC 4880
/// §9.1 are accepted; every other ID is an error at decode time, since a
/// non-RSA key or signature is entirely outside what this crate can
/// verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKeyAlgo {
    RsaEncryptOrSign,
    RsaEncryptOnly,
    RsaSignOnly,
}

impl PublicKeyAlgo {
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            1 => Ok(PublicKeyAlgo::RsaEncryptOrSign),
            2 => Ok(PublicKeyAlgo::RsaEncryptOnly),
            3 => Ok(PublicKeyAlgo::RsaSignOnly),
            other => Err(Error::UnsupportedAlgorithm(other).into()),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            PublicKeyAlgo::RsaEncryptOrSign => 1,
            PublicKeyAlgo::RsaEncryptOnly => 2,
            PublicKeyAlgo::RsaSignOnly => 3,
        }
    }
}

/// A hash algorithm ID (RFC 4880 §9.4). Unknown IDs are retained rather
/// than rejected at parse time: a signature using an algorithm this crate
/// does not verify is still a structurally valid signature, and the
/// decision to reject it belongs to the verifier (see [`crate::verify`]),
/// not the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgo {
    Md5,
    Sha256,
    Sha384,
    Sha512,
    Sha224,
    Unknown(u8),
}

impl HashAlgo {
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => HashAlgo::Md5,
            8 => HashAlgo::Sha256,
            9 => HashAlgo::Sha384,
            10 => HashAlgo::Sha512,
            11 => HashAlgo::Sha224,
            other => HashAlgo::Unknown(other),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            HashAlgo::Md5 => 1,
            HashAlgo::Sha256 => 8,
            HashAlgo::Sha384 => 9,
            HashAlgo::Sha512 => 10,
            HashAlgo::Sha224 => 11,
            HashAlgo::Unknown(id) => id,
        }
    }
}

/// A signature type (RFC 4880 §5.2.1). This crate cares only about
/// distinguishing these for display and policy purposes; it verifies the
/// signed-data reconstruction identically regardless of type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureType {
    BinaryDocument,
    TextDocument,
    Standalone,
    GenericCertification,
    PersonaCertification,
    CasualCertification,
    PositiveCertification,
    SubkeyBinding,
    PrimaryKeyBinding,
    DirectKey,
    KeyRevocation,
    SubkeyRevocation,
    CertificationRevocation,
    Timestamp,
    ThirdPartyConfirmation,
    Unknown(u8),
}

impl SignatureType {
    pub fn from_id(id: u8) -> Self {
        match id {
            0x00 => SignatureType::BinaryDocument,
            0x01 => SignatureType::TextDocument,
            0x02 => SignatureType::Standalone,
            0x10 => SignatureType::GenericCertification,
            0x11 => SignatureType::PersonaCertification,
            0x12 => SignatureType::CasualCertification,
            0x13 => SignatureType::PositiveCertification,
            0x18 => SignatureType::SubkeyBinding,
            0x19 => SignatureType::PrimaryKeyBinding,
            0x1F => SignatureType::DirectKey,
            0x20 => SignatureType::KeyRevocation,
            0x28 => SignatureType::SubkeyRevocation,
            0x30 => SignatureType::CertificationRevocation,
            0x40 => SignatureType::Timestamp,
            0x50 => SignatureType::ThirdPartyConfirmation,
            other => SignatureType::Unknown(other),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            SignatureType::BinaryDocument => 0x00,
            SignatureType::TextDocument => 0x01,
            SignatureType::Standalone => 0x02,
            SignatureType::GenericCertification => 0x10,
            SignatureType::PersonaCertification => 0x11,
            SignatureType::CasualCertification => 0x12,
            SignatureType::PositiveCertification => 0x13,
            SignatureType::SubkeyBinding => 0x18,
            SignatureType::PrimaryKeyBinding => 0x19,
            SignatureType::DirectKey => 0x1F,
            SignatureType::KeyRevocation => 0x20,
            SignatureType::SubkeyRevocation => 0x28,
            SignatureType::CertificationRevocation => 0x30,
            SignatureType::Timestamp => 0x40,
            SignatureType::ThirdPartyConfirmation => 0x50,
            SignatureType::Unknown(id) => id,
        }
    }
}

/// A signature subpacket tag (RFC 4880 §5.2.3.1). The high bit of the
/// raw type octet is the "critical" flag and is not part of the tag
/// identity; see [`crate::packet::subpacket::Subpacket::critical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubpacketTag {
    SignatureCreationTime,
    SignatureExpirationTime,
    ExportableCertification,
    Revocable,
    KeyExpirationTime,
    PreferredSymmetricAlgorithms,
    RevocationKey,
    Issuer,
    NotationData,
    PreferredHashAlgorithms,
    PreferredCompressionAlgorithms,
    KeyServerPreferences,
    PreferredKeyServer,
    PrimaryUserId,
    PolicyUri,
    KeyFlags,
    SignersUserId,
    ReasonForRevocation,
    Features,
    SignatureTarget,
    EmbeddedSignature,
    IssuerFingerprint,
    Unknown(u8),
}

impl SubpacketTag {
    pub fn from_id(id: u8) -> Self {
        match id & 0x7F {
            2 => SubpacketTag::SignatureCreationTime,
            3 => SubpacketTag::SignatureExpirationTime,
            4 => SubpacketTag::ExportableCertification,
            7 => SubpacketTag::Revocable,
            9 => SubpacketTag::KeyExpirationTime,
            11 => SubpacketTag::PreferredSymmetricAlgorithms,
            12 => SubpacketTag::RevocationKey,
            16 => SubpacketTag::Issuer,
            20 => SubpacketTag::NotationData,
            21 => SubpacketTag::PreferredHashAlgorithms,
            22 => SubpacketTag::PreferredCompressionAlgorithms,
            23 => SubpacketTag::KeyServerPreferences,
            24 => SubpacketTag::PreferredKeyServer,
            25 => SubpacketTag::PrimaryUserId,
            26 => SubpacketTag::PolicyUri,
            27 => SubpacketTag::KeyFlags,
            28 => SubpacketTag::SignersUserId,
            29 => SubpacketTag::ReasonForRevocation,
            30 => SubpacketTag::Features,
            31 => SubpacketTag::SignatureTarget,
            32 => SubpacketTag::EmbeddedSignature,
            33 => SubpacketTag::IssuerFingerprint,
            other => SubpacketTag::Unknown(other),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            SubpacketTag::SignatureCreationTime => 2,
            SubpacketTag::SignatureExpirationTime => 3,
            SubpacketTag::ExportableCertification => 4,
            SubpacketTag::Revocable => 7,
            SubpacketTag::KeyExpirationTime => 9,
            SubpacketTag::PreferredSymmetricAlgorithms => 11,
            SubpacketTag::RevocationKey => 12,
            SubpacketTag::Issuer => 16,
            SubpacketTag::NotationData => 20,
            SubpacketTag::PreferredHashAlgorithms => 21,
            SubpacketTag::PreferredCompressionAlgorithms => 22,
            SubpacketTag::KeyServerPreferences => 23,
            SubpacketTag::PreferredKeyServer => 24,
            SubpacketTag::PrimaryUserId => 25,
            SubpacketTag::PolicyUri => 26,
            SubpacketTag::KeyFlags => 27,
            SubpacketTag::SignersUserId => 28,
            SubpacketTag::ReasonForRevocation => 29,
            SubpacketTag::Features => 30,
            SubpacketTag::SignatureTarget => 31,
            SubpacketTag::EmbeddedSignature => 32,
            SubpacketTag::IssuerFingerprint => 33,
            SubpacketTag::Unknown(id) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_algo_rejects_non_rsa() {
        assert!(PublicKeyAlgo::from_id(17).is_err()); // DSA
        assert!(PublicKeyAlgo::from_id(19).is_err()); // ECDSA
    }

    #[test]
    fn public_key_algo_roundtrips() {
        for id in [1u8, 2, 3] {
            assert_eq!(PublicKeyAlgo::from_id(id).unwrap().id(), id);
        }
    }

    #[test]
    fn hash_algo_unknown_roundtrips() {
        let h = HashAlgo::from_id(200);
        assert_eq!(h, HashAlgo::Unknown(200));
        assert_eq!(h.id(), 200);
    }

    #[test]
    fn signature_type_roundtrips_known_and_unknown() {
        assert_eq!(SignatureType::from_id(0x00).id(), 0x00);
        assert_eq!(SignatureType::from_id(0x7F).id(), 0x7F);
    }

    #[test]
    fn subpacket_tag_masks_critical_bit() {
        assert_eq!(SubpacketTag::from_id(16), SubpacketTag::Issuer);
        assert_eq!(SubpacketTag::from_id(16 | 0x80), SubpacketTag::Issuer);
    }

    #[test]
    fn subpacket_tag_id_does_not_restore_critical_bit() {
        // `id()` returns the canonical (masked) tag value; the critical
        // flag is tracked separately on `Subpacket`.
        assert_eq!(SubpacketTag::from_id(16 | 0x80).id(), 16);
    }
}
