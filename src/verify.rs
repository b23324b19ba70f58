//! RSA/PKCS#1-v1.5 signature verification (RFC 4880 §5.2.2, §13.1.3) and
//! the top-level entry point that ties armor decoding, packet framing,
//! and signed-data reconstruction together.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use digest::Digest;
use rsa::pkcs1v15::Pkcs1v15Sign;
use rsa::RsaPublicKey;

use crate::armor::{self, AscType, Message};
use crate::packet::{PublicKey, Signature, Tag};
use crate::types::HashAlgo;
use crate::{reconstruct, Error, Result};

/// Streams `file`'s contents and the reconstructed signature trailer
/// through `D`, then checks the result against `sig.signature_mpi` using
/// `public_key`.
fn verify_with<D: Digest + digest::const_oid::AssociatedOid>(
    public_key: &PublicKey,
    sig: &Signature,
    mut file: impl Read,
) -> Result<()> {
    let trailer = reconstruct::signed_data(sig);

    let mut hasher = D::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    hasher.update(&trailer);
    let digest = hasher.finalize();

    let rsa_key = RsaPublicKey::new(public_key.modulus.clone(), public_key.exponent.clone())
        .map_err(|e| anyhow::anyhow!("invalid RSA public key: {e}"))?;

    // The MPI carries only ceil(bits/8) octets, which is shorter than the
    // modulus whenever the signature's top octet is zero. pkcs1v15::verify
    // requires the signature length to equal the modulus size exactly, so
    // left-pad with zero octets back to that size.
    if sig.signature_mpi.len() > rsa_key.size() {
        return Err(Error::SignatureInvalid.into());
    }
    let mut signature = vec![0u8; rsa_key.size()];
    let offset = signature.len() - sig.signature_mpi.len();
    signature[offset..].copy_from_slice(&sig.signature_mpi);

    rsa_key
        .verify(Pkcs1v15Sign::new::<D>(), &digest, &signature)
        .map_err(|_| Error::SignatureInvalid)?;

    Ok(())
}

/// Hashes `file` and `sig`'s reconstructed trailer with `sig`'s declared
/// hash algorithm, then verifies the RSA/PKCS#1-v1.5 signature against
/// `public_key`.
///
/// Only SHA-256, SHA-384, SHA-512, and SHA-224 are accepted. MD5 and any
/// algorithm this crate does not recognize are rejected here rather than
/// at parse time, since a signature using an unsupported hash is still
/// structurally well-formed.
pub fn verify_stream(public_key: &PublicKey, sig: &Signature, file: impl Read) -> Result<()> {
    match sig.hash_algo {
        HashAlgo::Sha256 => verify_with::<sha2::Sha256>(public_key, sig, file),
        HashAlgo::Sha384 => verify_with::<sha2::Sha384>(public_key, sig, file),
        HashAlgo::Sha512 => verify_with::<sha2::Sha512>(public_key, sig, file),
        HashAlgo::Sha224 => verify_with::<sha2::Sha224>(public_key, sig, file),
        HashAlgo::Md5 | HashAlgo::Unknown(_) => {
            Err(Error::UnsupportedHash(sig.hash_algo.id()).into())
        }
    }
}

fn extract_public_key(msg: &Message) -> Result<PublicKey> {
    let packet = msg.single_packet("Public-Key", |p| p.tag == Tag::PublicKey)?;
    match &packet.body {
        crate::packet::Body::PublicKey(pk) => Ok(pk.clone()),
        _ => unreachable!("single_packet matched on Tag::PublicKey"),
    }
}

fn extract_signature(msg: &Message) -> Result<Signature> {
    let packet = msg.single_packet("Signature", |p| p.tag == Tag::Signature)?;
    match &packet.body {
        crate::packet::Body::Signature(sig) => Ok(sig.clone()),
        _ => unreachable!("single_packet matched on Tag::Signature"),
    }
}

/// Verifies that the signature armored at `sigfile` over `file` was made
/// by the key armored at `keyfile`.
///
/// This is the crate's top-level entry point: it de-armors both
/// `keyfile` (expecting exactly one Public-Key packet) and `sigfile`
/// (expecting exactly one Signature packet), reconstructs the signed
/// data, and performs the RSA verification. On success, returns `Ok(())`,
/// never a boolean, so callers cannot accidentally ignore the
/// distinction between "verified" and "failed to even parse."
pub fn verify(
    keyfile: impl AsRef<Path>,
    sigfile: impl AsRef<Path>,
    file: impl AsRef<Path>,
) -> Result<()> {
    let key_msg = armor::dearmor_file(keyfile, armor::DEFAULT_MAX_BYTES)?;
    if !matches!(
        key_msg.asc_type,
        AscType::PublicKeyBlock | AscType::PrivateKeyBlock
    ) {
        return Err(Error::UnknownAscType(format!(
            "expected a public/private key block, found {:?}",
            key_msg.asc_type
        ))
        .into());
    }
    let public_key = extract_public_key(&key_msg)?;

    let sig_msg = armor::dearmor_file(sigfile, armor::DEFAULT_MAX_BYTES)?;
    if sig_msg.asc_type != AscType::Signature {
        return Err(Error::UnknownAscType(format!(
            "expected a signature block, found {:?}",
            sig_msg.asc_type
        ))
        .into());
    }
    let signature = extract_signature(&sig_msg)?;

    let f = File::open(file)?;
    verify_stream(&public_key, &signature, f)
}
