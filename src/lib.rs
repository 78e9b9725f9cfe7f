//! ed25519x provides a small, portable implementation of the
//! [Ed25519](https://www.rfc-editor.org/rfc/rfc8032.html) digital signature
//! algorithm over the twisted Edwards form of Curve25519, plus the
//! [X25519](https://www.rfc-editor.org/rfc/rfc7748.html) key agreement
//! algorithm.
//!
//! Keys, signatures, and shared secrets use the standard 32- and 64-byte
//! little-endian wire formats and can be carried through any [Encoding].
//! The top-level types bind the protocols to SHA-512; [eddsa] exposes the
//! same operations generic over any 64-byte hash.
#![forbid(unsafe_code)]

use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

pub use crate::codec::Encoding;
pub use crate::error::{Error, Result};
pub use crate::point::{AffinePoint, G};

pub mod codec;
pub mod eddsa;
mod error;
mod fe25519;
mod point;
mod scalar;
pub mod x25519;

use crate::scalar::Scalar;

/// Computes SHA-512 over the concatenation of the given byte strings. The
/// default hash binding for all top-level operations.
pub fn sha512(bin: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    for data in bin {
        hasher.update(data);
    }
    hasher.finalize().into()
}

/// Generates a new random private key.
pub fn generate_key(rng: impl RngCore + CryptoRng) -> PrivateKey {
    PrivateKey(eddsa::generate_key(rng))
}

/// Verifies an encoded signature over `m` against an encoded public key,
/// decoding both under the given encoding.
///
/// Returns `Ok(false)` only for a well-formed signature which fails
/// verification; inputs which cannot be decoded or parsed produce an error.
pub fn verify_encoded(sig: &[u8], m: &[u8], pk: &[u8], encoding: Encoding) -> Result<bool> {
    let sig = codec::decode_fixed::<64>(sig, encoding)?;
    let pk = codec::decode_fixed::<32>(pk, encoding)?;
    eddsa::verify(&sig, m, &pk, sha512)
}

/// A 32-byte Ed25519 private key. Zeroed on drop.
#[derive(Clone)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Generates a new random private key.
    pub fn generate(rng: impl RngCore + CryptoRng) -> PrivateKey {
        PrivateKey(eddsa::generate_key(rng))
    }

    pub fn from_bytes(bytes: &[u8; 32]) -> PrivateKey {
        PrivateKey(*bytes)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Derives the corresponding public key.
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_bytes(&eddsa::public_key(&self.0, sha512)?)
    }

    /// Signs a message.
    pub fn sign(&self, m: &[u8]) -> Result<Signature> {
        Signature::from_bytes(&eddsa::sign(m, &self.0, sha512)?)
    }

    /// Computes the X25519 shared secret with a peer's public key. For any
    /// two keypairs, each side's result is the same 32 bytes.
    pub fn shared_secret(&self, peer: &PublicKey) -> Result<[u8; 32]> {
        eddsa::shared_secret(&self.0, &peer.to_bytes(), sha512)
    }

    pub fn encode(&self, encoding: Encoding) -> Vec<u8> {
        codec::encode(&self.0, encoding)
    }

    pub fn decode(data: &[u8], encoding: Encoding) -> Result<PrivateKey> {
        Ok(PrivateKey(codec::decode_fixed::<32>(data, encoding)?))
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for PrivateKey {}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// An Ed25519 public key, validated to be a curve point on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey(AffinePoint);

impl PublicKey {
    /// Decompresses a 32-byte public key.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<PublicKey> {
        Ok(PublicKey(AffinePoint::decompress(bytes)?))
    }

    /// Returns the compressed form of the key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.compress()
    }

    /// Verifies a signature over `m`. A structured [Signature] is always
    /// well-formed, so this returns `Ok(false)` rather than an error when
    /// the signature does not match.
    pub fn verify(&self, sig: &Signature, m: &[u8]) -> Result<bool> {
        eddsa::verify(&sig.to_bytes(), m, &self.to_bytes(), sha512)
    }

    pub fn encode(&self, encoding: Encoding) -> Vec<u8> {
        codec::encode(&self.to_bytes(), encoding)
    }

    pub fn decode(data: &[u8], encoding: Encoding) -> Result<PublicKey> {
        PublicKey::from_bytes(&codec::decode_fixed::<32>(data, encoding)?)
    }
}

/// An Ed25519 signature: a commitment point R and a proof scalar s,
/// serialized as compressed R followed by s little-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    r: AffinePoint,
    s: Scalar,
}

impl Signature {
    /// Parses a 64-byte signature, rejecting an unparseable commitment point
    /// or an out-of-range proof scalar.
    pub fn from_bytes(bytes: &[u8; 64]) -> Result<Signature> {
        let r_bytes: [u8; 32] = bytes[..32].try_into().unwrap();
        let s_bytes: [u8; 32] = bytes[32..].try_into().unwrap();

        let r = AffinePoint::decompress(&r_bytes)
            .map_err(|_| Error::InvalidSignature("unparseable commitment point"))?;
        let s = Scalar::from_canonical_bytes(&s_bytes)
            .map_err(|_| Error::InvalidSignature("proof scalar out of range"))?;

        Ok(Signature { r, s })
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r.compress());
        bytes[32..].copy_from_slice(&self.s.as_bytes());
        bytes
    }

    pub fn encode(&self, encoding: Encoding) -> Vec<u8> {
        codec::encode(&self.to_bytes(), encoding)
    }

    pub fn decode(data: &[u8], encoding: Encoding) -> Result<Signature> {
        Signature::from_bytes(&codec::decode_fixed::<64>(data, encoding)?)
    }
}

/// The domain parameters of edwards25519.
#[derive(Clone, Copy, Debug)]
pub struct Params {
    /// The field prime 2^255 - 19, little-endian.
    pub p: [u8; 32],
    /// The curve constant a = -1 mod p, little-endian.
    pub a: [u8; 32],
    /// The curve constant d = -121665/121666 mod p, little-endian.
    pub d: [u8; 32],
    /// The base point.
    pub g: AffinePoint,
    /// The order of the base-point subgroup, little-endian.
    pub l: [u8; 32],
    /// The cofactor.
    pub h: u8,
}

/// Returns the curve constants.
pub fn params() -> Params {
    let mut p = [0xffu8; 32];
    p[0] = 0xed;
    p[31] = 0x7f;

    Params {
        p,
        a: fe25519::pack(&fe25519::neg(&fe25519::one())),
        d: fe25519::pack(&point::D),
        g: G,
        l: scalar::L.as_bytes(),
        h: 8,
    }
}
