//! RFC 8032 key expansion, signing, and verification, generic over any
//! 64-byte hash. The crate root binds these to SHA-512.

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::point::{AffinePoint, ExtendedPoint, G};
use crate::scalar::Scalar;
use crate::x25519;

/// The expansion of a 32-byte secret key: the clamped head, its reduction
/// mod l, and the prefix used for nonce derivation.
struct ExpandedKey {
    head: [u8; 32],
    scalar: Scalar,
    prefix: [u8; 32],
}

impl Zeroize for ExpandedKey {
    fn zeroize(&mut self) {
        self.head.zeroize();
        self.scalar.zeroize();
        self.prefix.zeroize();
    }
}

impl Drop for ExpandedKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

fn expand(sk: &[u8; 32], mut hash: impl FnMut(&[&[u8]]) -> [u8; 64]) -> ExpandedKey {
    let h = hash(&[sk]);
    let head: [u8; 32] = h[..32].try_into().unwrap();
    let head = x25519::clamp(&head);
    let prefix: [u8; 32] = h[32..].try_into().unwrap();

    ExpandedKey {
        head,
        scalar: Scalar::from_bytes(&head),
        prefix,
    }
}

/// Returns 32 bytes from a cryptographic RNG, suitable as a secret key.
pub fn generate_key(mut rng: impl RngCore + CryptoRng) -> [u8; 32] {
    let mut sk = [0u8; 32];
    rng.fill_bytes(&mut sk);
    sk
}

/// Derives the compressed public key for the given secret key.
pub fn public_key(
    sk: &[u8; 32],
    mut hash: impl FnMut(&[&[u8]]) -> [u8; 64],
) -> Result<[u8; 32]> {
    let key = expand(sk, &mut hash);
    Ok(ExtendedPoint::from(&G).mul(&key.scalar).to_affine()?.compress())
}

/// Signs a message with the given secret key, producing a 64-byte signature
/// of the compressed commitment point R followed by the proof scalar s.
pub fn sign(
    m: &[u8],
    sk: &[u8; 32],
    mut hash: impl FnMut(&[&[u8]]) -> [u8; 64],
) -> Result<[u8; 64]> {
    let key = expand(sk, &mut hash);
    let a = ExtendedPoint::from(&G).mul(&key.scalar).to_affine()?.compress();

    let r = Scalar::from_bytes_wide(&hash(&[&key.prefix, m]));
    let r_bytes = ExtendedPoint::from(&G).mul(&r).to_affine()?.compress();

    let k = Scalar::from_bytes_wide(&hash(&[&r_bytes, &a, m]));
    let s = &r + &(&k * &key.scalar);

    let mut sig = [0u8; 64];
    sig[..32].copy_from_slice(&r_bytes);
    sig[32..].copy_from_slice(&s.as_bytes());
    Ok(sig)
}

/// Verifies the signature given the public key and message.
///
/// Returns `Ok(false)` only for a well-formed signature which fails the curve
/// equation; signature bytes which cannot be parsed are an error, never a
/// silent `false`.
pub fn verify(
    sig: &[u8],
    m: &[u8],
    pk: &[u8; 32],
    mut hash: impl FnMut(&[&[u8]]) -> [u8; 64],
) -> Result<bool> {
    if sig.len() != 64 {
        return Err(Error::InvalidSignature("length must be 64 bytes"));
    }
    let r_bytes: [u8; 32] = sig[..32].try_into().unwrap();
    let s_bytes: [u8; 32] = sig[32..].try_into().unwrap();

    let r = AffinePoint::decompress(&r_bytes)
        .map_err(|_| Error::InvalidSignature("unparseable commitment point"))?;
    let s = Scalar::from_canonical_bytes(&s_bytes)
        .map_err(|_| Error::InvalidSignature("proof scalar out of range"))?;
    let a = AffinePoint::decompress(pk)?;

    let k = Scalar::from_bytes_wide(&hash(&[&r_bytes, pk, m]));

    // [8] * (R + [k]A - [s]G) must be the neutral element; the cofactor
    // multiple absorbs any low-order component of R or A.
    let p = ExtendedPoint::from(&r)
        .add(&ExtendedPoint::from(&a).mul(&k))
        .sub(&ExtendedPoint::from(&G).mul(&s));
    let p8 = p.double().double().double();

    Ok(p8 == ExtendedPoint::NEUTRAL)
}

/// Computes the X25519 shared secret between one party's secret key and the
/// other's public key, mapping the Edwards public key to its Montgomery
/// u-coordinate.
pub fn shared_secret(
    sk: &[u8; 32],
    pk: &[u8; 32],
    mut hash: impl FnMut(&[&[u8]]) -> [u8; 64],
) -> Result<[u8; 32]> {
    let key = expand(sk, &mut hash);
    let peer = AffinePoint::decompress(pk)?;
    x25519::x25519(&key.head, &x25519::edwards_to_montgomery(&peer))
}
