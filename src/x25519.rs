use crate::error::{Error, Result};
use crate::fe25519;
use crate::fe25519::Fe25519;
use crate::point::AffinePoint;

/// Clamps a 32-byte secret per RFC 7748: the low three bits are cleared, the
/// top bit is cleared, and bit 254 is set.
pub fn clamp(k: &[u8; 32]) -> [u8; 32] {
    let mut k = *k;
    k[0] &= 248;
    k[31] &= 127;
    k[31] |= 64;
    k
}

/// Computes the X25519 function between a secret `k` and a peer u-coordinate
/// `u`. The secret is clamped before use, and the high bit of `u` is masked
/// on decoding.
pub fn x25519(k: &[u8; 32], u: &[u8; 32]) -> Result<[u8; 32]> {
    let d = clamp(k);
    let xr = ladder(&fe25519::unpack(u), &d)?;
    Ok(fe25519::pack(&xr))
}

/// Computes the X25519 function between a secret `k` and the base point
/// u = 9, i.e. derives the Diffie-Hellman public key for `k`.
pub fn x25519_base(k: &[u8; 32]) -> Result<[u8; 32]> {
    let d = clamp(k);
    let xr = ladder(&[9, 0, 0, 0, 0], &d)?;
    Ok(fe25519::pack(&xr))
}

/// Converts an Edwards point to the birationally equivalent Montgomery
/// u-coordinate: u = (1 + y) / (1 - y), serialized little-endian.
pub fn edwards_to_montgomery(p: &AffinePoint) -> [u8; 32] {
    let one = fe25519::one();
    let u = fe25519::mul(
        &fe25519::add(&one, &p.y),
        &fe25519::invert(&fe25519::sub(&one, &p.y)),
    );
    fe25519::pack(&u)
}

// Montgomery ladder computing the u-coordinate of n*P via repeated
// differential additions and constant-time conditional swaps.
//
// Input:
//      xp: proj. u-coordinate on the Montgomery curve
//      n: clamped scalar bytes (max 255-bit)
//
// Output:
//      the affine u-coordinate of n*P, or InvalidKey if it is zero
//      (a low-order input)
pub(crate) fn ladder(xp: &Fe25519, n: &[u8; 32]) -> Result<Fe25519> {
    let mut x2 = fe25519::one();
    let mut x3 = *xp;
    let mut z3 = fe25519::one();
    let mut z2 = fe25519::zero();
    let mut tmp0: Fe25519;
    let mut tmp1: Fe25519;
    let mut swap_bit: u8 = 0;

    for idx in (0..=254).rev() {
        let bit = (n[idx >> 3] >> (idx & 7)) & 1;
        swap_bit ^= bit;
        fe25519::swap(&mut x2, &mut x3, swap_bit);
        fe25519::swap(&mut z2, &mut z3, swap_bit);
        swap_bit = bit;

        tmp0 = fe25519::sub(&x3, &z3); // x3 - z3;
        tmp1 = fe25519::sub(&x2, &z2); // x2 - z2;
        x2 = fe25519::add(&x2, &z2); // x2 + z2;
        z2 = fe25519::add(&x3, &z3); // x3 + z3;
        z3 = fe25519::mul(&tmp0, &x2); // tmp0 * x2;
        z2 = fe25519::mul(&z2, &tmp1); // z2 * tmp1;
        tmp0 = fe25519::square(&tmp1);
        tmp1 = fe25519::square(&x2);
        x3 = fe25519::add(&z3, &z2); // z3 + z2;
        z2 = fe25519::sub(&z3, &z2); // z3 - z2;
        x2 = fe25519::mul(&tmp1, &tmp0); // tmp1 * tmp0;
        tmp1 = fe25519::sub(&tmp1, &tmp0); // tmp1 - tmp0;
        z2 = fe25519::square(&z2);
        z3 = fe25519::mul121666(&tmp1);
        x3 = fe25519::square(&x3);
        tmp0 = fe25519::add(&tmp0, &z3); // tmp0 + z3;
        z3 = fe25519::mul(xp, &z2); // x1 * z2;
        z2 = fe25519::mul(&tmp1, &tmp0); // tmp1 * tmp0;
    }

    fe25519::swap(&mut x2, &mut x3, swap_bit);
    fe25519::swap(&mut z2, &mut z3, swap_bit);

    z2 = fe25519::invert(&z2);
    x2 = fe25519::mul(&x2, &z2); // x2 * z2;

    if fe25519::iszero(&x2) {
        return Err(Error::InvalidKey("low-order point"));
    }

    Ok(x2)
}
