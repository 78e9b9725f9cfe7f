use fiat_crypto::curve25519_64::*;
use subtle::ConstantTimeEq;

pub type Fe25519 = [u64; 5];

#[inline]
pub fn swap(a: &mut Fe25519, b: &mut Fe25519, swap: u8) {
    // SAFETY: This is a part of fiat input bounds.
    assert!(swap == 1 || swap == 0);

    let tmp_x = *a;
    let tmp_y = *b;

    fiat_25519_selectznz(a, swap, &tmp_x, &tmp_y);
    fiat_25519_selectznz(b, swap, &tmp_y, &tmp_x);
}

#[inline]
pub fn freeze(r: &Fe25519) -> Fe25519 {
    let mut ret = Default::default();
    fiat_25519_carry(&mut ret, r);
    ret
}

/// Decodes 32 little-endian bytes, masking the high bit of the last byte
/// before decoding. This is the u-coordinate decode rule; values in
/// [2^255 - 19, 2^255) wrap modulo the prime.
#[inline]
pub fn unpack(x: &[u8; 32]) -> Fe25519 {
    let mut ret = Default::default();
    let mut x = *x;
    x[31] &= 127;
    fiat_25519_from_bytes(&mut ret, &x);
    freeze(&ret)
}

/// Decodes 32 little-endian bytes as a canonical field element, returning
/// `None` for values of 2^255 - 19 or more. The caller must have cleared the
/// sign bit of the last byte.
#[inline]
pub fn unpack_checked(x: &[u8; 32]) -> Option<Fe25519> {
    let fe = unpack(x);
    if bool::from(pack(&fe).ct_eq(x)) {
        Some(fe)
    } else {
        None
    }
}

#[inline]
pub fn pack(x: &Fe25519) -> [u8; 32] {
    let mut ret = Default::default();
    fiat_25519_to_bytes(&mut ret, x);
    ret
}

#[inline]
pub fn iszero(x: &Fe25519) -> bool {
    pack(x).ct_eq(&[0u8; 32]).into()
}

#[inline]
pub fn eq(x: &Fe25519, y: &Fe25519) -> bool {
    pack(x).ct_eq(&pack(y)).into()
}

/// Returns the low bit of the canonical encoding, i.e. the parity of x.
#[inline]
pub fn parity(x: &Fe25519) -> u8 {
    pack(x)[0] & 1
}

pub const fn one() -> Fe25519 {
    [1, 0, 0, 0, 0]
}

pub const fn zero() -> Fe25519 {
    [0, 0, 0, 0, 0]
}

#[inline]
pub fn add(x: &Fe25519, y: &Fe25519) -> Fe25519 {
    let mut ret = Default::default();
    fiat_25519_add(&mut ret, x, y);
    freeze(&ret)
}

#[inline]
pub fn sub(x: &Fe25519, y: &Fe25519) -> Fe25519 {
    let mut ret = Default::default();
    fiat_25519_sub(&mut ret, x, y);
    freeze(&ret)
}

#[inline]
pub fn neg(x: &Fe25519) -> Fe25519 {
    sub(&zero(), x)
}

#[inline]
pub fn mul121666(x: &Fe25519) -> Fe25519 {
    let mut ret = Default::default();
    fiat_25519_carry_scmul_121666(&mut ret, x);
    freeze(&ret)
}

#[inline]
pub fn mul(x: &Fe25519, y: &Fe25519) -> Fe25519 {
    let mut ret = Default::default();
    fiat_25519_carry_mul(&mut ret, x, y);
    freeze(&ret)
}

#[inline]
pub fn square(x: &Fe25519) -> Fe25519 {
    let mut ret = Default::default();
    fiat_25519_carry_square(&mut ret, x);
    freeze(&ret)
}

/// Computes `x^(2^k)` by repeated squaring.
pub fn pow2k(x: &Fe25519, k: u32) -> Fe25519 {
    let mut ret = *x;
    for _ in 0..k {
        ret = square(&ret);
    }
    ret
}

/// Computes `(x^((p-5)/8), x^2)` where (p-5)/8 = 2^252 - 3. Both values feed
/// square-root extraction during point decompression.
pub fn pow2_252_3(x: &Fe25519) -> (Fe25519, Fe25519) {
    /* 2 */
    let x2 = square(x);
    /* 4 */
    let t0 = square(&x2);
    /* 8 */
    let t0 = square(&t0);
    /* 9 */
    let z9 = mul(&t0, x);
    /* 11 */
    let z11 = mul(&z9, &x2);
    /* 22 */
    let t0 = square(&z11);
    /* 2^5 - 2^0 = 31 */
    let z2_5_0 = mul(&t0, &z9);

    /* 2^10 - 2^5 */
    let t0 = pow2k(&z2_5_0, 5);
    /* 2^10 - 2^0 */
    let z2_10_0 = mul(&t0, &z2_5_0);

    /* 2^20 - 2^10 */
    let t0 = pow2k(&z2_10_0, 10);
    /* 2^20 - 2^0 */
    let z2_20_0 = mul(&t0, &z2_10_0);

    /* 2^40 - 2^20 */
    let t0 = pow2k(&z2_20_0, 20);
    /* 2^40 - 2^0 */
    let z2_40_0 = mul(&t0, &z2_20_0);

    /* 2^50 - 2^10 */
    let t0 = pow2k(&z2_40_0, 10);
    /* 2^50 - 2^0 */
    let z2_50_0 = mul(&t0, &z2_10_0);

    /* 2^100 - 2^50 */
    let t0 = pow2k(&z2_50_0, 50);
    /* 2^100 - 2^0 */
    let z2_100_0 = mul(&t0, &z2_50_0);

    /* 2^200 - 2^100 */
    let t0 = pow2k(&z2_100_0, 100);
    /* 2^200 - 2^0 */
    let z2_200_0 = mul(&t0, &z2_100_0);

    /* 2^250 - 2^50 */
    let t0 = pow2k(&z2_200_0, 50);
    /* 2^250 - 2^0 */
    let z2_250_0 = mul(&t0, &z2_50_0);

    /* 2^252 - 2^2 */
    let t0 = pow2k(&z2_250_0, 2);
    /* 2^252 - 3 */
    (mul(&t0, x), x2)
}

pub fn invert(x: &Fe25519) -> Fe25519 {
    /* 2 */
    let z2 = square(x);
    /* 4 */
    let t1 = square(&z2);
    /* 8 */
    let t0 = square(&t1);
    /* 9 */
    let z9 = mul(&t0, x);
    /* 11 */
    let z11 = mul(&z9, &z2);
    /* 22 */
    let t0 = square(&z11);
    /* 2^5 - 2^0 = 31 */
    let z2 = mul(&t0, &z9);

    /* 2^6 - 2^1 */
    let t0 = square(&z2);
    /* 2^7 - 2^2 */
    let t1 = square(&t0);
    /* 2^8 - 2^3 */
    let t0 = square(&t1);
    /* 2^9 - 2^4 */
    let t1 = square(&t0);
    /* 2^10 - 2^5 */
    let t0 = square(&t1);
    /* 2^10 - 2^0 */
    let z2 = mul(&t0, &z2);

    /* 2^11 - 2^1 */
    let mut t0 = square(&z2);
    /* 2^12 - 2^2 */
    let mut t1 = square(&t0);
    /* 2^20 - 2^10 */
    for _ in (2..10).step_by(2) {
        t0 = square(&t1);
        t1 = square(&t0);
    }
    /* 2^20 - 2^0 */
    let z9 = mul(&t1, &z2);

    /* 2^21 - 2^1 */
    let mut t0 = square(&z9);
    /* 2^22 - 2^2 */
    let mut t1 = square(&t0);
    /* 2^40 - 2^20 */
    for _ in (2..20).step_by(2) {
        t0 = square(&t1);
        t1 = square(&t0);
    }
    /* 2^40 - 2^0 */
    let t0 = mul(&t1, &z9);

    /* 2^41 - 2^1 */
    let mut t1 = square(&t0);
    /* 2^42 - 2^2 */
    let mut t0 = square(&t1);
    /* 2^50 - 2^10 */
    for _ in (2..10).step_by(2) {
        t1 = square(&t0);
        t0 = square(&t1);
    }
    /* 2^50 - 2^0 */
    let z2 = mul(&t0, &z2);

    /* 2^51 - 2^1 */
    let mut t0 = square(&z2);
    /* 2^52 - 2^2 */
    let mut t1 = square(&t0);
    /* 2^100 - 2^50 */
    for _ in (2..50).step_by(2) {
        t0 = square(&t1);
        t1 = square(&t0);
    }
    /* 2^100 - 2^0 */
    let z9 = mul(&t1, &z2);

    /* 2^101 - 2^1 */
    let mut t1 = square(&z9);
    /* 2^102 - 2^2 */
    let mut t0 = square(&t1);
    /* 2^200 - 2^100 */
    for _ in (2..100).step_by(2) {
        t1 = square(&t0);
        t0 = square(&t1);
    }
    /* 2^200 - 2^0 */
    let t1 = mul(&t0, &z9);

    /* 2^201 - 2^1 */
    let mut t0 = square(&t1);
    /* 2^202 - 2^2 */
    let mut t1 = square(&t0);
    /* 2^250 - 2^50 */
    for _ in (2..50).step_by(2) {
        t0 = square(&t1);
        t1 = square(&t0);
    }
    /* 2^250 - 2^0 */
    let t0 = mul(&t1, &z2);

    /* 2^251 - 2^1 */
    let t1 = square(&t0);
    /* 2^252 - 2^2 */
    let t0 = square(&t1);
    /* 2^253 - 2^3 */
    let t1 = square(&t0);
    /* 2^254 - 2^4 */
    let t0 = square(&t1);
    /* 2^255 - 2^5 */
    let t1 = square(&t0);
    /* 2^255 - 21 */
    let ret = mul(&t1, &z11);
    freeze(&ret)
}

#[cfg(test)]
mod tests {
    use rand::{thread_rng, Rng};

    use super::*;

    fn random_fe() -> Fe25519 {
        unpack(&thread_rng().gen())
    }

    #[test]
    fn invert_round_trip() {
        for _ in 0..100 {
            let x = random_fe();
            if iszero(&x) {
                continue;
            }
            assert!(eq(&mul(&x, &invert(&x)), &one()));
            assert!(eq(&invert(&invert(&x)), &x));
        }
    }

    #[test]
    fn invert_zero_is_zero() {
        assert!(iszero(&invert(&zero())));
    }

    #[test]
    fn pow2_252_3_against_invert() {
        // x^((p-5)/8) raised to the 8th power times x^3 is x^(p-2).
        for _ in 0..20 {
            let x = random_fe();
            let (p58, x2) = pow2_252_3(&x);
            let x3 = mul(&x2, &x);
            assert!(eq(&mul(&pow2k(&p58, 3), &x3), &invert(&x)));
        }
    }

    #[test]
    fn neg_and_sub() {
        for _ in 0..100 {
            let x = random_fe();
            assert!(iszero(&add(&x, &neg(&x))));
            assert!(eq(&sub(&zero(), &x), &neg(&x)));
        }
    }

    #[test]
    fn pack_unpack_round_trip() {
        for _ in 0..100 {
            let x = random_fe();
            assert!(eq(&unpack(&pack(&x)), &x));
        }
    }

    #[test]
    fn unpack_checked_rejects_noncanonical() {
        // 2^255 - 19, the smallest non-canonical encoding.
        let mut p_bytes = [0xffu8; 32];
        p_bytes[0] = 0xed;
        p_bytes[31] = 0x7f;
        assert!(unpack_checked(&p_bytes).is_none());

        let mut p_minus_one = p_bytes;
        p_minus_one[0] = 0xec;
        assert!(unpack_checked(&p_minus_one).is_some());
    }
}
