use crate::error::{Error, Result};
use crate::fe25519;
use crate::fe25519::Fe25519;
use crate::scalar::Scalar;

/// A point on edwards25519 in affine coordinates.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    pub(crate) x: Fe25519,
    pub(crate) y: Fe25519,
}

impl AffinePoint {
    /// The neutral element (0, 1).
    pub const NEUTRAL: AffinePoint = AffinePoint {
        x: fe25519::zero(),
        y: fe25519::one(),
    };

    /// Encodes the point as 32 bytes: y little-endian, with the parity of x
    /// in the high bit of the last byte.
    pub fn compress(&self) -> [u8; 32] {
        let mut bytes = fe25519::pack(&self.y);
        bytes[31] |= fe25519::parity(&self.x) << 7;
        bytes
    }

    /// Decodes a compressed point, recovering x from y via square root
    /// extraction.
    pub fn decompress(bytes: &[u8; 32]) -> Result<AffinePoint> {
        let sign = bytes[31] >> 7;
        let mut y_bytes = *bytes;
        y_bytes[31] &= 127;

        let y = fe25519::unpack_checked(&y_bytes)
            .ok_or(Error::InvalidPoint("non-canonical y coordinate"))?;
        let x = recover_x(&y, sign)?;

        Ok(AffinePoint { x, y })
    }

    pub fn neg(&self) -> AffinePoint {
        AffinePoint {
            x: fe25519::neg(&self.x),
            y: self.y,
        }
    }

    pub fn add(&self, other: &AffinePoint) -> Result<AffinePoint> {
        ExtendedPoint::from(self).add(&ExtendedPoint::from(other)).to_affine()
    }

    pub fn double(&self) -> Result<AffinePoint> {
        ExtendedPoint::from(self).double().to_affine()
    }

    pub fn mul(&self, n: &Scalar) -> Result<AffinePoint> {
        ExtendedPoint::from(self).mul(n).to_affine()
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        fe25519::eq(&self.x, &other.x) && fe25519::eq(&self.y, &other.y)
    }
}

impl Eq for AffinePoint {}

/// A point in extended twisted Edwards coordinates (X, Y, Z, T), with
/// x = X/Z, y = Y/Z, and T = XY/Z.
#[derive(Clone, Copy, Debug)]
pub struct ExtendedPoint {
    x: Fe25519,
    y: Fe25519,
    z: Fe25519,
    t: Fe25519,
}

impl ExtendedPoint {
    /// The neutral element (0, 1, 1, 0).
    pub const NEUTRAL: ExtendedPoint = ExtendedPoint {
        x: fe25519::zero(),
        y: fe25519::one(),
        z: fe25519::one(),
        t: fe25519::zero(),
    };

    /// Unified addition for a = -1. The main formula has an exceptional case
    /// when F = 0, which is handled by falling back to doubling.
    pub fn add(&self, other: &ExtendedPoint) -> ExtendedPoint {
        let a = fe25519::mul(
            &fe25519::sub(&self.y, &self.x),
            &fe25519::add(&other.y, &other.x),
        );
        let b = fe25519::mul(
            &fe25519::add(&self.y, &self.x),
            &fe25519::sub(&other.y, &other.x),
        );
        let f = fe25519::sub(&b, &a);
        if fe25519::iszero(&f) {
            return self.double();
        }

        let c = fe25519::mul(&fe25519::add(&self.z, &self.z), &other.t);
        let d = fe25519::mul(&fe25519::add(&self.t, &self.t), &other.z);
        let e = fe25519::add(&d, &c);
        let g = fe25519::add(&b, &a);
        let h = fe25519::sub(&d, &c);

        ExtendedPoint {
            x: fe25519::mul(&e, &f),
            y: fe25519::mul(&g, &h),
            z: fe25519::mul(&f, &g),
            t: fe25519::mul(&e, &h),
        }
    }

    pub fn double(&self) -> ExtendedPoint {
        let a = fe25519::square(&self.x);
        let b = fe25519::square(&self.y);
        let zz = fe25519::square(&self.z);
        let c = fe25519::add(&zz, &zz);
        let d = fe25519::neg(&a);

        let xy = fe25519::add(&self.x, &self.y);
        let e = fe25519::sub(&fe25519::sub(&fe25519::square(&xy), &a), &b);
        let g = fe25519::add(&d, &b);
        let f = fe25519::sub(&g, &c);
        let h = fe25519::sub(&d, &b);

        ExtendedPoint {
            x: fe25519::mul(&e, &f),
            y: fe25519::mul(&g, &h),
            z: fe25519::mul(&f, &g),
            t: fe25519::mul(&e, &h),
        }
    }

    /// Multiplies the point by a scalar with a right-to-left double-and-add
    /// loop. Not constant time; the verification scalars this processes are
    /// public.
    pub fn mul(&self, n: &Scalar) -> ExtendedPoint {
        let bytes = n.as_bytes();
        let mut acc = ExtendedPoint::NEUTRAL;
        let mut base = *self;

        for idx in 0..256 {
            if (bytes[idx >> 3] >> (idx & 7)) & 1 == 1 {
                acc = acc.add(&base);
            }
            base = base.double();
        }

        acc
    }

    pub fn neg(&self) -> ExtendedPoint {
        ExtendedPoint {
            x: fe25519::neg(&self.x),
            y: self.y,
            z: self.z,
            t: fe25519::neg(&self.t),
        }
    }

    pub fn sub(&self, other: &ExtendedPoint) -> ExtendedPoint {
        self.add(&other.neg())
    }

    /// Projects back to affine coordinates by dividing out Z.
    pub fn to_affine(&self) -> Result<AffinePoint> {
        let z_inv = fe25519::invert(&self.z);
        if !fe25519::eq(&fe25519::mul(&self.z, &z_inv), &fe25519::one()) {
            return Err(Error::InvalidPoint("projective Z is not invertible"));
        }

        Ok(AffinePoint {
            x: fe25519::mul(&self.x, &z_inv),
            y: fe25519::mul(&self.y, &z_inv),
        })
    }
}

impl From<&AffinePoint> for ExtendedPoint {
    fn from(p: &AffinePoint) -> ExtendedPoint {
        ExtendedPoint {
            x: p.x,
            y: p.y,
            z: fe25519::one(),
            t: fe25519::mul(&p.x, &p.y),
        }
    }
}

impl PartialEq for ExtendedPoint {
    /// Projective equality: X1·Z2 = X2·Z1 and Y1·Z2 = Y2·Z1.
    fn eq(&self, other: &Self) -> bool {
        fe25519::eq(
            &fe25519::mul(&self.x, &other.z),
            &fe25519::mul(&other.x, &self.z),
        ) && fe25519::eq(
            &fe25519::mul(&self.y, &other.z),
            &fe25519::mul(&other.y, &self.z),
        )
    }
}

impl Eq for ExtendedPoint {}

/// Solves x^2 = (y^2 - 1) / (d·y^2 + 1) for x, picking the root whose parity
/// matches `sign`.
fn recover_x(y: &Fe25519, sign: u8) -> Result<Fe25519> {
    let yy = fe25519::square(y);
    let u = fe25519::sub(&yy, &fe25519::one());
    let v = fe25519::add(&fe25519::mul(&D, &yy), &fe25519::one());

    // candidate root x = u * v^3 * (u * v^7)^((p-5)/8)
    let v3 = fe25519::mul(&fe25519::square(&v), &v);
    let v7 = fe25519::mul(&fe25519::square(&v3), &v);
    let (pow, _) = fe25519::pow2_252_3(&fe25519::mul(&u, &v7));
    let mut x = fe25519::mul(&fe25519::mul(&u, &v3), &pow);

    let vx2 = fe25519::mul(&v, &fe25519::square(&x));
    if fe25519::eq(&vx2, &fe25519::neg(&u)) {
        x = fe25519::mul(&x, &SQRT_M1);
    } else if !fe25519::eq(&vx2, &u) {
        return Err(Error::InvalidPoint("x has no square root"));
    }

    if fe25519::parity(&x) != sign {
        x = fe25519::neg(&x);
    }

    Ok(x)
}

/// The curve constant d = -121665/121666 mod p.
pub(crate) const D: Fe25519 = [
    0x0003_4dca_1359_78a3,
    0x0001_a828_3b15_6ebd,
    0x0005_e7a2_6001_c029,
    0x0007_39c6_63a0_3cbb,
    0x0005_2036_cee2_b6ff,
];

/// A square root of -1 mod p.
const SQRT_M1: Fe25519 = [
    0x0006_1b27_4a0e_a0b0,
    0x0000_d5a5_fc8f_189d,
    0x0007_ef5e_9cbd_0c60,
    0x0007_8595_a680_4c9e,
    0x0002_b832_4804_fc1d,
];

/// The base point, with y = 4/5 mod p and even x.
pub const G: AffinePoint = AffinePoint {
    x: [
        0x0006_2d60_8f25_d51a,
        0x0004_12a4_b4f6_592a,
        0x0007_5b71_71a4_b31d,
        0x0001_ff60_5271_18fe,
        0x0002_1693_6d3c_d6e5,
    ],
    y: [
        0x0006_6666_6666_6658,
        0x0004_cccc_cccc_cccc,
        0x0001_9999_9999_9999,
        0x0003_3333_3333_3333,
        0x0006_6666_6666_6666,
    ],
};
