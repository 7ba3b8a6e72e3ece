use crate::backend::Field;

/// Element of GF(2^255 - 19), sixteen 16-bit limbs.
///
/// Limbs are held in 32-bit words, and intermediate values in 64-bit
/// accumulators; only 32x32->64 multiplications are used, which are
/// constant-time on all 32-bit platforms that matter. After each
/// operation, every limb is lower than 2^16 + 64; the limbs are not
/// necessarily normalized.
#[derive(Clone, Copy, Debug)]
pub struct GF25519([u32; 16]);

// 4*p, in unnormalized limbs; added before a subtraction so that no
// limb may become negative.
const FOUR_P: [u32; 16] = [
    0x3FFB4, 0x3FFFC, 0x3FFFC, 0x3FFFC,
    0x3FFFC, 0x3FFFC, 0x3FFFC, 0x3FFFC,
    0x3FFFC, 0x3FFFC, 0x3FFFC, 0x3FFFC,
    0x3FFFC, 0x3FFFC, 0x3FFFC, 0x1FFFC,
];

// Propagate carries along 16-bit limbs; the outgoing carry (weight
// 2^256) is returned.
#[inline(always)]
fn carry16(t: &mut [u64; 16]) -> u64 {
    let mut c = 0u64;
    for i in 0..16 {
        let v = t[i] + c;
        t[i] = v & 0xFFFF;
        c = v >> 16;
    }
    c
}

impl GF25519 {

    pub const ZERO: Self = Self([ 0; 16 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0 ]);

    // Reduce 64-bit accumulators (each lower than 2^48) into limbs.
    // Two passes are enough: after the first one, the folded carry is
    // at most 38*2^32, and after the second, it is at most 38.
    #[inline(always)]
    fn set_reduce(&mut self, t: [u64; 16]) {
        let mut t = t;
        let c = carry16(&mut t);
        t[0] += 38 * c;
        let c = carry16(&mut t);
        t[0] += 38 * c;
        for i in 0..16 {
            self.0[i] = t[i] as u32;
        }
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        let mut t = [0u64; 16];
        for i in 0..16 {
            t[i] = (self.0[i] as u64) + (rhs.0[i] as u64);
        }
        self.set_reduce(t);
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        let mut t = [0u64; 16];
        for i in 0..16 {
            t[i] = (self.0[i] as u64) + (FOUR_P[i] as u64)
                - (rhs.0[i] as u64);
        }
        self.set_reduce(t);
    }

    #[inline]
    fn set_mul(&mut self, rhs: &Self) {
        let a = &self.0;
        let b = &rhs.0;
        let mut t = [0u64; 31];
        for i in 0..16 {
            let ai = a[i] as u64;
            for j in 0..16 {
                t[i + j] += ai * (b[j] as u64);
            }
        }

        // 2^256 = 38 mod p
        let mut d = [0u64; 16];
        for i in 0..15 {
            d[i] = t[i] + 38 * t[i + 16];
        }
        d[15] = t[15];
        self.set_reduce(d);
    }

    #[inline]
    fn set_mul_small(&mut self, x: u32) {
        let mut t = [0u64; 16];
        for i in 0..16 {
            t[i] = (self.0[i] as u64) * (x as u64);
        }
        self.set_reduce(t);
    }

    // Equality check between two field elements (constant-time);
    // returned value is 0xFFFFFFFF on equality, 0 otherwise.
    #[cfg(test)]
    pub(crate) fn equals(self, rhs: Self) -> u32 {
        let a = self.encode();
        let b = rhs.encode();
        let mut z = 0u32;
        for i in 0..32 {
            z |= (a[i] ^ b[i]) as u32;
        }
        ((z.wrapping_sub(1)) >> 31).wrapping_neg()
    }
}

field_ops!(GF25519);

impl Field for GF25519 {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    #[inline]
    fn decode_reduce(buf: &[u8; 32]) -> Self {
        let mut d = [0u32; 16];
        for i in 0..16 {
            d[i] = u16::from_le_bytes([buf[2 * i], buf[2 * i + 1]]) as u32;
        }
        Self(d)
    }

    fn encode(self) -> [u8; 32] {
        let mut t = [0u64; 16];
        for i in 0..16 {
            t[i] = self.0[i] as u64;
        }

        // Normalize limbs, then fold bit 255 (twice) so that the value
        // is lower than 2^255.
        let c = carry16(&mut t);
        t[0] += 38 * c;
        let c = carry16(&mut t);
        t[0] += 38 * c;
        for _ in 0..2 {
            let hb = t[15] >> 15;
            t[15] &= 0x7FFF;
            t[0] += 19 * hb;
            carry16(&mut t);
        }

        // The value is now lower than 2^255; it is greater than or
        // equal to p if and only if adding 19 reaches 2^255.
        let mut w = t;
        w[0] += 19;
        carry16(&mut w);
        let m = (w[15] >> 15).wrapping_neg();
        w[15] &= 0x7FFF;

        let mut d = [0u8; 32];
        for i in 0..16 {
            let v = t[i] ^ (m & (t[i] ^ w[i]));
            d[2 * i..2 * i + 2].copy_from_slice(&(v as u16).to_le_bytes());
        }
        d
    }

    #[inline(always)]
    fn square(self) -> Self {
        self * self
    }

    #[inline(always)]
    fn mul_small(self, x: u32) -> Self {
        let mut r = self;
        r.set_mul_small(x);
        r
    }

    #[inline(always)]
    fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        for i in 0..16 {
            let t = ctl & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }
}

// ========================================================================
