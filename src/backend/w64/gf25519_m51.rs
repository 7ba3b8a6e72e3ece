use crate::backend::Field;

use super::load_le64;

/// Element of GF(2^255 - 19), portable 64-bit representation.
#[derive(Clone, Copy, Debug)]
pub struct GF25519([u64; 5]);

// 2^51 - 1
const M51: u64 = 0x0007FFFFFFFFFFFF;

impl GF25519 {

    // INTERNAL FORMAT
    // ===============
    //
    // Value is split over five unsigned limbs, in base 2^51. If the limbs
    // are y0 to y4, then the value is:
    //   y0 + y1*2^51 + y2*2^102 + y3*2^153 + y4*2^204
    // The value is implicitly considered modulo p = 2^255 - 19.
    //
    // All operations accept and produce limbs lower than 2^51 + 2^8. With
    // that bound:
    //  - additions of two elements have limbs below 2^53, and a single
    //    carry propagation brings them back in range;
    //  - subtractions add 2*p first (limbs close to 2^52), which keeps
    //    all intermediate limbs nonnegative;
    //  - products of limbs (with one operand premultiplied by 19) stay
    //    below 2^108, and sums of five such products fit in 128 bits.

    pub const ZERO: Self = Self([ 0, 0, 0, 0, 0 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0, 0 ]);

    // 2*p, in base 2^51.
    const DMOD_M51: [u64; 5] = [
        0x000FFFFFFFFFFFDA,
        0x000FFFFFFFFFFFFE,
        0x000FFFFFFFFFFFFE,
        0x000FFFFFFFFFFFFE,
        0x000FFFFFFFFFFFFE,
    ];

    // Set this value to the provided limbs, with a single carry
    // propagation step. Input limbs must be lower than 2^59.
    #[inline(always)]
    fn set_carry_propagate(&mut self,
        d0: u64, d1: u64, d2: u64, d3: u64, d4: u64)
    {
        let h0 = d0 >> 51;
        let h1 = d1 >> 51;
        let h2 = d2 >> 51;
        let h3 = d3 >> 51;
        let h4 = d4 >> 51;
        self.0[0] = (d0 & M51) + (h4 * 19);
        self.0[1] = (d1 & M51) + h0;
        self.0[2] = (d2 & M51) + h1;
        self.0[3] = (d3 & M51) + h2;
        self.0[4] = (d4 & M51) + h3;
    }

    // Set this value from five 128-bit accumulators (output of a
    // multiplication, before reduction). Each accumulator must be
    // lower than 2^112, and r4 lower than 2^105.
    #[inline(always)]
    fn set_reduce_wide(&mut self, r: [u128; 5]) {
        let r1 = r[1] + (r[0] >> 51);
        let r2 = r[2] + (r1 >> 51);
        let r3 = r[3] + (r2 >> 51);
        let r4 = r[4] + (r3 >> 51);

        // r4 < 2^105, hence the carry out of r4 is lower than 2^54, and
        // the folded value 19*c fits on 64 bits.
        let c = (r4 >> 51) as u64;
        let d0 = ((r[0] as u64) & M51) + c * 19;
        let d1 = ((r1 as u64) & M51) + (d0 >> 51);
        self.0[0] = d0 & M51;
        self.0[1] = d1;
        self.0[2] = (r2 as u64) & M51;
        self.0[3] = (r3 as u64) & M51;
        self.0[4] = (r4 as u64) & M51;
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        let d0 = self.0[0] + rhs.0[0];
        let d1 = self.0[1] + rhs.0[1];
        let d2 = self.0[2] + rhs.0[2];
        let d3 = self.0[3] + rhs.0[3];
        let d4 = self.0[4] + rhs.0[4];
        self.set_carry_propagate(d0, d1, d2, d3, d4);
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        // We add 2*p, with limbs close to 2*2^51, to avoid negative values.
        let d0 = (self.0[0] + Self::DMOD_M51[0]) - rhs.0[0];
        let d1 = (self.0[1] + Self::DMOD_M51[1]) - rhs.0[1];
        let d2 = (self.0[2] + Self::DMOD_M51[2]) - rhs.0[2];
        let d3 = (self.0[3] + Self::DMOD_M51[3]) - rhs.0[3];
        let d4 = (self.0[4] + Self::DMOD_M51[4]) - rhs.0[4];
        self.set_carry_propagate(d0, d1, d2, d3, d4);
    }

    #[inline(always)]
    fn set_mul(&mut self, rhs: &Self) {
        let (a0, a1, a2, a3, a4) =
            (self.0[0] as u128, self.0[1] as u128, self.0[2] as u128,
             self.0[3] as u128, self.0[4] as u128);
        let (b0, b1, b2, b3, b4) =
            (rhs.0[0] as u128, rhs.0[1] as u128, rhs.0[2] as u128,
             rhs.0[3] as u128, rhs.0[4] as u128);

        // Limbs of index 5 and more wrap around with a factor 19
        // (since 2^255 = 19 mod p).
        let c1 = b1 * 19;
        let c2 = b2 * 19;
        let c3 = b3 * 19;
        let c4 = b4 * 19;

        let r0 = a0 * b0 + a1 * c4 + a2 * c3 + a3 * c2 + a4 * c1;
        let r1 = a0 * b1 + a1 * b0 + a2 * c4 + a3 * c3 + a4 * c2;
        let r2 = a0 * b2 + a1 * b1 + a2 * b0 + a3 * c4 + a4 * c3;
        let r3 = a0 * b3 + a1 * b2 + a2 * b1 + a3 * b0 + a4 * c4;
        let r4 = a0 * b4 + a1 * b3 + a2 * b2 + a3 * b1 + a4 * b0;
        self.set_reduce_wide([ r0, r1, r2, r3, r4 ]);
    }

    // Square this value (in place).
    #[inline(always)]
    fn set_square(&mut self) {
        let (a0, a1, a2, a3, a4) =
            (self.0[0] as u128, self.0[1] as u128, self.0[2] as u128,
             self.0[3] as u128, self.0[4] as u128);

        // Double products are merged (d* words are twice the a* words,
        // e* words are 19 times the a* words).
        let d0 = a0 * 2;
        let d1 = a1 * 2;
        let e3 = a3 * 19;
        let e4 = a4 * 19;

        let r0 = a0 * a0 + d1 * e4 + 2 * a2 * e3;
        let r1 = d0 * a1 + 2 * a2 * e4 + a3 * e3;
        let r2 = d0 * a2 + a1 * a1 + 2 * a3 * e4;
        let r3 = d0 * a3 + d1 * a2 + a4 * e4;
        let r4 = d0 * a4 + d1 * a3 + a2 * a2;
        self.set_reduce_wide([ r0, r1, r2, r3, r4 ]);
    }

    // Multiply this value by a small integer.
    #[inline]
    fn set_mul_small(&mut self, x: u32) {
        let x = x as u128;
        let r0 = (self.0[0] as u128) * x;
        let r1 = (self.0[1] as u128) * x;
        let r2 = (self.0[2] as u128) * x;
        let r3 = (self.0[3] as u128) * x;
        let r4 = (self.0[4] as u128) * x;
        self.set_reduce_wide([ r0, r1, r2, r3, r4 ]);
    }

    // Encode this value into 32 bytes; the value is fully reduced first.
    fn to_bytes(self) -> [u8; 32] {
        let mut t = self.0;

        // Two carry passes bring the value in the 0..2^255-1 range, with
        // all limbs below 2^51.
        for _ in 0..2 {
            t[1] += t[0] >> 51;
            t[0] &= M51;
            t[2] += t[1] >> 51;
            t[1] &= M51;
            t[3] += t[2] >> 51;
            t[2] &= M51;
            t[4] += t[3] >> 51;
            t[3] &= M51;
            t[0] += 19 * (t[4] >> 51);
            t[4] &= M51;
        }

        // Add 19; if the value was at least p, then the addition carries
        // into bit 255, which is folded back, and we get value - p + 19.
        // Otherwise, we get value + 19.
        t[0] += 19;
        t[1] += t[0] >> 51;
        t[0] &= M51;
        t[2] += t[1] >> 51;
        t[1] &= M51;
        t[3] += t[2] >> 51;
        t[2] &= M51;
        t[4] += t[3] >> 51;
        t[3] &= M51;
        t[0] += 19 * (t[4] >> 51);
        t[4] &= M51;

        // Subtract 19 by adding 2^255 - 19 and dropping bit 255.
        t[0] += 0x0008000000000000 - 19;
        t[1] += 0x0008000000000000 - 1;
        t[2] += 0x0008000000000000 - 1;
        t[3] += 0x0008000000000000 - 1;
        t[4] += 0x0008000000000000 - 1;
        t[1] += t[0] >> 51;
        t[0] &= M51;
        t[2] += t[1] >> 51;
        t[1] &= M51;
        t[3] += t[2] >> 51;
        t[2] &= M51;
        t[4] += t[3] >> 51;
        t[3] &= M51;
        t[4] &= M51;

        let w0 = t[0] | (t[1] << 51);
        let w1 = (t[1] >> 13) | (t[2] << 38);
        let w2 = (t[2] >> 26) | (t[3] << 25);
        let w3 = (t[3] >> 39) | (t[4] << 12);
        let mut d = [0u8; 32];
        d[ 0.. 8].copy_from_slice(&w0.to_le_bytes());
        d[ 8..16].copy_from_slice(&w1.to_le_bytes());
        d[16..24].copy_from_slice(&w2.to_le_bytes());
        d[24..32].copy_from_slice(&w3.to_le_bytes());
        d
    }

    // Decode 32 bytes (unsigned little-endian) with implicit reduction.
    fn from_bytes(buf: &[u8; 32]) -> Self {
        let d0 = load_le64(buf, 0);
        let d1 = load_le64(buf, 1);
        let d2 = load_le64(buf, 2);
        let d3 = load_le64(buf, 3);

        // Top limb may use 52 bits; a carry propagation fixes it.
        let mut r = Self::ZERO;
        r.set_carry_propagate(
            d0 & M51,
            ((d0 >> 51) | (d1 << 13)) & M51,
            ((d1 >> 38) | (d2 << 26)) & M51,
            ((d2 >> 25) | (d3 << 39)) & M51,
            d3 >> 12);
        r
    }

    // Equality check between two field elements (constant-time);
    // returned value is 0xFFFFFFFF on equality, 0 otherwise.
    #[cfg(test)]
    pub(crate) fn equals(self, rhs: Self) -> u32 {
        let a = self.to_bytes();
        let b = rhs.to_bytes();
        let mut z = 0u8;
        for i in 0..32 {
            z |= a[i] ^ b[i];
        }
        ((z as u32).wrapping_sub(1) >> 31).wrapping_neg()
    }
}

field_ops!(GF25519);

impl Field for GF25519 {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    #[inline(always)]
    fn decode_reduce(buf: &[u8; 32]) -> Self {
        Self::from_bytes(buf)
    }

    #[inline(always)]
    fn encode(self) -> [u8; 32] {
        self.to_bytes()
    }

    #[inline(always)]
    fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    #[inline(always)]
    fn mul_small(self, x: u32) -> Self {
        let mut r = self;
        r.set_mul_small(x);
        r
    }

    // Conditionally swap two elements: values a and b are exchanged if
    // ctl == 0xFFFFFFFF, or not exchanged if ctl == 0x00000000.
    #[inline]
    fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        for i in 0..5 {
            let t = cw & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::GF25519;
    use crate::backend::Field;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Digest};

    fn modulus() -> BigInt {
        (BigInt::from(1) << 255) - 19
    }

    fn check_gf_ops(va: &[u8; 32], vb: &[u8; 32]) {
        let zp = modulus();
        let a = GF25519::decode_reduce(va);
        let b = GF25519::decode_reduce(vb);
        let za = BigInt::from_bytes_le(Sign::Plus, va);
        let zb = BigInt::from_bytes_le(Sign::Plus, vb);

        let vc = a.encode();
        let zc = BigInt::from_bytes_le(Sign::Plus, &vc);
        assert!(zc == &za % &zp);

        let vc = (a + b).encode();
        let zc = BigInt::from_bytes_le(Sign::Plus, &vc);
        assert!(zc == (&za + &zb) % &zp);

        let vc = (a - b).encode();
        let zc = BigInt::from_bytes_le(Sign::Plus, &vc);
        assert!(zc == ((&zp << 2) + &za - &zb) % &zp);

        let vc = (a * b).encode();
        let zc = BigInt::from_bytes_le(Sign::Plus, &vc);
        assert!(zc == (&za * &zb) % &zp);

        let vc = a.square().encode();
        let zc = BigInt::from_bytes_le(Sign::Plus, &vc);
        assert!(zc == (&za * &za) % &zp);

        let x = u32::from_le_bytes([vb[0], vb[1], vb[2], vb[3]]);
        let vc = a.mul_small(x).encode();
        let zc = BigInt::from_bytes_le(Sign::Plus, &vc);
        assert!(zc == (&za * x) % &zp);

        let vc = a.mul_small(121665).encode();
        let zc = BigInt::from_bytes_le(Sign::Plus, &vc);
        assert!(zc == (&za * 121665u32) % &zp);

        // Chained operations stress the limb bounds.
        let c = (a - b) * (a + b);
        let d = a.square() - b.square();
        assert!(c.equals(d) == 0xFFFFFFFF);

        let e = a.invert();
        if (&za % &zp) == BigInt::from(0) {
            assert!(e.encode() == [0u8; 32]);
        } else {
            assert!((a * e).equals(GF25519::ONE) == 0xFFFFFFFF);
        }

        let mut x = a;
        let mut y = b;
        GF25519::cswap(&mut x, &mut y, 0);
        assert!(x.equals(a) == 0xFFFFFFFF && y.equals(b) == 0xFFFFFFFF);
        GF25519::cswap(&mut x, &mut y, 0xFFFFFFFF);
        assert!(x.equals(b) == 0xFFFFFFFF && y.equals(a) == 0xFFFFFFFF);
    }

    #[test]
    fn gf25519_m51_ops() {
        let zp = modulus();
        let mut edges: [[u8; 32]; 6] = [[0u8; 32]; 6];
        edges[1] = [0xFFu8; 32];
        for (i, k) in [-1i32, 0, 1].iter().enumerate() {
            let v = (&zp + BigInt::from(*k)).to_bytes_le().1;
            edges[2 + i][..v.len()].copy_from_slice(&v);
        }
        edges[5][31] = 0x80;
        for va in edges.iter() {
            for vb in edges.iter() {
                check_gf_ops(va, vb);
            }
        }

        let mut sh = Sha256::new();
        for i in 0..300 {
            let mut va = [0u8; 32];
            let mut vb = [0u8; 32];
            sh.update((i as u64).to_le_bytes());
            va.copy_from_slice(&sh.finalize_reset());
            sh.update((i as u64).to_le_bytes());
            sh.update(b"b");
            vb.copy_from_slice(&sh.finalize_reset());
            check_gf_ops(&va, &vb);
        }
    }

    #[test]
    fn gf25519_m51_canonical_encoding() {
        // p - 1, p and p + 1 encode as p - 1, 0 and 1.
        let zp = modulus();
        for k in [-1i32, 0, 1] {
            let mut buf = [0u8; 32];
            let v = (&zp + BigInt::from(k)).to_bytes_le().1;
            buf[..v.len()].copy_from_slice(&v);
            let e = GF25519::decode_reduce(&buf).encode();
            let ze = BigInt::from_bytes_le(Sign::Plus, &e);
            assert!(ze == (&zp + BigInt::from(k)) % &zp);
            assert!((e[31] & 0x80) == 0);
        }
    }
}
