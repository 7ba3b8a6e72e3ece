use crate::backend::Field;

use super::{addcarry_u64, subborrow_u64, umull, umull_add2, load_le64};

/// Element of GF(2^255 - 19), four 64-bit limbs.
///
/// The value is held as an integer in the 0 to 2^256 - 1 range,
/// implicitly reduced modulo p = 2^255 - 19. Reductions fold the bits
/// above 2^256 with a factor 38 (since 2^256 = 38 mod p).
#[derive(Clone, Copy, Debug)]
#[repr(align(32))]
pub struct GF25519m64([u64; 4]);

impl GF25519m64 {

    pub const ZERO: Self = Self([ 0, 0, 0, 0 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0 ]);

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        // 1. Addition with carry
        let (d0, cc) = addcarry_u64(self.0[0], rhs.0[0], 0);
        let (d1, cc) = addcarry_u64(self.0[1], rhs.0[1], cc);
        let (d2, cc) = addcarry_u64(self.0[2], rhs.0[2], cc);
        let (d3, cc) = addcarry_u64(self.0[3], rhs.0[3], cc);

        // 2. In case of an output carry, subtract 2*p, i.e. add 38.
        let (d0, cc) = addcarry_u64(d0, (cc as u64).wrapping_neg() & 38, 0);
        let (d1, cc) = addcarry_u64(d1, 0, cc);
        let (d2, cc) = addcarry_u64(d2, 0, cc);
        let (d3, cc) = addcarry_u64(d3, 0, cc);

        // 3. If there is again an extra carry, then the low word is now
        // lower than 38, and adding 38 once more cannot overflow.
        let d0 = d0.wrapping_add((cc as u64).wrapping_neg() & 38);

        self.0 = [ d0, d1, d2, d3 ];
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        // 1. Subtraction with borrow
        let (d0, cc) = subborrow_u64(self.0[0], rhs.0[0], 0);
        let (d1, cc) = subborrow_u64(self.0[1], rhs.0[1], cc);
        let (d2, cc) = subborrow_u64(self.0[2], rhs.0[2], cc);
        let (d3, cc) = subborrow_u64(self.0[3], rhs.0[3], cc);

        // 2. In case of an output borrow, add 2*p, i.e. subtract 38.
        let (d0, cc) = subborrow_u64(d0, (cc as u64).wrapping_neg() & 38, 0);
        let (d1, cc) = subborrow_u64(d1, 0, cc);
        let (d2, cc) = subborrow_u64(d2, 0, cc);
        let (d3, cc) = subborrow_u64(d3, 0, cc);

        // 3. A second borrow means that the low word is at least
        // 2^64 - 38; subtracting 38 again cannot underflow.
        let d0 = d0.wrapping_sub((cc as u64).wrapping_neg() & 38);

        self.0 = [ d0, d1, d2, d3 ];
    }

    // Fold a 512-bit value (eight 64-bit words) into this element.
    #[inline(always)]
    fn set_reduce512(&mut self, e: [u64; 8]) {
        // First fold: multiply the high words by 38 and add them to the
        // low words; the high halves of these products are kept in h0..h3.
        let (lo, h0) = umull(e[4], 38);
        let (e0, cc) = addcarry_u64(e[0], lo, 0);
        let (lo, h1) = umull(e[5], 38);
        let (e1, cc) = addcarry_u64(e[1], lo, cc);
        let (lo, h2) = umull(e[6], 38);
        let (e2, cc) = addcarry_u64(e[2], lo, cc);
        let (lo, h3) = umull(e[7], 38);
        let (e3, cc) = addcarry_u64(e[3], lo, cc);
        let (h3, _)  = addcarry_u64(h3, 0, cc);

        // Second fold: h3 (at most 38) and the top bit of e3 are both
        // folded with a factor 19, which frees the top bit of e3; the
        // remaining additions then cannot overflow.
        let h3 = (h3 << 1) | (e3 >> 63);
        let e3 = e3 & 0x7FFFFFFFFFFFFFFF;
        let (e0, cc) = addcarry_u64(e0, h3 * 19, 0);
        let (e1, cc) = addcarry_u64(e1, h0, cc);
        let (e2, cc) = addcarry_u64(e2, h1, cc);
        let (e3, _)  = addcarry_u64(e3, h2, cc);

        self.0 = [ e0, e1, e2, e3 ];
    }

    #[inline(always)]
    fn set_mul(&mut self, rhs: &Self) {
        let a = self.0;
        let b = rhs.0;

        // Product over 512 bits, one row per word of a.
        let mut e = [0u64; 8];
        for i in 0..4 {
            let mut hi = 0u64;
            for j in 0..4 {
                let (lo, h) = umull_add2(a[i], b[j], e[i + j], hi);
                e[i + j] = lo;
                hi = h;
            }
            e[i + 4] = hi;
        }

        self.set_reduce512(e);
    }

    // Square this value (in place).
    #[inline(always)]
    fn set_square(&mut self) {
        let (a0, a1, a2, a3) = (self.0[0], self.0[1], self.0[2], self.0[3]);

        // 1. Non-square products; the total is below 2^448, so it fits
        // on e1..e6.
        let (e1, e2) = umull(a0, a1);
        let (e3, e4) = umull(a0, a3);
        let (e5, e6) = umull(a2, a3);
        let (lo, hi) = umull(a0, a2);
        let (e2, cc) = addcarry_u64(e2, lo, 0);
        let (e3, cc) = addcarry_u64(e3, hi, cc);
        let (lo, hi) = umull(a1, a3);
        let (e4, cc) = addcarry_u64(e4, lo, cc);
        let (e5, cc) = addcarry_u64(e5, hi, cc);
        let (e6, _)  = addcarry_u64(e6, 0, cc);
        let (lo, hi) = umull(a1, a2);
        let (e3, cc) = addcarry_u64(e3, lo, 0);
        let (e4, cc) = addcarry_u64(e4, hi, cc);
        let (e5, cc) = addcarry_u64(e5, 0, cc);
        let (e6, _)  = addcarry_u64(e6, 0, cc);

        // 2. Double the intermediate value, then add the squares.
        let e7 = e6 >> 63;
        let e6 = (e6 << 1) | (e5 >> 63);
        let e5 = (e5 << 1) | (e4 >> 63);
        let e4 = (e4 << 1) | (e3 >> 63);
        let e3 = (e3 << 1) | (e2 >> 63);
        let e2 = (e2 << 1) | (e1 >> 63);
        let e1 = e1 << 1;

        let (e0, hi) = umull(a0, a0);
        let (e1, cc) = addcarry_u64(e1, hi, 0);
        let (lo, hi) = umull(a1, a1);
        let (e2, cc) = addcarry_u64(e2, lo, cc);
        let (e3, cc) = addcarry_u64(e3, hi, cc);
        let (lo, hi) = umull(a2, a2);
        let (e4, cc) = addcarry_u64(e4, lo, cc);
        let (e5, cc) = addcarry_u64(e5, hi, cc);
        let (lo, hi) = umull(a3, a3);
        let (e6, cc) = addcarry_u64(e6, lo, cc);
        let (e7, _)  = addcarry_u64(e7, hi, cc);

        self.set_reduce512([ e0, e1, e2, e3, e4, e5, e6, e7 ]);
    }

    // Multiply this value by a small integer.
    #[inline]
    fn set_mul_small(&mut self, x: u32) {
        let b = x as u64;

        // Product over five words; the top word is lower than 2^32.
        let (d0, d1) = umull(self.0[0], b);
        let (d2, d3) = umull(self.0[2], b);
        let (lo, hi) = umull(self.0[1], b);
        let (d1, cc) = addcarry_u64(d1, lo, 0);
        let (d2, cc) = addcarry_u64(d2, hi, cc);
        let (lo, d4) = umull(self.0[3], b);
        let (d3, cc) = addcarry_u64(d3, lo, cc);
        let (d4, _)  = addcarry_u64(d4, 0, cc);

        // Fold the top word and the top bit of d3 together (factor 19).
        let d4 = ((d4 << 1) | (d3 >> 63)) * 19;
        let (d0, cc) = addcarry_u64(d0, d4, 0);
        let (d1, cc) = addcarry_u64(d1, 0, cc);
        let (d2, cc) = addcarry_u64(d2, 0, cc);
        let (d3, _)  = addcarry_u64(d3 & 0x7FFFFFFFFFFFFFFF, 0, cc);

        self.0 = [ d0, d1, d2, d3 ];
    }

    // Ensure that the internal value is in the 0..p-1 range.
    #[inline]
    fn set_normalized(&mut self) {
        // Fold the top bit if set.
        let e = (self.0[3] >> 63).wrapping_neg();
        let (d0, cc) = addcarry_u64(self.0[0], e & 19, 0);
        let (d1, cc) = addcarry_u64(self.0[1], 0, cc);
        let (d2, cc) = addcarry_u64(self.0[2], 0, cc);
        let (d3, _)  = addcarry_u64(self.0[3] & 0x7FFFFFFFFFFFFFFF, 0, cc);

        // Value is now at most 2^255 + 18. Subtract p, then add it
        // back if the result is negative.
        let (d0, cc) = subborrow_u64(d0, 0xFFFFFFFFFFFFFFED, 0);
        let (d1, cc) = subborrow_u64(d1, 0xFFFFFFFFFFFFFFFF, cc);
        let (d2, cc) = subborrow_u64(d2, 0xFFFFFFFFFFFFFFFF, cc);
        let (d3, cc) = subborrow_u64(d3, 0x7FFFFFFFFFFFFFFF, cc);

        let e = (cc as u64).wrapping_neg();
        let (d0, cc) = addcarry_u64(d0, e & 0xFFFFFFFFFFFFFFED, 0);
        let (d1, cc) = addcarry_u64(d1, e, cc);
        let (d2, cc) = addcarry_u64(d2, e, cc);
        let (d3, _)  = addcarry_u64(d3, e >> 1, cc);

        self.0 = [ d0, d1, d2, d3 ];
    }

    // Equality check between two field elements (constant-time);
    // returned value is 0xFFFFFFFF on equality, 0 otherwise.
    #[cfg(test)]
    pub(crate) fn equals(self, rhs: Self) -> u32 {
        let mut a = self;
        let mut b = rhs;
        a.set_normalized();
        b.set_normalized();
        let z = (a.0[0] ^ b.0[0]) | (a.0[1] ^ b.0[1])
              | (a.0[2] ^ b.0[2]) | (a.0[3] ^ b.0[3]);
        (((z | z.wrapping_neg()) >> 63) as u32).wrapping_sub(1)
    }
}

field_ops!(GF25519m64);

impl Field for GF25519m64 {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    #[inline(always)]
    fn decode_reduce(buf: &[u8; 32]) -> Self {
        Self([
            load_le64(buf, 0),
            load_le64(buf, 1),
            load_le64(buf, 2),
            load_le64(buf, 3),
        ])
    }

    #[inline(always)]
    fn encode(self) -> [u8; 32] {
        let mut r = self;
        r.set_normalized();
        let mut d = [0u8; 32];
        d[ 0.. 8].copy_from_slice(&r.0[0].to_le_bytes());
        d[ 8..16].copy_from_slice(&r.0[1].to_le_bytes());
        d[16..24].copy_from_slice(&r.0[2].to_le_bytes());
        d[24..32].copy_from_slice(&r.0[3].to_le_bytes());
        d
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

    #[inline(always)]
    fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        for i in 0..4 {
            let t = cw & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::GF25519m64;
    use crate::backend::Field;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Digest};

    fn check_gf_ops(va: &[u8; 32], vb: &[u8; 32]) {
        let zp = (BigInt::from(1) << 255) - 19;
        let a = GF25519m64::decode_reduce(va);
        let b = GF25519m64::decode_reduce(vb);
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

        let x = u32::from_le_bytes([vb[4], vb[5], vb[6], vb[7]]);
        let vc = a.mul_small(x).encode();
        let zc = BigInt::from_bytes_le(Sign::Plus, &vc);
        assert!(zc == (&za * x) % &zp);

        let c = (a - b) * (a + b);
        let d = a.square() - b.square();
        assert!(c.equals(d) == 0xFFFFFFFF);

        if (&za % &zp) != BigInt::from(0) {
            assert!((a * a.invert()).equals(GF25519m64::ONE) == 0xFFFFFFFF);
        }
    }

    #[test]
    fn gf25519_m64_ops() {
        let mut va = [0u8; 32];
        let mut vb = [0xFFu8; 32];
        check_gf_ops(&va, &vb);
        check_gf_ops(&vb, &va);
        check_gf_ops(&vb, &vb);

        let mut sh = Sha256::new();
        for i in 0..300 {
            sh.update((i as u64).to_le_bytes());
            va.copy_from_slice(&sh.finalize_reset());
            sh.update((i as u64).to_le_bytes());
            sh.update(b"b");
            vb.copy_from_slice(&sh.finalize_reset());
            check_gf_ops(&va, &vb);
        }
    }

    #[test]
    fn gf25519_m64_matches_m51() {
        use crate::backend::w64::GF25519;

        let mut sh = Sha256::new();
        let mut va = [0u8; 32];
        let mut vb = [0u8; 32];
        for i in 0..100 {
            sh.update((i as u64).to_le_bytes());
            va.copy_from_slice(&sh.finalize_reset());
            sh.update(va);
            vb.copy_from_slice(&sh.finalize_reset());
            let x = GF25519m64::decode_reduce(&va) * GF25519m64::decode_reduce(&vb)
                - GF25519m64::decode_reduce(&vb).mul_small(121665);
            let y = GF25519::decode_reduce(&va) * GF25519::decode_reduce(&vb)
                - GF25519::decode_reduce(&vb).mul_small(121665);
            assert!(x.encode() == y.encode());
        }
    }
}
