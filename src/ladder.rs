//! Montgomery ladder (RFC 7748, section 5), generic over the field
//! implementation.
//!
//! The ladder is written once and instantiated for each backend: the
//! portable field of the target, and the 64-bit-limb field that the
//! accelerated x86-64 variants compile with extra target features. Since
//! the functions are `#[inline(always)]`, each instantiation is compiled
//! within the context of its caller (including its `#[target_feature]`
//! attributes).

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use zeroize::Zeroize;

use crate::backend::Field;
use crate::x25519::clamp;

/// X25519 function over field `F`, general case.
///
/// The scalar is clamped internally; the top bit of the point is ignored,
/// and non-canonical point encodings are accepted.
#[inline(always)]
pub(crate) fn mul<F: Field>(scalar: &[u8; 32], point: &[u8; 32]) -> [u8; 32] {
    ladder::<F, false>(scalar, point)
}

/// X25519 function over field `F`, with the conventional base point
/// (u = 9). The output is identical to `mul()` with `BASE_POINT`.
#[inline(always)]
pub(crate) fn mul_base<F: Field>(scalar: &[u8; 32]) -> [u8; 32] {
    let mut u = [0u8; 32];
    u[0] = 9;
    ladder::<F, true>(scalar, &u)
}

// When FIXED_BASE is true, the point MUST be the base point; the
// multiplication by x1 = 9 is then done with mul_small().
#[inline(always)]
fn ladder<F: Field, const FIXED_BASE: bool>(scalar: &[u8; 32], point: &[u8; 32])
    -> [u8; 32]
{
    // Make clamped scalar.
    let mut s = *scalar;
    clamp(&mut s);

    // Decode the source point. The top bit is ignored, and non-canonical
    // values are acceptable.
    let mut u = *point;
    u[31] &= 127;
    let x1 = F::decode_reduce(&u);

    let mut x2 = F::ONE;
    let mut z2 = F::ZERO;
    let mut x3 = x1;
    let mut z3 = F::ONE;
    let mut swap = 0u32;

    for t in (0..255).rev() {
        let kt = (((s[t >> 3] >> (t & 7)) & 1) as u32).wrapping_neg();
        swap ^= kt;
        F::cswap(&mut x2, &mut x3, swap);
        F::cswap(&mut z2, &mut z3, swap);
        swap = kt;

        let A = x2 + z2;
        let B = x2 - z2;
        let AA = A.square();
        let BB = B.square();
        let C = x3 + z3;
        let D = x3 - z3;
        let E = AA - BB;
        let DA = D * A;
        let CB = C * B;
        x3 = (DA + CB).square();
        z3 = if FIXED_BASE {
            (DA - CB).square().mul_small(9)
        } else {
            x1 * (DA - CB).square()
        };
        x2 = AA * BB;
        z2 = E * (AA + E.mul_small(121665));
    }
    F::cswap(&mut x2, &mut x3, swap);
    F::cswap(&mut z2, &mut z3, swap);
    s.zeroize();

    // If z2 = 0 then its "inverse" is zero, and the output is the null
    // point.
    (x2 * z2.invert()).encode()
}

// ========================================================================
