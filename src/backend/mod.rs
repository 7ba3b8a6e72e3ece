//! Architecture-specific implementations of the field GF(2^255 - 19).
//!
//! This module provides the `GF25519` type alias for the portable
//! implementation of the base field of Curve25519, and the `Field` trait
//! that all implementations of that field expose to the Montgomery
//! ladder. There are several actual implementations; the portable one is
//! selected based on configured compilation features, or through
//! auto-detection of the current target:
//!
//!  - `w64::GF25519`: five 51-bit limbs, products over 128 bits. This is
//!    the portable backend on targets with 64-bit pointers.
//!
//!  - `w32::GF25519`: sixteen 16-bit limbs; only 32x32->64 products are
//!    used. This is the portable backend on targets with 32-bit pointers.
//!
//!  - `w64::GF25519m64`: four 64-bit limbs with add-with-carry chains.
//!    This representation is used by the accelerated x86-64 variants,
//!    which compile it with extra target features (BMI2, ADX).
//!
//! In general, the following properties apply to all implementations:
//!
//!  - An instance encapsulates a field element. The internal
//!    representation is not necessarily canonical; only `encode()`
//!    normalizes.
//!
//!  - The constant values `ZERO` and `ONE` contain the elements of
//!    value 0 and 1, respectively.
//!
//!  - Usual arithmetic operators can be used on field elements (`+`, `-`,
//!    `*`, and the compound assignments `+=`, `-=` and `*=`). Operators
//!    can use both the raw types, and references thereof.
//!
//!  - Function `square()` squares a field element; `xsquare(n)` squares
//!    it `n` times in a row.
//!
//!  - Function `mul_small(x)` multiplies an element by a small integer
//!    `x` (any `u32` value is accepted).
//!
//!  - Function `cswap(a, b, ctl)` exchanges the contents of `a` and `b`
//!    if `ctl` is equal to 0xFFFFFFFF, or leaves them unmodified if `ctl`
//!    is equal to 0x00000000. No other value of `ctl` is allowed.
//!
//!  - Function `invert()` returns the inverse of an element; zero is
//!    "inverted" into zero.
//!
//!  - Function `decode_reduce(buf)` decodes 32 bytes with unsigned
//!    little-endian convention; the integer is implicitly reduced modulo
//!    p = 2^255 - 19, so decoding never fails (values in the p to
//!    2^256 - 1 range are accepted).
//!
//!  - Function `encode()` encodes an element as exactly 32 bytes, with
//!    unsigned little-endian convention. Encoding is always canonical
//!    (the integer is lower than p, and the top bit of the last byte is
//!    zero).
//!
//! All operations are constant-time: neither the execution time nor the
//! memory access pattern depends on the values of the field elements.

use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

#[cfg(not(any(
    feature = "w32_backend",
    feature = "w64_backend",
    target_pointer_width = "32",
    target_pointer_width = "64",
)))]
compile_error!("no backend specified; cannot infer from pointer size");

#[cfg(all(
    feature = "w32_backend",
    feature = "w64_backend",
))]
compile_error!("cannot use w32 and w64 backends simultaneously");

/// Arithmetic in GF(2^255 - 19), as needed by the X25519 ladder.
///
/// See the module documentation for the contract of each function.
pub trait Field:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// The element of value zero.
    const ZERO: Self;

    /// The element of value one.
    const ONE: Self;

    /// Decodes 32 bytes (unsigned little-endian) with implicit reduction.
    fn decode_reduce(buf: &[u8; 32]) -> Self;

    /// Encodes this element canonically over 32 bytes.
    fn encode(self) -> [u8; 32];

    /// Returns the square of this element.
    fn square(self) -> Self;

    /// Returns the product of this element with a small integer.
    fn mul_small(self, x: u32) -> Self;

    /// Swaps `a` and `b` if `ctl` is 0xFFFFFFFF; `ctl` MUST be
    /// 0x00000000 or 0xFFFFFFFF.
    fn cswap(a: &mut Self, b: &mut Self, ctl: u32);

    /// Squares this element `n` times.
    #[inline(always)]
    fn xsquare(self, n: u32) -> Self {
        let mut x = self;
        for _ in 0..n {
            x = x.square();
        }
        x
    }

    /// Returns the inverse of this element (zero yields zero).
    ///
    /// This raises the element to the power p - 2 = 2^255 - 21; the
    /// exponent is public, and the addition chain is fixed.
    #[inline(always)]
    fn invert(self) -> Self {
        let z = self;
        let z2 = z.square();
        let z9 = z2.xsquare(2) * z;
        let z11 = z9 * z2;
        let x5 = z11.square() * z9;
        let x10 = x5.xsquare(5) * x5;
        let x20 = x10.xsquare(10) * x10;
        let x40 = x20.xsquare(20) * x20;
        let x50 = x40.xsquare(10) * x10;
        let x100 = x50.xsquare(50) * x50;
        let x200 = x100.xsquare(100) * x100;
        let x250 = x200.xsquare(50) * x50;
        x250.xsquare(5) * z11
    }
}

// Implementations of the operator traits (+, -, *, and compound
// assignments) on top of the in-place set_add(), set_sub() and set_mul()
// functions, for both values and references.
macro_rules! field_ops {
    ($t:ty) => {
        impl core::ops::Add<$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn add(self, other: $t) -> $t {
                let mut r = self;
                r.set_add(&other);
                r
            }
        }

        impl core::ops::Add<&$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn add(self, other: &$t) -> $t {
                let mut r = self;
                r.set_add(other);
                r
            }
        }

        impl core::ops::Add<$t> for &$t {
            type Output = $t;

            #[inline(always)]
            fn add(self, other: $t) -> $t {
                let mut r = *self;
                r.set_add(&other);
                r
            }
        }

        impl core::ops::AddAssign<$t> for $t {
            #[inline(always)]
            fn add_assign(&mut self, other: $t) {
                self.set_add(&other);
            }
        }

        impl core::ops::Sub<$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn sub(self, other: $t) -> $t {
                let mut r = self;
                r.set_sub(&other);
                r
            }
        }

        impl core::ops::Sub<&$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn sub(self, other: &$t) -> $t {
                let mut r = self;
                r.set_sub(other);
                r
            }
        }

        impl core::ops::Sub<$t> for &$t {
            type Output = $t;

            #[inline(always)]
            fn sub(self, other: $t) -> $t {
                let mut r = *self;
                r.set_sub(&other);
                r
            }
        }

        impl core::ops::SubAssign<$t> for $t {
            #[inline(always)]
            fn sub_assign(&mut self, other: $t) {
                self.set_sub(&other);
            }
        }

        impl core::ops::Mul<$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn mul(self, other: $t) -> $t {
                let mut r = self;
                r.set_mul(&other);
                r
            }
        }

        impl core::ops::Mul<&$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn mul(self, other: &$t) -> $t {
                let mut r = self;
                r.set_mul(other);
                r
            }
        }

        impl core::ops::Mul<$t> for &$t {
            type Output = $t;

            #[inline(always)]
            fn mul(self, other: $t) -> $t {
                let mut r = *self;
                r.set_mul(&other);
                r
            }
        }

        impl core::ops::MulAssign<$t> for $t {
            #[inline(always)]
            fn mul_assign(&mut self, other: $t) {
                self.set_mul(&other);
            }
        }
    };
}

// The 32-bit code is also compiled for tests on 64-bit targets, so that
// all representations can be checked against each other.
#[cfg(any(
    test,
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub mod w32;

/// Portable implementation of GF(2^255 - 19) (32-bit backend).
#[cfg(any(
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub type GF25519 = w32::GF25519;

#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub mod w64;

/// Portable implementation of GF(2^255 - 19) (64-bit backend).
#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub type GF25519 = w64::GF25519;

/// Name of the portable backend, as reported by diagnostics.
#[cfg(any(
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub const PORTABLE_NAME: &str = "portable-w32";

/// Name of the portable backend, as reported by diagnostics.
#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub const PORTABLE_NAME: &str = "portable-w64";
