//! X25519 key agreement.
//!
//! This module implements Diffie-Hellman key agreement over Curve25519,
//! with the X25519 function defined by [RFC 7748]:
//!
//!  - `generate_secret()` produces a new private scalar (32 random bytes,
//!    clamped).
//!
//!  - `derive_public()` computes the public value that matches a private
//!    scalar (multiplication of the conventional base point u = 9).
//!
//!  - `compute_shared()` computes the shared secret from the local
//!    private scalar and the public value received from the peer.
//!
//! All three functions require a successful call to `init()` beforehand
//! (see `crate::gate`); they return `Error::Unverified` or
//! `Error::SelfTestFailure` otherwise. Computations use the fastest
//! backend available on the current CPU (see `crate::dispatch`).
//!
//! Scalars are clamped as described in RFC 7748 (bits 0, 1, 2 and 255
//! are cleared, bit 254 is set); the multiplication functions clamp an
//! internal copy, so the private scalar may be provided unclamped. Public
//! values are not validated beyond RFC 7748 rules (the top bit is
//! ignored, non-canonical encodings are accepted), except that a result
//! equal to the null point (all zeros) is rejected: this happens exactly
//! when the peer value is a point of low order, which would make the
//! shared secret independent of the local private scalar.
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748

use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::dispatch;
use crate::error::Error;
use crate::gate;

/// Size (in bytes) of private scalars, public values and shared secrets.
pub const KEY_SIZE: usize = 32;

/// The conventional base point of Curve25519 (u = 9).
pub const BASE_POINT: [u8; KEY_SIZE] = [
    9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// The null point encoding (all zeros); never returned as key material.
pub const NULL_POINT: [u8; KEY_SIZE] = [0u8; KEY_SIZE];

/// Clamps a private scalar (in place).
///
/// The three least significant bits and the most significant bit are
/// cleared, and the second most significant bit is set. Clamping is
/// idempotent.
#[inline(always)]
pub fn clamp(secret: &mut [u8; KEY_SIZE]) {
    secret[0] &= 248;
    secret[31] &= 127;
    secret[31] |= 64;
}

/// Returns the clamped version of a private scalar.
#[inline]
pub fn clamped(secret: [u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    let mut s = secret;
    clamp(&mut s);
    s
}

/// Generates a new private scalar from the operating system's random
/// generator.
///
/// This may block until the system generator is seeded.
pub fn generate_secret() -> Result<[u8; KEY_SIZE], Error> {
    generate_secret_with(&mut rand_core::OsRng)
}

/// Generates a new private scalar from the provided random generator.
pub fn generate_secret_with<T: CryptoRng + RngCore>(rng: &mut T)
    -> Result<[u8; KEY_SIZE], Error>
{
    gate::check()?;
    let mut secret = [0u8; KEY_SIZE];
    if rng.try_fill_bytes(&mut secret).is_err() {
        secret.zeroize();
        tracing::error!("random generator failure");
        return Err(Error::Entropy);
    }
    clamp(&mut secret);
    Ok(secret)
}

/// Computes the public value that matches the provided private scalar.
///
/// The all-zero private scalar is rejected (`Error::DegenerateInput`).
/// `Error::DegenerateOutput` is returned if the result is the null point;
/// this cannot happen for a non-zero scalar, but is still checked.
pub fn derive_public(secret: &[u8; KEY_SIZE]) -> Result<[u8; KEY_SIZE], Error> {
    gate::check()?;
    if bool::from(secret[..].ct_eq(&NULL_POINT[..])) {
        tracing::debug!("rejected null private scalar");
        return Err(Error::DegenerateInput);
    }
    let public = dispatch::multiply_base(secret);
    if bool::from(public[..].ct_eq(&NULL_POINT[..])) {
        tracing::debug!("rejected null public value");
        return Err(Error::DegenerateOutput);
    }
    Ok(public)
}

/// Computes the shared secret from the local private scalar and the
/// peer's public value.
///
/// `Error::DegenerateOutput` is returned if the result is the null point
/// (the peer value is a low-order point).
pub fn compute_shared(secret: &[u8; KEY_SIZE], peer_public: &[u8; KEY_SIZE])
    -> Result<[u8; KEY_SIZE], Error>
{
    gate::check()?;
    let mut shared = dispatch::multiply(secret, peer_public);
    if bool::from(shared[..].ct_eq(&NULL_POINT[..])) {
        shared.zeroize();
        tracing::debug!("rejected null shared secret");
        return Err(Error::DegenerateOutput);
    }
    Ok(shared)
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::config::Config;
    use rand_core::{CryptoRng, Error as RngError, RngCore};
    use sha2::{Sha256, Digest};

    fn dec32(s: &str) -> [u8; 32] {
        let mut r = [0u8; 32];
        hex::decode_to_slice(s, &mut r[..]).unwrap();
        r
    }

    fn setup() {
        crate::init(Config::default()).unwrap();
    }

    // Deterministic generator from SHA-256 in counter mode.
    struct TestRng(u64);

    impl RngCore for TestRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let mut b = [0u8; 8];
            self.fill_bytes(&mut b);
            u64::from_le_bytes(b)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(32) {
                let v = Sha256::digest(self.0.to_le_bytes());
                self.0 += 1;
                chunk.copy_from_slice(&v[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for TestRng {}

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), RngError> {
            Err(RngError::from(core::num::NonZeroU32::new(RngError::CUSTOM_START).unwrap()))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn clamp_bits() {
        let s = clamped([0xFFu8; 32]);
        assert_eq!(s[0], 0xF8);
        assert_eq!(s[31], 0x7F);
        let s = clamped([0u8; 32]);
        assert_eq!(s[0], 0x00);
        assert_eq!(s[31], 0x40);
        assert_eq!(clamped(s), s);
    }

    #[test]
    fn rfc7748_key_agreement() {
        setup();
        let a = dec32("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
        let b = dec32("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
        let pa = derive_public(&a).unwrap();
        let pb = derive_public(&b).unwrap();
        assert_eq!(pa, dec32("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a"));
        assert_eq!(pb, dec32("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f"));
        let k = dec32("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");
        assert_eq!(compute_shared(&a, &pb).unwrap(), k);
        assert_eq!(compute_shared(&b, &pa).unwrap(), k);
    }

    #[test]
    fn iterated_1000() {
        setup();
        let mut k = BASE_POINT;
        let mut u = BASE_POINT;
        for i in 0..1000 {
            let r = compute_shared(&k, &u).unwrap();
            u = k;
            k = r;
            if i == 0 {
                assert_eq!(k, dec32(
                    "422c8e7a6227d7bca1350b3e2bb7279f7897b87bb6854b783c60e80311ae3079"));
            }
        }
        assert_eq!(k, dec32("684cf59ba83309552800ef566f2f4d3c1c3887c49360e3875f2eb94d99532c51"));
    }

    #[test]
    fn degenerate_values() {
        setup();
        assert_eq!(derive_public(&NULL_POINT), Err(Error::DegenerateInput));

        // Zero scalar is clamped to 2^254 when used for a shared secret.
        assert_eq!(compute_shared(&NULL_POINT, &BASE_POINT).unwrap(), dec32(
            "2fe57da347cd62431528daac5fbb290730fff684afc4cfc2ed90995f58cb3b74"));

        let b = dec32("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
        let mut one = [0u8; 32];
        one[0] = 1;
        let mut p = [0xFFu8; 32];
        p[0] = 0xED;
        p[31] = 0x7F;
        for peer in [NULL_POINT, one, p] {
            assert_eq!(compute_shared(&b, &peer), Err(Error::DegenerateOutput));
        }
    }

    #[test]
    fn base_point_matches_general() {
        setup();
        let mut sh = Sha256::new();
        let mut k = [0u8; 32];
        for i in 0..20 {
            sh.update((i as u64).to_le_bytes());
            k.copy_from_slice(&sh.finalize_reset());
            assert_eq!(derive_public(&k), compute_shared(&k, &BASE_POINT));
        }
    }

    #[test]
    fn generated_secrets() {
        setup();
        let mut rng = TestRng(0);
        let s1 = generate_secret_with(&mut rng).unwrap();
        let s2 = generate_secret_with(&mut rng).unwrap();
        assert_ne!(s1, s2);
        assert_eq!(clamped(s1), s1);
        assert_eq!(clamped(s2), s2);

        let s3 = generate_secret().unwrap();
        assert_eq!(clamped(s3), s3);
        assert!(derive_public(&s3).is_ok());

        assert_eq!(generate_secret_with(&mut FailingRng), Err(Error::Entropy));
    }
}
