//! Ecdh25519 implements Diffie-Hellman key agreement over Curve25519
//! (the X25519 function from RFC 7748).
//!
//! This library is meant as the cryptographic core of key-agreement
//! subsystems: it generates private scalars, derives public values, and
//! computes shared secrets. All computations are constant-time. Outputs
//! equal to the null point (all zeros), which only arise from low-order
//! peer values, are rejected rather than returned as key material.
//!
//! The X25519 function is computed with the Montgomery ladder, over one
//! of several implementations of the base field GF(2^255 - 19), defined
//! in `backend`. A portable implementation is always present (a 32-bit
//! and a 64-bit backends are provided, the "right one" is automatically
//! selected, unless overridden by a compile-time feature). On x86-64
//! CPUs with the BMI2 (and ADX) extensions, accelerated variants are
//! selected at runtime; they compute exactly the same function.
//!
//! # Usage
//!
//! The host must call `init()` once, before any key agreement. This
//! applies the configuration, and runs a known-answer self-test over
//! all backends that may be used. Until the self-test has passed, all
//! key-agreement functions fail; if it fails, they fail permanently.
//!
//! ```
//! use ecdh25519::{compute_shared, derive_public, generate_secret, init, Config};
//!
//! init(Config::default()).unwrap();
//! let alice = generate_secret().unwrap();
//! let bob = generate_secret().unwrap();
//! let alice_pub = derive_public(&alice).unwrap();
//! let bob_pub = derive_public(&bob).unwrap();
//! assert_eq!(compute_shared(&alice, &bob_pub), compute_shared(&bob, &alice_pub));
//! ```
//!
//! The library is `no_std`. By default, it compiles against the standard
//! library, which adds `Config::from_env()` and yields to the scheduler
//! (instead of spinning) when `init()` is called concurrently.
//!
//! # Conventions
//!
//! Within the field implementations, Booleans are avoided (compilers tend
//! to "optimize" things a bit too eagerly when handling `bool` values).
//! All functions that return or use a potentially secret Boolean value
//! use the `u32` type; the convention is that 0xFFFFFFFF means "true",
//! and 0x00000000 means "false". No other value shall be used, for they
//! would lead to unpredictable results. Comparisons of public API values
//! with the null point use `subtle`.
//!
//! Events are reported through `tracing`; secret values are never
//! logged.

#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

pub use rand_core::{CryptoRng, RngCore};

pub mod backend;

pub mod field;
pub mod x25519;

mod accel;
mod config;
mod dispatch;
mod error;
mod gate;
mod ladder;
mod selftest;

pub use config::{Config, NOSIMD_VAR};
pub use dispatch::active_backend;
pub use error::Error;
pub use gate::{init, state, GateState};
pub use selftest::self_test;
pub use x25519::{
    clamp, clamped, compute_shared, derive_public, generate_secret,
    generate_secret_with, BASE_POINT, KEY_SIZE, NULL_POINT,
};
