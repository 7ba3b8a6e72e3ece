//! Finite field GF(2^255 - 19).
//!
//! This module exposes the portable implementation of the base field of
//! Curve25519, as selected by the backend (see `crate::backend` for the
//! list of implementations and the contract of the `Field` trait).

pub use crate::backend::{Field, GF25519};
