// Module gf25519 defines the portable GF25519 type for 32-bit targets,
// with 16-bit limbs and 32x32->64 multiplications only.

pub mod gf25519;
pub use gf25519::GF25519;
