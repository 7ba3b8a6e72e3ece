//! Backend dispatch.
//!
//! Every X25519 computation goes through this module. The selected
//! accelerated variant (if any, and if allowed by the configuration) is
//! tried first; when it answers `None`, the computation falls back to the
//! portable backend, which is always available. Dispatch never changes
//! the result: all backends compute the same function.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::accel::{self, Accelerated, Capabilities};
use crate::backend::PORTABLE_NAME;
use crate::config::Config;
use crate::field::GF25519;
use crate::ladder;
use crate::x25519::BASE_POINT;

// Whether accelerated variants may be used; set once by init().
static ACCELERATION: AtomicBool = AtomicBool::new(true);

pub(crate) fn configure(config: &Config) {
    ACCELERATION.store(config.accelerated, Ordering::Relaxed);
}

/// Picks the first variant (in preference order) whose requirements are
/// all met by `caps`; `None` if acceleration is not allowed or no
/// variant qualifies.
pub(crate) fn select<'a>(variants: &'a [&'a dyn Accelerated],
    caps: Capabilities, allow: bool) -> Option<&'a dyn Accelerated>
{
    if !allow {
        return None;
    }
    variants.iter().copied().find(|v| caps.contains(v.required()))
}

fn selected() -> Option<&'static dyn Accelerated> {
    select(accel::variants(), accel::capabilities(),
        ACCELERATION.load(Ordering::Relaxed))
}

/// Name of the backend that general multiplications are routed to.
pub fn active_backend() -> &'static str {
    match selected() {
        Some(v) => v.name(),
        None => PORTABLE_NAME,
    }
}

/// X25519 on the portable backend.
pub(crate) fn generic(scalar: &[u8; 32], point: &[u8; 32]) -> [u8; 32] {
    ladder::mul::<GF25519>(scalar, point)
}

/// X25519 with an arbitrary point, on the best available backend.
pub(crate) fn multiply(scalar: &[u8; 32], point: &[u8; 32]) -> [u8; 32] {
    multiply_with(selected(), scalar, point)
}

/// X25519 with the base point, on the best available backend.
pub(crate) fn multiply_base(scalar: &[u8; 32]) -> [u8; 32] {
    multiply_base_with(selected(), scalar)
}

pub(crate) fn multiply_with(variant: Option<&dyn Accelerated>,
    scalar: &[u8; 32], point: &[u8; 32]) -> [u8; 32]
{
    if let Some(v) = variant {
        if let Some(r) = v.multiply(scalar, point) {
            return r;
        }
        tracing::trace!(variant = v.name(), "accelerated multiply unavailable, using portable backend");
    }
    generic(scalar, point)
}

pub(crate) fn multiply_base_with(variant: Option<&dyn Accelerated>,
    scalar: &[u8; 32]) -> [u8; 32]
{
    if let Some(v) = variant {
        if let Some(r) = v.multiply_base(scalar) {
            return r;
        }
        if let Some(r) = v.multiply(scalar, &BASE_POINT) {
            return r;
        }
        tracing::trace!(variant = v.name(), "accelerated base multiply unavailable, using portable backend");
    }
    ladder::mul_base::<GF25519>(scalar)
}

// ========================================================================
