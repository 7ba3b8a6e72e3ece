//! Accelerated variants of the X25519 ladder.
//!
//! An accelerated variant is an instantiation of the ladder compiled with
//! extra CPU features (`#[target_feature]`). Each variant declares the
//! capabilities it requires; the dispatcher picks the first variant, in
//! preference order, whose requirements are met by the current CPU.
//! Variants check the detected capabilities again before entering their
//! feature-specific code, and report `None` (not available) otherwise,
//! so that calling a variant is always safe.

use core::ops::BitOr;

#[cfg(all(
    feature = "accel",
    target_arch = "x86_64",
    not(feature = "w32_backend"),
))]
mod x86_64;

/// A set of CPU capabilities that accelerated variants may require.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities(u32);

impl Capabilities {
    pub const NONE: Self = Self(0);

    /// Bit manipulation instructions, set 2 (`mulx`).
    pub const BMI2: Self = Self(0x01);

    /// Multi-precision add-carry instructions (`adcx`, `adox`).
    pub const ADX: Self = Self(0x02);

    /// Returns true if all capabilities in `other` are also in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    #[inline]
    fn bitor(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Returns the capabilities of the current CPU.
///
/// CPUID is queried on the first call only; the outcome is cached
/// (process-wide) by `cpufeatures`, and later calls are a relaxed atomic
/// load.
#[cfg(target_arch = "x86_64")]
pub fn capabilities() -> Capabilities {
    cpufeatures::new!(cpuid_bmi2, "bmi2");
    cpufeatures::new!(cpuid_adx, "adx");

    let mut caps = Capabilities::NONE;
    if cpuid_bmi2::get() {
        caps = caps | Capabilities::BMI2;
    }
    if cpuid_adx::get() {
        caps = caps | Capabilities::ADX;
    }
    caps
}

/// Returns the capabilities of the current CPU (none are used on this
/// architecture).
#[cfg(not(target_arch = "x86_64"))]
pub fn capabilities() -> Capabilities {
    Capabilities::NONE
}

/// An accelerated implementation of the X25519 function.
pub(crate) trait Accelerated: Sync {

    /// Name of the variant, for diagnostics.
    fn name(&self) -> &'static str;

    /// Capabilities that the CPU must have for this variant to run.
    fn required(&self) -> Capabilities;

    /// X25519 with an arbitrary point; `None` if unavailable.
    fn multiply(&self, scalar: &[u8; 32], point: &[u8; 32]) -> Option<[u8; 32]>;

    /// X25519 with the conventional base point; `None` if unavailable.
    fn multiply_base(&self, scalar: &[u8; 32]) -> Option<[u8; 32]>;
}

/// Returns the accelerated variants compiled in this build, in
/// preference order (fastest first).
#[cfg(all(
    feature = "accel",
    target_arch = "x86_64",
    not(feature = "w32_backend"),
))]
pub(crate) fn variants() -> &'static [&'static dyn Accelerated] {
    static VARIANTS: [&dyn Accelerated; 2] = [
        &x86_64::Bmi2Adx,
        &x86_64::Bmi2,
    ];
    &VARIANTS
}

/// Returns the accelerated variants compiled in this build (none).
#[cfg(not(all(
    feature = "accel",
    target_arch = "x86_64",
    not(feature = "w32_backend"),
)))]
pub(crate) fn variants() -> &'static [&'static dyn Accelerated] {
    &[]
}

// ========================================================================
