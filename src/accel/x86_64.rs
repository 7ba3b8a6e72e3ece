// x86-64 variants: the ladder over GF25519m64, compiled with BMI2 (mulx)
// and optionally ADX (adcx/adox) enabled.

use crate::backend::w64::GF25519m64;
use crate::ladder;

use super::{capabilities, Accelerated, Capabilities};

#[target_feature(enable = "bmi2,adx")]
unsafe fn mul_bmi2_adx(scalar: &[u8; 32], point: &[u8; 32]) -> [u8; 32] {
    ladder::mul::<GF25519m64>(scalar, point)
}

#[target_feature(enable = "bmi2,adx")]
unsafe fn mul_base_bmi2_adx(scalar: &[u8; 32]) -> [u8; 32] {
    ladder::mul_base::<GF25519m64>(scalar)
}

#[target_feature(enable = "bmi2")]
unsafe fn mul_bmi2(scalar: &[u8; 32], point: &[u8; 32]) -> [u8; 32] {
    ladder::mul::<GF25519m64>(scalar, point)
}

#[target_feature(enable = "bmi2")]
unsafe fn mul_base_bmi2(scalar: &[u8; 32]) -> [u8; 32] {
    ladder::mul_base::<GF25519m64>(scalar)
}

/// Variant for CPUs with both BMI2 and ADX (Broadwell and later).
pub(crate) struct Bmi2Adx;

impl Accelerated for Bmi2Adx {

    fn name(&self) -> &'static str {
        "x86_64-bmi2-adx"
    }

    fn required(&self) -> Capabilities {
        Capabilities::BMI2 | Capabilities::ADX
    }

    fn multiply(&self, scalar: &[u8; 32], point: &[u8; 32]) -> Option<[u8; 32]> {
        if !capabilities().contains(self.required()) {
            return None;
        }
        // SAFETY: the CPU supports BMI2 and ADX.
        Some(unsafe { mul_bmi2_adx(scalar, point) })
    }

    fn multiply_base(&self, scalar: &[u8; 32]) -> Option<[u8; 32]> {
        if !capabilities().contains(self.required()) {
            return None;
        }
        // SAFETY: the CPU supports BMI2 and ADX.
        Some(unsafe { mul_base_bmi2_adx(scalar) })
    }
}

/// Variant for CPUs with BMI2 only (Haswell).
pub(crate) struct Bmi2;

impl Accelerated for Bmi2 {

    fn name(&self) -> &'static str {
        "x86_64-bmi2"
    }

    fn required(&self) -> Capabilities {
        Capabilities::BMI2
    }

    fn multiply(&self, scalar: &[u8; 32], point: &[u8; 32]) -> Option<[u8; 32]> {
        if !capabilities().contains(self.required()) {
            return None;
        }
        // SAFETY: the CPU supports BMI2.
        Some(unsafe { mul_bmi2(scalar, point) })
    }

    fn multiply_base(&self, scalar: &[u8; 32]) -> Option<[u8; 32]> {
        if !capabilities().contains(self.required()) {
            return None;
        }
        // SAFETY: the CPU supports BMI2.
        Some(unsafe { mul_base_bmi2(scalar) })
    }
}
