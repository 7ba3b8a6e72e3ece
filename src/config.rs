//! Run-time configuration.
//!
//! The configuration is applied once, by `init()`; it cannot be changed
//! afterwards.

/// Name of the environment variable that disables accelerated backends
/// (see `Config::from_env()`).
pub const NOSIMD_VAR: &str = "ECDH25519_NOSIMD";

/// Key-agreement configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Allow the dispatcher to use accelerated (CPU-specific) variants.
    /// When false, only the portable backend is used.
    pub accelerated: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { accelerated: true }
    }
}

impl Config {

    /// Configuration that restricts all computations to the portable
    /// backend.
    pub const fn portable() -> Self {
        Self { accelerated: false }
    }

    /// Load configuration from environment variables.
    ///
    /// Accelerated variants are disabled if `ECDH25519_NOSIMD` is set to
    /// `1`, `true` or `yes` (case-insensitive); any other value, or an
    /// absent variable, keeps the default.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        let v = std::env::var(NOSIMD_VAR).ok();
        Self::from_nosimd(v.as_deref())
    }

    #[cfg_attr(not(feature = "std"), allow(dead_code))]
    fn from_nosimd(value: Option<&str>) -> Self {
        let disabled = match value {
            Some(v) => {
                let v = v.trim();
                v == "1"
                    || v.eq_ignore_ascii_case("true")
                    || v.eq_ignore_ascii_case("yes")
            }
            None => false,
        };
        Self { accelerated: !disabled }
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::Config;

    #[test]
    fn defaults() {
        assert!(Config::default().accelerated);
        assert!(!Config::portable().accelerated);
    }

    #[test]
    fn nosimd_values() {
        for v in ["1", "true", "TRUE", "yes", " Yes "] {
            assert_eq!(Config::from_nosimd(Some(v)), Config::portable(), "{}", v);
        }
        for v in ["0", "false", "no", "", "2"] {
            assert_eq!(Config::from_nosimd(Some(v)), Config::default(), "{}", v);
        }
        assert_eq!(Config::from_nosimd(None), Config::default());
    }
}
