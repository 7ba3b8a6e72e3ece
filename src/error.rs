//! Error type for key-agreement operations.

use thiserror::Error;

/// Errors from key-agreement operations.
///
/// None of the variants carries secret material; all of them can be
/// logged or reported to a peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The private scalar is the all-zero value.
    #[error("degenerate input: private scalar is zero")]
    DegenerateInput,

    /// The computed point is the all-zero value (low-order peer point).
    #[error("degenerate output: result is the null point")]
    DegenerateOutput,

    /// The startup self-test failed; no key agreement is possible in
    /// this process.
    #[error("self-test failure")]
    SelfTestFailure,

    /// The operation was attempted before a successful `init()`.
    #[error("self-test has not run")]
    Unverified,

    /// The random generator could not provide bytes.
    #[error("entropy source failure")]
    Entropy,
}

impl Error {
    /// Returns true if this error is fatal (unrecoverable).
    ///
    /// Fatal errors will recur on every later call in this process;
    /// other errors relate to the inputs of a single call.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SelfTestFailure)
    }
}

// ========================================================================
