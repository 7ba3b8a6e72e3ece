//! Self-test gate.
//!
//! The gate records, for the whole process, whether the known-answer
//! self-test has run and whether it passed. It starts in the
//! `Unverified` state; the first call to `init()` runs the self-test and
//! moves the gate to `Verified` or `Failed`, both of which are terminal.
//! Every key-agreement operation checks the gate first and refuses to
//! run unless it is `Verified`.
//!
//! Concurrent calls to `init()` are serialized: exactly one caller runs
//! the self-test, and the others wait until the outcome is recorded.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::accel;
use crate::config::Config;
use crate::dispatch;
use crate::error::Error;
use crate::selftest::self_test;

/// State of the self-test gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    /// The self-test has not completed yet.
    Unverified,
    /// The self-test passed; key agreement is available.
    Verified,
    /// The self-test failed; key agreement is disabled for the lifetime
    /// of the process.
    Failed,
}

const UNVERIFIED: u8 = 0;
const RUNNING: u8 = 1;
const VERIFIED: u8 = 2;
const FAILED: u8 = 3;

pub(crate) struct Gate {
    state: AtomicU8,
}

impl Gate {

    pub(crate) const fn new() -> Self {
        Self { state: AtomicU8::new(UNVERIFIED) }
    }

    pub(crate) fn state(&self) -> GateState {
        match self.state.load(Ordering::Acquire) {
            VERIFIED => GateState::Verified,
            FAILED => GateState::Failed,
            _ => GateState::Unverified,
        }
    }

    /// Runs `test` if no other call has done so, and records its outcome;
    /// returns the recorded outcome.
    pub(crate) fn run<F: FnOnce() -> bool>(&self, test: F) -> Result<(), Error> {
        if self.state.compare_exchange(UNVERIFIED, RUNNING,
            Ordering::AcqRel, Ordering::Acquire).is_ok()
        {
            let mut guard = RunGuard { state: &self.state, outcome: FAILED };
            if test() {
                guard.outcome = VERIFIED;
            }
        }
        loop {
            match self.state.load(Ordering::Acquire) {
                VERIFIED => return Ok(()),
                FAILED => return Err(Error::SelfTestFailure),
                _ => wait(),
            }
        }
    }

    pub(crate) fn check(&self) -> Result<(), Error> {
        match self.state.load(Ordering::Acquire) {
            VERIFIED => Ok(()),
            FAILED => Err(Error::SelfTestFailure),
            _ => Err(Error::Unverified),
        }
    }
}

// Records the outcome when dropped; a panicking test leaves FAILED.
struct RunGuard<'a> {
    state: &'a AtomicU8,
    outcome: u8,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.state.store(self.outcome, Ordering::Release);
    }
}

#[cfg(feature = "std")]
#[inline]
fn wait() {
    std::thread::yield_now();
}

#[cfg(not(feature = "std"))]
#[inline]
fn wait() {
    core::hint::spin_loop();
}

static GATE: Gate = Gate::new();

/// Initializes the library: applies the configuration, then runs the
/// self-test.
///
/// Only the first call (process-wide) has an effect; later calls return
/// the recorded outcome, and their configuration is ignored. If the
/// self-test fails, `Error::SelfTestFailure` is returned, now and on all
/// later calls, and all key-agreement operations are refused.
pub fn init(config: Config) -> Result<(), Error> {
    let mut first = false;
    let r = GATE.run(|| {
        first = true;
        dispatch::configure(&config);
        tracing::debug!(capabilities = ?accel::capabilities(), ?config, "running self-test");
        let ok = self_test();
        if ok {
            tracing::info!(backend = dispatch::active_backend(), "self-test passed");
        } else {
            tracing::error!("self-test failed, key agreement disabled");
        }
        ok
    });
    if !first {
        tracing::debug!(?config, "already initialized, configuration ignored");
    }
    r
}

/// Returns the current state of the self-test gate.
pub fn state() -> GateState {
    GATE.state()
}

/// Returns `Ok(())` if key-agreement operations may run.
pub(crate) fn check() -> Result<(), Error> {
    GATE.check().map_err(|e| {
        tracing::warn!(error = %e, "operation refused by self-test gate");
        e
    })
}

// ========================================================================
