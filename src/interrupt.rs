//! Ctrl+C handling for the foreground wait.
//!
//! The supervisor's poll loop checks a token each iteration instead of
//! relying on an asynchronous handler to tear things down itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Cancellation flag checked by `ServerSupervisor::await_termination`.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

static INSTALLED: OnceLock<CancelToken> = OnceLock::new();

#[cfg(unix)]
extern "C" fn on_interrupt(_signal: libc::c_int) {
    // Only an atomic store; safe inside a signal handler.
    if let Some(token) = INSTALLED.get() {
        token.0.store(true, Ordering::SeqCst);
    }
}

/// Route SIGINT to the token. Only the first install wins; there is a single
/// foreground wait per process. No-op on platforms without SIGINT routing.
pub fn install(token: &CancelToken) {
    if INSTALLED.set(token.clone()).is_err() {
        return;
    }
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGINT, on_interrupt as libc::sighandler_t);
    }
}
