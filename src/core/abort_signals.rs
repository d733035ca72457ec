use parking_lot::Once;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::traits::AbortSignal;

static HANDLER: Once = Once::new();
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// An [`AbortSignal`] which never fires. This is the default for a
/// [`Minimizer`](`crate::core::Minimizer`).
#[derive(Default, Clone, Copy)]
pub struct NopAbortSignal;

impl AbortSignal for NopAbortSignal {
    fn is_aborted(&self) -> bool {
        false
    }

    fn abort(&self) {}

    fn reset(&self) {}
}

/// A signal that fires when the process receives `Ctrl-C`.
///
/// <div class="warning">This signal installs a process-wide `Ctrl-C` handler the first time it is
/// created and can interfere with other libraries that handle `Ctrl-C` (e.g. `tokio`).</div>
#[derive(Default)]
pub struct CtrlCAbortSignal;

impl CtrlCAbortSignal {
    /// Create a new [`CtrlCAbortSignal`], installing the handler if this is the first one.
    pub fn new() -> Self {
        HANDLER.call_once(|| {
            if let Err(err) = ctrlc::set_handler(|| {
                tracing::warn!("Ctrl-C received, stopping after the current generation");
                INTERRUPTED.store(true, Ordering::SeqCst);
            }) {
                tracing::error!("could not install the Ctrl-C handler: {err}");
            }
        });
        Self
    }
}

impl AbortSignal for CtrlCAbortSignal {
    fn is_aborted(&self) -> bool {
        INTERRUPTED.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        INTERRUPTED.store(true, Ordering::SeqCst);
    }

    fn reset(&self) {
        INTERRUPTED.store(false, Ordering::SeqCst);
    }
}

/// A signal backed by a shared atomic flag, so it can be fired from another thread (or from an
/// [`Observer`](`crate::traits::Observer`)) through a clone.
#[derive(Default, Clone)]
pub struct AtomicAbortSignal {
    flag: Arc<AtomicBool>,
}

impl AtomicAbortSignal {
    /// Create a new, unfired [`AtomicAbortSignal`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl AbortSignal for AtomicAbortSignal {
    fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
