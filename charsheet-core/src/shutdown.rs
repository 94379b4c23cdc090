//! Final flush when the process is asked to stop.
//!
//! `Running -> Terminating -> Exited`, never back. Only the first request
//! to stop gets to flush; later ones see the roster already saved.

use crate::persist::PersistError;
use crate::roster::SharedRoster;
use log::{info, warn};
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};

/// Where the process is in shutting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    Running,
    Terminating,
    Exited,
}

impl ShutdownState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ShutdownState::Running,
            1 => ShutdownState::Terminating,
            _ => ShutdownState::Exited,
        }
    }
}

/// Which request stopped the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// Ctrl+C.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// The user chose to exit.
    Exit,
}

impl ShutdownSignal {
    pub fn name(&self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "Ctrl+C",
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Exit => "exit",
        }
    }
}

/// Shutdown state shared by everything that may end the process.
#[derive(Debug, Default)]
pub struct Shutdown {
    state: AtomicU8,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ShutdownState {
        ShutdownState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Move from `Running` to `Terminating`. False if already past `Running`.
    pub fn begin(&self) -> bool {
        self.state
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    fn finish(&self) {
        self.state.store(2, Ordering::SeqCst);
    }
}

/// Save the roster once as the process stops.
///
/// Waits for any in-flight mutation to release the roster lock, so the
/// snapshot matches the last completed operation. Returns `None` if another
/// caller already started shutting down.
pub async fn flush_on_shutdown(
    roster: &SharedRoster,
    shutdown: &Shutdown,
    signal: ShutdownSignal,
) -> Option<Result<(), PersistError>> {
    if !shutdown.begin() {
        return None;
    }

    info!("Shutting down on {}", signal.name());
    let result = {
        let roster = roster.lock().await;
        roster.flush().await
    };
    shutdown.finish();
    Some(result)
}

/// Wait for Ctrl+C or SIGTERM.
///
/// If SIGTERM cannot be registered, keeps waiting on Ctrl+C alone.
#[cfg(unix)]
pub async fn wait_for_signal() -> std::io::Result<ShutdownSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(terminate) => Some(terminate),
        Err(e) => {
            warn!("Could not listen for SIGTERM, only Ctrl+C will save: {e}");
            None
        }
    };
    first_signal(
        tokio::signal::ctrl_c(),
        terminate.as_mut().map(|terminate| terminate.recv()),
    )
    .await
}

/// Wait for Ctrl+C.
#[cfg(not(unix))]
pub async fn wait_for_signal() -> std::io::Result<ShutdownSignal> {
    first_signal(
        tokio::signal::ctrl_c(),
        None::<std::future::Pending<Option<()>>>,
    )
    .await
}

/// Whichever of the two arrives first. Without a terminate source only the
/// interrupt is awaited.
async fn first_signal<I, T>(interrupt: I, terminate: Option<T>) -> std::io::Result<ShutdownSignal>
where
    I: Future<Output = std::io::Result<()>>,
    T: Future<Output = Option<()>>,
{
    match terminate {
        Some(terminate) => tokio::select! {
            result = interrupt => result.map(|_| ShutdownSignal::Interrupt),
            _ = terminate => Ok(ShutdownSignal::Terminate),
        },
        None => interrupt.await.map(|_| ShutdownSignal::Interrupt),
    }
}
