//! Real-time tick source for live sessions.
//!
//! The session itself is tick-driven: callers invoke [`crate::RoastSession::tick`]
//! once per logical second, which lets tests inject ticks deterministically.
//! `Ticker` is the wall-clock producer of those ticks: one spawned thread
//! that sends a unit message per period over a bounded channel.
//!
//! Safety: each `Ticker` owns exactly one thread, signalled and joined on
//! drop, so an abandoned session cannot leave a periodic tick mutating
//! display state behind it.

use crossbeam_channel as xch;
use roast_traits::clock::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub struct Ticker {
    rx: xch::Receiver<()>,
    shutdown: Arc<AtomicBool>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a tick thread firing every `period`. The session clock runs at
    /// one tick per second; tests that want faster wall-clock runs pass a
    /// shorter period together with a simulated clock.
    pub fn spawn<C: Clock + Send + Sync + 'static>(period: Duration, clock: C) -> Self {
        let (tx, rx) = xch::bounded(1);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = shutdown.clone();

        let join_handle = std::thread::spawn(move || {
            loop {
                if shutdown_flag.load(Ordering::Relaxed) {
                    tracing::debug!("ticker thread received shutdown signal");
                    break;
                }
                clock.sleep(period);
                // Check again after the sleep so cancellation never emits a
                // trailing tick.
                if shutdown_flag.load(Ordering::Relaxed) {
                    break;
                }
                match tx.try_send(()) {
                    Ok(()) => {}
                    // Consumer hasn't caught up; coalesce rather than block,
                    // so cancellation is never stuck behind a full channel.
                    Err(xch::TrySendError::Full(())) => {}
                    Err(xch::TrySendError::Disconnected(())) => {
                        tracing::debug!("ticker consumer disconnected, exiting thread");
                        break;
                    }
                }
            }
            tracing::trace!("ticker thread exiting cleanly");
        });

        Self {
            rx,
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    /// Block until the next tick. Returns false once the ticker has been
    /// cancelled and drained.
    pub fn wait(&self) -> bool {
        self.rx.recv().is_ok()
    }

    /// Non-blocking: whether a tick is pending right now.
    pub fn try_tick(&self) -> bool {
        self.rx.try_recv().is_ok()
    }

    /// Signal the tick thread to stop and join it.
    pub fn cancel(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => tracing::trace!("ticker thread joined"),
                Err(e) => tracing::warn!(?e, "ticker thread panicked during shutdown"),
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
