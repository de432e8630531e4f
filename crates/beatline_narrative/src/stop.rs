//! Cooperative cancellation for clip execution.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Marker returned by a suspension point that observed a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("playback stopped")]
pub struct Stopped;

/// Stop flag checked at every suspension point.
///
/// Stopping never interrupts running code; the next guarded wait returns
/// [`Stopped`] instead of completing. Work that ignores the signal (an
/// in-flight HTTP call, say) simply has its result discarded.
///
/// # Examples
///
/// ```
/// use beatline_narrative::{StopSignal, Stopped};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let stop = StopSignal::new();
/// stop.stop();
/// assert_eq!(stop.sleep(Duration::from_secs(60)).await, Err(Stopped));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    token: CancellationToken,
}

impl StopSignal {
    /// A fresh, unstopped signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal that stops when this one does but can also be stopped alone.
    ///
    /// Each clip execution gets its own child, so a stop aimed at one clip
    /// never leaks into the next.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Request a stop.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// True once a stop was requested here or on a parent.
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `future` unless a stop arrives first.
    pub async fn guard<F: Future>(&self, future: F) -> Result<F::Output, Stopped> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Stopped),
            output = future => Ok(output),
        }
    }

    /// Sleep for `duration` unless stopped.
    pub async fn sleep(&self, duration: Duration) -> Result<(), Stopped> {
        self.guard(tokio::time::sleep(duration)).await
    }

    /// Poll `ready` every `interval` until it holds or a stop arrives.
    pub async fn wait_until(
        &self,
        interval: Duration,
        mut ready: impl FnMut() -> bool,
    ) -> Result<(), Stopped> {
        loop {
            if self.is_stopped() {
                return Err(Stopped);
            }
            if ready() {
                return Ok(());
            }
            self.sleep(interval).await?;
        }
    }
}
