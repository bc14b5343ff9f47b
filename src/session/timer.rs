// SPDX-License-Identifier: GPL-3.0-only

//! Scheduled countdown tick abstraction
//!
//! Ticks are strictly serialized: one value per interval, counting down to
//! zero, delivered in order with no coalescing. [`Countdown`] wraps the
//! tick stream in a spawned task with an explicit cancellation handle so
//! the engine's reset path has one clear point to stop the clock.

use futures::{StreamExt, pin_mut};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Raw countdown tick stream: yields `from, from - 1, .., 0` with one
/// interval of delay before each value, then ends.
///
/// Dropping the stream stops the clock; use [`Countdown`] when an explicit
/// cancellation handle is needed.
pub fn ticks(from: u32, interval: Duration) -> impl futures::Stream<Item = u32> {
    async_stream::stream! {
        let mut remaining = from;
        loop {
            tokio::time::sleep(interval).await;
            remaining = remaining.saturating_sub(1);
            yield remaining;
            if remaining == 0 {
                break;
            }
        }
    }
}

/// A running countdown with a cancellation handle
///
/// Spawns a timer task that forwards ticks over a channel. Cancelling (or
/// dropping) the countdown stops the task; a cancelled countdown simply
/// stops yielding ticks.
#[derive(Debug)]
pub struct Countdown {
    ticks: mpsc::UnboundedReceiver<u32>,
    stop: Option<oneshot::Sender<()>>,
}

impl Countdown {
    /// Start a countdown from `from` seconds, ticking every `interval`
    pub fn start(from: u32, interval: Duration) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (stop_tx, mut stop_rx) = oneshot::channel();

        tokio::spawn(async move {
            let stream = ticks(from, interval);
            pin_mut!(stream);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        debug!("Countdown cancelled");
                        break;
                    }
                    tick = stream.next() => {
                        let Some(remaining) = tick else { break };
                        // Receiver dropped means nobody is listening anymore
                        if tick_tx.send(remaining).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            ticks: tick_rx,
            stop: Some(stop_tx),
        }
    }

    /// Wait for the next tick; `None` once the countdown finished or was
    /// cancelled
    pub async fn next_tick(&mut self) -> Option<u32> {
        self.ticks.recv().await
    }

    /// Stop the countdown; no further ticks are delivered
    pub fn cancel(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.ticks.close();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_count_down_to_zero() {
        let mut countdown = Countdown::start(3, Duration::from_millis(1));
        let mut seen = Vec::new();
        while let Some(tick) = countdown.next_tick().await {
            seen.push(tick);
        }
        assert_eq!(seen, vec![2, 1, 0]);
    }

    #[tokio::test]
    async fn test_cancel_stops_ticks() {
        let mut countdown = Countdown::start(1000, Duration::from_millis(1));
        let first = countdown.next_tick().await;
        assert_eq!(first, Some(999));
        countdown.cancel();
        // Drain whatever was already queued; the stream must end
        while countdown.next_tick().await.is_some() {}
    }
}
