use derive_more::{Display, Error};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// The reason why a [`Countdown`] stopped short.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Error)]
#[display(fmt = "the countdown was cancelled")]
pub struct Cancelled;

/// A countdown that ticks once a second.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Countdown {
    seconds: u64,
}

impl Countdown {
    /// Constructs a countdown over the whole seconds of `duration`.
    pub fn new(duration: Duration) -> Self {
        Countdown {
            seconds: duration.as_secs(),
        }
    }

    /// The number of ticks.
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Counts down to zero, calling `tick` with the seconds remaining at
    /// the start of every second.
    ///
    /// Cancellation is observed between ticks.
    pub async fn run<F>(self, cancel: &CancellationToken, mut tick: F) -> Result<(), Cancelled>
    where
        F: FnMut(u64),
    {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        for remaining in (1..=self.seconds).rev() {
            tick(remaining);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Cancelled),
                _ = ticker.tick() => {}
            }
        }

        Ok(())
    }
}
