use crate::session::Signal;
use derive_more::{Display, Error};
use tokio::sync::mpsc::UnboundedSender;

/// The reason why a [`Signal`] could not be delivered.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
#[display(fmt = "the player is no longer listening")]
pub struct Undeliverable;

/// A player's outbound channel.
///
/// Delivery must never block, a slow player only delays itself.
#[cfg_attr(test, mockall::automock)]
pub trait Outbox: Send + Sync {
    /// Queues a [`Signal`] for the player.
    fn deliver(&self, signal: Signal) -> Result<(), Undeliverable>;
}

impl Outbox for UnboundedSender<Signal> {
    fn deliver(&self, signal: Signal) -> Result<(), Undeliverable> {
        self.send(signal).map_err(|_| Undeliverable)
    }
}
