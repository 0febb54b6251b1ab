use derive_more::Display;

/// Where a session is in its lifecycle.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Phase {
    #[default]
    #[display(fmt = "RUNNING")]
    Running,
    #[display(fmt = "ACCEPTING")]
    Accepting,
    #[display(fmt = "PLAYING")]
    Playing,
    #[display(fmt = "VOTING")]
    Voting,
    #[display(fmt = "PROCESSING")]
    Processing,
    #[display(fmt = "BREAKING")]
    Breaking,
    #[display(fmt = "ENDED")]
    Ended,
}

impl Phase {
    /// Whether the game has started.
    pub fn has_started(&self) -> bool {
        !matches!(self, Phase::Running | Phase::Accepting)
    }

    /// Whether the session is over.
    pub fn is_over(&self) -> bool {
        *self == Phase::Ended
    }
}
