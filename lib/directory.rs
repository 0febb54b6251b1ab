use crate::chess::Team;
use crate::player::{PlayerId, TeamPreference};
use crate::session::{Conclusion, Outbox, Rules, Session, SessionError, SessionHandle};
use crate::session::{SessionId, Summary};
use dashmap::{mapref::entry::Entry, DashMap};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{error, info, info_span, instrument, Instrument};

/// Every live session, and which session each player is in.
///
/// A player belongs to at most one session at a time.
#[derive(Debug, Default)]
pub struct Directory {
    sessions: DashMap<SessionId, SessionHandle>,
    players: DashMap<PlayerId, SessionId>,
    next: AtomicU64,
}

impl Directory {
    /// Creates a session with `creator` as its first member and starts its turn loop.
    ///
    /// The session is dropped from the directory once its turn loop exits.
    #[instrument(level = "debug", skip(self, outbox), err)]
    pub fn create(
        self: &Arc<Self>,
        creator: PlayerId,
        preference: TeamPreference,
        rules: Rules,
        outbox: Arc<dyn Outbox>,
    ) -> Result<(SessionHandle, Team), SessionError> {
        rules.validate()?;

        let id = SessionId::new(self.next.fetch_add(1, Ordering::Relaxed) + 1);
        match self.players.entry(creator) {
            Entry::Occupied(_) => return Err(SessionError::AlreadyJoined),
            Entry::Vacant(e) => {
                e.insert(id);
            }
        }

        let session = Session::new(id, rules);
        let handle = session.handle().clone();
        let team = match handle.join(creator, preference, outbox) {
            Ok(team) => team,
            Err(e) => {
                self.players.remove(&creator);
                return Err(e);
            }
        };

        self.sessions.insert(id, handle.clone());
        info!(%id, %creator, %rules, "session created");

        self.watch(id, session.run());
        Ok((handle, team))
    }

    /// Runs a session's turn loop and forgets the session once the loop exits,
    /// however it exits.
    fn watch<F>(self: &Arc<Self>, id: SessionId, turns: F)
    where
        F: Future<Output = Conclusion> + Send + 'static,
    {
        let directory: Weak<Self> = Arc::downgrade(self);
        let turns = tokio::spawn(turns.instrument(info_span!("session", %id)));

        tokio::spawn(async move {
            if let Err(e) = turns.await {
                error!(%id, "session failed: {}", e);
            }

            if let Some(directory) = directory.upgrade() {
                directory.forget(id);
            }
        });
    }

    fn forget(&self, id: SessionId) {
        self.sessions.remove(&id);
        self.players.retain(|_, s| *s != id);
    }

    /// Looks up a session.
    pub fn find(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.get(&id).map(|h| h.value().clone())
    }

    /// Ends a session.
    ///
    /// The session stays listed as ended until its turn loop exits.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&self, id: SessionId) -> Option<SessionHandle> {
        let handle = self.find(id)?;
        handle.end();
        Some(handle)
    }

    /// Every live session, in order of creation.
    pub fn list(&self) -> Vec<Summary> {
        let mut summaries: Vec<_> = self.sessions.iter().map(|h| h.summary()).collect();
        summaries.sort_by_key(|s| s.id);
        summaries
    }

    /// Places a player in an existing session.
    #[instrument(level = "debug", skip(self, outbox), err)]
    pub fn join(
        &self,
        player: PlayerId,
        id: SessionId,
        preference: TeamPreference,
        outbox: Arc<dyn Outbox>,
    ) -> Result<(SessionHandle, Team), SessionError> {
        let handle = self.find(id).ok_or(SessionError::UnknownSession(id))?;

        match self.players.entry(player) {
            Entry::Occupied(_) => return Err(SessionError::AlreadyJoined),
            Entry::Vacant(e) => {
                e.insert(id);
            }
        }

        match handle.join(player, preference, outbox) {
            Ok(team) => Ok((handle, team)),
            Err(e) => {
                self.players.remove(&player);
                Err(e)
            }
        }
    }

    /// Takes a player out of whatever session they are in.
    #[instrument(level = "debug", skip(self), err)]
    pub fn leave(&self, player: PlayerId) -> Result<(SessionId, Team), SessionError> {
        let (_, id) = self.players.remove(&player).ok_or(SessionError::NotAMember)?;
        let handle = self.find(id).ok_or(SessionError::UnknownSession(id))?;
        Ok((id, handle.leave(player)?))
    }

    /// The session a player is in.
    pub fn session_of(&self, player: PlayerId) -> Option<SessionHandle> {
        let id = *self.players.get(&player)?;
        self.find(id)
    }

    /// The number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether there are no live sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
