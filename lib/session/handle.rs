use crate::chess::{Move, Square, Team};
use crate::player::{PlayerId, TeamPreference};
use crate::session::{Outbox, Phase, Rules, SessionError, SessionId, Signal};
use crate::vote::{Ballot, Vote};
use atomic::{Atomic, Ordering};
use dashmap::{mapref::entry::Entry, DashMap, DashSet};
use derive_more::DebugCustom;
use std::sync::atomic::{AtomicU64, Ordering::AcqRel};
use std::{fmt, sync::Arc};
use tokio::sync::{watch, Notify};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// A member of a team.
#[derive(Clone)]
struct Member {
    team: Team,
    outbox: Arc<dyn Outbox>,
}

struct Shared {
    id: SessionId,
    rules: Rules,
    phase: Atomic<Phase>,
    turn: Atomic<Team>,
    round: AtomicU64,
    members: DashMap<PlayerId, Member>,
    ballot: Ballot,
    legal: DashSet<Move>,
    board: watch::Sender<String>,
    roster: Notify,
    cancel: CancellationToken,
}

/// The thread-safe side of a session.
///
/// Network tasks go through the handle to join, leave, vote and chat, while
/// the [`Session`][`crate::session::Session`] turn loop owns the board.
#[derive(DebugCustom, Clone)]
#[debug(fmt = "SessionHandle({})", "_0.id")]
pub struct SessionHandle(Arc<Shared>);

/// A session at a glance, for browsing.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Summary {
    pub id: SessionId,
    pub phase: Phase,
    pub round: u64,
    pub members: [usize; 2],
    pub rules: Rules,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [one, two] = self.members;
        write!(f, "{} {} {} {} {} {}", self.id, self.phase, self.round, one, two, self.rules)
    }
}

impl SessionHandle {
    pub(super) fn new(id: SessionId, rules: Rules, snapshot: String) -> Self {
        SessionHandle(Arc::new(Shared {
            id,
            rules,
            phase: Atomic::new(Phase::Running),
            turn: Atomic::new(Team::One),
            round: AtomicU64::new(1),
            members: DashMap::new(),
            ballot: Ballot::default(),
            legal: DashSet::new(),
            board: watch::channel(snapshot).0,
            roster: Notify::new(),
            cancel: CancellationToken::new(),
        }))
    }

    /// This session's id.
    pub fn id(&self) -> SessionId {
        self.0.id
    }

    /// The rules this session was created with.
    pub fn rules(&self) -> &Rules {
        &self.0.rules
    }

    /// The current [`Phase`].
    ///
    /// A session reads as [`Phase::Ended`] as soon as ending is requested,
    /// even before the turn loop notices.
    pub fn phase(&self) -> Phase {
        if self.0.cancel.is_cancelled() {
            Phase::Ended
        } else {
            self.0.phase.load(Ordering::Acquire)
        }
    }

    /// The team whose turn it is.
    pub fn turn(&self) -> Team {
        self.0.turn.load(Ordering::Acquire)
    }

    /// The current round, starting from `1`.
    pub fn round(&self) -> u64 {
        self.0.round.load(Ordering::Acquire)
    }

    /// The number of members in a team.
    pub fn members(&self, team: Team) -> usize {
        self.0.members.iter().filter(|m| m.team == team).count()
    }

    /// The team a player is on, if any.
    pub fn team_of(&self, player: PlayerId) -> Option<Team> {
        self.0.members.get(&player).map(|m| m.team)
    }

    /// The latest board snapshot.
    pub fn snapshot(&self) -> String {
        self.0.board.borrow().clone()
    }

    /// Subscribes to board snapshots.
    pub fn watch_board(&self) -> watch::Receiver<String> {
        self.0.board.subscribe()
    }

    /// This session at a glance.
    pub fn summary(&self) -> Summary {
        Summary {
            id: self.id(),
            phase: self.phase(),
            round: self.round(),
            members: Team::ALL.map(|t| self.members(t)),
            rules: self.0.rules,
        }
    }

    /// Places a player on a team.
    ///
    /// A player who joins their team's voting window in progress is told
    /// that voting is open.
    #[instrument(level = "debug", skip(self, outbox), fields(session = %self.0.id), err)]
    pub fn join(
        &self,
        player: PlayerId,
        preference: TeamPreference,
        outbox: Arc<dyn Outbox>,
    ) -> Result<Team, SessionError> {
        let phase = self.phase();
        if phase.is_over() {
            return Err(SessionError::SessionEnded);
        } else if phase.has_started() && !self.0.rules.allow_late_joins {
            return Err(SessionError::LateJoinRefused);
        }

        let team = preference.pick();
        match self.0.members.entry(player) {
            Entry::Occupied(_) => return Err(SessionError::AlreadyJoined),
            Entry::Vacant(e) => {
                e.insert(Member { team, outbox });
            }
        }

        if self.is_cancelled() {
            self.0.members.remove(&player);
            return Err(SessionError::SessionEnded);
        }

        self.0.roster.notify_one();
        self.broadcast(Signal::PlayerJoined(player, team));

        let phase = self.phase();
        if phase.has_started() {
            self.send(player, Signal::Board(self.snapshot()));
        }

        if phase == Phase::Voting && self.turn() == team {
            self.send(player, Signal::VoteStart(team));
        }

        Ok(team)
    }

    /// Removes a player from their team.
    #[instrument(level = "debug", skip(self), fields(session = %self.0.id), err)]
    pub fn leave(&self, player: PlayerId) -> Result<Team, SessionError> {
        let (_, member) = self
            .0
            .members
            .remove(&player)
            .ok_or(SessionError::NotAMember)?;

        self.0.roster.notify_one();
        self.broadcast(Signal::PlayerLeft(player, member.team));
        Ok(member.team)
    }

    /// Casts a player's vote for the current turn, replacing any earlier one.
    #[instrument(level = "debug", skip(self), fields(session = %self.0.id), err)]
    pub fn vote(
        &self,
        player: PlayerId,
        whence: Square,
        whither: Square,
    ) -> Result<(), SessionError> {
        let team = self.team_of(player).ok_or(SessionError::NotAMember)?;

        match self.phase() {
            Phase::Voting => {}
            Phase::Ended => return Err(SessionError::SessionEnded),
            _ => return Err(SessionError::NotVoting),
        }

        if team != self.turn() {
            return Err(SessionError::NotYourTurn);
        }

        let proposal = Move::new(whence, whither);
        if !self.0.rules.allow_invalid_votes && !self.0.legal.contains(&proposal) {
            return Err(SessionError::InvalidVote(proposal));
        }

        if let Some(previous) = self.0.ballot.cast(Vote::new(whence, whither, player)) {
            debug!(%player, replaced = %previous.proposal(), "vote replaced");
        }

        self.send(player, Signal::VoteReceived(proposal));
        Ok(())
    }

    /// Relays a message to the sender's team.
    #[instrument(level = "debug", skip(self), fields(session = %self.0.id), err)]
    pub fn chat(&self, player: PlayerId, text: &str) -> Result<(), SessionError> {
        let team = self.team_of(player).ok_or(SessionError::NotAMember)?;

        if self.phase().is_over() {
            return Err(SessionError::SessionEnded);
        } else if self.0.rules.enforce_no_communication {
            return Err(SessionError::NoCommunication);
        }

        self.broadcast_to(team, Signal::Chat(player, text.to_string()));
        Ok(())
    }

    /// Asks the session to end, the turn loop exits at its next opportunity.
    pub fn end(&self) {
        self.0.cancel.cancel();
        self.0.roster.notify_one();
    }

    /// Whether ending was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.cancel.is_cancelled()
    }

    pub(super) fn cancellation(&self) -> &CancellationToken {
        &self.0.cancel
    }

    pub(super) fn ballot(&self) -> &Ballot {
        &self.0.ballot
    }

    /// Waits until somebody joins or leaves, or ending is requested.
    pub(super) async fn roster_changed(&self) {
        tokio::select! {
            _ = self.0.roster.notified() => {}
            _ = self.0.cancel.cancelled() => {}
        }
    }

    pub(super) fn set_phase(&self, phase: Phase) {
        debug!(session = %self.0.id, %phase);
        self.0.phase.store(phase, Ordering::Release);
    }

    /// Hands the turn to the other team.
    pub(super) fn next_turn(&self) {
        let turn = self.turn();
        self.0.turn.store(!turn, Ordering::Release);
        self.0.round.fetch_add(1, AcqRel);
    }

    /// Opens the voting window for `team`, which may choose among `moves`.
    pub(super) fn open_polls<I: IntoIterator<Item = Move>>(&self, team: Team, moves: I) {
        self.0.ballot.clear();
        self.0.legal.clear();
        for m in moves {
            self.0.legal.insert(m);
        }

        self.set_phase(Phase::Voting);
        self.broadcast_to(team, Signal::VoteStart(team));
    }

    pub(super) fn publish(&self, snapshot: String) {
        self.0.board.send_replace(snapshot.clone());
        self.broadcast(Signal::Board(snapshot));
    }

    /// Sends a [`Signal`] to a single player.
    pub(super) fn send(&self, player: PlayerId, signal: Signal) {
        let outbox = self.0.members.get(&player).map(|m| m.outbox.clone());
        if let Some(outbox) = outbox {
            deliver(player, &*outbox, signal);
        }
    }

    /// Sends a [`Signal`] to every player.
    pub(super) fn broadcast(&self, signal: Signal) {
        self.fan_out(|_| true, signal)
    }

    /// Sends a [`Signal`] to every member of a team.
    pub(super) fn broadcast_to(&self, team: Team, signal: Signal) {
        self.fan_out(|m| m.team == team, signal)
    }

    fn fan_out<F: Fn(&Member) -> bool>(&self, audience: F, signal: Signal) {
        let recipients: Vec<_> = self
            .0
            .members
            .iter()
            .filter(|m| audience(m.value()))
            .map(|m| (*m.key(), m.outbox.clone()))
            .collect();

        for (player, outbox) in recipients {
            deliver(player, &*outbox, signal.clone());
        }
    }
}

fn deliver(player: PlayerId, outbox: &dyn Outbox, signal: Signal) {
    if let Err(e) = outbox.deliver(signal) {
        warn!(%player, "{}", e);
    }
}
