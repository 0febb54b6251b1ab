use crate::chess::{Board, Roster, Team};
use crate::util::{Cancelled, Countdown};
use crate::vote::Tally;
use derive_more::{Display, From};
use std::{num::ParseIntError, str::FromStr, time::Duration};
use tracing::{info, instrument, warn};

mod error;
mod handle;
mod outbox;
mod outcome;
mod phase;
mod rules;
mod signal;

pub use error::*;
pub use handle::*;
pub use outbox::*;
pub use outcome::*;
pub use phase::*;
pub use rules::*;
pub use signal::*;

/// Identifies a session.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, From)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct SessionId(u64);

impl SessionId {
    /// Constructs [`SessionId`] from a raw number.
    #[inline(always)]
    pub fn new(n: u64) -> Self {
        SessionId(n)
    }

    /// This id as a raw number.
    #[inline(always)]
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for SessionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(SessionId)
    }
}

/// A game of team chess, where each team's move is decided by vote.
///
/// The session owns the board exclusively, [`Session::run`] is the only
/// place where the board changes. Everyone else goes through the
/// [`SessionHandle`].
#[derive(Debug)]
pub struct Session {
    handle: SessionHandle,
    board: Board,
    roster: Roster,
}

impl Session {
    /// A session on the standard board.
    pub fn new(id: SessionId, rules: Rules) -> Self {
        Self::with_board(id, rules, Board::default())
    }

    /// A session on a custom board.
    pub fn with_board(id: SessionId, rules: Rules, board: Board) -> Self {
        Session {
            handle: SessionHandle::new(id, rules, board.snapshot()),
            roster: Roster::new(&board),
            board,
        }
    }

    /// The thread-safe side of this session.
    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Plays the game to its conclusion.
    #[instrument(level = "debug", skip(self), ret)]
    pub async fn run(mut self) -> Conclusion {
        let conclusion = self.play().await;

        info!(session = %self.handle.id(), %conclusion, "session over");
        self.handle.set_phase(Phase::Ended);
        for signal in conclusion.signals() {
            self.handle.broadcast(signal);
        }

        self.handle.cancellation().cancel();
        conclusion
    }

    async fn play(&mut self) -> Conclusion {
        self.handle.set_phase(Phase::Accepting);
        if let Some(conclusion) = self.accept().await {
            return conclusion;
        }

        info!(session = %self.handle.id(), "game started");
        self.handle.set_phase(Phase::Playing);
        self.handle.broadcast(Signal::GameStart);
        self.handle.publish(self.board.snapshot());

        loop {
            let team = self.handle.turn();
            if let Some(conclusion) = self.desertion(team) {
                return conclusion;
            }

            self.handle.open_polls(team, self.board.moves(team));
            let window = self.handle.rules().vote_duration;
            if self.countdown(window, Some(team)).await.is_err() {
                return Conclusion::Ended;
            }

            self.handle.set_phase(Phase::Processing);
            self.handle.broadcast_to(team, Signal::VoteEnd(team));

            let resolution = self.process(team);
            self.handle.broadcast(resolution.signal());
            if let Resolution::Applied(_) = resolution {
                self.handle.publish(self.board.snapshot());
            }

            if !self.roster.has_king(&self.board, !team) {
                return Conclusion::Victory(team);
            }

            let pause = self.handle.rules().break_duration;
            if pause.as_secs() > 0 {
                self.handle.set_phase(Phase::Breaking);
                self.handle.broadcast(Signal::BreakStart);
                if self.countdown(pause, None).await.is_err() {
                    return Conclusion::Ended;
                }

                self.handle.broadcast(Signal::BreakEnd);
            }

            self.handle.next_turn();
        }
    }

    /// Waits for both teams to fill up.
    async fn accept(&self) -> Option<Conclusion> {
        let min = self.handle.rules().min_team_size;

        loop {
            if self.handle.is_cancelled() {
                return Some(Conclusion::Ended);
            }

            match Team::ALL.map(|t| self.handle.members(t)) {
                [0, 0] => return Some(Conclusion::Abandoned),
                [a, b] if a >= min && b >= min => return None,
                _ => self.handle.roster_changed().await,
            }
        }
    }

    /// Checks whether either team has deserted, the other team deserting first.
    fn desertion(&self, team: Team) -> Option<Conclusion> {
        if self.handle.is_cancelled() {
            return Some(Conclusion::Ended);
        }

        match (self.handle.members(team), self.handle.members(!team)) {
            (0, 0) => Some(Conclusion::Abandoned),
            (_, 0) => Some(Conclusion::Desertion(!team)),
            (0, _) => Some(Conclusion::Desertion(team)),
            _ => None,
        }
    }

    async fn countdown(&self, duration: Duration, audience: Option<Team>) -> Result<(), Cancelled> {
        let handle = &self.handle;
        Countdown::new(duration)
            .run(handle.cancellation(), |remaining| match audience {
                Some(team) => handle.broadcast_to(team, Signal::Tick(remaining)),
                None => handle.broadcast(Signal::Tick(remaining)),
            })
            .await
    }

    /// Tallies the votes and applies the elected move, if it is legal.
    #[instrument(level = "debug", skip(self), fields(session = %self.handle.id()), ret)]
    fn process(&mut self, team: Team) -> Resolution {
        let tally = self.handle.ballot().tally();
        self.handle.ballot().clear();

        let elected = match tally {
            Tally::Empty => return Resolution::NoVote,
            Tally::Tied(moves, _) => return Resolution::Tied(moves),
            Tally::Elected(m, _) => m,
        };

        let Some(id) = self.board.occupant(elected.whence()) else {
            return Resolution::NoUnit(elected);
        };

        if self.board.unit(id).team() != team {
            return Resolution::WrongUnit(elected);
        }

        match self.board.move_to(id, elected.whither()) {
            Ok(_) => Resolution::Applied(elected),
            Err(e) => {
                warn!(session = %self.handle.id(), "{}", e);
                Resolution::Illegal(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Move, Role, Square};
    use crate::player::{PlayerId, TeamPreference};
    use std::sync::Arc;
    use test_strategy::proptest;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
    use tokio::task::{self, JoinHandle};
    use tokio::time::{sleep, Instant};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn rules() -> Rules {
        Rules {
            vote_duration: Duration::from_secs(15),
            ..Rules::default()
        }
    }

    fn join(handle: &SessionHandle, p: u64, t: Team) -> UnboundedReceiver<Signal> {
        let (tx, rx) = unbounded_channel();
        let team = handle.join(PlayerId::new(p), t.into(), Arc::new(tx));
        assert_eq!(team, Ok(t));
        rx
    }

    fn drain(rx: &mut UnboundedReceiver<Signal>) -> Vec<Signal> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    fn spawn(session: Session) -> (SessionHandle, JoinHandle<Conclusion>) {
        let handle = session.handle().clone();
        (handle, task::spawn(session.run()))
    }

    /// Advances the paused clock into the first second of the voting window.
    async fn until_voting(handle: &SessionHandle) {
        while handle.phase() != Phase::Voting {
            task::yield_now().await;
        }
    }

    /// Kings in opposite corners and whatever else the test needs.
    fn board() -> Board {
        let mut board = Board::new(8, 8);
        board.place(Role::King, Team::One, sq("1A"));
        board.place(Role::King, Team::Two, sq("8H"));
        board
    }

    #[tokio::test(start_paused = true)]
    async fn session_waits_for_both_teams_before_starting() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let mut one = join(&handle, 1, Team::One);

        let task = task::spawn(session.run());
        sleep(Duration::from_secs(60)).await;
        assert_eq!(handle.phase(), Phase::Accepting);
        assert!(!drain(&mut one).contains(&Signal::GameStart));

        let _two = join(&handle, 2, Team::Two);
        until_voting(&handle).await;

        let signals = drain(&mut one);
        assert!(signals.contains(&Signal::GameStart));
        assert!(signals.contains(&Signal::Board(Board::default().snapshot())));
        assert!(signals.contains(&Signal::VoteStart(Team::One)));

        handle.end();
        assert_eq!(task.await.unwrap(), Conclusion::Ended);
    }

    #[tokio::test(start_paused = true)]
    async fn session_is_abandoned_if_everybody_leaves_while_accepting() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let _one = join(&handle, 1, Team::One);

        let task = task::spawn(session.run());
        task::yield_now().await;

        assert_eq!(handle.leave(PlayerId::new(1)), Ok(Team::One));
        assert_eq!(task.await.unwrap(), Conclusion::Abandoned);
        assert_eq!(handle.phase(), Phase::Ended);
    }

    #[tokio::test(start_paused = true)]
    async fn elected_pawn_move_is_applied() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let mut one = join(&handle, 1, Team::One);
        let mut two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        assert_eq!(handle.vote(PlayerId::new(1), sq("2B"), sq("2C")), Ok(()));

        sleep(Duration::from_millis(15_500)).await;
        assert_eq!(handle.turn(), Team::Two);
        assert_eq!(handle.round(), 2);

        let applied = Signal::MoveApplied(Move::new(sq("2B"), sq("2C")));
        let ones = drain(&mut one);
        let twos = drain(&mut two);
        assert!(ones.contains(&applied));
        assert!(twos.contains(&applied));
        assert!(ones.contains(&Signal::VoteReceived(Move::new(sq("2B"), sq("2C")))));
        assert!(ones.contains(&Signal::VoteEnd(Team::One)));
        assert!(ones.contains(&Signal::Tick(15)));
        assert!(!twos.contains(&Signal::Tick(15)));

        let snapshot = handle.snapshot();
        let rows: Vec<_> = snapshot.split('/').collect();
        assert_eq!(rows[1], "P1,~,P1,P1,P1,P1,P1,P1");
        assert_eq!(rows[2], "~,P1,~,~,~,~,~,~");
        assert!(twos.contains(&Signal::Board(snapshot.clone())));

        handle.end();
        assert_eq!(task.await.unwrap(), Conclusion::Ended);
    }

    #[tokio::test(start_paused = true)]
    async fn voting_window_does_not_close_early_on_consensus() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let _one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        let start = Instant::now();
        handle.vote(PlayerId::new(1), sq("2B"), sq("2D")).unwrap();

        while handle.phase() == Phase::Voting {
            sleep(Duration::from_millis(100)).await;
        }

        assert!(start.elapsed() >= Duration::from_secs(15));

        handle.end();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn a_tie_moves_nothing() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let mut a = join(&handle, 1, Team::One);
        let _b = join(&handle, 2, Team::One);
        let _c = join(&handle, 3, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        handle.vote(PlayerId::new(1), sq("2B"), sq("2C")).unwrap();
        handle.vote(PlayerId::new(2), sq("3B"), sq("3C")).unwrap();

        sleep(Duration::from_millis(15_500)).await;
        assert!(drain(&mut a).contains(&Signal::Tied));
        assert_eq!(handle.snapshot(), Board::default().snapshot());

        handle.end();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn nobody_voting_moves_nothing() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let mut one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        sleep(Duration::from_millis(15_500)).await;
        assert!(drain(&mut one).contains(&Signal::NoVote));
        assert_eq!(handle.turn(), Team::Two);

        handle.end();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_votes_are_refused_unless_allowed() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let _one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        let m = Move::new(sq("2B"), sq("2E"));
        assert_eq!(
            handle.vote(PlayerId::new(1), m.whence(), m.whither()),
            Err(SessionError::InvalidVote(m))
        );

        assert_eq!(
            handle.vote(PlayerId::new(2), sq("2G"), sq("2F")),
            Err(SessionError::NotYourTurn)
        );

        assert_eq!(
            handle.vote(PlayerId::new(3), sq("2B"), sq("2C")),
            Err(SessionError::NotAMember)
        );

        handle.end();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn votes_outside_the_window_are_refused() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let _one = join(&handle, 1, Team::One);

        assert_eq!(
            handle.vote(PlayerId::new(1), sq("2B"), sq("2C")),
            Err(SessionError::NotVoting)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn elected_illegal_vote_is_reported_without_moving() {
        let rules = Rules {
            allow_invalid_votes: true,
            ..rules()
        };

        let session = Session::new(SessionId::new(1), rules);
        let handle = session.handle().clone();
        let mut one = join(&handle, 1, Team::One);
        let _b = join(&handle, 2, Team::One);
        let _c = join(&handle, 3, Team::One);
        let _d = join(&handle, 4, Team::One);
        let _two = join(&handle, 5, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        for p in 1..=3 {
            assert_eq!(handle.vote(PlayerId::new(p), sq("1A"), sq("1C")), Ok(()));
        }

        handle.vote(PlayerId::new(4), sq("2B"), sq("2C")).unwrap();

        sleep(Duration::from_millis(15_500)).await;
        assert!(drain(&mut one).contains(&Signal::IllegalVote));
        assert_eq!(handle.snapshot(), Board::default().snapshot());
        assert_eq!(handle.turn(), Team::Two);

        handle.end();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn elected_vote_from_an_empty_square_moves_nothing() {
        let rules = Rules {
            allow_invalid_votes: true,
            ..rules()
        };

        let session = Session::new(SessionId::new(1), rules);
        let handle = session.handle().clone();
        let mut one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        handle.vote(PlayerId::new(1), sq("4D"), sq("4E")).unwrap();

        sleep(Duration::from_millis(15_500)).await;
        assert!(drain(&mut one).contains(&Signal::NoUnit));

        handle.end();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn elected_vote_for_an_enemy_unit_moves_nothing() {
        let rules = Rules {
            allow_invalid_votes: true,
            ..rules()
        };

        let session = Session::new(SessionId::new(1), rules);
        let handle = session.handle().clone();
        let mut one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        handle.vote(PlayerId::new(1), sq("2G"), sq("2F")).unwrap();

        sleep(Duration::from_millis(15_500)).await;
        assert!(drain(&mut one).contains(&Signal::WrongUnit));
        assert_eq!(handle.snapshot(), Board::default().snapshot());

        handle.end();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn capturing_the_enemy_king_wins() {
        let mut board = board();
        board.place(Role::Rook, Team::Two, sq("1H"));

        let session = Session::with_board(SessionId::new(1), rules(), board);
        let handle = session.handle().clone();
        let mut one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        // Team 1 passes, then team 2's rook takes the king.
        sleep(Duration::from_millis(15_500)).await;
        until_voting(&handle).await;
        assert_eq!(handle.turn(), Team::Two);
        handle.vote(PlayerId::new(2), sq("1H"), sq("1A")).unwrap();

        let conclusion = task.await.unwrap();
        assert_eq!(conclusion, Conclusion::Victory(Team::Two));
        assert_eq!(conclusion.winner(), Some(Team::Two));

        let signals = drain(&mut one);
        assert!(signals.contains(&Signal::MoveApplied(Move::new(sq("1H"), sq("1A")))));
        assert_eq!(signals.last(), Some(&Signal::Won(Team::Two)));
        assert_eq!(handle.phase(), Phase::Ended);
    }

    #[tokio::test(start_paused = true)]
    async fn voting_team_emptied_during_its_window_deserts_at_the_next_turn() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let _one = join(&handle, 1, Team::One);
        let mut two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        assert_eq!(handle.leave(PlayerId::new(1)), Ok(Team::One));

        let conclusion = task.await.unwrap();
        assert_eq!(conclusion, Conclusion::Desertion(Team::One));
        assert_eq!(conclusion.winner(), Some(Team::Two));

        let signals = drain(&mut two);
        assert!(signals.ends_with(&[
            Signal::NoVote,
            Signal::Deserted(Team::One),
            Signal::Won(Team::Two)
        ]));

        assert!(!signals.contains(&Signal::VoteStart(Team::Two)));
    }

    #[tokio::test(start_paused = true)]
    async fn everybody_leaving_mid_game_abandons_the_session() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let _one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        handle.leave(PlayerId::new(1)).unwrap();
        handle.leave(PlayerId::new(2)).unwrap();

        // Nobody is left to desert, the window still runs out first.
        sleep(Duration::from_secs(5)).await;
        assert_eq!(handle.phase(), Phase::Voting);

        assert_eq!(task.await.unwrap(), Conclusion::Abandoned);
        assert_eq!(Conclusion::Abandoned.signals(), [Signal::Ended]);
        assert_eq!(handle.phase(), Phase::Ended);
    }

    #[tokio::test(start_paused = true)]
    async fn ended_session_refuses_requests_right_away() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let _one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        handle.end();

        assert_eq!(handle.phase(), Phase::Ended);
        assert_eq!(
            handle.vote(PlayerId::new(1), sq("2B"), sq("2C")),
            Err(SessionError::SessionEnded)
        );

        assert_eq!(
            handle.chat(PlayerId::new(1), "still there?"),
            Err(SessionError::SessionEnded)
        );

        let (tx, _rx) = unbounded_channel();
        assert_eq!(
            handle.join(PlayerId::new(3), Team::One.into(), Arc::new(tx)),
            Err(SessionError::SessionEnded)
        );

        assert_eq!(handle.members(Team::One), 1);
        assert_eq!(task.await.unwrap(), Conclusion::Ended);
    }

    #[tokio::test(start_paused = true)]
    async fn team_without_members_at_turn_start_deserts() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let mut one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        assert_eq!(handle.leave(PlayerId::new(2)), Ok(Team::Two));

        // Desertion is only noticed once the window is over.
        sleep(Duration::from_secs(5)).await;
        assert_eq!(handle.phase(), Phase::Voting);

        let conclusion = task.await.unwrap();
        assert_eq!(conclusion, Conclusion::Desertion(Team::Two));

        let signals = drain(&mut one);
        assert!(signals.contains(&Signal::PlayerLeft(PlayerId::new(2), Team::Two)));
        assert!(signals.ends_with(&[Signal::Deserted(Team::Two), Signal::Won(Team::One)]));
        assert!(!signals.contains(&Signal::VoteStart(Team::Two)));
    }

    #[tokio::test(start_paused = true)]
    async fn late_joiner_is_told_voting_is_open() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let _one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        let mut late = join(&handle, 3, Team::One);
        let signals = drain(&mut late);

        assert!(signals.contains(&Signal::Board(Board::default().snapshot())));
        assert!(signals.contains(&Signal::VoteStart(Team::One)));
        assert_eq!(handle.vote(PlayerId::new(3), sq("7B"), sq("7D")), Ok(()));

        let mut other = join(&handle, 4, Team::Two);
        assert!(!drain(&mut other).contains(&Signal::VoteStart(Team::Two)));

        handle.end();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn late_joins_can_be_refused() {
        let rules = Rules {
            allow_late_joins: false,
            ..rules()
        };

        let session = Session::new(SessionId::new(1), rules);
        let handle = session.handle().clone();
        let _one = join(&handle, 1, Team::One);
        let _two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        until_voting(&handle).await;
        let (tx, _rx) = unbounded_channel();
        assert_eq!(
            handle.join(PlayerId::new(3), TeamPreference::Random, Arc::new(tx)),
            Err(SessionError::LateJoinRefused)
        );

        handle.end();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn break_follows_every_turn() {
        let rules = Rules {
            break_duration: Duration::from_secs(5),
            ..rules()
        };

        let session = Session::new(SessionId::new(1), rules);
        let handle = session.handle().clone();
        let mut one = join(&handle, 1, Team::One);
        let mut two = join(&handle, 2, Team::Two);
        let (handle, task) = spawn(session);

        sleep(Duration::from_millis(16_000)).await;
        assert_eq!(handle.phase(), Phase::Breaking);
        assert_eq!(handle.turn(), Team::One);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(handle.turn(), Team::Two);

        let ones = drain(&mut one);
        let twos = drain(&mut two);
        assert!(ones.contains(&Signal::BreakStart) && ones.contains(&Signal::BreakEnd));
        assert!(twos.contains(&Signal::BreakStart) && twos.contains(&Signal::Tick(5)));

        handle.end();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn chat_reaches_the_team_only() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let mut a = join(&handle, 1, Team::One);
        let mut b = join(&handle, 2, Team::One);
        let mut c = join(&handle, 3, Team::Two);

        assert_eq!(handle.chat(PlayerId::new(1), "push the pawn"), Ok(()));

        let chat = Signal::Chat(PlayerId::new(1), "push the pawn".into());
        assert!(drain(&mut a).contains(&chat));
        assert!(drain(&mut b).contains(&chat));
        assert!(!drain(&mut c).contains(&chat));
    }

    #[tokio::test(start_paused = true)]
    async fn chat_is_refused_when_communication_is_disabled() {
        let rules = Rules {
            enforce_no_communication: true,
            ..rules()
        };

        let session = Session::new(SessionId::new(1), rules);
        let handle = session.handle().clone();
        let _a = join(&handle, 1, Team::One);

        assert_eq!(
            handle.chat(PlayerId::new(1), "psst"),
            Err(SessionError::NoCommunication)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failed_delivery_does_not_stop_the_broadcast() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();

        let mut broken = MockOutbox::new();
        broken.expect_deliver().returning(|_| Err(Undeliverable));
        handle
            .join(PlayerId::new(1), Team::One.into(), Arc::new(broken))
            .unwrap();

        let mut fine = join(&handle, 2, Team::One);
        handle.broadcast(Signal::GameStart);
        assert!(drain(&mut fine).contains(&Signal::GameStart));
    }

    #[proptest]
    fn session_id_can_be_parsed_from_its_display(id: SessionId) {
        assert_eq!(id.to_string().parse(), Ok(id));
    }

    #[tokio::test(start_paused = true)]
    async fn players_cannot_join_twice() {
        let session = Session::new(SessionId::new(1), rules());
        let handle = session.handle().clone();
        let _a = join(&handle, 1, Team::One);

        let (tx, _rx) = unbounded_channel();
        assert_eq!(
            handle.join(PlayerId::new(1), Team::Two.into(), Arc::new(tx)),
            Err(SessionError::AlreadyJoined)
        );

        assert_eq!(handle.team_of(PlayerId::new(1)), Some(Team::One));
    }
}
