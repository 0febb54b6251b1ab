/// Board, units and move generation.
pub mod chess;
/// Registry of live sessions.
pub mod directory;
/// Player identities and team preferences.
pub mod player;
/// The per-game turn engine.
pub mod session;
/// Assorted utilities.
pub mod util;
/// Votes and plurality counting.
pub mod vote;
