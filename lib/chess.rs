mod board;
mod file;
mod r#move;
mod moves;
mod rank;
mod role;
mod roster;
mod square;
mod team;
mod unit;

pub use board::*;
pub use file::*;
pub use r#move::*;
pub use rank::*;
pub use role::*;
pub use roster::*;
pub use square::*;
pub use team::*;
pub use unit::*;
