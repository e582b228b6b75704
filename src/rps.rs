//! Rock/Paper/Scissors rules: the move alphabet and round scoring

pub mod moves;
pub mod outcome;

pub use moves::{MOVE_COUNT, Move};
pub use outcome::{RoundOutcome, Scoreboard};
