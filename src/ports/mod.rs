//! Ports (trait boundaries) between the decision core and its collaborators.
//!
//! The bot never reads input or renders output itself. Whoever supplies the
//! opponent's moves implements [`Player`]; whoever consumes round results
//! implements [`Observer`].

pub mod observer;
pub mod player;

pub use observer::Observer;
pub use player::Player;
