//! Scripted opponents used to exercise the bot in simulations

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Result, ports::Player, rps::Move};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Throws uniformly at random every round
#[derive(Debug)]
pub struct RandomPlayer {
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl RandomPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: build_rng(seed),
            rng_seed: seed,
        }
    }
}

impl Player for RandomPlayer {
    fn decide_move(&mut self, _round_index: usize) -> Result<Move> {
        Ok(Move::random(&mut self.rng))
    }

    fn name(&self) -> &str {
        "RandomBot"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        *self = Self::new(Some(seed));
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        *self = Self::new(self.rng_seed);
        Ok(())
    }
}

/// Opens at random, then repeats the last move its opponent threw
#[derive(Debug)]
pub struct CopyCatPlayer {
    rng: StdRng,
    rng_seed: Option<u64>,
    last_seen: Option<Move>,
}

impl CopyCatPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: build_rng(seed),
            rng_seed: seed,
            last_seen: None,
        }
    }
}

impl Player for CopyCatPlayer {
    fn decide_move(&mut self, _round_index: usize) -> Result<Move> {
        Ok(match self.last_seen {
            Some(mv) => mv,
            None => Move::random(&mut self.rng),
        })
    }

    fn observe_opponent_move(&mut self, opponent_move: Move) -> Result<()> {
        self.last_seen = Some(opponent_move);
        Ok(())
    }

    fn name(&self) -> &str {
        "CopyCatBot"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        *self = Self::new(self.rng_seed);
        Ok(())
    }
}

/// Shortest and longest cycle a [`CyclicPlayer`] may pick
pub const CYCLE_LEN_RANGE: std::ops::RangeInclusive<usize> = 4..=7;

/// Plays random moves for a few rounds, then replays them in a loop
///
/// The cycle length is drawn from [`CYCLE_LEN_RANGE`] when the player is
/// created or reseeded.
#[derive(Debug)]
pub struct CyclicPlayer {
    rng: StdRng,
    rng_seed: Option<u64>,
    cycle_len: usize,
    cycle: Vec<Move>,
    position: usize,
    scripted: bool,
}

impl CyclicPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = build_rng(seed);
        let cycle_len = rng.random_range(CYCLE_LEN_RANGE);
        Self {
            rng,
            rng_seed: seed,
            cycle_len,
            cycle: Vec::with_capacity(cycle_len),
            position: 0,
            scripted: false,
        }
    }

    /// Player that replays `cycle` from the first round on. Reseeding and
    /// resetting keep the cycle.
    ///
    /// An empty cycle degrades to random play while it records one.
    pub fn with_cycle(cycle: Vec<Move>) -> Self {
        let mut player = Self::new(None);
        if !cycle.is_empty() {
            player.cycle_len = cycle.len();
            player.cycle = cycle;
            player.scripted = true;
        }
        player
    }

    pub fn cycle_len(&self) -> usize {
        self.cycle_len
    }

    /// Moves recorded so far (the full cycle once recording is done).
    pub fn cycle(&self) -> &[Move] {
        &self.cycle
    }
}

impl Player for CyclicPlayer {
    fn decide_move(&mut self, _round_index: usize) -> Result<Move> {
        if self.cycle.len() < self.cycle_len {
            let mv = Move::random(&mut self.rng);
            self.cycle.push(mv);
            return Ok(mv);
        }
        let mv = self.cycle[self.position];
        self.position = (self.position + 1) % self.cycle.len();
        Ok(mv)
    }

    fn name(&self) -> &str {
        "CyclicBot"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        if self.scripted {
            self.rng = build_rng(Some(seed));
            self.rng_seed = Some(seed);
        } else {
            *self = Self::new(Some(seed));
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        if self.scripted {
            self.position = 0;
        } else {
            *self = Self::new(self.rng_seed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_player_is_reproducible() {
        let mut a = RandomPlayer::new(Some(5));
        let mut b = RandomPlayer::new(Some(5));
        for round in 0..30 {
            assert_eq!(a.decide_move(round).unwrap(), b.decide_move(round).unwrap());
        }
    }

    #[test]
    fn copycat_repeats_what_it_saw() {
        let mut player = CopyCatPlayer::new(Some(1));
        player.decide_move(0).unwrap();
        player.observe_opponent_move(Move::Scissors).unwrap();
        assert_eq!(player.decide_move(1).unwrap(), Move::Scissors);
        player.observe_opponent_move(Move::Paper).unwrap();
        assert_eq!(player.decide_move(2).unwrap(), Move::Paper);
    }

    #[test]
    fn cyclic_player_replays_its_opening() {
        let mut player = CyclicPlayer::new(Some(17));
        let len = player.cycle_len();
        assert!(CYCLE_LEN_RANGE.contains(&len));

        let moves: Vec<Move> = (0..len * 3)
            .map(|round| player.decide_move(round).unwrap())
            .collect();
        for (idx, mv) in moves.iter().enumerate() {
            assert_eq!(*mv, moves[idx % len], "round {idx} broke the cycle");
        }
    }

    #[test]
    fn explicit_cycle_is_used_verbatim() {
        let mut player = CyclicPlayer::with_cycle(vec![Move::Rock, Move::Rock, Move::Paper]);
        let moves: Vec<Move> = (0..6).map(|r| player.decide_move(r).unwrap()).collect();
        assert_eq!(
            moves,
            vec![
                Move::Rock,
                Move::Rock,
                Move::Paper,
                Move::Rock,
                Move::Rock,
                Move::Paper
            ]
        );
    }

    #[test]
    fn reseeding_keeps_an_explicit_cycle() {
        let mut player = CyclicPlayer::with_cycle(vec![Move::Scissors, Move::Paper]);
        player.decide_move(0).unwrap();
        player.set_rng_seed(3).unwrap();
        assert_eq!(player.cycle(), &[Move::Scissors, Move::Paper]);
        player.reset().unwrap();
        assert_eq!(player.decide_move(0).unwrap(), Move::Scissors);
    }
}
