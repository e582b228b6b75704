//! Match pipeline pitting an [`EntropyBot`] against a [`Player`]

use std::{fs::File, path::Path};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    agent::{Diagnostics, EntropyBot},
    policy::DecisionReason,
    ports::{Observer, Player},
    rps::{MOVE_COUNT, Move, RoundOutcome, Scoreboard},
};

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of rounds to play
    pub rounds: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn new(rounds: usize) -> Self {
        Self {
            rounds,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Everything that happened in one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Zero-based round index
    pub round: usize,
    pub bot_move: Move,
    pub opponent_move: Move,
    /// Result from the bot's side
    pub outcome: RoundOutcome,
    /// Which branch produced the bot's move
    pub reason: DecisionReason,
    /// Exploration probability in effect when the bot chose
    pub exploration: f64,
    /// Softmax inverse temperature in effect when the bot chose
    pub beta: Option<f64>,
    /// Bot state after it saw the opponent's move
    pub diagnostics: Diagnostics,
}

/// Result of a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Bot name
    pub bot: String,

    /// Opponent name
    pub opponent: String,

    /// Rounds the match was configured for
    pub total_rounds: usize,

    /// Rounds actually played (fewer if the opponent ran out of input)
    pub rounds_played: usize,

    /// Rounds won by the bot
    pub bot_wins: usize,

    /// Rounds won by the opponent
    pub opponent_wins: usize,

    /// Tied rounds
    pub ties: usize,

    /// Bot win rate
    pub win_rate: f64,

    /// Bot loss rate
    pub loss_rate: f64,

    /// Tie rate
    pub tie_rate: f64,

    /// How often the bot threw each move
    pub bot_moves: [usize; MOVE_COUNT],

    /// How often the opponent threw each move
    pub opponent_moves: [usize; MOVE_COUNT],

    /// Bot state once the match ended
    pub final_diagnostics: Diagnostics,
}

impl MatchResult {
    /// Create a new match result
    pub fn new(
        bot: impl Into<String>,
        opponent: impl Into<String>,
        total_rounds: usize,
        scoreboard: &Scoreboard,
        final_diagnostics: Diagnostics,
    ) -> Self {
        let rounds_played = scoreboard.rounds();
        let rate = |count: usize| {
            if rounds_played > 0 {
                count as f64 / rounds_played as f64
            } else {
                0.0
            }
        };

        Self {
            bot: bot.into(),
            opponent: opponent.into(),
            total_rounds,
            rounds_played,
            bot_wins: scoreboard.bot_wins,
            opponent_wins: scoreboard.opponent_wins,
            ties: scoreboard.ties,
            win_rate: rate(scoreboard.bot_wins),
            loss_rate: rate(scoreboard.opponent_wins),
            tie_rate: rate(scoreboard.ties),
            bot_moves: scoreboard.bot_moves,
            opponent_moves: scoreboard.opponent_moves,
            final_diagnostics,
        }
    }

    /// Whether every configured round was played
    pub fn completed(&self) -> bool {
        self.rounds_played == self.total_rounds
    }

    /// Bot wins minus opponent wins
    pub fn margin(&self) -> i64 {
        self.bot_wins as i64 - self.opponent_wins as i64
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Match pipeline for a single bot against an opponent
pub struct MatchPipeline {
    config: MatchConfig,
    observers: Vec<Box<dyn Observer>>,
    scoreboard: Scoreboard,
}

impl MatchPipeline {
    /// Create a new match pipeline
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            scoreboard: Scoreboard::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Running tally of the current (or last) match
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Play the configured number of rounds.
    ///
    /// A player whose input closes ([`Error::InputClosed`]) ends the match
    /// early; the result then covers the rounds played so far.
    pub fn run(&mut self, bot: &mut EntropyBot, opponent: &mut dyn Player) -> Result<MatchResult> {
        self.seed_pair(bot, opponent)?;
        self.scoreboard = Scoreboard::new();

        if bot.total_rounds() != self.config.rounds {
            warn!(
                "bot was sized for {} rounds but the match has {}",
                bot.total_rounds(),
                self.config.rounds
            );
        }
        info!(
            "starting {} rounds: {} vs {}",
            self.config.rounds,
            bot.name(),
            opponent.name()
        );

        for observer in &mut self.observers {
            observer.on_match_start(self.config.rounds, bot.name(), opponent.name())?;
        }

        for round in 0..self.config.rounds {
            match self.play_round(round, bot, opponent) {
                Ok(_) => {}
                Err(Error::InputClosed { player }) => {
                    warn!("{player} stopped after {round} rounds");
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        let result = MatchResult::new(
            bot.name(),
            opponent.name(),
            self.config.rounds,
            &self.scoreboard,
            bot.diagnostics(),
        );

        for observer in &mut self.observers {
            observer.on_match_end(&result)?;
        }

        info!(
            "match over after {} rounds: {} {} - {} {} ({} ties)",
            result.rounds_played,
            result.bot,
            result.bot_wins,
            result.opponent_wins,
            result.opponent,
            result.ties
        );

        Ok(result)
    }

    /// Play a single round: both sides choose, the round is scored, each side
    /// sees the other's move, and observers are notified.
    pub fn play_round(
        &mut self,
        round: usize,
        bot: &mut EntropyBot,
        opponent: &mut dyn Player,
    ) -> Result<RoundRecord> {
        let decision = bot.decide(round);
        let opponent_move = opponent.decide_move(round)?;
        let outcome = self.scoreboard.record(decision.chosen, opponent_move);

        bot.record_opponent_move(opponent_move);
        opponent.observe_opponent_move(decision.chosen)?;

        let record = RoundRecord {
            round,
            bot_move: decision.chosen,
            opponent_move,
            outcome,
            reason: decision.reason,
            exploration: decision.estimate.exploration,
            beta: decision.estimate.beta,
            diagnostics: bot.diagnostics(),
        };

        for observer in &mut self.observers {
            observer.on_round_end(&record)?;
        }

        Ok(record)
    }

    fn seed_pair(&self, bot: &mut EntropyBot, opponent: &mut dyn Player) -> Result<()> {
        if let Some(seed) = self.config.seed {
            bot.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::BotConfig, players::RandomPlayer};

    #[test]
    fn test_match_pipeline() {
        let mut pipeline = MatchPipeline::new(MatchConfig::new(10).with_seed(42));
        let mut bot = EntropyBot::new(10, BotConfig::default()).unwrap();
        let mut opponent = RandomPlayer::new(None);

        let result = pipeline.run(&mut bot, &mut opponent).unwrap();

        assert_eq!(result.rounds_played, 10);
        assert!(result.completed());
        assert_eq!(result.bot_wins + result.opponent_wins + result.ties, 10);
        assert_eq!(result.final_diagnostics.real_counts.iter().sum::<u64>(), 10);
    }

    #[test]
    fn seeded_matches_repeat() {
        let play = || {
            let mut pipeline = MatchPipeline::new(MatchConfig::new(40).with_seed(7));
            let mut bot = EntropyBot::new(40, BotConfig::default()).unwrap();
            let mut opponent = RandomPlayer::new(None);
            pipeline.run(&mut bot, &mut opponent).unwrap()
        };
        let (a, b) = (play(), play());
        assert_eq!(a.bot_moves, b.bot_moves);
        assert_eq!(a.opponent_moves, b.opponent_moves);
        assert_eq!(a.bot_wins, b.bot_wins);
    }

    #[test]
    fn empty_result_has_zero_rates() {
        let bot = EntropyBot::new(0, BotConfig::default()).unwrap();
        let result = MatchResult::new("a", "b", 0, &Scoreboard::new(), bot.diagnostics());
        assert_eq!(result.win_rate, 0.0);
        assert_eq!(result.margin(), 0);
        assert!(result.completed());
    }
}
