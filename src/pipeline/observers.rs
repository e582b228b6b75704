//! Observer pattern for match pipelines
//!
//! Observers allow composable data collection during a match without coupling
//! the match loop to specific output formats.

use std::{
    fs::File,
    io::{self, BufWriter, Stdout, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::session::{MatchResult, RoundRecord};
use crate::{
    Error, Result,
    policy::DecisionReason,
    ports::Observer,
    rps::{Move, RoundOutcome},
};

/// Progress bar observer - Shows match progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    ties: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            ties: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} T:{} L:{}", self.wins, self.ties, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_match_start(&mut self, total_rounds: usize, _bot: &str, _opponent: &str) -> Result<()> {
        let pb = ProgressBar::new(total_rounds as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rounds (W:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.wins = 0;
        self.ties = 0;
        self.losses = 0;
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_round_end(&mut self, record: &RoundRecord) -> Result<()> {
        match record.outcome {
            RoundOutcome::Win => self.wins += 1,
            RoundOutcome::Loss => self.losses += 1,
            RoundOutcome::Tie => self.ties += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(record.round as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_match_end(&mut self, _result: &MatchResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks match metrics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: usize,
    ties: usize,
    losses: usize,
    total_rounds: usize,
    warmup_rounds: usize,
    explore_rounds: usize,
    exploit_rounds: usize,
    entropy_sum: f64,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            count as f64 / self.total_rounds as f64
        }
    }

    /// Get current win rate
    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    /// Get current tie rate
    pub fn tie_rate(&self) -> f64 {
        self.rate(self.ties)
    }

    /// Get current loss rate
    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    /// Share of rounds decided by an exploration roll
    pub fn explore_rate(&self) -> f64 {
        self.rate(self.explore_rounds)
    }

    /// Average belief entropy after each round, in bits
    pub fn mean_entropy(&self) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            self.entropy_sum / self.total_rounds as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_rounds: self.total_rounds,
            wins: self.wins,
            ties: self.ties,
            losses: self.losses,
            win_rate: self.win_rate(),
            tie_rate: self.tie_rate(),
            loss_rate: self.loss_rate(),
            warmup_rounds: self.warmup_rounds,
            explore_rounds: self.explore_rounds,
            exploit_rounds: self.exploit_rounds,
            mean_entropy: self.mean_entropy(),
        }
    }
}

/// Summary of match metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_rounds: usize,
    pub wins: usize,
    pub ties: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub tie_rate: f64,
    pub loss_rate: f64,
    pub warmup_rounds: usize,
    pub explore_rounds: usize,
    pub exploit_rounds: usize,
    pub mean_entropy: f64,
}

impl Observer for MetricsObserver {
    fn on_round_end(&mut self, record: &RoundRecord) -> Result<()> {
        self.total_rounds += 1;
        match record.outcome {
            RoundOutcome::Win => self.wins += 1,
            RoundOutcome::Loss => self.losses += 1,
            RoundOutcome::Tie => self.ties += 1,
        }
        match record.reason {
            DecisionReason::Warmup => self.warmup_rounds += 1,
            DecisionReason::Explore => self.explore_rounds += 1,
            DecisionReason::Exploit => self.exploit_rounds += 1,
        }
        self.entropy_sum += record.diagnostics.entropy;
        Ok(())
    }
}

/// JSONL observer - Exports every round to JSON Lines format
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_round_end(&mut self, record: &RoundRecord) -> Result<()> {
        // One JSON object per line
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_match_end(&mut self, _result: &MatchResult) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Flat per-round row written by [`CsvObserver`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRow {
    pub round: usize,
    pub bot_move: char,
    pub opponent_move: char,
    pub outcome: RoundOutcome,
    pub reason: DecisionReason,
    pub exploration: f64,
    pub beta: Option<f64>,
    pub entropy: f64,
    pub p_rock: f64,
    pub p_paper: f64,
    pub p_scissors: f64,
    pub window_len: usize,
}

impl From<&RoundRecord> for CsvRow {
    fn from(record: &RoundRecord) -> Self {
        let probs = record.diagnostics.probs;
        Self {
            round: record.round,
            bot_move: record.bot_move.letter(),
            opponent_move: record.opponent_move.letter(),
            outcome: record.outcome,
            reason: record.reason,
            exploration: record.exploration,
            beta: record.beta,
            entropy: record.diagnostics.entropy,
            p_rock: probs[Move::Rock.index()],
            p_paper: probs[Move::Paper.index()],
            p_scissors: probs[Move::Scissors.index()],
            window_len: record.diagnostics.window_len,
        }
    }
}

/// CSV observer - One row per round for spreadsheet analysis
pub struct CsvObserver {
    writer: csv::Writer<File>,
}

impl CsvObserver {
    /// Create a new CSV observer; the header is written with the first row.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl Observer for CsvObserver {
    fn on_round_end(&mut self, record: &RoundRecord) -> Result<()> {
        self.writer.serialize(CsvRow::from(record))?;
        Ok(())
    }

    fn on_match_end(&mut self, _result: &MatchResult) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Console observer - Narrates each round for interactive play
pub struct ConsoleObserver<W> {
    output: W,
    show_beliefs: bool,
    opponent: String,
}

impl ConsoleObserver<Stdout> {
    /// Narrate to standard output.
    pub fn stdout(show_beliefs: bool) -> Self {
        Self::new(io::stdout(), show_beliefs)
    }
}

impl<W: Write + Send> ConsoleObserver<W> {
    pub fn new(output: W, show_beliefs: bool) -> Self {
        Self {
            output,
            show_beliefs,
            opponent: String::from("Opponent"),
        }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write + Send> Observer for ConsoleObserver<W> {
    fn on_match_start(&mut self, total_rounds: usize, bot: &str, opponent: &str) -> Result<()> {
        self.opponent = opponent.to_string();
        writeln!(self.output, "{bot} vs {opponent}: best of {total_rounds} rounds")?;
        Ok(())
    }

    fn on_round_end(&mut self, record: &RoundRecord) -> Result<()> {
        let verdict = match record.outcome {
            RoundOutcome::Win => "bot wins",
            RoundOutcome::Loss => "you win",
            RoundOutcome::Tie => "tie",
        };
        writeln!(
            self.output,
            "Round {}: {} played {}, bot played {} ({verdict})",
            record.round + 1,
            self.opponent,
            record.opponent_move,
            record.bot_move,
        )?;

        if self.show_beliefs {
            let diag = &record.diagnostics;
            let recent: String = diag.recent_window.iter().map(|mv| mv.letter()).collect();
            writeln!(
                self.output,
                "  beliefs R={:.3} P={:.3} S={:.3}  H={:.3}/{:.3} bits  eps={:.3}  beta={}",
                diag.probs[0],
                diag.probs[1],
                diag.probs[2],
                diag.entropy,
                diag.max_entropy,
                diag.exploration,
                diag.beta
                    .map_or_else(|| "-".to_string(), |beta| format!("{beta:.3}")),
            )?;
            writeln!(
                self.output,
                "  counts {:?}  recent [{recent}] ({}/{})  via {}",
                diag.real_counts,
                diag.recent_window.len(),
                diag.window_len,
                record.reason,
            )?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn on_match_end(&mut self, result: &MatchResult) -> Result<()> {
        writeln!(
            self.output,
            "Final score after {} rounds: bot {} - {} {} ({} ties)",
            result.rounds_played, result.bot_wins, result.opponent_wins, result.opponent, result.ties
        )?;
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BotConfig, EntropyBot};

    fn record(round: usize, bot_move: Move, opponent_move: Move) -> RoundRecord {
        let mut bot = EntropyBot::new(10, BotConfig::default().with_seed(1)).unwrap();
        bot.record_opponent_move(opponent_move);
        RoundRecord {
            round,
            bot_move,
            opponent_move,
            outcome: RoundOutcome::resolve(bot_move, opponent_move),
            reason: DecisionReason::Exploit,
            exploration: 0.2,
            beta: Some(1.0),
            diagnostics: bot.diagnostics(),
        }
    }

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();

        assert_eq!(observer.win_rate(), 0.0);

        observer.on_round_end(&record(0, Move::Paper, Move::Rock)).unwrap();
        observer.on_round_end(&record(1, Move::Rock, Move::Rock)).unwrap();
        observer.on_round_end(&record(2, Move::Scissors, Move::Paper)).unwrap();

        let summary = observer.summary();
        assert_eq!(summary.total_rounds, 3);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.ties, 1);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.exploit_rounds, 3);
        assert!((observer.win_rate() - 0.666).abs() < 0.01);
        assert!(observer.mean_entropy() > 0.0);
    }

    #[test]
    fn console_observer_narrates_rounds() {
        let mut observer = ConsoleObserver::new(Vec::new(), true);
        observer.on_match_start(3, "EntropyBot", "HumanPlayer").unwrap();
        observer.on_round_end(&record(0, Move::Paper, Move::Rock)).unwrap();

        let text = String::from_utf8(observer.into_inner()).unwrap();
        assert!(text.contains("Round 1: HumanPlayer played Rock, bot played Paper (bot wins)"));
        assert!(text.contains("beliefs R="));
        assert!(text.contains("recent [R]"));
    }
}
