//! Simulate command - Bot against scripted opponents, over one or many matches

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::{
    agent::EntropyBot,
    cli::{
        config::BotArgs,
        output::{
            create_simulation_progress, format_number, format_percent, print_kv,
            print_move_breakdown, print_section, print_stats_table, print_subsection,
        },
    },
    pipeline::{
        CsvObserver, JsonlObserver, MatchConfig, MatchPipeline, MatchResult, ProgressObserver,
    },
    players::PlayerKind,
    rps::MOVE_COUNT,
};

#[derive(Parser, Debug)]
#[command(about = "Simulate matches between the bot and a scripted opponent")]
pub struct SimulateArgs {
    /// Opponent to play against (random, copycat, cyclic, entropy)
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: PlayerKind,

    /// Rounds per match
    #[arg(long, short = 'r', default_value_t = 100)]
    pub rounds: usize,

    /// Number of independent matches
    #[arg(long, short = 'm', default_value_t = 1)]
    pub matches: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write every round as JSON Lines (one file per match when `--matches` > 1)
    #[arg(long)]
    pub jsonl: Option<PathBuf>,

    /// Write every round as CSV (one file per match when `--matches` > 1)
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Export the aggregated results as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Hide progress bars
    #[arg(long)]
    pub quiet: bool,

    #[command(flatten)]
    pub bot: BotArgs,
}

/// Aggregate over every simulated match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub opponent: PlayerKind,
    pub rounds_per_match: usize,
    pub matches: Vec<MatchResult>,
    pub bot_wins: usize,
    pub opponent_wins: usize,
    pub ties: usize,
    pub matches_won: usize,
    pub matches_lost: usize,
    pub mean_win_rate: f64,
    pub bot_moves: [usize; MOVE_COUNT],
    pub opponent_moves: [usize; MOVE_COUNT],
}

impl SimulationSummary {
    pub fn new(opponent: PlayerKind, rounds_per_match: usize, matches: Vec<MatchResult>) -> Self {
        let mut bot_moves = [0; MOVE_COUNT];
        let mut opponent_moves = [0; MOVE_COUNT];
        for result in &matches {
            for idx in 0..MOVE_COUNT {
                bot_moves[idx] += result.bot_moves[idx];
                opponent_moves[idx] += result.opponent_moves[idx];
            }
        }
        let mean_win_rate = if matches.is_empty() {
            0.0
        } else {
            matches.iter().map(|r| r.win_rate).sum::<f64>() / matches.len() as f64
        };

        Self {
            opponent,
            rounds_per_match,
            bot_wins: matches.iter().map(|r| r.bot_wins).sum(),
            opponent_wins: matches.iter().map(|r| r.opponent_wins).sum(),
            ties: matches.iter().map(|r| r.ties).sum(),
            matches_won: matches.iter().filter(|r| r.margin() > 0).count(),
            matches_lost: matches.iter().filter(|r| r.margin() < 0).count(),
            mean_win_rate,
            bot_moves,
            opponent_moves,
            matches,
        }
    }

    pub fn total_rounds(&self) -> usize {
        self.bot_wins + self.opponent_wins + self.ties
    }
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    if args.matches == 0 {
        return Err(anyhow!("--matches must be at least 1"));
    }
    if args.opponent.is_interactive() {
        return Err(anyhow!(
            "'{}' needs a person at the keyboard; use `rps play` instead",
            args.opponent
        ));
    }

    println!(
        "Simulating {} match(es) of {} rounds against {}",
        args.matches, args.rounds, args.opponent
    );

    let multi = if args.matches > 1 && !args.quiet {
        Some(create_simulation_progress(args.matches as u64)?)
    } else {
        None
    };

    let mut results = Vec::with_capacity(args.matches);
    for match_idx in 0..args.matches {
        // Each match gets its own seed pair: bot on even offsets, opponent on odd
        let seed = args
            .seed
            .map(|seed| seed.wrapping_add(2 * match_idx as u64));

        let config = args.bot.resolve(seed)?;
        let mut bot = EntropyBot::new(args.rounds, config)?;
        let mut opponent = args
            .opponent
            .into_boxed_player(args.rounds, seed.map(|s| s.wrapping_add(1)))?;

        let mut match_config = MatchConfig::new(args.rounds);
        match_config.seed = seed;
        let mut pipeline = MatchPipeline::new(match_config);

        if multi.is_none() && !args.quiet {
            pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
        }
        if let Some(path) = &args.jsonl {
            let path = per_match_path(path, match_idx, args.matches);
            let observer = JsonlObserver::new(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            pipeline = pipeline.with_observer(Box::new(observer));
        }
        if let Some(path) = &args.csv {
            let path = per_match_path(path, match_idx, args.matches);
            let observer =
                CsvObserver::new(&path).with_context(|| format!("creating {}", path.display()))?;
            pipeline = pipeline.with_observer(Box::new(observer));
        }

        let result = pipeline.run(&mut bot, opponent.as_mut())?;

        if let Some(pb) = &multi {
            pb.inc(1);
            pb.set_message(format!("last win rate {}", format_percent(result.win_rate)));
        }
        results.push(result);
    }
    if let Some(pb) = &multi {
        pb.finish();
    }

    let summary = SimulationSummary::new(args.opponent, args.rounds, results);
    print_summary(&summary);

    if let Some(path) = &args.export {
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary)?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}

fn print_summary(summary: &SimulationSummary) {
    print_section("Simulation Results");

    let total = summary.total_rounds();
    let rate = |count: usize| {
        if total > 0 {
            format_percent(count as f64 / total as f64)
        } else {
            format_percent(0.0)
        }
    };
    let matches = format_number(summary.matches.len());
    let rounds = format_number(total);
    let bot = format!("{} ({})", summary.bot_wins, rate(summary.bot_wins));
    let opponent = format!("{} ({})", summary.opponent_wins, rate(summary.opponent_wins));
    let ties = format!("{} ({})", summary.ties, rate(summary.ties));
    let mean = format_percent(summary.mean_win_rate);
    print_stats_table(&[
        ("Matches", matches.as_str()),
        ("Rounds", rounds.as_str()),
        ("Bot wins", bot.as_str()),
        ("Opponent wins", opponent.as_str()),
        ("Ties", ties.as_str()),
        ("Mean win rate", mean.as_str()),
    ]);

    if summary.matches.len() > 1 {
        print_kv(
            "Matches won/lost",
            &format!("{}/{}", summary.matches_won, summary.matches_lost),
        );
    }

    print_subsection("Opponent moves");
    print_move_breakdown(&summary.opponent_moves);
    print_subsection("Bot moves");
    print_move_breakdown(&summary.bot_moves);

    if let Some(last) = summary.matches.last() {
        let diag = &last.final_diagnostics;
        print_subsection("Final beliefs (last match)");
        print_kv(
            "Probabilities",
            &format!(
                "R={:.3} P={:.3} S={:.3}",
                diag.probs[0], diag.probs[1], diag.probs[2]
            ),
        );
        print_kv(
            "Entropy",
            &format!("{:.3} / {:.3} bits", diag.entropy, diag.max_entropy),
        );
        print_kv("Window", &format!("k={}", diag.window_len));
    }
}

/// `base` for a single match, otherwise `base` with `-<n>` before the extension.
fn per_match_path(base: &Path, match_idx: usize, matches: usize) -> PathBuf {
    if matches <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}-{}.{}", match_idx + 1, ext.to_string_lossy()),
        None => format!("{stem}-{}", match_idx + 1),
    };
    base.with_file_name(name)
}
