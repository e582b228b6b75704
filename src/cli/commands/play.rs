//! Play command - A human at the terminal against the bot

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    agent::EntropyBot,
    cli::{
        config::BotArgs,
        output::{format_percent, print_kv, print_move_breakdown, print_section, print_stats_table},
    },
    pipeline::{ConsoleObserver, MatchConfig, MatchPipeline},
    players::HumanPlayer,
};

#[derive(Parser, Debug)]
#[command(about = "Play against the bot on the terminal")]
pub struct PlayArgs {
    /// Number of rounds
    #[arg(long, short = 'r', default_value_t = 15)]
    pub rounds: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the bot's beliefs after every round
    #[arg(long)]
    pub show_beliefs: bool,

    /// Save the match result as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub bot: BotArgs,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.bot.resolve(args.seed)?;
    let mut bot = EntropyBot::new(args.rounds, config)?;
    let mut human = HumanPlayer::stdio();

    let mut match_config = MatchConfig::new(args.rounds);
    match_config.seed = args.seed;
    let mut pipeline = MatchPipeline::new(match_config)
        .with_observer(Box::new(ConsoleObserver::stdout(args.show_beliefs)));

    let result = pipeline.run(&mut bot, &mut human)?;

    print_section("Final Score");
    let rounds = format!("{} / {}", result.rounds_played, result.total_rounds);
    let you = result.opponent_wins.to_string();
    let bot_wins = result.bot_wins.to_string();
    let ties = result.ties.to_string();
    let bot_rate = format_percent(result.win_rate);
    print_stats_table(&[
        ("Rounds", rounds.as_str()),
        ("You", you.as_str()),
        ("Bot", bot_wins.as_str()),
        ("Ties", ties.as_str()),
        ("Bot win rate", bot_rate.as_str()),
    ]);

    println!("\nYour moves:");
    print_move_breakdown(&result.opponent_moves);

    if result.opponent_wins > result.bot_wins {
        println!("\nYou beat the bot.");
    } else if result.opponent_wins < result.bot_wins {
        println!("\nThe bot won this time.");
    } else {
        println!("\nIt's a draw.");
    }

    if let Some(path) = &args.export {
        result.save(path)?;
        print_kv("Result saved to", &path.display().to_string());
    }

    Ok(())
}
