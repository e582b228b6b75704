//! Window command - Show how the recency window scales with session length

use anyhow::Result;
use clap::Parser;

use crate::{
    beliefs::window::{LEGACY_WINDOW_CAP, recent_window_len, warmup_rounds, window_proportion},
    cli::output::{format_percent, print_section, print_stats_table},
};

#[derive(Parser, Debug)]
#[command(about = "Print the recency window length for a session length")]
pub struct WindowArgs {
    /// Planned number of rounds
    #[arg(allow_negative_numbers = true)]
    pub rounds: i64,

    /// Cap the window (the legacy bot used 50)
    #[arg(long)]
    pub cap: Option<usize>,
}

pub fn execute(args: WindowArgs) -> Result<()> {
    let k = recent_window_len(args.rounds, args.cap);
    let warmup = warmup_rounds(k);

    print_section(&format!("Recency window for {} rounds", args.rounds));
    let k_text = k.to_string();
    let warmup_text = warmup.to_string();
    let proportion = format_percent(window_proportion(args.rounds));
    let cap = args
        .cap
        .map_or_else(|| format!("none (legacy: {LEGACY_WINDOW_CAP})"), |c| c.to_string());
    print_stats_table(&[
        ("Window k", k_text.as_str()),
        ("Warm-up rounds", warmup_text.as_str()),
        ("Proportion", proportion.as_str()),
        ("Cap", cap.as_str()),
    ]);
    Ok(())
}
