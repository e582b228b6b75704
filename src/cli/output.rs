//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::rps::{MOVE_COUNT, Move};

/// Create a progress bar spanning several matches
pub fn create_simulation_progress(total_matches: u64) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(total_matches);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} matches ({msg})")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate in [0, 1] as a percentage
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, &str)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Print how often each move was thrown
pub fn print_move_breakdown(counts: &[usize; MOVE_COUNT]) {
    let total: usize = counts.iter().sum();
    for mv in Move::ALL {
        let count = counts[mv.index()];
        let share = if total > 0 {
            count as f64 / total as f64
        } else {
            0.0
        };
        print_kv(&mv.to_string(), &format!("{count} ({})", format_percent(share)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_thousands() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn formats_percentages() {
        assert_eq!(format_percent(0.5), "50.0%");
        assert_eq!(format_percent(1.0 / 3.0), "33.3%");
    }
}
