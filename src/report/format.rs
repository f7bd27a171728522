//! Terminal output for a finished run.

use std::path::Path;

use crate::report::RunStats;

/// Format the post-run summary printed by the binary.
pub fn format_run_summary(artifact: &Path, stats: &RunStats) -> String {
    let mut out = String::new();

    out.push_str("=== lqr - price vs. liquidity report ===\n");
    out.push_str(&format!("Saved: {}\n", artifact.display()));

    match (stats.oldest, stats.newest) {
        (Some(oldest), Some(newest)) => {
            out.push_str(&format!("Dates: {oldest} .. {newest} ({} rows)\n", stats.rows));
        }
        _ => out.push_str("Dates: none (no price data)\n"),
    }

    out.push_str(&format!(
        "Liquidity: observed={} interpolated={} absent={}\n",
        stats.observed, stats.interpolated, stats.absent
    ));

    out
}
