//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lifedash_core` linkage.
//! - Optionally print the analytics summary for a JSON file of time blocks.

use clap::Parser;
use lifedash_core::{summarize, AnalyticsConfig, TimeBlock};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "lifedash_cli", version, about = "Life dashboard core smoke check")]
struct Args {
    /// JSON array of time blocks to summarize
    blocks: Option<PathBuf>,

    /// Reference instant in Unix epoch milliseconds (defaults to now)
    #[arg(long, requires = "blocks", allow_negative_numbers = true)]
    as_of_ms: Option<i64>,

    /// Look-ahead for upcoming deadlines, in days
    #[arg(long, default_value_t = AnalyticsConfig::default().window_days)]
    window_days: u32,

    /// Maximum number of upcoming deadlines
    #[arg(long, default_value_t = AnalyticsConfig::default().deadline_limit)]
    deadline_limit: usize,
}

impl Args {
    fn analytics_config(&self) -> AnalyticsConfig {
        AnalyticsConfig {
            window_days: self.window_days,
            deadline_limit: self.deadline_limit,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    println!("lifedash_core ping={}", lifedash_core::ping());
    println!("lifedash_core version={}", lifedash_core::core_version());

    let Some(path) = args.blocks.as_deref() else {
        return ExitCode::SUCCESS;
    };
    let as_of_ms = args
        .as_of_ms
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

    match render_summary(path, as_of_ms, &args.analytics_config()) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("lifedash_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn render_summary(
    path: &Path,
    as_of_ms: i64,
    config: &AnalyticsConfig,
) -> Result<String, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read `{}`: {err}", path.display()))?;
    let blocks: Vec<TimeBlock> = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid blocks in `{}`: {err}", path.display()))?;
    let summary = summarize(&blocks, as_of_ms, config);
    serde_json::to_string_pretty(&summary).map_err(|err| format!("cannot render summary: {err}"))
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::{CommandFactory, Parser};

    #[test]
    fn argument_definitions_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn bare_invocation_uses_default_analytics_config() {
        let args = Args::try_parse_from(["lifedash_cli"]).expect("no args parse");
        assert!(args.blocks.is_none());
        assert_eq!(args.analytics_config().window_days, 30);
        assert_eq!(args.analytics_config().deadline_limit, 5);
    }

    #[test]
    fn parses_blocks_path_and_overrides() {
        let args = Args::try_parse_from([
            "lifedash_cli",
            "blocks.json",
            "--as-of-ms",
            "1717200000000",
            "--window-days",
            "7",
        ])
        .expect("full args parse");
        assert_eq!(args.as_of_ms, Some(1_717_200_000_000));
        assert_eq!(args.analytics_config().window_days, 7);
    }

    #[test]
    fn rejects_extra_positionals_and_bad_instants() {
        assert!(Args::try_parse_from(["lifedash_cli", "a.json", "b.json"]).is_err());
        assert!(Args::try_parse_from(["lifedash_cli", "a.json", "--as-of-ms", "soon"]).is_err());
        assert!(Args::try_parse_from(["lifedash_cli", "--as-of-ms", "0"]).is_err());
    }
}
