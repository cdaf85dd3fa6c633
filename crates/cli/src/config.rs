//! Runner settings: flags first, then `REBALANCE_*` environment variables.

use std::path::PathBuf;

use clap::Parser;

use rebalance_observability::LogFormat;
use rebalance_transfer::Strategy;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "rebalance",
    version,
    about = "Suggest store-to-store stock transfers from an inventory snapshot"
)]
pub struct Args {
    /// Inventory snapshot (CSV, one row per article/OM/site).
    #[arg(long, short = 'i', env = "REBALANCE_INPUT")]
    pub input: PathBuf,

    /// `conservative_a` (20% RF cap), `enhanced_b` (50% RF cap), or the cap itself.
    #[arg(
        long,
        short = 's',
        env = "REBALANCE_STRATEGY",
        default_value = "conservative_a"
    )]
    pub strategy: Strategy,

    /// Directory the suggestion CSV and JSON summary are written to.
    #[arg(long, short = 'o', env = "REBALANCE_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long, env = "REBALANCE_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_input_is_given() {
        let args = Args::try_parse_from(["rebalance", "--input", "snapshot.csv"]).unwrap();
        assert_eq!(args.input, PathBuf::from("snapshot.csv"));
        assert_eq!(args.strategy, Strategy::ConservativeA);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.log_format, LogFormat::Pretty);
    }

    #[test]
    fn strategy_accepts_names_and_cap_percentages() {
        let args = Args::try_parse_from(["rebalance", "-i", "x.csv", "-s", "50%"]).unwrap();
        assert_eq!(args.strategy, Strategy::EnhancedB);

        let args = Args::try_parse_from(["rebalance", "-i", "x.csv", "-s", "option_a"]).unwrap();
        assert_eq!(args.strategy, Strategy::ConservativeA);
    }

    #[test]
    fn unsupported_cap_is_rejected_at_parse_time() {
        let err = Args::try_parse_from(["rebalance", "-i", "x.csv", "-s", "30"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
