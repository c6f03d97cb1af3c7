//! Replay epoch-processing conformance fixtures from the command line.

use beacon_spectest::{
    epoch_processing, locator,
    selection::{self, Selection},
    Operation, Suite,
};
use beacon_types::{ChainSpec, Fork};
use clap::{Arg, ArgAction, Command};
use std::{path::PathBuf, process::ExitCode};
use tracing::error;

/// Flag for verbose output
const VERBOSE_FLAG: &str = "verbose";

fn main() -> ExitCode {
    let matches = Command::new("beacon-spectest")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Replay epoch-processing conformance fixtures.")
        .arg(
            Arg::new(VERBOSE_FLAG)
                .short('v')
                .long(VERBOSE_FLAG)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("vectors")
                .long("vectors")
                .env(locator::VECTORS_ENV)
                .help("Root directory of the test vectors")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .default_value("minimal")
                .help("Configuration profile")
                .value_parser(ChainSpec::NAMES),
        )
        .arg(
            Arg::new("fork")
                .long("fork")
                .action(ArgAction::Append)
                .help("Protocol upgrade to replay (repeatable, default: all)")
                .value_parser(|s: &str| s.parse::<Fork>().map_err(|e| e.to_string())),
        )
        .arg(
            Arg::new("rule")
                .long("rule")
                .action(ArgAction::Append)
                .help("Epoch-processing rule to replay (repeatable, default: all)")
                .value_parser(|s: &str| {
                    epoch_processing::by_name(s)
                        .map(|op| op.rule)
                        .ok_or_else(|| format!("unknown rule: {s}"))
                }),
        )
        .arg(
            Arg::new("concurrency")
                .long("concurrency")
                .help("Maximum fixtures to replay at once (must be >= 1)")
                .value_parser(clap::builder::RangedU64ValueParser::<usize>::new().range(1..)),
        )
        .get_matches();

    // Create logger
    let level = if matches.get_flag(VERBOSE_FLAG) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // Configure suite
    let mut suite = Suite::default();
    if let Some(root) = matches.get_one::<PathBuf>("vectors") {
        suite = suite.with_root(root);
    }
    if let Some(concurrency) = matches.get_one::<usize>("concurrency") {
        suite = suite.with_concurrency(*concurrency);
    }
    let config = matches.get_one::<String>("config").unwrap();
    let forks: Vec<Fork> = matches
        .get_many::<Fork>("fork")
        .map(|forks| forks.copied().collect())
        .unwrap_or_default();
    let rules: Vec<&'static Operation> = matches
        .get_many::<&'static str>("rule")
        .map(|rules| rules.filter_map(|r| epoch_processing::by_name(r)).collect())
        .unwrap_or_default();

    // Run suites
    let summary = selection::run(&suite, &Selection::new(config, forks, rules));
    if summary.reports.is_empty() {
        error!(%config, "no suites ran");
    }
    if summary.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
