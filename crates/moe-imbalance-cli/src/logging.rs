//! Logging flags shared by the scoring subcommands.

use log::LevelFilter;
use stderrlog::{LogLevelNum, Timestamp};

/// Logging setup arg group.
///
/// Per-input failures are logged at `error`, so the default level keeps them
/// visible; `-v` raises it towards the per-sample `trace` lines.
#[derive(clap::Args, Debug, Default)]
pub struct LogArgs {
    /// Silence log messages, including per-input failures.
    #[arg(short, long)]
    pub quiet: bool,

    /// Raise verbosity (-v info, -vv debug, -vvv per-sample trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Enable timestamped logging.
    #[arg(short, long)]
    pub ts: bool,
}

impl LogArgs {
    /// The level filter selected by the flags.
    pub fn level_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Install the stderr logger.
    pub fn init(&self) -> Result<(), log::SetLoggerError> {
        let verbosity = match self.level_filter() {
            LevelFilter::Off => LogLevelNum::Off,
            LevelFilter::Error => LogLevelNum::Error,
            LevelFilter::Warn => LogLevelNum::Warn,
            LevelFilter::Info => LogLevelNum::Info,
            LevelFilter::Debug => LogLevelNum::Debug,
            LevelFilter::Trace => LogLevelNum::Trace,
        };

        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(verbosity)
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()
    }
}
