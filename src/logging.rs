#![cfg(feature = "std")]

use std::env;
use std::io::Write;

use log::{LevelFilter, Metadata, Record};

/// Writes `LEVEL target - message` lines to stderr so they never mix with
/// the board printed on stdout.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr().lock(),
                "{:<5} {} - {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Level named by `MIDWAY_LOG`, or `fallback` when unset or unparsable.
pub fn level_from_env(fallback: LevelFilter) -> LevelFilter {
    env::var("MIDWAY_LOG")
        .ok()
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(fallback)
}

/// Initialize logging with a level taken from the `MIDWAY_LOG` environment
/// variable, defaulting to `info`. Calling it twice is harmless.
pub fn init_logging() {
    let level = level_from_env(LevelFilter::Info);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
