//! Minimal stderr logger behind the `log` facade.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable that overrides the log level (`error` .. `trace`).
pub const LOG_ENV_VAR: &str = "PIXELSPRITE_LOG";

static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{timestamp} {:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Resolve the level: explicit env override, else `debug` when verbose,
/// else `warn`.
#[must_use]
pub fn level_for(verbose: bool, env_override: Option<&str>) -> LevelFilter {
    if let Some(level) = env_override.and_then(|v| v.trim().parse::<LevelFilter>().ok()) {
        return level;
    }
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the logger. Safe to call more than once; later calls only adjust
/// the level.
pub fn init(verbose: bool) {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let level = level_for(verbose, env.as_deref());
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("Logger already installed");
    }
    log::set_max_level(level);
    log::debug!("Log level set to {level}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_warn() {
        assert_eq!(level_for(false, None), LevelFilter::Warn);
    }

    #[test]
    fn verbose_is_debug() {
        assert_eq!(level_for(true, None), LevelFilter::Debug);
    }

    #[test]
    fn env_override_wins() {
        assert_eq!(level_for(true, Some("error")), LevelFilter::Error);
        assert_eq!(level_for(false, Some(" TRACE ")), LevelFilter::Trace);
    }

    #[test]
    fn bad_env_override_ignored() {
        assert_eq!(level_for(false, Some("loud")), LevelFilter::Warn);
    }
}
