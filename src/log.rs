use std::io::Write;
use std::time::Instant;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Initialises the global logger writing to stderr; lines are prefixed with the seconds elapsed
/// since initialisation. Repeated calls are ignored.
pub fn build_logger_for_level(level: LevelFilter) {
    let start = Instant::now();

    let _ = Builder::new()
        .filter_level(level)
        .target(Target::Stderr)
        .format(move |buf, record| {
            writeln!(
                buf,
                "[{:>8.3}s {:<5}] {}",
                start.elapsed().as_secs_f64(),
                record.level(),
                record.args()
            )
        })
        .try_init();
}

/// `verbosity` raises `base` by one level per step, e.g. from the number of `-v` flags
pub fn build_logger_for_verbosity(base: LevelFilter, verbosity: usize) {
    let level = LevelFilter::iter()
        .skip_while(|l| *l != base)
        .nth(verbosity)
        .unwrap_or(LevelFilter::Trace);
    build_logger_for_level(level);
}
