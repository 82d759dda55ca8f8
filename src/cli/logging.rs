//! Logging setup
//!
//! Scripts go to stdout, so every log line goes to stderr.

use tracing::level_filters::LevelFilter;

/// Verbosity levels selected by the global flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Verbosity {
    /// Most detailed level that still gets logged
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Silent => LevelFilter::OFF,
            Verbosity::Quiet => LevelFilter::ERROR,
            Verbosity::Normal => LevelFilter::INFO,
            Verbosity::Verbose => LevelFilter::DEBUG,
        }
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(verbosity.level_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
