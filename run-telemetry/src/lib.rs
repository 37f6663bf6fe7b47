//! Ergonomic representation of a measured run's telemetry log, with a
//! mechanism to load it and extract timing metrics and profiler hot spots.
//!
//! A telemetry log is the text produced by a measurement wrapper: the output of
//! the platform's `time` tool, a delimiter line, then (optionally) a cProfile
//! statistics dump. This crate turns that text into a [`Report`].

#![deny(missing_docs)]

mod language;
mod metrics;
mod platform;
mod profile;

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;

// Reexport types which appear in the public interface
pub use self::{
    language::Language,
    metrics::{Metric, TimeMetrics},
    platform::Platform,
    profile::{ProfileRecord, RankedProfile, MAX_RANKED},
};

/// Line separating the timing tool output from the profiler output
pub const PROFILER_DELIMITER: &str = "---PROFILER DATA---";

/// Telemetry log of one measured run, split into its two sections
#[derive(Clone, Debug, PartialEq)]
pub struct RunLog {
    /// Where the log was loaded from
    path: PathBuf,

    /// Full text of the log
    content: String,

    /// Byte offset of the delimiter within `content`
    delimiter_offset: usize,
}
//
impl RunLog {
    /// Load a telemetry log from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mut content = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut content))
            .map_err(|source| LoadError::Io {
                path: path.to_owned(),
                source,
            })?;
        Ok(Self::from_content(path, content)?)
    }

    /// Wrap log text that was acquired by other means
    pub fn from_content(path: impl Into<PathBuf>, content: String) -> Result<Self, FormatError> {
        let path = path.into();
        let Some(delimiter_offset) = content.find(PROFILER_DELIMITER) else {
            return Err(FormatError::MissingDelimiter { path });
        };
        log::debug!(
            "Loaded {} bytes of telemetry from {}, delimiter at byte {delimiter_offset}",
            content.len(),
            path.display()
        );
        Ok(Self {
            path,
            content,
            delimiter_offset,
        })
    }

    /// Location the log was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Output of the timing tool, everything before the delimiter
    pub fn timing_section(&self) -> &str {
        &self.content[..self.delimiter_offset]
    }

    /// Output of the profiler, everything after the delimiter
    pub fn profiling_section(&self) -> &str {
        &self.content[self.delimiter_offset + PROFILER_DELIMITER.len()..]
    }
}

/// Failure to load a telemetry log
#[derive(Debug, Error)]
pub enum LoadError {
    /// The log file could not be opened or read
    #[error("failed to read telemetry log {} ({source})", path.display())]
    Io {
        /// Path to the log file
        path: PathBuf,

        /// Underlying I/O error
        source: io::Error,
    },

    /// The log file was read, but is not a telemetry log
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Telemetry input that does not have the expected shape
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The delimiter between timing and profiler output is absent
    #[error("missing profiler delimiter {:?} in {}", PROFILER_DELIMITER, path.display())]
    MissingDelimiter {
        /// Path to the malformed log
        path: PathBuf,
    },

    /// The platform tag does not select any timing tool format
    #[error("unsupported platform tag {0:?} (expected \"Darwin\" or \"Linux\")")]
    UnsupportedPlatform(Box<str>),
}

/// Everything that is known about one measured run
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// Language of the measured program
    pub language: Language,

    /// Command line that was measured, as typed by the user
    pub command: Box<str>,

    /// Timing and memory metrics from the timing tool
    pub metrics: TimeMetrics,

    /// Hottest functions according to the profiler
    pub profile: RankedProfile,
}
//
impl Report {
    /// Extract a report from a previously loaded telemetry log
    pub fn from_log(
        log: &RunLog,
        platform: Platform,
        language: Language,
        command: impl Into<Box<str>>,
    ) -> Self {
        let metrics = TimeMetrics::parse(log.timing_section(), platform);
        let profile = RankedProfile::parse(log.profiling_section(), &language);
        Self {
            language,
            command: command.into(),
            metrics,
            profile,
        }
    }
}
