//! Operating systems whose timing tool output can be understood
//!
//! Each platform is described by a table of extraction rules, so supporting a
//! new timing tool means adding a table rather than new parsing logic.

use crate::{metrics::Metric, FormatError};
use std::{fmt, str::FromStr};

/// Operating system that the measured run happened on
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Platform {
    /// macOS, measured with BSD `time -l`
    Darwin,

    /// Linux, measured with GNU `time -v`
    Linux,
}
//
impl Platform {
    /// Extraction rules for this platform's timing tool
    pub(crate) fn metric_patterns(self) -> &'static [MetricPattern] {
        match self {
            Self::Darwin => &DARWIN_PATTERNS,
            Self::Linux => &LINUX_PATTERNS,
        }
    }

    /// Platform tag, as reported by `uname -s`
    pub fn tag(self) -> &'static str {
        match self {
            Self::Darwin => "Darwin",
            Self::Linux => "Linux",
        }
    }
}
//
impl FromStr for Platform {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Darwin" => Ok(Self::Darwin),
            "Linux" => Ok(Self::Linux),
            other => Err(FormatError::UnsupportedPlatform(other.into())),
        }
    }
}
//
impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Rule for extracting one metric from timing tool output
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MetricPattern {
    /// Metric that this rule extracts
    pub metric: Metric,

    /// Regex whose first capture group is the raw value
    pub pattern: &'static str,

    /// Normalization applied to the raw value
    pub conversion: Conversion,
}

/// Normalization from a timing tool's raw value to a displayed value
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Conversion {
    /// Value is kept exactly as it was matched
    Raw,

    /// Value is a number of seconds, printed with two decimals
    Seconds,

    /// Value is a number of bytes, printed as megabytes with two decimals
    BytesToMegabytes,

    /// Value is a number of kibibytes, printed as megabytes with two decimals
    KibibytesToMegabytes,
}
//
impl Conversion {
    /// Normalize a raw value, or return None if it is not a valid number
    pub fn apply(self, raw: &str) -> Option<Box<str>> {
        let scale = match self {
            Self::Raw => return Some(raw.into()),
            Self::Seconds => 1.0,
            Self::BytesToMegabytes => 1024.0 * 1024.0,
            Self::KibibytesToMegabytes => 1024.0,
        };
        let value = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(format!("{:.2}", value / scale).into())
    }
}

/// Number with an optional fractional part
macro_rules! decimal {
    () => {
        r"(\d+(?:\.\d+)?)"
    };
}

static DARWIN_PATTERNS: [MetricPattern; 5] = [
    MetricPattern {
        metric: Metric::RealTime,
        pattern: concat!(decimal!(), r"\s+real\b"),
        conversion: Conversion::Seconds,
    },
    MetricPattern {
        metric: Metric::UserTime,
        pattern: concat!(decimal!(), r"\s+user\b"),
        conversion: Conversion::Seconds,
    },
    MetricPattern {
        metric: Metric::SystemTime,
        pattern: concat!(decimal!(), r"\s+sys\b"),
        conversion: Conversion::Seconds,
    },
    MetricPattern {
        metric: Metric::MemoryMb,
        pattern: r"(\d+)\s+maximum resident set size",
        conversion: Conversion::BytesToMegabytes,
    },
    MetricPattern {
        metric: Metric::CpuPercent,
        pattern: r"(\d+)%\s+cpu\b",
        conversion: Conversion::Raw,
    },
];

static LINUX_PATTERNS: [MetricPattern; 5] = [
    MetricPattern {
        metric: Metric::RealTime,
        pattern: r"Elapsed \(wall clock\) time \(h:mm:ss or m:ss\):\s*(\d+(?::\d+){1,2}(?:\.\d+)?)",
        conversion: Conversion::Raw,
    },
    MetricPattern {
        metric: Metric::UserTime,
        pattern: concat!(r"User time \(seconds\):\s*", decimal!()),
        conversion: Conversion::Seconds,
    },
    MetricPattern {
        metric: Metric::SystemTime,
        pattern: concat!(r"System time \(seconds\):\s*", decimal!()),
        conversion: Conversion::Seconds,
    },
    MetricPattern {
        metric: Metric::MemoryMb,
        pattern: r"Maximum resident set size \(kbytes\):\s*(\d+)",
        conversion: Conversion::KibibytesToMegabytes,
    },
    MetricPattern {
        metric: Metric::CpuPercent,
        pattern: r"Percent of CPU this job got:\s*(\d+)%",
        conversion: Conversion::Raw,
    },
];
