//! Extraction of timing and memory metrics from timing tool output

use crate::platform::Platform;
use regex::Regex;
use std::collections::BTreeMap;

/// Metric reported by the timing tool
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Metric {
    /// Wall-clock duration of the run
    ///
    /// In seconds with two decimals on macOS, but carried as the timing
    /// tool's raw `h:mm:ss` or `m:ss` text on Linux.
    RealTime,

    /// CPU time spent in user mode, in seconds
    UserTime,

    /// CPU time spent in kernel mode, in seconds
    SystemTime,

    /// Peak resident set size, in megabytes
    MemoryMb,

    /// Share of a CPU that the run got, in percent
    CpuPercent,
}
//
impl Metric {
    /// Every metric, in display order
    pub const ALL: [Metric; 5] = [
        Self::RealTime,
        Self::UserTime,
        Self::SystemTime,
        Self::MemoryMb,
        Self::CpuPercent,
    ];

    /// Machine-friendly metric name
    pub fn key(self) -> &'static str {
        match self {
            Self::RealTime => "real_time",
            Self::UserTime => "user_time",
            Self::SystemTime => "system_time",
            Self::MemoryMb => "memory_mb",
            Self::CpuPercent => "cpu_percent",
        }
    }
}

/// Normalized metrics from the timing tool
///
/// Every metric is either a validly parsed value or absent. Absence means that
/// the timing tool output did not contain the metric, which is not an error.
///
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TimeMetrics(BTreeMap<Metric, Box<str>>);
//
impl TimeMetrics {
    /// Extract metrics from the timing section of a telemetry log
    pub fn parse(timing_section: &str, platform: Platform) -> Self {
        let mut metrics = BTreeMap::new();
        for rule in platform.metric_patterns() {
            let regex = Regex::new(rule.pattern).expect("Metric patterns should be valid regexes");
            let Some(raw) = regex.captures(timing_section).and_then(|c| c.get(1)) else {
                log::debug!("No {} found in {platform} timing output", rule.metric.key());
                continue;
            };
            match rule.conversion.apply(raw.as_str()) {
                Some(value) => {
                    metrics.insert(rule.metric, value);
                }
                None => log::warn!(
                    "Ignoring unparseable {} value {:?}",
                    rule.metric.key(),
                    raw.as_str()
                ),
            }
        }
        Self(metrics)
    }

    /// Value of a metric, if it was found
    pub fn get(&self, metric: Metric) -> Option<&str> {
        self.0.get(&metric).map(|value| &**value)
    }

    /// Iterate over the metrics that were found, in display order
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &str)> + '_ {
        self.0.iter().map(|(metric, value)| (*metric, &**value))
    }

    /// Truth that no metric was found
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
//
impl FromIterator<(Metric, Box<str>)> for TimeMetrics {
    fn from_iter<I: IntoIterator<Item = (Metric, Box<str>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
