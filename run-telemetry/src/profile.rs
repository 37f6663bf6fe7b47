//! Analysis of cProfile statistics dumps

use crate::language::Language;
use std::ops::Deref;

/// Maximal number of functions kept in a ranked profile
pub const MAX_RANKED: usize = 5;

/// Column names which, when found on the same line, identify the profiler's
/// column header
const HEADER_MARKERS: [&str; 2] = ["ncalls", "tottime"];

/// Number of positional columns before the function name
const POSITIONAL_COLUMNS: usize = 4;

/// Profiling statistics for one function
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileRecord {
    /// Number of calls, possibly in `total/primitive` form for recursion
    pub ncalls: Box<str>,

    /// Time spent in the function itself, excluding callees, in seconds
    pub tottime: f64,

    /// Average `tottime` per call, as printed by the profiler
    pub percall: Box<str>,

    /// Time spent in the function including callees, as printed by the profiler
    pub cumtime: Box<str>,

    /// Everything after the positional columns, rejoined with single spaces
    pub function_name: Box<str>,
}
//
impl ProfileRecord {
    /// Parse a line of profiler output
    ///
    /// The first four whitespace-separated columns are positional and the
    /// remainder is the function name. Lines with fewer than five columns, or
    /// whose `tottime` column is not a number, are rejected.
    ///
    pub fn parse(line: &str) -> Option<Self> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        if tokens.len() <= POSITIONAL_COLUMNS {
            return None;
        }
        let tottime = tokens[1].parse::<f64>().ok().filter(|t| !t.is_nan())?;
        Some(Self {
            ncalls: tokens[0].into(),
            tottime,
            percall: tokens[2].into(),
            cumtime: tokens[3].into(),
            function_name: tokens[POSITIONAL_COLUMNS..].join(" ").into(),
        })
    }
}

/// Hottest functions of a profile, by decreasing self time
///
/// Holds at most [`MAX_RANKED`] records. Records with equal `tottime` keep
/// the order in which the profiler listed them.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankedProfile(Box<[ProfileRecord]>);
//
impl RankedProfile {
    /// Extract the hottest functions from the profiling section of a log
    ///
    /// An empty profile is returned if the language does not come with
    /// profiler output or if no profiler column header can be found.
    ///
    pub fn parse(profiling_section: &str, language: &Language) -> Self {
        if !language.supports_profiling() {
            log::debug!("{language} runs are not profiled, skipping profiler data");
            return Self::default();
        }

        let mut lines = profiling_section.lines();
        if !lines
            .by_ref()
            .any(|line| HEADER_MARKERS.iter().all(|marker| line.contains(marker)))
        {
            log::debug!("No profiler column header found");
            return Self::default();
        }

        let records = lines.filter_map(|line| {
            let record = ProfileRecord::parse(line);
            if record.is_none() && !line.trim().is_empty() {
                log::debug!("Discarding malformed profiler line {line:?}");
            }
            record
        });
        let ranked = Self::rank(records);
        log::debug!("Ranked {} profiler record(s)", ranked.len());
        ranked
    }

    /// Keep the hottest records by decreasing self time
    pub fn rank(records: impl IntoIterator<Item = ProfileRecord>) -> Self {
        let mut records = records.into_iter().collect::<Vec<_>>();
        records.sort_by(|r1, r2| r2.tottime.total_cmp(&r1.tottime));
        records.truncate(MAX_RANKED);
        Self(records.into_boxed_slice())
    }
}
//
impl Deref for RankedProfile {
    type Target = [ProfileRecord];

    fn deref(&self) -> &[ProfileRecord] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const HEADER: &str =
        "   ncalls  tottime  percall  cumtime  percall filename:lineno(function)";

    fn profile_of(body: &str) -> RankedProfile {
        RankedProfile::parse(
            &format!("\n         42 function calls in 0.100 seconds\n\n{HEADER}\n{body}"),
            &Language::Python,
        )
    }

    fn names(profile: &RankedProfile) -> Vec<&str> {
        profile.iter().map(|r| &*r.function_name).collect()
    }

    #[test]
    fn positional_columns() {
        assert_eq!(
            ProfileRecord::parse("10 0.050 0.005 0.060 0.006 mod.py:12(foo)"),
            Some(ProfileRecord {
                ncalls: "10".into(),
                tottime: 0.050,
                percall: "0.005".into(),
                cumtime: "0.060".into(),
                function_name: "0.006 mod.py:12(foo)".into(),
            })
        );
    }

    #[test]
    fn function_name_tail() {
        let record = ProfileRecord::parse("3/1  0.1  0.0  0.2  {built-in method   builtins.exec}")
            .unwrap();
        assert_eq!(&*record.ncalls, "3/1");
        assert_eq!(&*record.function_name, "{built-in method builtins.exec}");
    }

    #[test]
    fn shortest_valid_line() {
        let record = ProfileRecord::parse("1 0.1 0.1 0.1 f").unwrap();
        assert_eq!(record.tottime, 0.1);
        assert_eq!(&*record.function_name, "f");
    }

    #[test]
    fn malformed_lines() {
        assert_eq!(ProfileRecord::parse(""), None);
        assert_eq!(ProfileRecord::parse("1 0.1 0.1 0.1"), None);
        assert_eq!(ProfileRecord::parse("ncalls tottime percall cumtime fn"), None);
    }

    #[test]
    fn ranking() {
        let profile = profile_of(
            "1 0.010 0.010 0.500 0.500 a.py:1(a)
             2 0.300 0.150 0.300 0.150 a.py:2(b)

             garbage
             1 0.200 0.200 0.200 0.200 a.py:3(c)
             1 0.400 0.400 0.400 0.400 a.py:4(d)
             1 0.050 0.050 0.050 0.050 a.py:5(e)
             1 0.100 0.100 0.100 0.100 a.py:6(f)
             1 0.001 0.001 0.001 0.001 a.py:7(g)
",
        );
        assert_eq!(
            names(&profile),
            [
                "0.400 a.py:4(d)",
                "0.150 a.py:2(b)",
                "0.200 a.py:3(c)",
                "0.100 a.py:6(f)",
                "0.050 a.py:5(e)"
            ]
        );
    }

    #[test]
    fn ties_keep_profiler_order() {
        let profile = profile_of(
            "1 0.1 0 0 x first
             1 0.2 0 0 x second
             1 0.1 0 0 x third
",
        );
        assert_eq!(names(&profile), ["x second", "x first", "x third"]);
    }

    #[test]
    fn lines_before_header_are_ignored() {
        let profile = RankedProfile::parse(
            &format!("9 9.0 9.0 9.0 9.0 before.py:1(x)\n{HEADER}\n1 0.1 0.1 0.1 0.1 after.py:1(y)\n"),
            &Language::Python,
        );
        assert_eq!(names(&profile), ["0.1 after.py:1(y)"]);
    }

    #[test]
    fn no_header() {
        let profile = RankedProfile::parse(
            "1 0.1 0.1 0.1 0.1 a.py:1(a)\n",
            &Language::Python,
        );
        assert!(profile.is_empty());
        assert!(profile_of("").is_empty());
    }

    #[test]
    fn unprofiled_language() {
        let section = format!("{HEADER}\n1 0.1 0.1 0.1 0.1 a.py:1(a)\n");
        assert_eq!(
            RankedProfile::parse(&section, &Language::Python).len(),
            1
        );
        assert!(RankedProfile::parse(&section, &Language::Rust).is_empty());
        assert!(RankedProfile::parse(&section, &Language::Other("go".into())).is_empty());
    }

    proptest! {
        #[test]
        fn ranked_profile_invariants(
            rows in prop::collection::vec((0u32..100_000, "[a-z]{1,8}"), 0..20)
        ) {
            let body = rows
                .iter()
                .map(|(micros, name)| {
                    let tottime = f64::from(*micros) / 1e6;
                    format!("1 {tottime:.6} 0 0 0 {name}.py:1({name})\n")
                })
                .collect::<String>();
            let profile = profile_of(&body);
            prop_assert_eq!(profile.len(), rows.len().min(MAX_RANKED));
            for pair in profile.windows(2) {
                prop_assert!(pair[0].tottime >= pair[1].tottime);
            }
            let max = rows.iter().map(|(micros, _)| *micros).max();
            prop_assert_eq!(
                profile.first().map(|r| r.tottime),
                max.map(|micros| f64::from(micros) / 1e6)
            );
        }
    }
}
