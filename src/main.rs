//! Readable reports from the telemetry of a measured run

#![deny(missing_docs)]

mod ui;

use clap::Parser;
use run_telemetry::{FormatError, Language, LoadError, Platform, Report, RunLog};
use std::{
    io,
    path::PathBuf,
    process::ExitCode,
};
use thiserror::Error;
use ui::{style::StyleTable, Renderer};

/// Turn the output of a timing tool (and optionally cProfile) into a report
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct CliArgs {
    /// Telemetry log produced by the measurement wrapper
    log_file: PathBuf,

    /// Operating system that the run was measured on ("Darwin" or "Linux")
    os_type: String,

    /// Language of the measured program ("python" enables the profiler table)
    language: String,

    /// Command line that was measured, displayed as-is
    command: String,
}

/// Maximal number of terminal columns used by the report
const MAX_COLS: u16 = 100;

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load the telemetry log, then print the report on stdout
fn run(args: CliArgs) -> Result<(), ReportError> {
    // Everything that can fail on bad input happens before any output
    let log = RunLog::load(&args.log_file)?;
    let platform = args.os_type.parse::<Platform>()?;
    let language = match args.language.parse::<Language>() {
        Ok(language) => language,
        Err(never) => match never {},
    };
    let report = Report::from_log(&log, platform, language, args.command);

    // Determine column budget and whether colors can be used
    let stdout = io::stdout();
    let styled = termion::is_tty(&stdout);
    let max_cols = termion::terminal_size()
        .map(|(width, _height)| width.min(MAX_COLS))
        .unwrap_or(MAX_COLS);
    log::debug!("Rendering {max_cols} columns wide, styled: {styled}");

    let mut renderer = Renderer::new(stdout.lock(), StyleTable::default(), styled, max_cols);
    renderer.render(&report).map_err(ReportError::Render)
}

/// Failure to produce a report
#[derive(Debug, Error)]
enum ReportError {
    /// The telemetry log could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The command line arguments do not describe a supported run
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The report could not be written out
    #[error("failed to write report ({0})")]
    Render(io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(log_file: impl Into<PathBuf>, os_type: &str) -> CliArgs {
        CliArgs {
            log_file: log_file.into(),
            os_type: os_type.to_owned(),
            language: "python".to_owned(),
            command: "python main.py".to_owned(),
        }
    }

    #[test]
    fn unsupported_platform() {
        let mut file = NamedTempFile::new().expect("Failed to create temporary file");
        writeln!(file, "1.23 real\n---PROFILER DATA---").expect("Failed to write telemetry log");
        assert_matches!(
            run(args(file.path(), "Windows_NT")),
            Err(ReportError::Format(FormatError::UnsupportedPlatform(tag))) if &*tag == "Windows_NT"
        );
    }

    #[test]
    fn load_errors() {
        assert_matches!(
            run(args("/nonexistent/telemetry.log", "Linux")),
            Err(ReportError::Load(LoadError::Io { .. }))
        );

        let mut file = NamedTempFile::new().expect("Failed to create temporary file");
        writeln!(file, "1.23 real").expect("Failed to write telemetry log");
        assert_matches!(
            run(args(file.path(), "Darwin")),
            Err(ReportError::Load(LoadError::Format(FormatError::MissingDelimiter { .. })))
        );
    }
}
