//! User interface module

mod display;
pub mod style;

use self::{
    display::{pad_left, pad_right, shorten},
    style::{LanguageStyle, Paint, StyleTable},
};
use run_telemetry::{Metric, ProfileRecord, Report, TimeMetrics};
use std::io;
use unicode_width::UnicodeWidthStr;

/// Placeholder for metrics that the timing tool did not report
pub const NOT_AVAILABLE: &str = "N/A";

/// Width of the rule separating the command from the metrics
pub const SEPARATOR_COLS: usize = 60;

/// Width of the numerical columns of the function table
const NUMBER_COLS: usize = 9;

/// Width of metric labels in the metrics panel
const LABEL_COLS: usize = 12;

/// Piece of text with a uniform paint
type Span = (String, Paint);

/// Report renderer
///
/// Writes styled reports to an output target. Styling is only emitted when
/// `styled` is set, so the same renderer can target terminals and pipes.
///
pub struct Renderer<W: io::Write> {
    /// Where the report is written
    output: W,

    /// Per-language styles
    styles: StyleTable,

    /// Truth that ANSI escape sequences should be emitted
    styled: bool,

    /// Terminal column budget
    max_cols: usize,
}
//
impl<W: io::Write> Renderer<W> {
    /// Set up a renderer
    pub fn new(output: W, styles: StyleTable, styled: bool, max_cols: u16) -> Self {
        Self {
            output,
            styles,
            styled,
            max_cols: usize::from(max_cols).max(8),
        }
    }

    /// Render a complete report
    pub fn render(&mut self, report: &Report) -> io::Result<()> {
        let style = self.styles.lookup(&report.language);
        self.header(report, style)?;
        self.metrics(&report.metrics, style)?;
        if report.language.supports_profiling() && !report.profile.is_empty() {
            self.function_table(&report.profile, style)?;
        }
        self.output.flush()
    }

    /// Language panel, followed by the command and a separator rule
    fn header(&mut self, report: &Report, style: LanguageStyle) -> io::Result<()> {
        let title = format!("{} {} telemetry", style.icon, report.language);
        let title = shorten(&title, self.max_cols - 4).into_owned();
        self.panel(None, &[vec![(title, style.accent)]], style.accent)?;

        self.write_span("$ ", Paint::PLAIN.faint())?;
        writeln!(self.output, "{}", report.command)?;
        let rule = "─".repeat(SEPARATOR_COLS.min(self.max_cols));
        self.write_span(&rule, Paint::PLAIN.faint())?;
        writeln!(self.output)
    }

    /// Panel of the core timing and memory metrics
    fn metrics(&mut self, metrics: &TimeMetrics, style: LanguageStyle) -> io::Result<()> {
        let value = |metric: Metric, unit: &str| match metrics.get(metric) {
            Some(v) if !v.contains(':') => format!("{v}{unit}"),
            Some(v) => v.to_owned(),
            None => NOT_AVAILABLE.to_owned(),
        };
        let label = |text: &str| (pad_right(text, LABEL_COLS), Paint::PLAIN.bold());
        let rows = [
            vec![
                label("Real time"),
                (value(Metric::RealTime, "s"), Paint::PLAIN),
            ],
            vec![
                label("User time"),
                (value(Metric::UserTime, "s"), Paint::PLAIN),
            ],
            vec![
                label("Peak memory"),
                (value(Metric::MemoryMb, " MB"), Paint::PLAIN),
            ],
            vec![(
                format!(
                    "sys {} · cpu {}",
                    value(Metric::SystemTime, "s"),
                    value(Metric::CpuPercent, "%")
                ),
                Paint::PLAIN.faint(),
            )],
        ];
        self.panel(Some("Core metrics"), &rows, style.accent)
    }

    /// Table of the hottest functions
    fn function_table(&mut self, profile: &[ProfileRecord], style: LanguageStyle) -> io::Result<()> {
        writeln!(self.output)?;
        self.write_span("Top functions by self time", style.accent)?;
        writeln!(self.output)?;

        let name_cols = self.max_cols.saturating_sub(3 * (NUMBER_COLS + 1) + 1).max(1);
        let header = format!(
            "{} {} {}  {}",
            pad_left("tottime", NUMBER_COLS),
            pad_left("percall", NUMBER_COLS),
            pad_left("cumtime", NUMBER_COLS),
            "function"
        );
        self.write_span(&header, Paint::PLAIN.bold())?;
        writeln!(self.output)?;

        for record in profile {
            write!(
                self.output,
                "{} {} {}  ",
                pad_left(&format!("{:.3}", record.tottime), NUMBER_COLS),
                pad_left(&record.percall, NUMBER_COLS),
                pad_left(&record.cumtime, NUMBER_COLS),
            )?;
            let name = shorten(&record.function_name, name_cols);
            self.write_span(&name, Paint::PLAIN)?;
            writeln!(self.output)?;
        }
        Ok(())
    }

    /// Rounded box around some rows of text, with an optional title
    ///
    /// Rows and title are shortened so that the panel fits the column budget.
    ///
    fn panel(&mut self, title: Option<&str>, rows: &[Vec<Span>], border: Paint) -> io::Result<()> {
        let max_inner_cols = self.max_cols - 4;
        let rows = rows
            .iter()
            .map(|row| fit_row(row, max_inner_cols))
            .collect::<Vec<_>>();
        let title = title.map(|t| shorten(t, max_inner_cols - 3));
        let title = title.as_deref();

        let row_cols = |row: &Vec<Span>| row.iter().map(|(text, _)| text.width()).sum::<usize>();
        let title_cols = title.map_or(0, |t| t.width() + 3);
        let inner_cols = rows
            .iter()
            .map(row_cols)
            .max()
            .unwrap_or(0)
            .max(title_cols);

        // Top border, possibly carrying the title
        self.write_span("╭─", border)?;
        let mut top_cols = 1;
        if let Some(title) = title {
            self.write_span(&format!(" {title} "), border)?;
            top_cols += title.width() + 2;
        }
        let top_fill = "─".repeat(inner_cols + 2 - top_cols);
        self.write_span(&format!("{top_fill}╮"), border)?;
        writeln!(self.output)?;

        // Content rows
        for row in &rows {
            self.write_span("│ ", border)?;
            for (text, paint) in row {
                self.write_span(text, *paint)?;
            }
            let padding = inner_cols - row_cols(row);
            write!(self.output, "{:padding$}", "")?;
            self.write_span(" │", border)?;
            writeln!(self.output)?;
        }

        // Bottom border
        let bottom = format!("╰{}╯", "─".repeat(inner_cols + 2));
        self.write_span(&bottom, border)?;
        writeln!(self.output)
    }

    /// Write some text with a certain paint
    fn write_span(&mut self, text: &str, paint: Paint) -> io::Result<()> {
        paint.write(&mut self.output, text, self.styled)
    }
}

/// Shorten the spans of a row so that it fits in `max_cols` columns
///
/// The first span that overflows is shortened and the following ones dropped.
///
fn fit_row(row: &[Span], max_cols: usize) -> Vec<Span> {
    let mut fitted = Vec::with_capacity(row.len());
    let mut remaining = max_cols;
    for (text, paint) in row {
        if text.width() <= remaining {
            remaining -= text.width();
            fitted.push((text.clone(), *paint));
        } else {
            fitted.push((shorten(text, remaining).into_owned(), *paint));
            break;
        }
    }
    fitted
}
