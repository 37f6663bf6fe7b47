//! Visual styles of the report

use run_telemetry::Language;
use std::io;
use termion::{color, style};

/// How a piece of text should be painted on a color terminal
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Paint {
    /// Foreground color, as a 256-color palette index
    pub color: Option<u8>,

    /// Bold text
    pub bold: bool,

    /// Dimmed text
    pub faint: bool,
}
//
impl Paint {
    /// Unstyled text
    pub const PLAIN: Self = Self {
        color: None,
        bold: false,
        faint: false,
    };

    /// Text in a certain color
    pub const fn colored(color: u8) -> Self {
        Self {
            color: Some(color),
            bold: false,
            faint: false,
        }
    }

    /// Same paint, in bold
    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Same paint, dimmed
    pub const fn faint(self) -> Self {
        Self {
            faint: true,
            ..self
        }
    }

    /// Write some text with this paint
    ///
    /// When `styled` is false, the text is emitted without escape sequences.
    ///
    pub fn write(self, mut output: impl io::Write, text: &str, styled: bool) -> io::Result<()> {
        if !styled || self == Self::PLAIN {
            return write!(output, "{text}");
        }
        if self.bold {
            write!(output, "{}", style::Bold)?;
        }
        if self.faint {
            write!(output, "{}", style::Faint)?;
        }
        if let Some(value) = self.color {
            write!(output, "{}", color::Fg(color::AnsiValue(value)))?;
        }
        write!(output, "{text}{}", style::Reset)
    }
}

/// Per-language look of the report
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LanguageStyle {
    /// Glyph shown next to the language name in the header
    pub icon: &'static str,

    /// Color of panel borders and titles
    pub accent: Paint,
}

/// Closed table of per-language styles
///
/// Languages with a dedicated entry get their own look, everything else falls
/// back to a neutral default.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StyleTable {
    /// Style of Python reports
    pub python: LanguageStyle,

    /// Style of Rust reports
    pub rust: LanguageStyle,

    /// Style of reports for any other language
    pub default: LanguageStyle,
}
//
impl StyleTable {
    /// Style to be used for a certain language
    pub fn lookup(&self, language: &Language) -> LanguageStyle {
        match language {
            Language::Python => self.python,
            Language::Rust => self.rust,
            Language::Other(_) => self.default,
        }
    }
}
//
impl Default for StyleTable {
    fn default() -> Self {
        Self {
            python: LanguageStyle {
                icon: "🐍",
                accent: Paint::colored(220).bold(),
            },
            rust: LanguageStyle {
                icon: "🦀",
                accent: Paint::colored(208).bold(),
            },
            default: LanguageStyle {
                icon: "▶",
                accent: Paint::colored(250).bold(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(paint: Paint, styled: bool) -> String {
        let mut output = Vec::new();
        paint.write(&mut output, "text", styled).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn paint() {
        assert_eq!(painted(Paint::PLAIN, true), "text");
        assert_eq!(painted(Paint::colored(1).bold(), false), "text");
        assert_eq!(
            painted(Paint::colored(1).bold(), true),
            format!(
                "{}{}text{}",
                style::Bold,
                color::Fg(color::AnsiValue(1)),
                style::Reset
            )
        );
        assert_eq!(
            painted(Paint::PLAIN.faint(), true),
            format!("{}text{}", style::Faint, style::Reset)
        );
    }

    #[test]
    fn lookup() {
        let table = StyleTable::default();
        assert_eq!(table.lookup(&Language::Python), table.python);
        assert_eq!(table.lookup(&Language::Rust), table.rust);
        assert_eq!(table.lookup(&Language::Other("go".into())), table.default);
        assert_ne!(table.python, table.default);
        assert_ne!(table.rust, table.default);
    }
}
