/*!
 * Status output on standard error.
 *
 * Every component reports through the `log` macros. The installed
 * [`StatusLogger`] decorates each record according to the [`OutputStyle`]
 * picked once at startup: ANSI colors for terminals, `<pre>` blocks for
 * HTML consumers, or nothing at all.
 */

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

/// How status lines are decorated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// Undecorated text
    Plain,
    /// ANSI colors
    #[default]
    Color,
    /// HTML `<pre>` blocks
    Html,
}

/// Severity of a status line as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warn,
    Error,
}

impl Tone {
    // @returns: Tone used for a log level
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::Error => Self::Error,
            Level::Warn => Self::Warn,
            Level::Info => Self::Success,
            Level::Debug | Level::Trace => Self::Info,
        }
    }
}

impl OutputStyle {
    /// Pick the style from the `--no-color` and `--html` flags
    pub fn from_flags(no_color: bool, html: bool) -> Self {
        if html {
            Self::Html
        } else if no_color {
            Self::Plain
        } else {
            Self::Color
        }
    }

    // @returns: Opening decoration for a tone
    pub fn open(&self, tone: Tone) -> &'static str {
        match (self, tone) {
            (Self::Plain, _) => "",
            (Self::Color, Tone::Info) => "\x1B[1;37m",
            (Self::Color, Tone::Success) => "\x1B[1;32m",
            (Self::Color, Tone::Warn) => "\x1B[1;33m",
            (Self::Color, Tone::Error) => "\x1B[1;31m",
            (Self::Html, Tone::Info) => "<pre style=\"color:#aaa\">",
            (Self::Html, Tone::Success) => "<pre style=\"color:green;background:#eee\">",
            (Self::Html, Tone::Warn) => "<pre style=\"color:orange\">",
            (Self::Html, Tone::Error) => "<pre style=\"color:white;background:red\">",
        }
    }

    // @returns: Closing decoration
    pub fn close(&self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Color => "\x1B[0;39m",
            Self::Html => "</pre>",
        }
    }

    /// Decorate a message with the given tone
    pub fn paint(&self, tone: Tone, msg: &str) -> String {
        format!("{}{}{}", self.open(tone), msg, self.close())
    }

    /// Text written before any status line
    pub fn preamble(&self) -> Option<&'static str> {
        match self {
            Self::Html => Some("<body style=\"background:#333;color:#fff;font-size:16px\">"),
            _ => None,
        }
    }

    /// Text written after the last status line
    pub fn postamble(&self) -> Option<&'static str> {
        match self {
            Self::Html => Some("</body>"),
            _ => None,
        }
    }
}

/// Log level for the `--debug` and `--verbose` flags
pub fn level_for_flags(debug: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Trace
    } else if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

// @struct: Logger writing styled status lines to stderr
pub struct StatusLogger {
    level: LevelFilter,
    style: OutputStyle,
}

impl StatusLogger {
    // @creates: New logger with specified level and style
    pub fn new(level: LevelFilter, style: OutputStyle) -> Self {
        StatusLogger { level, style }
    }

    // @initializes: Global logger
    pub fn init(level: LevelFilter, style: OutputStyle) -> Result<(), SetLoggerError> {
        let logger = Box::new(StatusLogger::new(level, style));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    /// Line written for a record
    pub fn format_record(&self, record: &Record) -> String {
        self.style
            .paint(Tone::for_level(record.level()), &record.args().to_string())
    }
}

impl Log for StatusLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}", self.format_record(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
