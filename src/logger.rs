//! Dual-sink leveled logger.
//!
//! A [`Logger`] writes every record twice: once to the console, rendering only
//! the message and coloring it per level, and once to a log file as
//! `"<timestamp> - <LEVEL> - <message>"`.  The file never carries escape
//! sequences.
//!
//! Colors are chosen from a [`ColorScheme`] or overridden per call with a
//! [`Style`].  Style names follow the common `"red"`, `"bold_red"`,
//! `"bg_white"` vocabulary and may be joined with commas (`"red,bg_white"`).

use std::env;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::error::{Error, Result};
use crate::observability::{LOGGER_LINES, LOGGER_WRITE_ERRORS};

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

//////////////////////////////////////////// Level ///////////////////////////////////////////

/// Severity of a log record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Diagnostic detail.
    Debug,
    /// Normal conversation output.
    Info,
    /// Something unexpected that does not stop the session.
    Warning,
    /// A failure.
    Error,
    /// A failure that ends the program.
    Critical,
}

impl Level {
    /// All levels, least severe first.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// The upper-case name written to the log file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            _ => Err(Error::invalid_level(s)),
        }
    }
}

//////////////////////////////////////////// Color ///////////////////////////////////////////

/// One of the eight basic terminal colors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
    Cyan,
    White,
}

impl Color {
    fn offset(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Purple => 5,
            Color::Cyan => 6,
            Color::White => 7,
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "black" => Ok(Color::Black),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "purple" | "magenta" => Ok(Color::Purple),
            "cyan" => Ok(Color::Cyan),
            "white" => Ok(Color::White),
            _ => Err(Error::configuration(format!("unknown color: {s}"))),
        }
    }
}

/// Console styling for one line: foreground, background, and weight.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Bold text.
    pub bold: bool,
}

impl Style {
    /// A style with just a foreground color.
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            bold: false,
        }
    }

    /// Returns this style in bold.
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Returns this style over the given background.
    pub const fn on(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }

    /// The SGR escape sequence that switches the terminal to this style.
    pub fn escape(&self) -> String {
        let mut codes = Vec::with_capacity(3);
        if self.bold {
            codes.push("1".to_string());
        }
        if let Some(fg) = self.fg {
            codes.push((30 + fg.offset()).to_string());
        }
        if let Some(bg) = self.bg {
            codes.push((40 + bg.offset()).to_string());
        }
        if codes.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", codes.join(";"))
        }
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut style = Style::default();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let part = part.to_ascii_lowercase();
            if part == "bold" {
                style.bold = true;
            } else if part == "reset" {
                style = Style::default();
            } else if let Some(bg) = part.strip_prefix("bg_") {
                style.bg = Some(bg.parse()?);
            } else if let Some(fg) = part.strip_prefix("bold_") {
                style.bold = true;
                style.fg = Some(fg.parse()?);
            } else if let Some(fg) = part.strip_prefix("thin_") {
                style.fg = Some(fg.parse()?);
            } else {
                style.fg = Some(part.parse()?);
            }
        }
        if style == Style::default() && !s.trim().eq_ignore_ascii_case("reset") {
            return Err(Error::configuration(format!("empty color: {s:?}")));
        }
        Ok(style)
    }
}

///////////////////////////////////////// ColorScheme ////////////////////////////////////////

/// The console palette.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Default palette when the console is a terminal, otherwise no color.
    AutoColor,
    /// Never color by level.
    NoColor,
    /// Palette for terminals with a light background.
    LightBg,
    /// Palette for terminals with a dark background.
    DarkBg,
}

impl ColorScheme {
    /// Every scheme name accepted by [`ColorScheme::from_str`].
    pub const NAMES: [&'static str; 4] = ["AUTOCOLOR", "NOCOLOR", "LIGHTBG", "DARKBG"];

    /// The scheme's canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::AutoColor => "AUTOCOLOR",
            ColorScheme::NoColor => "NOCOLOR",
            ColorScheme::LightBg => "LIGHTBG",
            ColorScheme::DarkBg => "DARKBG",
        }
    }

    /// The style this scheme assigns to `level`, or `None` for plain text.
    pub fn style(&self, level: Level) -> Option<Style> {
        match self {
            ColorScheme::NoColor => None,
            ColorScheme::AutoColor => Some(match level {
                Level::Debug => Style::fg(Color::White),
                Level::Info => Style::fg(Color::Green),
                Level::Warning => Style::fg(Color::Yellow),
                Level::Error => Style::fg(Color::Red),
                Level::Critical => Style::fg(Color::Red).bold(),
            }),
            ColorScheme::LightBg => Some(match level {
                Level::Debug => Style::fg(Color::Black),
                Level::Info => Style::fg(Color::White),
                Level::Warning => Style::fg(Color::Yellow),
                Level::Error => Style::fg(Color::Red),
                Level::Critical => Style::fg(Color::Red).on(Color::White),
            }),
            ColorScheme::DarkBg => Some(match level {
                Level::Debug => Style::fg(Color::White),
                Level::Info => Style::fg(Color::Green),
                Level::Warning => Style::fg(Color::Yellow),
                Level::Error => Style::fg(Color::Red),
                Level::Critical => Style::fg(Color::Red).on(Color::White),
            }),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AUTOCOLOR" => Ok(ColorScheme::AutoColor),
            "NOCOLOR" => Ok(ColorScheme::NoColor),
            "LIGHTBG" => Ok(ColorScheme::LightBg),
            "DARKBG" => Ok(ColorScheme::DarkBg),
            _ => Err(Error::configuration(format!(
                "unknown color scheme: {s}. Valid options: {}",
                ColorScheme::NAMES.join(", ")
            ))),
        }
    }
}

/// Returns true when stdout is a terminal and `NO_COLOR` is unset.
pub fn console_supports_color() -> bool {
    io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none()
}

//////////////////////////////////////////// Logger //////////////////////////////////////////

/// A logger that writes each record to the console and to a log file.
///
/// The logger owns both sinks for its whole lifetime.  Both are flushed after
/// every line.
pub struct Logger {
    path: PathBuf,
    scheme: ColorScheme,
    use_color: bool,
    threshold: Level,
    offset: UtcOffset,
    console: Box<dyn Write + Send>,
    file: Box<dyn Write + Send>,
}

impl Logger {
    /// Opens `path` for appending and logs to it and to stdout.
    ///
    /// The scheme name is validated before the file is touched, so an unknown
    /// scheme leaves no file behind.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown scheme name and an I/O
    /// error when the file cannot be opened.
    pub fn open(path: impl AsRef<Path>, scheme: &str) -> Result<Self> {
        let scheme: ColorScheme = scheme.parse()?;
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| {
                Error::io(format!("failed to open log file {}", path.display()), err)
            })?;
        let use_color = scheme != ColorScheme::AutoColor || console_supports_color();
        Ok(Self::with_sinks(path, scheme, io::stdout(), file).with_color(use_color))
    }

    /// Creates a logger over arbitrary sinks.
    ///
    /// `path` is only used by [`Logger::rename_file`] and [`Logger::path`].
    pub fn with_sinks<C, F>(path: impl Into<PathBuf>, scheme: ColorScheme, console: C, file: F) -> Self
    where
        C: Write + Send + 'static,
        F: Write + Send + 'static,
    {
        Self {
            path: path.into(),
            scheme,
            use_color: true,
            threshold: Level::Debug,
            offset: UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
            console: Box::new(console),
            file: Box::new(file),
        }
    }

    /// Drops records less severe than `threshold`.
    pub fn with_threshold(mut self, threshold: Level) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enables or disables console escape sequences entirely.
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Stamps file lines with `offset` instead of the detected local offset.
    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = offset;
        self
    }

    /// The current path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The active color scheme.
    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// The least severe level that is written.
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Writes one record to both sinks unless `level` is below the threshold.
    ///
    /// `color` replaces the scheme's style for the console line.  Both sinks
    /// are attempted even if the first fails; the first failure is returned.
    pub fn emit(&mut self, level: Level, message: &str, color: Option<Style>) -> Result<()> {
        if level < self.threshold {
            return Ok(());
        }
        self.render(level, message, color)
    }

    /// Writes one record to both sinks regardless of the threshold.
    ///
    /// Conversation output goes through here so that `--log-level` only
    /// filters diagnostics.
    pub fn render(&mut self, level: Level, message: &str, color: Option<Style>) -> Result<()> {
        let style = color.or_else(|| self.scheme.style(level));
        let console = self.write_console(message, style);
        let file = self.write_file(level, message);
        console.and(file)
    }

    /// Like [`Logger::emit`], with the level and color given by name.
    ///
    /// # Errors
    ///
    /// Returns an invalid level error for anything but the five level names
    /// and a configuration error for an unknown color.
    pub fn log(&mut self, level: &str, message: &str, color: Option<&str>) -> Result<()> {
        let level: Level = level.parse()?;
        let color = color.map(Style::from_str).transpose()?;
        self.emit(level, message, color)
    }

    /// Writes a DEBUG record.
    pub fn debug(&mut self, message: &str) -> Result<()> {
        self.emit(Level::Debug, message, None)
    }

    /// Writes an INFO record.
    pub fn info(&mut self, message: &str) -> Result<()> {
        self.emit(Level::Info, message, None)
    }

    /// Writes a WARNING record.
    pub fn warning(&mut self, message: &str) -> Result<()> {
        self.emit(Level::Warning, message, None)
    }

    /// Writes an ERROR record.
    pub fn error(&mut self, message: &str) -> Result<()> {
        self.emit(Level::Error, message, None)
    }

    /// Writes a CRITICAL record.
    pub fn critical(&mut self, message: &str) -> Result<()> {
        self.emit(Level::Critical, message, None)
    }

    /// Renames the log file on disk and returns its new path.
    ///
    /// A bare file name lands next to the current log file; anything with a
    /// directory component is used as given.  The open handle keeps writing
    /// to the renamed file.
    pub fn rename_file(&mut self, new_name: &str) -> Result<PathBuf> {
        let target = rename_target(&self.path, new_name.trim());
        self.file
            .flush()
            .map_err(|err| Error::io("failed to flush log file", err))?;
        fs::rename(&self.path, &target).map_err(|err| {
            Error::io(
                format!(
                    "failed to rename {} to {}",
                    self.path.display(),
                    target.display()
                ),
                err,
            )
        })?;
        self.path = target.clone();
        Ok(target)
    }

    fn write_console(&mut self, message: &str, style: Option<Style>) -> Result<()> {
        let result = match style.filter(|_| self.use_color) {
            Some(style) => writeln!(self.console, "{}{message}{ANSI_RESET}", style.escape()),
            None => writeln!(self.console, "{message}"),
        }
        .and_then(|_| self.console.flush());
        self.count(result, "failed to write to console")
    }

    fn write_file(&mut self, level: Level, message: &str) -> Result<()> {
        let result = writeln!(self.file, "{} - {level} - {message}", self.timestamp())
            .and_then(|_| self.file.flush());
        self.count(result, "failed to write to log file")
    }

    fn count(&self, result: io::Result<()>, context: &str) -> Result<()> {
        match result {
            Ok(()) => {
                LOGGER_LINES.click();
                Ok(())
            }
            Err(err) => {
                LOGGER_WRITE_ERRORS.click();
                Err(Error::io(context, err))
            }
        }
    }

    fn timestamp(&self) -> String {
        let now = OffsetDateTime::now_utc().to_offset(self.offset);
        let format = format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]"
        );
        now.format(format).unwrap_or_else(|_| now.to_string())
    }
}

fn rename_target(current: &Path, new_name: &str) -> PathBuf {
    let candidate = Path::new(new_name);
    let bare = candidate
        .parent()
        .map(|p| p.as_os_str().is_empty())
        .unwrap_or(true);
    match current.parent() {
        Some(dir) if bare && !dir.as_os_str().is_empty() => dir.join(candidate),
        _ => candidate.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn buffered(scheme: ColorScheme) -> (Logger, SharedBuf, SharedBuf) {
        let console = SharedBuf::default();
        let file = SharedBuf::default();
        let logger = Logger::with_sinks("test.log", scheme, console.clone(), file.clone());
        (logger, console, file)
    }

    #[test]
    fn parse_levels() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("CRITICAL".parse::<Level>().unwrap(), Level::Critical);
        assert!("TRACE".parse::<Level>().unwrap_err().is_invalid_level());
    }

    #[test]
    fn parse_schemes() {
        for name in ColorScheme::NAMES {
            let scheme: ColorScheme = name.parse().unwrap();
            assert_eq!(scheme.as_str(), name);
        }
        assert_eq!("darkbg".parse::<ColorScheme>().unwrap(), ColorScheme::DarkBg);
        assert!("white".parse::<ColorScheme>().unwrap_err().is_configuration());
    }

    #[test]
    fn parse_styles() {
        assert_eq!("green".parse::<Style>().unwrap(), Style::fg(Color::Green));
        assert_eq!(
            "red,bg_white".parse::<Style>().unwrap(),
            Style::fg(Color::Red).on(Color::White)
        );
        assert_eq!("bold_red".parse::<Style>().unwrap(), Style::fg(Color::Red).bold());
        assert!("chartreuse".parse::<Style>().unwrap_err().is_configuration());
        assert!("".parse::<Style>().is_err());
    }

    #[test]
    fn style_escape_sequences() {
        assert_eq!(Style::fg(Color::Green).escape(), "\x1b[32m");
        assert_eq!(Style::fg(Color::Red).on(Color::White).escape(), "\x1b[31;47m");
        assert_eq!(Style::fg(Color::Red).bold().escape(), "\x1b[1;31m");
        assert_eq!(Style::default().escape(), "");
    }

    #[test]
    fn nocolor_has_no_styles() {
        for level in Level::ALL {
            assert!(ColorScheme::NoColor.style(level).is_none());
            assert!(ColorScheme::DarkBg.style(level).is_some());
        }
    }

    #[test]
    fn every_scheme_and_level_writes_one_line_each() {
        for name in ColorScheme::NAMES {
            let (mut logger, console, file) = buffered(name.parse().unwrap());
            assert_eq!(logger.scheme().as_str(), name);
            for level in Level::ALL {
                logger.emit(level, "message", None).unwrap();
            }
            assert_eq!(console.contents().lines().count(), 5);
            assert_eq!(file.contents().lines().count(), 5);
        }
    }

    #[test]
    fn file_line_format() {
        let (logger, _, file) = buffered(ColorScheme::DarkBg);
        let mut logger = logger.with_offset(UtcOffset::UTC);
        let before = OffsetDateTime::now_utc();
        logger.warning("disk almost full").unwrap();
        let contents = file.contents();
        let line = contents.lines().next().unwrap();
        let (stamp, rest) = line.split_once(" - ").unwrap();
        assert_eq!(rest, "WARNING - disk almost full");
        // 2024-01-31 12:34:56,789
        assert_eq!(stamp.len(), 23);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[19..20], ",");
        let after = OffsetDateTime::now_utc();
        let hours = [before.hour(), after.hour()];
        assert!(hours.contains(&stamp[11..13].parse::<u8>().unwrap()));
    }

    #[test]
    fn console_renders_message_only_with_scheme_color() {
        let (mut logger, console, _) = buffered(ColorScheme::DarkBg);
        logger.info("hello").unwrap();
        assert_eq!(console.contents(), "\x1b[32mhello\x1b[0m\n");
    }

    #[test]
    fn override_wins_on_console_and_never_reaches_file() {
        let (mut logger, console, file) = buffered(ColorScheme::NoColor);
        logger
            .emit(Level::Info, "reply", Some(Style::fg(Color::Green)))
            .unwrap();
        assert_eq!(console.contents(), "\x1b[32mreply\x1b[0m\n");
        assert!(!file.contents().contains('\x1b'));
        assert!(file.contents().ends_with(" - INFO - reply\n"));
    }

    #[test]
    fn nocolor_console_is_plain() {
        let (mut logger, console, _) = buffered(ColorScheme::NoColor);
        logger.error("oops").unwrap();
        assert_eq!(console.contents(), "oops\n");
    }

    #[test]
    fn disabled_color_suppresses_overrides() {
        let (logger, console, _) = buffered(ColorScheme::AutoColor);
        let mut logger = logger.with_color(false);
        logger
            .emit(Level::Critical, "plain", Some(Style::fg(Color::Red)))
            .unwrap();
        assert_eq!(console.contents(), "plain\n");
    }

    #[test]
    fn duplicate_messages_are_both_written() {
        let (mut logger, _, file) = buffered(ColorScheme::NoColor);
        logger.info("same").unwrap();
        logger.info("same").unwrap();
        let contents = file.contents();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.ends_with(" - INFO - same")));
    }

    #[test]
    fn threshold_drops_less_severe_records() {
        let (logger, console, file) = buffered(ColorScheme::NoColor);
        let mut logger = logger.with_threshold(Level::Warning);
        logger.info("quiet").unwrap();
        logger.error("loud").unwrap();
        assert_eq!(console.contents(), "loud\n");
        assert_eq!(file.contents().lines().count(), 1);
        logger.render(Level::Info, "always", None).unwrap();
        assert_eq!(console.contents(), "loud\nalways\n");
        assert!(file.contents().ends_with(" - INFO - always\n"));
    }

    #[test]
    fn log_by_name() {
        let (mut logger, console, file) = buffered(ColorScheme::NoColor);
        logger.log("warning", "named", Some("yellow")).unwrap();
        assert_eq!(console.contents(), "\x1b[33mnamed\x1b[0m\n");
        assert!(file.contents().ends_with(" - WARNING - named\n"));
        let err = logger.log("verbose", "nope", None).unwrap_err();
        assert!(err.is_invalid_level());
        assert_eq!(file.contents().lines().count(), 1);
    }

    #[test]
    fn write_failure_propagates_and_other_sink_still_written() {
        let file = SharedBuf::default();
        let mut logger = Logger::with_sinks("x.log", ColorScheme::NoColor, Broken, file.clone());
        let err = logger.info("still logged").unwrap_err();
        assert!(err.is_io());
        assert!(file.contents().ends_with(" - INFO - still logged\n"));
    }

    #[test]
    fn open_rejects_unknown_scheme_without_creating_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.log");
        let err = Logger::open(&path, "PASTEL").err().unwrap();
        assert!(err.is_configuration());
        assert!(!path.exists());
    }

    #[test]
    fn open_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chat.log");
        let err = Logger::open(&path, "NOCOLOR").err().unwrap();
        assert!(err.is_io());
    }

    #[test]
    fn open_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.log");
        fs::write(&path, "earlier line\n").unwrap();
        let mut logger = Logger::open(&path, "NOCOLOR").unwrap();
        logger.info("later line").unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier line\n"));
        assert!(contents.ends_with(" - INFO - later line\n"));
    }

    #[test]
    fn rename_moves_file_next_to_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.log");
        let mut logger = Logger::open(&path, "NOCOLOR").unwrap();
        logger.info("before rename").unwrap();
        let renamed = logger.rename_file("  kept.log ").unwrap();
        assert_eq!(renamed, dir.path().join("kept.log"));
        assert_eq!(logger.path(), renamed.as_path());
        assert!(!path.exists());
        let contents = fs::read_to_string(&renamed).unwrap();
        assert!(contents.contains(" - INFO - before rename"));
    }

    #[test]
    fn rename_target_resolution() {
        assert_eq!(
            rename_target(Path::new("logs/chat.log"), "a.log"),
            PathBuf::from("logs/a.log")
        );
        assert_eq!(
            rename_target(Path::new("chat.log"), "a.log"),
            PathBuf::from("a.log")
        );
        assert_eq!(
            rename_target(Path::new("logs/chat.log"), "other/a.log"),
            PathBuf::from("other/a.log")
        );
    }
}
