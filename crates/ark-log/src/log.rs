use std::{
    io::Write,
    sync::OnceLock,
};

use core::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use termcolor::{WriteColor, StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color};

use rustc_hash::FxHashMap;

use compact_str::CompactString;

use parking_lot::Mutex;

use crate::{
    LogFmt,
    LogFmtBuilder,
    LogSpec,
    Result,
    fmt::SegmentSpec,
};

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl Level {

    pub const ALL: [Self; 5] = [
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

impl Display for Level {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

/// Level selection parsed from a `RUST_LOG` style string.
///
/// The string is a comma separated list of `level` or `target=level`
/// entries. A bare level sets the base level, which defaults to
/// [`Level::Error`]. Entries that do not parse are skipped, and when a
/// target is named twice the quieter level wins.
#[derive(Clone, Debug)]
pub struct Directives {
    base_level: Level,
    target_levels: FxHashMap<CompactString, Level>,
}

impl Default for Directives {

    fn default() -> Self {
        Self {
            base_level: Level::Error,
            target_levels: FxHashMap::default(),
        }
    }
}

impl Directives {

    pub fn parse(spec: &str) -> Self {
        let mut directives = Self::default();
        for arg in spec.split(',') {
            let (target, level) = match arg.find('=') {
                Some(i) => (Some(arg[..i].trim()), arg[i + 1..].trim()),
                None => (None, arg.trim()),
            };
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            match target {
                Some(target) if !target.is_empty() => {
                    let entry = directives.target_levels
                        .entry(CompactString::new(target))
                        .or_insert(level);
                    *entry = (*entry).min(level);
                },
                _ => directives.base_level = level,
            }
        }
        directives
    }

    /// Reads `RUST_LOG`, falling back to errors only.
    pub fn from_env() -> Self {
        std::env::var("RUST_LOG")
            .map(|env| Self::parse(&env))
            .unwrap_or_default()
    }

    #[inline(always)]
    pub fn base_level(&self) -> Level {
        self.base_level
    }

    /// Level for `target`, taken from the longest `::` separated prefix
    /// that has an entry.
    pub fn level_for(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.base_level
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, level: Level) -> bool {
        level <= self.level_for(target)
    }
}

struct Logger<W: WriteColor> {
    sink: W,
    formats: [LogFmt; 5],
    directives: Directives,
}

impl<W: WriteColor> Logger<W> {

    fn new(sink: W, directives: Directives) -> Result<Self> {
        Ok(Self {
            sink,
            formats: [
                LogFmt::for_level(Level::Error)?,
                LogFmt::for_level(Level::Warn)?,
                LogFmt::for_level(Level::Info)?,
                LogFmt::for_level(Level::Debug)?,
                LogFmt::for_level(Level::Trace)?,
            ],
            directives,
        })
    }

    fn write_segment(
        sink: &mut W,
        spec: &LogSpec,
        args: fmt::Arguments,
    ) -> Result<()> {
        if let Some(color_spec) = &spec.color_spec {
            sink.set_color(color_spec)?;
            sink.write_fmt(args)?;
            sink.reset()?;
        } else {
            sink.write_fmt(args)?;
        }
        Ok(())
    }

    fn log(&mut self, target: &str, level: Level, msg: fmt::Arguments) -> Result<bool> {
        if !self.directives.enabled(target, level) {
            return Ok(false)
        }
        let fmt = &self.formats[level as usize];
        for segment in fmt {
            match segment {
                SegmentSpec::Message(spec) => {
                    Self::write_segment(&mut self.sink, spec, msg)?;
                },
                SegmentSpec::Text(text, spec) => {
                    Self::write_segment(&mut self.sink, spec, format_args!("{}", text))?;
                },
                SegmentSpec::Level(spec) => {
                    Self::write_segment(&mut self.sink, spec, format_args!("{}", level))?;
                },
                SegmentSpec::Target(spec) => {
                    Self::write_segment(&mut self.sink, spec, format_args!("{}", target))?;
                },
            }
        }
        self.sink.write_all(b"\n")?;
        Ok(true)
    }
}

static LOGGER: OnceLock<Mutex<Logger<StandardStream>>> = OnceLock::new();

/// Installs the global logger, reading `RUST_LOG`. Later calls do nothing.
pub fn init() -> Result<()> {
    init_with(Directives::from_env())
}

pub fn init_with(directives: Directives) -> Result<()> {
    if LOGGER.get().is_some() {
        return Ok(())
    }
    let logger = Logger::new(StandardStream::stderr(ColorChoice::Auto), directives)?;
    let _ = LOGGER.set(Mutex::new(logger));
    Ok(())
}

#[inline(always)]
pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

/// Rebuilds the layout of `level` records.
///
/// Returns `Ok(false)` if the logger has not been initialized.
pub fn set_fmt(
    level: Level,
    f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>,
) -> Result<bool> {
    let Some(logger) = LOGGER.get() else {
        return Ok(false)
    };
    let mut logger = logger.lock();
    let mut builder = LogFmtBuilder::new(&mut logger.formats[level as usize]);
    f(&mut builder)?;
    Ok(true)
}

/// Whether a record from `target` at `level` would be written.
pub fn enabled(target: &str, level: Level) -> bool {
    LOGGER
        .get()
        .is_some_and(|logger| logger.lock().directives.enabled(target, level))
}

/// Writes one record. Returns `Ok(false)` if nothing was written, either
/// because the logger has not been initialized or because the level is
/// filtered out for `target`.
#[inline(always)]
pub fn log(target: &str, level: Level, args: fmt::Arguments) -> Result<bool> {
    let Some(logger) = LOGGER.get() else {
        return Ok(false)
    };
    logger.lock().log(target, level, args)
}

#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        $crate::log(module_path!(), $level, format_args!($($arg)+))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Trace, $($arg)+)
    };
}
