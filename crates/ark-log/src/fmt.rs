//! Per-level record layouts.

use compact_str::CompactString;

use termcolor::{Color, ColorSpec};

use ark_mem::DynArray;

use crate::{Level, Result};

/// Ordered segments that make up one log record.
#[derive(Default)]
pub struct LogFmt {
    segments: DynArray<SegmentSpec>,
}

impl LogFmt {

    /// `LEVEL target: message`, with the level name colored.
    pub fn for_level(level: Level) -> Result<Self> {
        let color = match level {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Green,
            Level::Debug => Color::Blue,
            Level::Trace => Color::Magenta,
        };
        let mut fmt = Self::default();
        LogFmtBuilder::new(&mut fmt)
            .level(|spec| spec.with_color_spec(|c| { c.set_fg(Some(color)).set_bold(true); }))?
            .text(" ", |spec| spec)?
            .target(|spec| spec.with_color_spec(|c| { c.set_dimmed(true); }))?
            .text(": ", |spec| spec)?
            .message(|spec| spec)?;
        Ok(fmt)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn clear(&mut self) {
        self.segments.clear();
    }
}

impl<'a> IntoIterator for &'a LogFmt {

    type Item = &'a SegmentSpec;
    type IntoIter = ark_mem::Iter<'a, SegmentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[derive(Default, Clone, Debug)]
pub struct LogSpec {
    pub color_spec: Option<ColorSpec>,
}

impl LogSpec {

    #[inline(always)]
    pub fn with_color_spec(mut self, mut f: impl FnMut(&mut ColorSpec)) -> Self {
        let color_spec = self.color_spec.insert(ColorSpec::new());
        f(color_spec);
        self
    }
}

#[derive(Debug)]
pub enum SegmentSpec {
    Message(LogSpec),
    Text(CompactString, LogSpec),
    Level(LogSpec),
    Target(LogSpec),
}

/// Replaces the segments of a [`LogFmt`].
pub struct LogFmtBuilder<'a> {
    fmt: &'a mut LogFmt,
}

impl<'a> LogFmtBuilder<'a> {

    /// Starts from an empty layout.
    #[inline(always)]
    pub fn new(fmt: &'a mut LogFmt) -> Self {
        fmt.clear();
        Self {
            fmt,
        }
    }

    #[inline(always)]
    fn push(&mut self, segment: SegmentSpec) -> Result<&mut Self> {
        self.fmt.segments.push(segment)?;
        Ok(self)
    }

    #[inline(always)]
    pub fn message(&mut self, mut f: impl FnMut(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.push(SegmentSpec::Message(f(Default::default())))
    }

    #[inline(always)]
    pub fn text(&mut self, text: &str, mut f: impl FnMut(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.push(SegmentSpec::Text(CompactString::new(text), f(Default::default())))
    }

    #[inline(always)]
    pub fn level(&mut self, mut f: impl FnMut(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.push(SegmentSpec::Level(f(Default::default())))
    }

    #[inline(always)]
    pub fn target(&mut self, mut f: impl FnMut(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.push(SegmentSpec::Target(f(Default::default())))
    }
}
