//! Leveled, colored logging to stderr.
//!
//! Call [`init`] once, then log with [`error!`], [`warn!`], [`info!`],
//! [`debug!`] and [`trace!`]. Until [`init`] runs every macro is a no-op.
//! Levels are picked per target from `RUST_LOG`, see [`Directives`].

#[macro_use]
mod log;
mod error;
pub mod fmt;

pub use error::LogError;
pub use fmt::{LogFmt, LogFmtBuilder, LogSpec};

pub type Result<T> = core::result::Result<T, LogError>;

pub use log::*;
