//! Output formatting for suggestion lists and company profiles

pub mod formatter;

pub use formatter::{Formatter, FormatterFactory, OutputStyle, PlainFormatter, TableFormatter};
