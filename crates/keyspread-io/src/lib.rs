//! keyspread-io - Key dataset I/O
//!
//! Key datasets are plain text: one signed integer per line, nothing else.
//! This crate parses them into numeric vectors for `keyspread-stats` and
//! writes them back out.
//!
//! # Format
//!
//! - One base-10 integer per line, optionally surrounded by whitespace
//! - No header, no comments, no blank lines
//! - Any other line is a parse error reporting its 1-based line number

pub mod reader;

pub use reader::*;
