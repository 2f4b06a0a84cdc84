//! Reading and writing newline-delimited integer files

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Line {line} is not an integer: {content:?}")]
    Parse { line: usize, content: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Parse one integer per line from a buffered reader
///
/// Surrounding whitespace is ignored. Empty or non-integer lines fail with
/// `IoError::Parse` carrying the 1-based line number.
pub fn parse_integers<R: BufRead>(reader: R) -> IoResult<Vec<i64>> {
    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        let value = trimmed.parse::<i64>().map_err(|_| IoError::Parse {
            line: idx + 1,
            content: line.clone(),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Read an integer file
pub fn read_integers<P: AsRef<Path>>(path: P) -> IoResult<Vec<i64>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
    let values = parse_integers(BufReader::new(file))?;

    tracing::debug!(path = %path.display(), count = values.len(), "read integer file");
    Ok(values)
}

/// Read an integer file as samples for the numeric routines
pub fn read_samples<P: AsRef<Path>>(path: P) -> IoResult<Vec<f64>> {
    Ok(read_integers(path)?
        .into_iter()
        .map(|value| value as f64)
        .collect())
}

/// Write one integer per line, newline-terminated
pub fn write_integers<P: AsRef<Path>>(path: P, values: &[i64]) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    for value in values {
        writeln!(writer, "{}", value)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), count = values.len(), "wrote integer file");
    Ok(())
}
