//! Parsers for the three input files.
//!
//! - training file: `user,item,rating[,...]`
//! - test-pairs file: `user,item[,...]`
//! - user-list file: one user identifier per line
//!
//! Parsing is strict. The first malformed line aborts the load with an
//! error naming the file and line; blank lines are the only lines skipped.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Opens `path` and returns its lines together with 1-based line numbers,
/// dropping blank lines.
///
/// The file handle lives only as long as this call.
fn read_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let mut lines = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => DataLoadError::ParseError {
                file: path.display().to_string(),
                line: idx + 1,
                reason: "invalid UTF-8".to_string(),
            },
            _ => DataLoadError::IoError(e),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        lines.push((idx + 1, line));
    }
    Ok(lines)
}

/// Splits a line on commas and checks it has at least `expected` fields
fn split_fields<'a>(
    line: &'a str,
    expected: usize,
    file: &str,
    line_no: usize,
) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < expected {
        return Err(DataLoadError::FieldCountMismatch {
            file: file.to_string(),
            expected,
            found: fields.len(),
            line: line_no,
        });
    }
    Ok(fields)
}

fn parse_user(s: &str, file: &str, line_no: usize) -> Result<UserId> {
    if s.is_empty() {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing user".to_string(),
        });
    }
    Ok(s.to_string())
}

fn parse_item(s: &str, file: &str, line_no: usize) -> Result<ItemId> {
    s.parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid item {:?}: {}", s, e),
    })
}

/// Parses a rating value. `f64::from_str` accepts "NaN" and "inf", which are
/// not ratings, so non-finite values are rejected as well.
fn parse_rating_value(s: &str, file: &str, line_no: usize) -> Result<f64> {
    let value: f64 = s.parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid rating {:?}: {}", s, e),
    })?;
    if !value.is_finite() {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid rating {:?}: not a finite number", s),
        });
    }
    Ok(value)
}

/// Parse a training file
///
/// Format: user,item,rating[,extra fields...]
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let file = path.display().to_string();
    let lines = read_lines(path)?;
    let mut ratings = Vec::with_capacity(lines.len());

    for (line_no, line) in &lines {
        let fields = split_fields(line, 3, &file, *line_no)?;
        ratings.push(Rating {
            user_id: parse_user(fields[0], &file, *line_no)?,
            item_id: parse_item(fields[1], &file, *line_no)?,
            rating: parse_rating_value(fields[2], &file, *line_no)?,
        });
    }

    debug!(file = %file, ratings = ratings.len(), "parsed training file");
    Ok(ratings)
}

/// Parse a test-pairs file into a scoring request
///
/// Format: user,item[,extra fields...]
pub fn parse_pairs(path: &Path) -> Result<ScoreRequest> {
    let file = path.display().to_string();
    let lines = read_lines(path)?;
    let mut request = ScoreRequest::new();

    for (line_no, line) in &lines {
        let fields = split_fields(line, 2, &file, *line_no)?;
        let user = parse_user(fields[0], &file, *line_no)?;
        let item = parse_item(fields[1], &file, *line_no)?;
        request.insert(user, item);
    }

    debug!(file = %file, pairs = request.len(), "parsed test-pairs file");
    Ok(request)
}

/// Parse a user-list file
///
/// Format: one user identifier per line
pub fn parse_users(path: &Path) -> Result<Vec<UserId>> {
    let file = path.display().to_string();
    let users: Vec<UserId> = read_lines(path)?
        .into_iter()
        .map(|(_, line)| line.trim().to_string())
        .collect();

    debug!(file = %file, users = users.len(), "parsed user-list file");
    Ok(users)
}
