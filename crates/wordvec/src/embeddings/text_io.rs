//! # Embedding Text IO
//!
//! Lines are:
//! ```terminaloutput
//! {TOKEN} {V1} {V2} ... {VD}
//! ```
//!
//! Fields are separated by a single ASCII space only; other whitespace,
//! including U+00A0 (non-breaking space), is part of the token.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::errors::{WVResult, WordvecError};

/// The field separator.
const SEPARATOR: u8 = b' ';

/// Rows parsed from an embedding text source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRows {
    /// One token per row, in source order.
    pub tokens: Vec<String>,

    /// Row-major vector data; `tokens.len() * dim` entries.
    pub vectors: Vec<f32>,

    /// The row width; `0` only when no rows were read.
    pub dim: usize,
}

/// What to do with a single source line.
enum LineAction<'a> {
    /// Blank line.
    Blank,

    /// A one-entry line; usually a `{COUNT} {DIM}` header.
    Header { token: &'a [u8], entry: &'a [u8] },

    /// A token whose bytes are not UTF-8.
    Undecodable { token: &'a [u8], found: usize },

    /// A data row.
    Row(String, Vec<&'a [u8]>),
}

/// Tracks whether any line has needed byte-level recovery.
#[derive(Default)]
struct DecodeState {
    byte_mode: bool,
}

impl DecodeState {
    fn note_invalid_utf8(
        &mut self,
        source: &str,
    ) {
        if !self.byte_mode {
            log::warn!(
                "Could not read {source} as UTF-8; reading it as bytes and skipping words with malformed UTF-8"
            );
            self.byte_mode = true;
        }
    }
}

/// Load [`ParsedRows`] from an embedding text file.
///
/// ## Errors
/// * [`WordvecError::Load`] if the file cannot be opened or holds no rows.
/// * [`WordvecError::DimensionInconsistency`] on a row of the wrong width.
/// * [`WordvecError::Parse`] on a non-numeric entry.
pub fn load_embedding_text_path<P: AsRef<Path>>(path: P) -> WVResult<ParsedRows> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| WordvecError::Load(format!("cannot open {}: {e}", path.display())))?;

    log::info!("Loading vectors from {}", path.display());
    read_embedding_text(BufReader::new(file), &path.display().to_string())
}

/// Read [`ParsedRows`] from an embedding text line reader.
///
/// ## Arguments
/// * `reader` - the line reader.
/// * `source` - a name for the stream, used in log messages.
pub fn read_embedding_text<R: BufRead>(
    mut reader: R,
    source: &str,
) -> WVResult<ParsedRows> {
    let mut rows = ParsedRows::default();
    let mut dim: Option<usize> = None;
    let mut state = DecodeState::default();

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let (token, entries) = match classify_line(&buf) {
            LineAction::Blank => continue,
            LineAction::Header { token, entry } => {
                log::warn!(
                    "Skipping token {:?} with 1-dimensional vector [{}]; likely a header",
                    String::from_utf8_lossy(token),
                    String::from_utf8_lossy(entry),
                );
                continue;
            }
            LineAction::Undecodable { token, found } => {
                check_width(&String::from_utf8_lossy(token), found, &mut dim)?;
                state.note_invalid_utf8(source);
                log::info!("Skipping non-UTF8 token {:?}", String::from_utf8_lossy(token));
                continue;
            }
            LineAction::Row(token, entries) => (token, entries),
        };

        check_width(&token, entries.len(), &mut dim)?;

        rows.vectors.reserve(entries.len());
        for entry in entries {
            rows.vectors.push(parse_entry(&token, entry)?);
        }
        rows.tokens.push(token);
    }

    rows.dim = dim.unwrap_or(0);
    if rows.tokens.is_empty() {
        return Err(WordvecError::Load(format!("no vectors found in {source}")));
    }

    log::debug!(
        "Read {} vectors of dimension {} from {source}",
        rows.tokens.len(),
        rows.dim
    );
    Ok(rows)
}

fn classify_line(line: &[u8]) -> LineAction<'_> {
    let line = line.trim_ascii_end();
    if line.is_empty() {
        return LineAction::Blank;
    }

    let mut fields = line.split(|&b| b == SEPARATOR);
    let token = fields.next().unwrap_or_default();
    let entries: Vec<&[u8]> = fields.collect();

    if entries.len() == 1 {
        return LineAction::Header {
            token,
            entry: entries[0],
        };
    }

    match std::str::from_utf8(token) {
        Ok(token) => LineAction::Row(token.to_string(), entries),
        Err(_) => LineAction::Undecodable {
            token,
            found: entries.len(),
        },
    }
}

/// Fix `dim` on the first multi-entry row; reject any row that disagrees.
fn check_width(
    token: &str,
    found: usize,
    dim: &mut Option<usize>,
) -> WVResult<()> {
    match *dim {
        None if found > 1 => {
            *dim = Some(found);
            Ok(())
        }
        None => Err(WordvecError::Load(format!(
            "vector for token {token:?} has no entries"
        ))),
        Some(expected) if expected != found => Err(WordvecError::DimensionInconsistency {
            token: token.to_string(),
            found,
            expected,
        }),
        Some(_) => Ok(()),
    }
}

fn parse_entry(
    token: &str,
    entry: &[u8],
) -> WVResult<f32> {
    std::str::from_utf8(entry)
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .ok_or_else(|| {
            WordvecError::Parse(format!(
                "invalid vector entry {:?} for token {token:?}",
                String::from_utf8_lossy(entry)
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &[u8]) -> WVResult<ParsedRows> {
        read_embedding_text(text, "test")
    }

    #[test]
    fn test_read_rows() {
        let rows = read(b"cat 1.0 0.0\ndog 0.0 1.0\npuppy 0.1 0.9\n").unwrap();
        assert_eq!(rows.tokens, vec!["cat", "dog", "puppy"]);
        assert_eq!(rows.dim, 2);
        assert_eq!(rows.vectors, vec![1.0, 0.0, 0.0, 1.0, 0.1, 0.9]);
    }

    #[test]
    fn test_header_lines_are_skipped() {
        let rows = read(b"3 2\ncat 1.0 0.0\nstray 7\ndog 0.0 1.0\n").unwrap();
        assert_eq!(rows.tokens, vec!["cat", "dog"]);
        assert_eq!(rows.dim, 2);
    }

    #[test]
    fn test_width_mismatch_aborts() {
        let err = read(b"cat 1.0 0.0\ndog 0.0 1.0 2.0\n").unwrap_err();
        match err {
            WordvecError::DimensionInconsistency {
                token,
                found,
                expected,
            } => {
                assert_eq!(token, "dog");
                assert_eq!(found, 3);
                assert_eq!(expected, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_breaking_space_stays_in_token() {
        let rows = read("a\u{00a0}b 1.0 2.0\r\nc 3.0 4.0\n".as_bytes()).unwrap();
        assert_eq!(rows.tokens, vec!["a\u{00a0}b", "c"]);
        assert_eq!(rows.vectors, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_malformed_utf8_token_is_skipped() {
        let mut text = b"cat 1.0 0.0\n".to_vec();
        text.extend_from_slice(b"\xff\xfe 5.0 5.0\n");
        text.extend_from_slice(b"dog 0.0 1.0\n");

        let rows = read(&text).unwrap();
        assert_eq!(rows.tokens, vec!["cat", "dog"]);
        assert_eq!(rows.vectors, vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_malformed_utf8_wrong_width_still_aborts() {
        let mut text = b"cat 1.0 0.0\n".to_vec();
        text.extend_from_slice(b"\xff 5.0 5.0 5.0\n");
        assert!(matches!(
            read(&text),
            Err(WordvecError::DimensionInconsistency { found: 3, .. })
        ));
    }

    #[test]
    fn test_bad_number() {
        assert!(matches!(
            read(b"cat 1.0 zero\n"),
            Err(WordvecError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_source() {
        assert!(matches!(read(b""), Err(WordvecError::Load(_))));
        assert!(matches!(read(b"400000 300\n\n"), Err(WordvecError::Load(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_embedding_text_path("/nonexistent/wordvec/glove.txt"),
            Err(WordvecError::Load(_))
        ));
    }
}
