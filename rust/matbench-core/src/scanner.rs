//! Tolerant scanner for bracket-delimited numeric matrices.
//!
//! The dataset files hold a JSON-style array of row-arrays of numbers. Only
//! `[`, `]`, `,`, whitespace, and numeric-literal bytes carry meaning, so a
//! single pass over those tokens extracts the matrix without a general JSON
//! parser. The scan is self-synchronizing: content before the first `[` is
//! ignored, and a byte that fits neither a separator nor a number yields a
//! warning and a one-byte advance rather than a failed parse.

use crate::matrix::Matrix;
use thiserror::Error;

/// Length of the context snippet attached to an `InvalidNumber` error.
const CONTEXT_LEN: usize = 20;
/// The snippet starts this many bytes before the failure offset.
const CONTEXT_LOOKBEHIND: usize = 10;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no opening bracket found")]
    MissingOpenBracket,
    #[error("invalid number at byte {offset}, context: \"{context}\"")]
    InvalidNumber { offset: usize, context: String },
    #[error("unterminated row starting at byte {offset}")]
    UnterminatedRow { offset: usize },
}

/// A byte the scanner stepped over because it fit neither a separator nor a
/// numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedByte {
    pub offset: usize,
    pub byte: u8,
}

impl std::fmt::Display for SkippedByte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unexpected character '{}' at byte {}",
            self.byte.escape_ascii(),
            self.offset
        )
    }
}

/// Successful scan: the matrix plus any skip-and-warn diagnostics, in input
/// order. The caller decides how to surface the warnings.
#[derive(Debug)]
pub struct ScanOutput {
    pub matrix: Matrix,
    pub warnings: Vec<SkippedByte>,
}

/// Scans `text` into a matrix.
///
/// Rows that end up with zero values are dropped silently; that leniency is
/// part of the format's contract, not an error. Any `ScanError` is fatal to
/// the caller's run, there is no partial-matrix recovery.
pub fn parse(text: &str) -> Result<ScanOutput, ScanError> {
    Scanner::new(text).scan()
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    warnings: Vec<SkippedByte>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            warnings: Vec::new(),
        }
    }

    fn scan(mut self) -> Result<ScanOutput, ScanError> {
        // Outer array open; anything before it is stray metadata.
        self.pos = self
            .find_from(self.pos, b'[')
            .ok_or(ScanError::MissingOpenBracket)?
            + 1;

        let mut rows = Vec::new();
        while let Some(row_start) = self.find_from(self.pos, b'[') {
            self.pos = row_start + 1;
            let row = self.scan_row()?;
            if !row.is_empty() {
                rows.push(row);
            }
            match self.find_from(self.pos, b']') {
                Some(close) => self.pos = close + 1,
                None => return Err(ScanError::UnterminatedRow { offset: row_start }),
            }
        }

        Ok(ScanOutput {
            matrix: Matrix::from_rows(rows),
            warnings: self.warnings,
        })
    }

    /// Scans values until the row's `]` (left unconsumed) or end of input.
    fn scan_row(&mut self) -> Result<Vec<f64>, ScanError> {
        let mut row = Vec::new();
        loop {
            while self.pos < self.bytes.len() && is_separator(self.bytes[self.pos]) {
                self.pos += 1;
            }
            if self.pos >= self.bytes.len() || self.bytes[self.pos] == b']' {
                return Ok(row);
            }

            let start = self.pos;
            let mut end = start;
            while end < self.bytes.len() && is_numeric_byte(self.bytes[end]) {
                end += 1;
            }
            if end == start {
                // Not a number at all. Warn and resynchronize one byte later.
                self.warnings.push(SkippedByte {
                    offset: start,
                    byte: self.bytes[start],
                });
                self.pos += 1;
                continue;
            }

            // Convert the longest well-formed prefix of the candidate token;
            // the unconsumed remainder is rescanned. A zero-length prefix is
            // fatal.
            let (value, consumed) = parse_f64_prefix(&self.bytes[start..end]).ok_or_else(|| {
                ScanError::InvalidNumber {
                    offset: start,
                    context: self.context_window(start),
                }
            })?;
            row.push(value);
            self.pos = start + consumed;
        }
    }

    fn find_from(&self, from: usize, needle: u8) -> Option<usize> {
        self.bytes[from.min(self.bytes.len())..]
            .iter()
            .position(|&b| b == needle)
            .map(|i| from + i)
    }

    fn context_window(&self, offset: usize) -> String {
        let start = offset.saturating_sub(CONTEXT_LOOKBEHIND);
        let end = (start + CONTEXT_LEN).min(self.bytes.len());
        String::from_utf8_lossy(&self.bytes[start..end]).into_owned()
    }
}

fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b',' | b'\n' | b'\r' | b'\t')
}

/// The candidate-token character class.
fn is_numeric_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E')
}

/// Longest prefix of `token` that forms a floating-point literal, returned
/// with its byte length. `None` when no prefix at all is numeric (e.g. a
/// bare sign or exponent marker).
fn parse_f64_prefix(token: &[u8]) -> Option<(f64, usize)> {
    let len = token.len();
    let mut i = 0;

    if i < len && matches!(token[i], b'+' | b'-') {
        i += 1;
    }
    let int_start = i;
    while i < len && token[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < len && token[i] == b'.' {
        let dot = i;
        i += 1;
        while i < len && token[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - dot - 1;
        if int_digits == 0 && frac_digits == 0 {
            return None;
        }
    } else if int_digits == 0 {
        return None;
    }
    let mut end = i;

    // An exponent counts only when it carries at least one digit; otherwise
    // the prefix stops at the mantissa and the `e` is rescanned.
    if i < len && matches!(token[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < len && matches!(token[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && token[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    let text = std::str::from_utf8(&token[..end]).ok()?;
    let value = text.parse::<f64>().ok()?;
    Some((value, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str) -> Vec<Vec<f64>> {
        parse(text).unwrap().matrix.into_rows()
    }

    #[test]
    fn test_scan_basic() {
        assert_eq!(
            rows("[[1.0, 2], [3, 4]]"),
            vec![vec![1.0, 2.0], vec![3.0, 4.0]]
        );
    }

    #[test]
    fn test_scan_scientific_and_signs() {
        assert_eq!(
            rows("[[-3.5e2, +4, 1E-2]]"),
            vec![vec![-350.0, 4.0, 0.01]]
        );
    }

    #[test]
    fn test_scan_ignores_leading_prose() {
        assert_eq!(rows("matrix A follows: [[7]]"), vec![vec![7.0]]);
    }

    #[test]
    fn test_scan_missing_open_bracket() {
        assert!(matches!(
            parse("1, 2, 3"),
            Err(ScanError::MissingOpenBracket)
        ));
    }

    #[test]
    fn test_scan_unterminated_row() {
        assert!(matches!(
            parse("[[1, 2"),
            Err(ScanError::UnterminatedRow { .. })
        ));
    }

    #[test]
    fn test_scan_skips_bad_byte_and_warns() {
        let out = parse("[[1, 2],[3, x, 4]]").unwrap();
        assert_eq!(
            out.matrix.into_rows(),
            vec![vec![1.0, 2.0], vec![3.0, 4.0]]
        );
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].byte, b'x');
    }

    #[test]
    fn test_scan_drops_empty_rows() {
        assert_eq!(rows("[[], [5, 6], []]"), vec![vec![5.0, 6.0]]);
    }

    #[test]
    fn test_scan_prefix_conversion_rescans_remainder() {
        // "1.2.3" converts as 1.2, then the leftover ".3" as 0.3.
        assert_eq!(rows("[[1.2.3]]"), vec![vec![1.2, 0.3]]);
    }

    #[test]
    fn test_scan_invalid_number_carries_context() {
        let err = parse("[[1, 2, e5]]").unwrap_err();
        match err {
            ScanError::InvalidNumber { offset, context } => {
                assert_eq!(offset, 8);
                assert!(context.contains("e5"));
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_dangling_exponent_is_fatal() {
        // "5e" converts as 5, then the bare "e" has no numeric prefix.
        assert!(matches!(
            parse("[[5e]]"),
            Err(ScanError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_prefix_parser() {
        assert_eq!(parse_f64_prefix(b"1.2.3"), Some((1.2, 3)));
        assert_eq!(parse_f64_prefix(b"-350"), Some((-350.0, 4)));
        assert_eq!(parse_f64_prefix(b"1e+3"), Some((1000.0, 4)));
        assert_eq!(parse_f64_prefix(b"5e"), Some((5.0, 1)));
        assert_eq!(parse_f64_prefix(b".5"), Some((0.5, 2)));
        assert_eq!(parse_f64_prefix(b"e5"), None);
        assert_eq!(parse_f64_prefix(b"-"), None);
        assert_eq!(parse_f64_prefix(b"."), None);
    }

    #[test]
    fn test_context_window_arithmetic() {
        // Offset 12 in a 40-byte input: window covers bytes [2, 22).
        let text = "0123456789abcdefghijklmnopqrstuvwxyzABCD";
        let scanner = Scanner::new(text);
        assert_eq!(scanner.context_window(12), "23456789abcdefghijkl");
        assert_eq!(scanner.context_window(3), "0123456789abcdefghij");
    }
}
