//! Candidate loading from delimited text files
//!
//! The expected layout is a header line followed by one site per line:
//!
//! ```text
//! id,cost,yield
//! 1,RM 3000,50 kWh
//! 2,2000,40
//! ```
//!
//! Cost and yield may carry currency or unit annotations; every non-digit
//! character is stripped before parsing. Records that still fail to parse are
//! skipped with a warning, they never abort the load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::Candidate;

/// Why a single record was skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected at least 3 fields, found {0}")]
    TooFewFields(usize),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn parse_annotated(field: &'static str, raw: &str) -> Result<i64, RecordError> {
    digits_only(raw)
        .parse::<i64>()
        .map_err(|_| RecordError::InvalidNumber {
            field,
            value: raw.trim().to_string(),
        })
}

/// Parse one data line into a candidate
pub fn parse_record(line: &str, delimiter: char) -> Result<Candidate, RecordError> {
    let fields: Vec<&str> = line.split(delimiter).collect();
    if fields.len() < 3 {
        return Err(RecordError::TooFewFields(fields.len()));
    }

    let id = fields[0]
        .trim()
        .parse::<u64>()
        .map_err(|_| RecordError::InvalidNumber {
            field: "id",
            value: fields[0].trim().to_string(),
        })?;
    let cost = parse_annotated("cost", fields[1])?;
    let yield_kwh = parse_annotated("yield", fields[2])?;

    Ok(Candidate::new(id, cost, yield_kwh))
}

/// Read candidates from any buffered source, skipping the header line
pub fn parse_candidates<R: BufRead>(reader: R, delimiter: char) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate().skip(1) {
        let line_no = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!(line = line_no, error = %e, "read failed, stopping");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_record(&line, delimiter) {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                skipped += 1;
                warn!(line = line_no, error = %e, "skipping record");
            }
        }
    }

    debug!(loaded = candidates.len(), skipped, "parsed candidate records");
    candidates
}

/// Load candidates from a file; an unreadable file yields no candidates
pub fn load_candidates(path: &Path, delimiter: char) -> Vec<Candidate> {
    match File::open(path) {
        Ok(file) => {
            let candidates = parse_candidates(BufReader::new(file), delimiter);
            info!(path = %path.display(), count = candidates.len(), "loaded candidates");
            candidates
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to open candidate file");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_strips_units_and_currency() {
        let candidate = parse_record("7, RM 12000 , 340 kWh", ',').unwrap();
        assert_eq!(candidate, Candidate::new(7, 12000, 340));
    }

    #[test]
    fn test_record_errors() {
        assert_eq!(parse_record("1,200", ','), Err(RecordError::TooFewFields(2)));
        assert_eq!(
            parse_record("x,200,3", ','),
            Err(RecordError::InvalidNumber {
                field: "id",
                value: "x".to_string()
            })
        );
        assert!(matches!(
            parse_record("1,RM,3", ','),
            Err(RecordError::InvalidNumber { field: "cost", .. })
        ));
    }

    #[test]
    fn test_parse_skips_header_and_bad_rows() {
        let data = "House ID,Cost (RM),Sun Exposure (kWh)\n\
                    1,RM 3000,50kWh\n\
                    oops\n\
                    \n\
                    2,2000,40\n\
                    3,abc,10\n\
                    4,1000,10,extra\n";
        let candidates = parse_candidates(Cursor::new(data), ',');
        assert_eq!(
            candidates,
            vec![
                Candidate::new(1, 3000, 50),
                Candidate::new(2, 2000, 40),
                Candidate::new(4, 1000, 10),
            ]
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let data = "id;cost;yield\n5;1.500;20\n";
        let candidates = parse_candidates(Cursor::new(data), ';');
        assert_eq!(candidates, vec![Candidate::new(5, 1500, 20)]);
    }

    #[test]
    fn test_missing_file_yields_nothing() {
        let candidates = load_candidates(Path::new("/definitely/not/here.csv"), ',');
        assert!(candidates.is_empty());
    }
}
