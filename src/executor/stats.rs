//! Evaluator statistics parsing
//!
//! The evaluator ends its report with a fixed block of lines. The fourth line
//! from the end carries the elapsed time in its 6th field and the line after
//! it carries the recursive call count in its 4th field:
//!
//! ```text
//! ...
//! Total elapsed time for search: 12.345 ms
//! Number of calls: 6789
//! <trailer>
//! <trailer>
//! ```

use thiserror::Error;

/// Minimum number of `\n`-separated segments needed to reach the stats block
const MIN_SEGMENTS: usize = 5;

/// Offset from the end of the segment list to the elapsed-time line
const ELAPSED_OFFSET: usize = 5;

/// Offset from the end of the segment list to the call-count line
const CALLS_OFFSET: usize = 4;

/// Zero-based field index of the elapsed time
const ELAPSED_FIELD: usize = 5;

/// Zero-based field index of the call count
const CALLS_FIELD: usize = 3;

/// Performance counters reported by one evaluator run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvaluatorStats {
    pub elapsed: f64,
    pub calls: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("output has {0} lines, expected at least {}", MIN_SEGMENTS)]
    TooShort(usize),

    #[error("{line:?} has no field {}", .field + 1)]
    MissingField { line: String, field: usize },

    #[error("field {value:?} is not a number")]
    NotNumeric { value: String },
}

/// Extract elapsed time and call count from captured evaluator stdout
pub fn parse_stats(stdout: &str) -> Result<EvaluatorStats, StatsError> {
    let segments: Vec<&str> = stdout.split('\n').collect();
    let n = segments.len();
    if n < MIN_SEGMENTS {
        return Err(StatsError::TooShort(n));
    }

    let elapsed = numeric_field(segments[n - ELAPSED_OFFSET], ELAPSED_FIELD)?;
    let calls = numeric_field(segments[n - CALLS_OFFSET], CALLS_FIELD)?;

    Ok(EvaluatorStats { elapsed, calls })
}

fn numeric_field(line: &str, field: usize) -> Result<f64, StatsError> {
    let value = line
        .split_whitespace()
        .nth(field)
        .ok_or_else(|| StatsError::MissingField {
            line: line.to_string(),
            field,
        })?;

    value.parse().map_err(|_| StatsError::NotNumeric {
        value: value.to_string(),
    })
}
