//! Candle loading from CSV files and exchange kline JSON.
//!
//! The analysis engine never validates its input; [`validate_window`] is the
//! opt-in check a caller runs on untrusted data before analysis.

use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::Candle;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed kline at row {row}: {reason}")]
    MalformedKline { row: usize, reason: String },

    #[error("invalid candle at index {index}: {reason}")]
    InvalidWindow { index: usize, reason: String },
}

/// Read candles from a CSV file with header
/// `timestamp,open,high,low,close,volume`.
pub fn read_candles_csv(path: &Path) -> Result<Vec<Candle>, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let candles = read_candles_csv_from(file)?;
    debug!(path = %path.display(), candles = candles.len(), "loaded csv");
    Ok(candles)
}

/// Read candles from any CSV source. Columns are matched by header name.
pub fn read_candles_csv_from<R: Read>(reader: R) -> Result<Vec<Candle>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut candles = Vec::new();
    for record in csv_reader.deserialize() {
        let candle: Candle = record?;
        candles.push(candle);
    }
    Ok(candles)
}

/// Parse an exchange kline array: `[[open_time, "open", "high", "low",
/// "close", "volume", ...], ...]`. Prices may be strings or numbers; fields
/// past the sixth are ignored.
pub fn parse_klines(json: &str) -> Result<Vec<Candle>, IngestError> {
    let value: Value = serde_json::from_str(json)?;
    klines_from_value(&value)
}

pub fn klines_from_value(value: &Value) -> Result<Vec<Candle>, IngestError> {
    let rows = value.as_array().ok_or_else(|| IngestError::MalformedKline {
        row: 0,
        reason: "expected a JSON array of klines".into(),
    })?;
    rows.iter()
        .enumerate()
        .map(|(row, kline)| parse_kline_row(row, kline))
        .collect()
}

/// Read a kline JSON file.
pub fn read_klines_file(path: &Path) -> Result<Vec<Candle>, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let candles = parse_klines(&content)?;
    debug!(path = %path.display(), candles = candles.len(), "loaded klines");
    Ok(candles)
}

fn parse_kline_row(row: usize, kline: &Value) -> Result<Candle, IngestError> {
    let malformed = |reason: String| IngestError::MalformedKline { row, reason };

    let fields = kline
        .as_array()
        .ok_or_else(|| malformed("row is not an array".into()))?;
    if fields.len() < 6 {
        return Err(malformed(format!("expected at least 6 fields, got {}", fields.len())));
    }

    let timestamp = match &fields[0] {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| malformed("open time is not an integer".into()))?;

    let number = |i: usize, name: &str| -> Result<f64, IngestError> {
        match &fields[i] {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| malformed(format!("{name} is not a number")))
    };

    Ok(Candle::new(
        timestamp,
        number(1, "open")?,
        number(2, "high")?,
        number(3, "low")?,
        number(4, "close")?,
        number(5, "volume")?,
    ))
}

/// Check that a window satisfies the engine's input contract: strictly
/// ascending timestamps, finite non-negative fields, and a consistent
/// high/low range.
pub fn validate_window(candles: &[Candle]) -> Result<(), IngestError> {
    let invalid = |index: usize, reason: String| IngestError::InvalidWindow { index, reason };

    for (index, candle) in candles.iter().enumerate() {
        if candle.is_void() {
            return Err(invalid(index, "non-finite price or volume".into()));
        }
        if candle.volume < 0.0 {
            return Err(invalid(index, format!("negative volume {}", candle.volume)));
        }
        if candle.high < candle.low {
            return Err(invalid(
                index,
                format!("high {} below low {}", candle.high, candle.low),
            ));
        }
        if !candle.is_sane() {
            return Err(invalid(index, "open or close outside the high/low range".into()));
        }
        if index > 0 && candle.timestamp <= candles[index - 1].timestamp {
            return Err(invalid(
                index,
                format!(
                    "timestamp {} not after {}",
                    candle.timestamp,
                    candles[index - 1].timestamp
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::make_candles;

    const CSV: &str = "timestamp,open,high,low,close,volume
1700000000000,100.0,101.5,99.5,101.0,1200
1700000060000,101.0,102.0,100.5,101.5,800
";

    #[test]
    fn reads_csv_by_header() {
        let candles = read_candles_csv_from(CSV.as_bytes()).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].timestamp, 1_700_000_000_000);
        assert_eq!(candles[1].high, 102.0);
        assert_eq!(candles[1].volume, 800.0);
    }

    #[test]
    fn csv_columns_may_be_reordered() {
        let csv = "open,high,low,close,volume,timestamp\n1,2,0.5,1.5,10,5\n";
        let candles = read_candles_csv_from(csv.as_bytes()).unwrap();
        assert_eq!(candles[0], Candle::new(5, 1.0, 2.0, 0.5, 1.5, 10.0));
    }

    #[test]
    fn bad_csv_value_is_an_error() {
        let csv = "timestamp,open,high,low,close,volume\n1,abc,2,0.5,1.5,10\n";
        assert!(matches!(
            read_candles_csv_from(csv.as_bytes()),
            Err(IngestError::Csv(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_candles_csv(Path::new("/nonexistent/candles.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/candles.csv"));
    }

    #[test]
    fn reads_csv_and_kline_files() {
        use std::io::Write;

        let mut csv_file = tempfile::NamedTempFile::new().unwrap();
        csv_file.write_all(CSV.as_bytes()).unwrap();
        let from_csv = read_candles_csv(csv_file.path()).unwrap();

        let mut kline_file = tempfile::NamedTempFile::new().unwrap();
        write!(
            kline_file,
            r#"[[1700000000000,"100.0","101.5","99.5","101.0","1200"],
                [1700000060000,"101.0","102.0","100.5","101.5","800"]]"#
        )
        .unwrap();
        let from_klines = read_klines_file(kline_file.path()).unwrap();

        assert_eq!(from_csv, from_klines);
    }

    #[test]
    fn parses_string_klines() {
        let json = r#"[
            [1700000000000, "100.0", "101.5", "99.5", "101.0", "1200.5", 1700000059999, "0", 10],
            [1700000060000, "101.0", "102.0", "100.5", "101.5", "800", 1700000119999, "0", 7]
        ]"#;
        let candles = parse_klines(json).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].volume, 1200.5);
        assert_eq!(candles[1].timestamp, 1_700_000_060_000);
    }

    #[test]
    fn parses_numeric_klines() {
        let candles = parse_klines("[[5, 1, 2, 0.5, 1.5, 10]]").unwrap();
        assert_eq!(candles[0], Candle::new(5, 1.0, 2.0, 0.5, 1.5, 10.0));
    }

    #[test]
    fn short_kline_row_is_malformed() {
        let err = parse_klines(r#"[[5, "1", "2", "0.5", "1.5", "10"], [6, "1"]]"#).unwrap_err();
        assert!(matches!(err, IngestError::MalformedKline { row: 1, .. }));
    }

    #[test]
    fn non_numeric_kline_field_is_malformed() {
        let err = parse_klines(r#"[[5, "1", "x", "0.5", "1.5", "10"]]"#).unwrap_err();
        match err {
            IngestError::MalformedKline { row, reason } => {
                assert_eq!(row, 0);
                assert!(reason.contains("high"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_json_is_json_error() {
        assert!(matches!(parse_klines("not json"), Err(IngestError::Json(_))));
        assert!(matches!(
            parse_klines("{}"),
            Err(IngestError::MalformedKline { .. })
        ));
    }

    #[test]
    fn valid_window_passes() {
        assert!(validate_window(&make_candles(&[100.0, 101.0, 99.0])).is_ok());
        assert!(validate_window(&[]).is_ok());
    }

    #[test]
    fn duplicate_timestamp_is_rejected() {
        let mut candles = make_candles(&[100.0, 101.0, 99.0]);
        candles[2].timestamp = candles[1].timestamp;
        let err = validate_window(&candles).unwrap_err();
        assert!(matches!(err, IngestError::InvalidWindow { index: 2, .. }));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut candles = make_candles(&[100.0, 101.0]);
        candles[0].high = 90.0;
        let err = validate_window(&candles).unwrap_err();
        assert!(err.to_string().contains("below low"));
    }

    #[test]
    fn nan_and_negative_volume_are_rejected() {
        let mut candles = make_candles(&[100.0, 101.0]);
        candles[1].close = f64::NAN;
        assert!(validate_window(&candles).is_err());

        let mut candles = make_candles(&[100.0, 101.0]);
        candles[0].volume = -1.0;
        assert!(validate_window(&candles)
            .unwrap_err()
            .to_string()
            .contains("negative volume"));
    }
}
