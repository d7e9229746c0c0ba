//! Data ingestion

pub mod ingest;

pub use ingest::{
    klines_from_value, parse_klines, read_candles_csv, read_candles_csv_from, read_klines_file,
    validate_window, IngestError,
};
