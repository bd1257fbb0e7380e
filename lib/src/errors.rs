use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepkmerError {
    #[error("failed to load/read/write file: {0:?}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse the k-mer dump: {0}")]
    Needletail(#[from] needletail::errors::ParseError),
    #[error("failed to parse as integer")]
    IntError(#[from] core::num::ParseIntError),
    #[error("json error: {0:?}")]
    Json(#[from] serde_json::Error),
    #[error("invalid base {base:?} in sequence {seq}; only A, C, G and T are allowed")]
    InvalidBase { seq: String, base: char },
    #[error("k-mer length {k} must be longer than the repeat unit {unit} ({unit_length}bp)")]
    UnitTooLong {
        unit: String,
        unit_length: usize,
        k: usize,
    },
    #[error("k-mer {kmer} has length {}, expected {expected}", .kmer.len())]
    KmerLength { kmer: String, expected: usize },
    #[error("k-mer length must be an odd number of at least 3 (got {0})")]
    InvalidK(u32),
    #[error("dump record is not valid UTF-8: {0}")]
    DumpEncoding(#[from] std::str::Utf8Error),
}

pub type RepkmerResult<T> = StdResult<T, RepkmerError>;
