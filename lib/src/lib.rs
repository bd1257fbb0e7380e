use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap::MmapOptions;

use crate::errors::RepkmerResult;
use crate::filtering::{parse_dump, DumpParams};
use crate::serialization::read_counts_slice;
use crate::statistics::CountHistogram;

pub mod errors;
pub mod families;
pub mod filtering;
pub mod sequence;
pub mod serialization;
pub mod statistics;
pub mod tandem;

pub use crate::families::{find_repeats, FamilyRecord, RepeatParams, RepeatSummary};

/// Observed occurrence count of each k-mer.
pub type KmerCounts = HashMap<String, u64>;

pub fn open_counts_file(filename: &str) -> RepkmerResult<KmerCounts> {
    let file = File::open(filename)?;
    // memmap refuses zero-length files
    if file.metadata()?.len() == 0 {
        return read_counts_slice(b"");
    }
    let mapped = unsafe { MmapOptions::new().map(&file)? };
    read_counts_slice(&mapped)
}

pub fn open_dump_file(
    filename: &str,
    params: &DumpParams,
) -> RepkmerResult<(CountHistogram, KmerCounts)> {
    let reader: Box<dyn Read + Send> = Box::new(File::open(&Path::new(filename))?);
    parse_dump(reader, params)
}
