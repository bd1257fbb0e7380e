use std::io::{BufRead, BufReader, Read};

use log::info;
use needletail::parse_fastx_reader;

use crate::errors::RepkmerResult;
use crate::statistics::CountHistogram;
use crate::KmerCounts;

/// Used to pass around the options for reading a k-mer dump
#[derive(Clone, Debug, PartialEq)]
pub struct DumpParams {
    /// K-mers have to be seen more than this many times to be kept
    pub cutoff: u64,
}

impl Default for DumpParams {
    fn default() -> Self {
        DumpParams { cutoff: 2 }
    }
}

impl DumpParams {
    pub fn keeps(&self, count: u64) -> bool {
        count > self.cutoff
    }
}

/// Parses a k-mer count dump (FASTA records of the form `>count` followed by
/// the k-mer) into a histogram over every record and a count mapping of
/// the k-mers above the cutoff.
pub fn parse_dump<'a>(
    reader: Box<dyn Read + Send + 'a>,
    params: &DumpParams,
) -> RepkmerResult<(CountHistogram, KmerCounts)> {
    let mut histogram = CountHistogram::new();
    let mut counts = KmerCounts::new();
    let mut records = 0usize;

    let mut reader = BufReader::new(reader);
    // needletail refuses zero-length input
    if reader.fill_buf()?.is_empty() {
        info!("Dump is empty, no k-mers read");
        return Ok((histogram, counts));
    }

    let mut fastx_reader = parse_fastx_reader(reader)?;
    while let Some(record) = fastx_reader.next() {
        let seqrec = record?;
        let header = std::str::from_utf8(seqrec.id())?;
        let count: u64 = header.trim().parse()?;
        *histogram.entry(count).or_insert(0) += 1;
        records += 1;

        let seq = seqrec.seq();
        if seq.is_empty() || !params.keeps(count) {
            continue;
        }
        let kmer = std::str::from_utf8(&seq)?;
        counts.insert(kmer.to_string(), count);
    }
    info!(
        "Read {} dump records, kept {} k-mers with counts above {}",
        records,
        counts.len(),
        params.cutoff
    );
    Ok((histogram, counts))
}
