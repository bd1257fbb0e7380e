mod json;
mod report;

use std::io::{Read, Write};

use crate::errors::RepkmerResult;
use crate::statistics::CountHistogram;
use crate::KmerCounts;
pub use crate::serialization::json::{write_family_kmers, FamilyKmers};
pub use crate::serialization::report::{write_report, REPORT_HEADER};

pub const REPORT_EXT: &str = ".report.tsv";
pub const KMERS_EXT: &str = ".kmers.json";

/// Reads a JSON object of `{kmer: count}`.
pub fn read_counts(reader: &mut dyn Read) -> RepkmerResult<KmerCounts> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_counts_slice(data: &[u8]) -> RepkmerResult<KmerCounts> {
    Ok(serde_json::from_slice(data)?)
}

pub fn write_counts(writer: &mut dyn Write, counts: &KmerCounts) -> RepkmerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, counts)?;
    writeln!(writer)?;
    Ok(())
}

pub fn read_histogram(reader: &mut dyn Read) -> RepkmerResult<CountHistogram> {
    Ok(serde_json::from_reader(reader)?)
}

/// Writes the histogram as a JSON object; counts become string keys.
pub fn write_histogram(writer: &mut dyn Write, histogram: &CountHistogram) -> RepkmerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, histogram)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_counts() {
        let mut data = Cursor::new(r#"{"AAAAA": 12, "ACACA": 3}"#);
        let counts = read_counts(&mut data).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["AAAAA"], 12);

        assert!(read_counts_slice(br#"{"AAAAA": -1}"#).is_err());
        assert!(read_counts_slice(br#"{"AAAAA": "12"}"#).is_err());
        assert!(read_counts_slice(b"[1, 2]").is_err());
    }

    #[test]
    fn test_histogram_keys_are_strings() {
        let mut histogram = CountHistogram::new();
        histogram.insert(3, 10);
        histogram.insert(12, 1);
        let mut out = Vec::new();
        write_histogram(&mut out, &histogram).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["3"], 10);
        assert_eq!(value["12"], 1);

        let reread = read_histogram(&mut Cursor::new(out)).unwrap();
        assert_eq!(reread, histogram);
    }
}
