use std::io::Write;

use crate::errors::RepkmerResult;
use crate::families::FamilyRecord;

pub const REPORT_HEADER: [&str; 4] = ["repeat", "total", "cv", "zeroes"];

/// Writes one tab-separated row per family under a header row.
///
/// The coefficient of variation uses the shortest representation that
/// round-trips, so a uniform family prints as `0.0`.
pub fn write_report(writer: &mut dyn Write, families: &[FamilyRecord]) -> RepkmerResult<()> {
    writeln!(writer, "{}", REPORT_HEADER.join("\t"))?;
    for family in families {
        writeln!(
            writer,
            "{}\t{}\t{:?}\t{}",
            family.repeat_unit, family.total, family.cv, family.zero_count
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_write_report() {
        let families = vec![
            FamilyRecord {
                repeat_unit: "A".to_string(),
                total: 50,
                cv: 0.,
                zero_count: 0,
                kmers: BTreeMap::new(),
            },
            FamilyRecord {
                repeat_unit: "AATG".to_string(),
                total: 22,
                cv: 0.25,
                zero_count: 2,
                kmers: BTreeMap::new(),
            },
        ];
        let mut out = Vec::new();
        write_report(&mut out, &families).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "repeat\ttotal\tcv\tzeroes\nA\t50\t0.0\t0\nAATG\t22\t0.25\t2\n"
        );

        let mut out = Vec::new();
        write_report(&mut out, &[]).unwrap();
        assert_eq!(out, b"repeat\ttotal\tcv\tzeroes\n");
    }
}
