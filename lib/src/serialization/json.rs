use std::collections::BTreeMap;
use std::io::Write;

use crate::errors::RepkmerResult;
use crate::families::FamilyRecord;

/// Repeat unit -> expected k-mer -> observed count
pub type FamilyKmers = BTreeMap<String, BTreeMap<String, u64>>;

pub fn write_family_kmers(writer: &mut dyn Write, families: &[FamilyRecord]) -> RepkmerResult<()> {
    let nested: FamilyKmers = families
        .iter()
        .map(|f| (f.repeat_unit.clone(), f.kmers.clone()))
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &nested)?;
    writeln!(writer)?;
    Ok(())
}
