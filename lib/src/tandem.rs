use std::collections::BTreeSet;

use crate::errors::{RepkmerError, RepkmerResult};
use crate::sequence::{canonical_kmer, check_dna, reverse_complement};

/// Finds the shortest frame `f` such that `seq` shifted by `f` positions
/// agrees with itself, returning `f` and the first `f` characters as the
/// repeat unit.
///
/// A sequence with no shorter period has a frame equal to its own length
/// and an empty sequence is reported as frame 1 with an empty unit.
pub fn minimal_period(seq: &str) -> (usize, &str) {
    if seq.is_empty() {
        return (1, "");
    }
    let bytes = seq.as_bytes();
    let len = bytes.len();
    for frame in 1..len {
        // any match lines up with a char boundary since byte 0 starts a char
        if bytes[..len - frame] == bytes[frame..] {
            return (frame, &seq[..frame]);
        }
    }
    (len, seq)
}

/// Every cyclic rotation of `seq`, moving the last character to the front
/// one step at a time and starting from `seq` itself.
///
/// Always has one entry per character, even when rotations coincide.
pub fn rotations(seq: &str) -> Vec<String> {
    let steps = seq.chars().count();
    let mut rotated = Vec::with_capacity(steps);
    let mut current = seq.to_string();
    for _ in 0..steps {
        rotated.push(current.clone());
        if let Some(last) = current.pop() {
            current.insert(0, last);
        }
    }
    rotated
}

/// Picks the smallest string among all rotations of `unit` and their
/// reverse complements.
pub fn canonical_repeat(unit: &str) -> RepkmerResult<String> {
    let mut best: Option<String> = None;
    for rotation in rotations(unit) {
        let rc = reverse_complement(&rotation)?;
        let smaller = if rc < rotation { rc } else { rotation };
        best = match best {
            Some(b) if b <= smaller => Some(b),
            _ => Some(smaller),
        };
    }
    Ok(best.unwrap_or_default())
}

/// All the k-mers a perfect tandem array of `unit` would contain, one per
/// reading frame.
///
/// With `canonical` set each k-mer is replaced by its canonical strand;
/// collisions between frames are folded so the result may be smaller than
/// the unit length.
pub fn expected_kmers(unit: &str, k: usize, canonical: bool) -> RepkmerResult<BTreeSet<String>> {
    check_dna(unit)?;
    if k <= unit.len() {
        return Err(RepkmerError::UnitTooLong {
            unit: unit.to_string(),
            unit_length: unit.len(),
            k,
        });
    }

    let mut kmers = BTreeSet::new();
    if unit.is_empty() {
        return Ok(kmers);
    }
    let quot = k / unit.len();
    let rmdr = k % unit.len();
    for rotation in rotations(unit) {
        let mut kmer = rotation.repeat(quot);
        kmer.push_str(&rotation[..rmdr]);
        if canonical {
            kmer = canonical_kmer(&kmer)?;
        }
        kmers.insert(kmer);
    }
    Ok(kmers)
}
