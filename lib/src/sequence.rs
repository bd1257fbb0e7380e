use crate::errors::{RepkmerError, RepkmerResult};

/// Watson-Crick pair of a base, or `None` for anything outside `ACGT`.
#[inline]
pub fn complement(base: char) -> Option<char> {
    match base {
        'A' => Some('T'),
        'C' => Some('G'),
        'G' => Some('C'),
        'T' => Some('A'),
        _ => None,
    }
}

/// Fails with `InvalidBase` on the first character that isn't an
/// uppercase `A`, `C`, `G` or `T`.
pub fn check_dna(seq: &str) -> RepkmerResult<()> {
    match seq.chars().find(|c| complement(*c).is_none()) {
        Some(base) => Err(RepkmerError::InvalidBase {
            seq: seq.to_string(),
            base,
        }),
        None => Ok(()),
    }
}

pub fn reverse_complement(seq: &str) -> RepkmerResult<String> {
    let mut rc = String::with_capacity(seq.len());
    for base in seq.chars().rev() {
        match complement(base) {
            Some(c) => rc.push(c),
            None => {
                return Err(RepkmerError::InvalidBase {
                    seq: seq.to_string(),
                    base,
                })
            }
        }
    }
    Ok(rc)
}

/// The lexicographically smaller of a k-mer and its reverse complement.
pub fn canonical_kmer(kmer: &str) -> RepkmerResult<String> {
    let rc = reverse_complement(kmer)?;
    if rc.as_str() < kmer {
        Ok(rc)
    } else {
        Ok(kmer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("ACGT").unwrap(), "ACGT");
        assert_eq!(reverse_complement("AACG").unwrap(), "CGTT");
        assert_eq!(reverse_complement("").unwrap(), "");
    }

    #[test]
    fn test_invalid_bases() {
        match reverse_complement("ACNT") {
            Err(RepkmerError::InvalidBase { seq, base }) => {
                assert_eq!(seq, "ACNT");
                assert_eq!(base, 'N');
            }
            other => panic!("expected an invalid base error, got {:?}", other),
        }
        // lowercase would sort after every uppercase base
        assert!(check_dna("acgt").is_err());
        assert!(canonical_kmer("ACGTX").is_err());
        assert!(check_dna("GATTACA").is_ok());
    }

    #[test]
    fn test_canonical_kmer() {
        assert_eq!(canonical_kmer("TTTT").unwrap(), "AAAA");
        assert_eq!(canonical_kmer("AAAA").unwrap(), "AAAA");
        assert_eq!(canonical_kmer("GTAC").unwrap(), "GTAC");
        assert_eq!(canonical_kmer("TGCA").unwrap(), "TGCA");
        assert_eq!(canonical_kmer("CGTT").unwrap(), "AACG");
    }

    proptest! {
        #[test]
        fn test_canonical_kmer_strand_invariant(kmer in "[ACGT]{1,31}") {
            let rc = reverse_complement(&kmer).unwrap();
            prop_assert_eq!(canonical_kmer(&kmer).unwrap(), canonical_kmer(&rc).unwrap());
            prop_assert_eq!(reverse_complement(&rc).unwrap(), kmer);
        }
    }
}
