use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::errors::{RepkmerError, RepkmerResult};
use crate::sequence::{check_dna, reverse_complement};
use crate::statistics::coefficient_of_variation;
use crate::tandem::{canonical_repeat, expected_kmers, minimal_period};
use crate::KmerCounts;

const PROGRESS_INTERVAL: usize = 100_000;

/// Used to pass around the options for a repeat-family search
#[derive(Clone, Debug, PartialEq)]
pub struct RepeatParams {
    pub kmer_length: u8,
    /// Families with this many (or more) unobserved expected k-mers are
    /// not reported
    pub max_zeroes: usize,
}

impl Default for RepeatParams {
    fn default() -> Self {
        RepeatParams {
            kmer_length: 19,
            max_zeroes: 1,
        }
    }
}

impl RepeatParams {
    pub fn k(&self) -> usize {
        usize::from(self.kmer_length)
    }

    pub fn validate(&self) -> RepkmerResult<()> {
        let k = u32::from(self.kmer_length);
        if k < 3 || k % 2 == 0 {
            return Err(RepkmerError::InvalidK(k));
        }
        if (3..k).step_by(2).take_while(|d| d * d <= k).any(|d| k % d == 0) {
            warn!("k-mer length {} is not prime; a prime k is recommended", k);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FamilyRecord {
    pub repeat_unit: String,
    pub total: u64,
    /// Population standard deviation over mean of the expected k-mer
    /// counts; NaN when every expected k-mer is missing (such families are
    /// never accepted)
    pub cv: f64,
    pub zero_count: usize,
    pub kmers: BTreeMap<String, u64>,
}

impl FamilyRecord {
    /// Looks up each expected k-mer in `counts`, with absent k-mers
    /// counting as zero.
    pub fn from_expected(
        repeat_unit: String,
        expected: &BTreeSet<String>,
        counts: &KmerCounts,
    ) -> Self {
        let kmers: BTreeMap<String, u64> = expected
            .iter()
            .map(|kk| (kk.clone(), counts.get(kk).copied().unwrap_or(0)))
            .collect();
        let values: Vec<u64> = kmers.values().copied().collect();
        FamilyRecord {
            repeat_unit,
            total: values.iter().sum(),
            cv: coefficient_of_variation(&values).unwrap_or(f64::NAN),
            zero_count: values.iter().filter(|v| **v == 0).count(),
            kmers,
        }
    }

    /// True if no expected k-mer was observed at all.
    pub fn is_unobserved(&self) -> bool {
        self.zero_count == self.kmers.len()
    }
}

/// How many times each k-mer has been claimed by an earlier family.
///
/// Both strands of a k-mer are claimed together so that a non-canonical
/// seed can't rediscover a family.
#[derive(Debug, Default)]
pub struct ConsumptionTracker {
    claimed: HashMap<String, u32>,
}

impl ConsumptionTracker {
    pub fn is_consumed(&self, kmer: &str) -> bool {
        self.times_claimed(kmer) > 0
    }

    pub fn times_claimed(&self, kmer: &str) -> u32 {
        self.claimed.get(kmer).copied().unwrap_or(0)
    }

    pub fn claim(&mut self, kmer: &str) -> RepkmerResult<()> {
        let rc = reverse_complement(kmer)?;
        if rc != kmer {
            *self.claimed.entry(rc).or_insert(0) += 1;
        }
        *self.claimed.entry(kmer.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct RepeatSummary {
    /// Accepted families, in the order they were found
    pub families: Vec<FamilyRecord>,
    pub kmers_processed: usize,
    pub seeds_examined: usize,
    pub families_rejected: usize,
}

/// Checks every k-mer and returns them ordered by descending count (ties
/// broken on the k-mer itself so runs are reproducible).
pub fn sort_by_count(counts: &KmerCounts, k: usize) -> RepkmerResult<Vec<(&str, u64)>> {
    let mut candidates = Vec::with_capacity(counts.len());
    for (kmer, count) in counts {
        if kmer.len() != k {
            return Err(RepkmerError::KmerLength {
                kmer: kmer.clone(),
                expected: k,
            });
        }
        check_dna(kmer)?;
        candidates.push((kmer.as_str(), *count));
    }
    candidates.par_sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    Ok(candidates)
}

/// Collects the tandem-repeat families of `counts`, seeding from the most
/// abundant k-mers first.
pub fn find_repeats(counts: &KmerCounts, params: &RepeatParams) -> RepkmerResult<RepeatSummary> {
    params.validate()?;
    let candidates = sort_by_count(counts, params.k())?;
    info!("Total of {} k-mers in input", candidates.len());
    find_repeats_in_order(&candidates, counts, params)
}

/// Single pass over `candidates` in the given order, collecting the
/// tandem-repeat families whose expected k-mers were (nearly) all observed.
///
/// Every k-mer of a family is claimed whether or not the family is
/// accepted, so each family is expanded at most once.
pub fn find_repeats_in_order(
    candidates: &[(&str, u64)],
    counts: &KmerCounts,
    params: &RepeatParams,
) -> RepkmerResult<RepeatSummary> {
    let k = params.k();
    let mut tracker = ConsumptionTracker::default();
    let mut summary = RepeatSummary::default();
    for &(kmer, _) in candidates {
        summary.kmers_processed += 1;
        if summary.kmers_processed % PROGRESS_INTERVAL == 0 {
            info!("Processed {} k-mers from input", summary.kmers_processed);
        }
        if tracker.is_consumed(kmer) {
            continue;
        }

        let (frame, unit) = minimal_period(kmer);
        if frame >= k {
            // not evidently a repeat at this k-mer length
            continue;
        }
        summary.seeds_examined += 1;

        let unit = canonical_repeat(unit)?;
        let expected = expected_kmers(&unit, k, true)?;
        for kk in &expected {
            tracker.claim(kk)?;
        }

        let family = FamilyRecord::from_expected(unit, &expected, counts);
        if family.zero_count < params.max_zeroes && !family.is_unobserved() {
            debug!(
                "Accepted {} (seed {}, total {}, {} zeroes)",
                family.repeat_unit, kmer, family.total, family.zero_count
            );
            summary.families.push(family);
        } else {
            debug!(
                "Rejected {} (seed {}, {} of {} expected k-mers missing)",
                family.repeat_unit,
                kmer,
                family.zero_count,
                family.kmers.len()
            );
            summary.families_rejected += 1;
        }
    }
    info!(
        "Found {} repeat families ({} rejected)",
        summary.families.len(),
        summary.families_rejected
    );
    Ok(summary)
}
