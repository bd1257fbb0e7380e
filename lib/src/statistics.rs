use std::collections::BTreeMap;

use crate::KmerCounts;

/// Number of k-mers observed at each count, keyed by count.
pub type CountHistogram = BTreeMap<u64, u64>;

/// Generates the count histogram of a (possibly already filtered) k-mer
/// count mapping.
///
/// For example, a genome without repeats sequenced to 5x should produce a
/// "histogram" with most of its weight at `{5: ...}`.
///
pub fn counts_histogram(counts: &KmerCounts) -> CountHistogram {
    let mut histogram = CountHistogram::new();
    for count in counts.values() {
        *histogram.entry(*count).or_insert(0) += 1;
    }
    histogram
}

pub fn mean(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: u64 = values.iter().sum();
    Some(total as f64 / values.len() as f64)
}

/// Standard deviation of the values treated as a whole population (i.e.
/// dividing by `n` rather than `n - 1`).
pub fn population_stdev(values: &[u64]) -> Option<f64> {
    let mu = mean(values)?;
    let sq_dev: f64 = values
        .iter()
        .map(|v| {
            let d = *v as f64 - mu;
            d * d
        })
        .sum();
    Some((sq_dev / values.len() as f64).sqrt())
}

/// Population standard deviation over mean.
///
/// Undefined (`None`) for an empty slice or when every value is zero.
pub fn coefficient_of_variation(values: &[u64]) -> Option<f64> {
    let mu = mean(values)?;
    if mu == 0. {
        return None;
    }
    Some(population_stdev(values)? / mu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_histogram() {
        let mut counts = KmerCounts::new();
        counts.insert("AAA".to_string(), 3);
        counts.insert("AAC".to_string(), 3);
        counts.insert("AAG".to_string(), 7);
        counts.insert("AAT".to_string(), 126_497);

        let histogram = counts_histogram(&counts);
        assert_eq!(histogram.len(), 3);
        assert_eq!(histogram[&3], 2);
        assert_eq!(histogram[&7], 1);
        assert_eq!(histogram[&126_497], 1);
        assert!(counts_histogram(&KmerCounts::new()).is_empty());
    }

    #[test]
    fn test_population_stdev() {
        assert_eq!(population_stdev(&[]), None);
        assert_eq!(population_stdev(&[50]), Some(0.));
        assert_eq!(population_stdev(&[2, 4, 4, 4, 5, 5, 7, 9]), Some(2.));
    }

    #[test]
    fn test_coefficient_of_variation() {
        assert_eq!(coefficient_of_variation(&[50]), Some(0.));
        assert_eq!(coefficient_of_variation(&[2, 4, 4, 4, 5, 5, 7, 9]), Some(0.4));
        let cv = coefficient_of_variation(&[10, 12, 0, 0]).unwrap();
        assert!((cv - 30.75f64.sqrt() / 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_coefficient_of_variation_undefined() {
        assert_eq!(coefficient_of_variation(&[]), None);
        assert_eq!(coefficient_of_variation(&[0, 0, 0]), None);
    }
}
