//! Problem instance of the Knapsack Problem with Forfeit Sets.
//!
//! An [`Instance`] is immutable once built. Engines borrow it read-only, so a
//! single instance can be shared by every worker thread of a run.
//!
//! # Text format
//!
//! Whitespace-separated non-negative integers:
//!
//! ```text
//! numItems numSets capacity
//! profit_0 .. profit_{N-1}
//! weight_0 .. weight_{N-1}
//! allowance forfeitCost itemCount item_0 .. item_{itemCount-1}   (numSets times)
//! ```

use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A group of items sharing an allowance and a per-excess-item penalty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForfeitSet {
    /// Number of members that may be selected without penalty.
    pub allowance: usize,
    /// Cost charged once per selected member beyond the allowance.
    pub forfeit_cost: u32,
    /// Member item indices.
    pub items: Vec<usize>,
}

impl ForfeitSet {
    /// Creates a forfeit set.
    pub fn new(allowance: usize, forfeit_cost: u32, items: Vec<usize>) -> Self {
        Self {
            allowance,
            forfeit_cost,
            items,
        }
    }
}

/// An immutable KPFS instance.
///
/// # Examples
///
/// ```
/// use kpfs_metaheur::{ForfeitSet, Instance};
///
/// let instance = Instance::new(
///     2,
///     vec![10, 10],
///     vec![1, 1],
///     vec![ForfeitSet::new(1, 100, vec![0, 1])],
/// )
/// .unwrap();
/// assert_eq!(instance.num_items(), 2);
/// assert_eq!(instance.num_sets(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instance {
    capacity: u64,
    profits: Vec<u32>,
    weights: Vec<u32>,
    forfeit_sets: Vec<ForfeitSet>,
}

impl Instance {
    /// Builds an instance, checking that profits and weights line up and
    /// that every forfeit set member is a valid item index.
    pub fn new(
        capacity: u64,
        profits: Vec<u32>,
        weights: Vec<u32>,
        forfeit_sets: Vec<ForfeitSet>,
    ) -> Result<Self> {
        if profits.len() != weights.len() {
            return Err(Error::LengthMismatch {
                profits: profits.len(),
                weights: weights.len(),
            });
        }
        let num_items = profits.len();
        for (set, fs) in forfeit_sets.iter().enumerate() {
            if let Some(&item) = fs.items.iter().find(|&&item| item >= num_items) {
                return Err(Error::ItemOutOfRange {
                    set,
                    item,
                    num_items,
                });
            }
        }
        Ok(Self {
            capacity,
            profits,
            weights,
            forfeit_sets,
        })
    }

    /// Reads and parses an instance file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let instance: Self = text.parse()?;
        log::debug!(
            "loaded {}: {} items, {} forfeit sets, capacity {}",
            path.display(),
            instance.num_items(),
            instance.num_sets(),
            instance.capacity
        );
        Ok(instance)
    }

    /// Number of items (N).
    pub fn num_items(&self) -> usize {
        self.profits.len()
    }

    /// Number of forfeit sets (M).
    pub fn num_sets(&self) -> usize {
        self.forfeit_sets.len()
    }

    /// Knapsack capacity (C).
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Item profits in index order.
    pub fn profits(&self) -> &[u32] {
        &self.profits
    }

    /// Item weights in index order.
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Forfeit sets in file order.
    pub fn forfeit_sets(&self) -> &[ForfeitSet] {
        &self.forfeit_sets
    }

    /// `true` when the instance has no items; engines return the sentinel
    /// result for such instances.
    pub fn is_degenerate(&self) -> bool {
        self.profits.is_empty()
    }
}

impl FromStr for Instance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = Tokens::new(s);

        let num_items = tokens.next_usize("numItems")?;
        let num_sets = tokens.next_usize("numSets")?;
        let capacity = tokens.next_u64("capacity")?;

        let profits = (0..num_items)
            .map(|j| tokens.next_u32(|| format!("profit of item {j}")))
            .collect::<Result<Vec<_>>>()?;
        let weights = (0..num_items)
            .map(|j| tokens.next_u32(|| format!("weight of item {j}")))
            .collect::<Result<Vec<_>>>()?;

        // Header counts are untrusted: grow the vectors as tokens arrive.
        let forfeit_sets = (0..num_sets)
            .map(|s| -> Result<ForfeitSet> {
                let allowance = tokens.next_usize(&format!("allowance of forfeit set {s}"))?;
                let forfeit_cost = tokens.next_u32(|| format!("forfeit cost of set {s}"))?;
                let count = tokens.next_usize(&format!("item count of forfeit set {s}"))?;
                let items = (0..count)
                    .map(|k| tokens.next_usize(&format!("item {k} of forfeit set {s}")))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ForfeitSet::new(allowance, forfeit_cost, items))
            })
            .collect::<Result<Vec<_>>>()?;

        Instance::new(capacity, profits, weights, forfeit_sets)
    }
}

/// Whitespace tokenizer that names the field it was reading on failure.
struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            inner: s.split_whitespace(),
        }
    }

    fn next_parsed<T: FromStr>(&mut self, field: impl FnOnce() -> String) -> Result<T> {
        match self.inner.next() {
            Some(token) => token.parse().map_err(|_| Error::InvalidToken {
                field: field(),
                token: token.to_string(),
            }),
            None => Err(Error::Truncated { field: field() }),
        }
    }

    fn next_usize(&mut self, field: &str) -> Result<usize> {
        self.next_parsed(|| field.to_string())
    }

    fn next_u64(&mut self, field: &str) -> Result<u64> {
        self.next_parsed(|| field.to_string())
    }

    fn next_u32(&mut self, field: impl FnOnce() -> String) -> Result<u32> {
        self.next_parsed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "4 2 10\n\
                          5 6 7 8\n\
                          2 3 4 5\n\
                          1 20 2\n0 1\n\
                          0 5 3\n1 2 3\n";

    #[test]
    fn test_parse_sample() {
        let inst: Instance = SAMPLE.parse().expect("sample should parse");
        assert_eq!(inst.num_items(), 4);
        assert_eq!(inst.num_sets(), 2);
        assert_eq!(inst.capacity(), 10);
        assert_eq!(inst.profits(), &[5, 6, 7, 8]);
        assert_eq!(inst.weights(), &[2, 3, 4, 5]);
        assert_eq!(inst.forfeit_sets()[0], ForfeitSet::new(1, 20, vec![0, 1]));
        assert_eq!(inst.forfeit_sets()[1], ForfeitSet::new(0, 5, vec![1, 2, 3]));
    }

    #[test]
    fn test_parse_no_sets() {
        let inst: Instance = "3 0 1 5 5 5 1 1 1".parse().unwrap();
        assert_eq!(inst.num_sets(), 0);
        assert!(!inst.is_degenerate());
    }

    #[test]
    fn test_parse_truncated_names_field() {
        let err = "3 0 1 5 5 5 1 1".parse::<Instance>().unwrap_err();
        match err {
            Error::Truncated { field } => assert_eq!(field, "weight of item 2"),
            other => panic!("expected Truncated, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_truncated_set_members() {
        let err = "2 1 5 1 1 1 1 1 1 2 0".parse::<Instance>().unwrap_err();
        assert!(
            matches!(err, Error::Truncated { ref field } if field == "item 1 of forfeit set 0"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_parse_huge_counts_are_truncated() {
        let err = "0 18446744073709551615 5".parse::<Instance>().unwrap_err();
        assert!(
            matches!(err, Error::Truncated { ref field } if field == "allowance of forfeit set 0"),
            "unexpected error: {err:?}"
        );

        let err = "1099511627776 0 5".parse::<Instance>().unwrap_err();
        assert!(
            matches!(err, Error::Truncated { ref field } if field == "profit of item 0"),
            "unexpected error: {err:?}"
        );

        let err = "1 1 5 1 1 0 2 1099511627776".parse::<Instance>().unwrap_err();
        assert!(
            matches!(err, Error::Truncated { ref field } if field == "item 0 of forfeit set 0"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_parse_invalid_token() {
        let err = "2 0 x".parse::<Instance>().unwrap_err();
        assert!(matches!(err, Error::InvalidToken { ref token, .. } if token == "x"));

        let err = "1 0 5 -3 1".parse::<Instance>().unwrap_err();
        assert!(matches!(err, Error::InvalidToken { ref token, .. } if token == "-3"));
    }

    #[test]
    fn test_item_out_of_range() {
        let err = "2 1 5 1 1 1 1 0 1 1 2".parse::<Instance>().unwrap_err();
        assert!(
            matches!(err, Error::ItemOutOfRange { set: 0, item: 2, num_items: 2 }),
            "unexpected error: {err:?}"
        );
        assert!(err.is_instance_error());
    }

    #[test]
    fn test_length_mismatch() {
        let err = Instance::new(5, vec![1, 2], vec![1], vec![]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { profits: 2, weights: 1 }));
    }

    #[test]
    fn test_degenerate_instance() {
        let inst: Instance = "0 0 10".parse().unwrap();
        assert!(inst.is_degenerate());
        assert_eq!(inst.num_items(), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Instance::load("/definitely/not/here/kpfs_1.txt").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.is_instance_error());
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("kpfs_instance_{}.txt", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let inst = Instance::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(inst.num_items(), 4);
    }
}
