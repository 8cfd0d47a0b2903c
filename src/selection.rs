//! Binary selection vectors.

/// A 0/1 packing decision: bit `j` is `true` when item `j` is packed.
///
/// Selections are cheap to copy (bounded by the number of items) and carry
/// no reference to the instance they were built for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    bits: Vec<bool>,
}

impl Selection {
    /// The empty selection over `n` items.
    pub fn empty(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// A selection over `n` items with exactly `items` packed.
    ///
    /// # Panics
    /// Panics if an index is `>= n`.
    pub fn from_items(n: usize, items: &[usize]) -> Self {
        let mut sel = Self::empty(n);
        for &j in items {
            sel.bits[j] = true;
        }
        sel
    }

    /// Number of items this selection ranges over.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// `true` if the selection ranges over zero items.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether item `j` is packed.
    pub fn is_selected(&self, j: usize) -> bool {
        self.bits[j]
    }

    /// Packs or unpacks item `j`.
    pub fn set(&mut self, j: usize, value: bool) {
        self.bits[j] = value;
    }

    /// Inverts bit `j`.
    pub fn flip(&mut self, j: usize) {
        self.bits[j] = !self.bits[j];
    }

    /// Number of packed items.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Indices of packed items, ascending.
    pub fn selected_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(j, &b)| b.then_some(j))
    }

    /// Swaps bits `cut..` with `other` (single-point crossover).
    ///
    /// # Panics
    /// Panics if the selections differ in length or `cut > len`.
    pub fn swap_tail(&mut self, other: &mut Selection, cut: usize) {
        self.bits[cut..].swap_with_slice(&mut other.bits[cut..]);
    }

    /// The raw bit vector.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl From<Vec<bool>> for Selection {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}
