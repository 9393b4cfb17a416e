//! Binary selection vectors over the candidate set.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One bit per candidate; `true` means the candidate is part of the schedule.
///
/// Owned exclusively by the solver that mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    bits: Vec<bool>,
}

impl Selection {
    /// All-zero selection of length `n`.
    pub fn empty(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// Each bit set independently with probability 1/2.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..n).map(|_| rng.random_bool(0.5)).collect(),
        }
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Selection with exactly the given indices set.
    pub fn from_indices(n: usize, indices: &[usize]) -> Self {
        let mut s = Self::empty(n);
        for &i in indices {
            s.bits[i] = true;
        }
        s
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.bits[i]
    }

    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        self.bits[i] = value;
    }

    #[inline]
    pub fn flip(&mut self, i: usize) {
        self.bits[i] = !self.bits[i];
    }

    /// Number of selected candidates.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Indices of selected candidates in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
    }

    pub fn as_bits(&self) -> &[bool] {
        &self.bits
    }
}
