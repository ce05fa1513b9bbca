//! # Active Set Selection (`active_set.rs`)
//!
//! Picks the `k` heaviest items out of a weighted collection for consumers with a fixed
//! capacity, such as a shader uniform array that holds at most
//! [`MAX_ACTIVE_MORPH_TARGETS`](crate::MAX_ACTIVE_MORPH_TARGETS) influences.
//!
//! Items and weights live in two parallel slices. Selection sorts a single permutation of
//! indices and gathers both outputs through it, so an item always stays paired with its own
//! weight.

use std::cmp::Ordering;

/// Result of [`select_active_set`]: parallel sequences of selected items and their weights.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSet<'a, T> {
    /// Positions of the selected items in the source slices.
    pub indices: Vec<usize>,
    pub items: Vec<&'a T>,
    pub weights: Vec<f32>,
}

impl<'a, T> ActiveSet<'a, T> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Selects the `k` items with the largest weights.
///
/// When there are at most `k` items the full set is returned in its original order without
/// sorting. Otherwise the result is ordered by descending weight; ties keep their source
/// order and NaN weights rank below every number. Only the common prefix of `items` and
/// `weights` is considered.
pub fn select_active_set<'a, T>(items: &'a [T], weights: &[f32], k: usize) -> ActiveSet<'a, T> {
    let count = items.len().min(weights.len());

    let mut indices: Vec<usize> = (0..count).collect();
    if count > k {
        indices.sort_by(|&a, &b| compare_descending(weights[a], weights[b]));
        indices.truncate(k);
    }

    ActiveSet {
        items: indices.iter().map(|&i| &items[i]).collect(),
        weights: indices.iter().map(|&i| weights[i]).collect(),
        indices,
    }
}

fn compare_descending(a: f32, b: f32) -> Ordering {
    let rank = |w: f32| if w.is_nan() { f32::NEG_INFINITY } else { w };
    rank(b).total_cmp(&rank(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sets_are_returned_unchanged() {
        let items = ["a", "b", "c", "d", "e"];
        let weights = [0.1, 0.9, 0.3, 0.0, 0.5];

        let active = select_active_set(&items, &weights, 8);

        assert_eq!(active.indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(active.items, items.iter().collect::<Vec<_>>());
        assert_eq!(active.weights, weights.to_vec());
    }

    #[test]
    fn large_sets_keep_heaviest_in_descending_order() {
        let items: Vec<u32> = (0..10).collect();
        let weights = [0.3, 0.8, 0.1, 0.95, 0.0, 0.6, 0.7, 0.2, 0.5, 0.4];

        let active = select_active_set(&items, &weights, 8);

        assert_eq!(active.len(), 8);
        assert!(active.weights.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(active.indices, vec![3, 1, 6, 5, 8, 9, 0, 7]);
        for (item, weight) in active.items.iter().zip(&active.weights) {
            assert_eq!(weights[**item as usize], *weight);
        }
    }

    #[test]
    fn ties_keep_source_order() {
        let items = ['a', 'b', 'c', 'd'];
        let weights = [0.5, 1.0, 0.5, 0.5];

        let active = select_active_set(&items, &weights, 3);

        assert_eq!(active.items, vec![&'b', &'a', &'c']);
    }

    #[test]
    fn nan_weights_rank_last() {
        let items = [0, 1, 2];
        let weights = [f32::NAN, -1.0, 0.5];

        let active = select_active_set(&items, &weights, 2);

        assert_eq!(active.indices, vec![2, 1]);
    }

    #[test]
    fn only_common_prefix_is_ranked() {
        let items = [0, 1, 2, 3, 4, 5];
        let weights = [0.1, 0.9, 0.3];

        assert_eq!(select_active_set(&items, &weights, 8).indices, vec![0, 1, 2]);
        assert_eq!(select_active_set(&items, &weights, 2).indices, vec![1, 2]);

        let items = [0, 1];
        let weights = [0.2, 0.4, 7.0, 8.0, 9.0];

        assert_eq!(select_active_set(&items, &weights, 8).weights, vec![0.2, 0.4]);
        assert_eq!(select_active_set(&items, &weights, 1).items, vec![&1]);
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let items: [u8; 0] = [];
        let active = select_active_set(&items, &[], 8);
        assert!(active.is_empty());
    }
}
