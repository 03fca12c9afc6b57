use crate::{
    error::{Result, SelectionError},
    types::SelectionOutput,
};

/// Largest capacity the subset-sum table is built for. Above this slack coin selection
/// switches to the greedy heuristic.
pub const KNAPSACK_MAX_TARGET: u64 = 1000;

const WORD_BITS: usize = u64::BITS as usize;

/// Subset sums in `0..=capacity`, one bit per sum.
#[derive(Clone, PartialEq, Eq)]
struct SumSet {
    words: Vec<u64>,
    capacity: usize,
}

impl SumSet {
    /// The set holding only the empty sum.
    fn zero(capacity: usize) -> Self {
        let mut words = vec![0u64; capacity / WORD_BITS + 1];
        words[0] = 1;
        SumSet { words, capacity }
    }

    fn contains(&self, sum: usize) -> bool {
        sum <= self.capacity && self.words[sum / WORD_BITS] & (1u64 << (sum % WORD_BITS)) != 0
    }

    /// Every sum in `self`, plus each of them increased by `value`, capped at the capacity.
    fn with_added(&self, value: usize) -> Self {
        let word_shift = value / WORD_BITS;
        let bit_shift = value % WORD_BITS;
        let mut words = self.words.clone();
        for index in word_shift..words.len() {
            let source = index - word_shift;
            let mut shifted = self.words[source] << bit_shift;
            if bit_shift > 0 && source > 0 {
                shifted |= self.words[source - 1] >> (WORD_BITS - bit_shift);
            }
            words[index] |= shifted;
        }

        let top_bits = self.capacity % WORD_BITS + 1;
        if top_bits < WORD_BITS {
            let last = words.len() - 1;
            words[last] &= (1u64 << top_bits) - 1;
        }
        SumSet {
            words,
            capacity: self.capacity,
        }
    }

    fn max(&self) -> usize {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|&(_, &word)| word != 0)
            .map_or(0, |(index, &word)| {
                index * WORD_BITS + WORD_BITS - 1 - word.leading_zeros() as usize
            })
    }
}

/// Solves 0/1 subset-sum over `values`: finds the subset whose sum is as large as possible
/// without exceeding `target`.
///
/// The search is deterministic for a fixed ordering of `values`. Among all subsets reaching the
/// best sum, the one that takes the earliest indices wins: indices are visited in order and each
/// one is taken whenever the rest of the best sum is still reachable from the values after it.
///
/// Memory is bounded by `target` rather than by `values.len()`: values above `target` are
/// skipped, and a suffix's reachable sums are stored only when they differ from the next
/// suffix's, which happens at most `target + 1` times.
///
/// `selected_inputs` are indices into `values`, ascending.
pub fn select_coin_knapsack(values: &[u64], target: u64) -> Result<SelectionOutput> {
    if target > KNAPSACK_MAX_TARGET {
        return Err(SelectionError::KnapsackTargetOutOfRange { target });
    }
    let capacity = target as usize;

    let fitting: Vec<usize> = (0..values.len())
        .filter(|&index| values[index] <= target)
        .collect();

    // (k, sums): the sums reachable from fitting[k..], valid for every suffix start down to
    // the next stored k. Built back to front, so k is descending.
    let mut suffix_sums: Vec<(usize, SumSet)> = vec![(fitting.len(), SumSet::zero(capacity))];
    for k in (0..fitting.len()).rev() {
        let last = &suffix_sums[suffix_sums.len() - 1].1;
        let next = last.with_added(values[fitting[k]] as usize);
        if next != *last {
            suffix_sums.push((k, next));
        }
    }
    let best_sum = suffix_sums[suffix_sums.len() - 1].1.max();

    suffix_sums.reverse();
    let mut cursor = 0;
    let mut selected_inputs = Vec::new();
    let mut left = best_sum;
    for (k, &position) in fitting.iter().enumerate() {
        if left == 0 {
            break;
        }
        // Sums of fitting[k + 1..]: the first stored suffix starting at or after k + 1.
        while suffix_sums[cursor].0 <= k {
            cursor += 1;
        }
        let value = values[position] as usize;
        if value <= left && suffix_sums[cursor].1.contains(left - value) {
            selected_inputs.push(position);
            left -= value;
        }
    }

    Ok(SelectionOutput {
        selected_inputs,
        accumulated_value: best_sum as u64,
    })
}

#[cfg(test)]
mod test {

    use crate::{
        algorithms::knapsack::{select_coin_knapsack, KNAPSACK_MAX_TARGET},
        error::SelectionError,
    };

    #[test]
    fn test_knapsack_exact_sum() {
        let result = select_coin_knapsack(&[300, 200, 500, 100], 600).unwrap();
        assert_eq!(result.accumulated_value, 600);
        // 300+200+100 and 500+100 both hit 600; the earliest indices win.
        assert_eq!(result.selected_inputs, vec![0, 1, 3]);
    }

    #[test]
    fn test_knapsack_closest_below() {
        let result = select_coin_knapsack(&[400, 350, 700], 1000).unwrap();
        assert_eq!(result.accumulated_value, 750);
        assert_eq!(result.selected_inputs, vec![0, 1]);
    }

    #[test]
    fn test_knapsack_nothing_fits() {
        let result = select_coin_knapsack(&[90, 80], 50).unwrap();
        assert_eq!(result.accumulated_value, 0);
        assert!(result.selected_inputs.is_empty());
    }

    #[test]
    fn test_knapsack_ignores_zero_values_once_done() {
        let result = select_coin_knapsack(&[10, 0, 5], 10).unwrap();
        assert_eq!(result.selected_inputs, vec![0]);
    }

    #[test]
    fn test_knapsack_deterministic() {
        let values = [120, 80, 200, 40, 160, 90, 30];
        let first = select_coin_knapsack(&values, 333).unwrap();
        let second = select_coin_knapsack(&values, 333).unwrap();
        assert_eq!(first, second);
        let sum: u64 = first.selected_inputs.iter().map(|&i| values[i]).sum();
        assert_eq!(sum, first.accumulated_value);
        assert!(sum <= 333);
    }

    #[test]
    fn test_knapsack_sums_across_word_boundaries() {
        let result = select_coin_knapsack(&[63, 200, 64, 1, 70], 128).unwrap();
        assert_eq!(result.accumulated_value, 128);
        assert_eq!(result.selected_inputs, vec![0, 2, 3]);
    }

    #[test]
    fn test_knapsack_large_dust_pool() {
        let values = vec![5u64; 200_000];
        let result = select_coin_knapsack(&values, KNAPSACK_MAX_TARGET).unwrap();
        assert_eq!(result.accumulated_value, 1000);
        assert_eq!(result.selected_inputs, (0..200).collect::<Vec<usize>>());
    }

    #[test]
    fn test_knapsack_skips_values_above_target() {
        let result = select_coin_knapsack(&[5000, 30, 9000, 20], 45).unwrap();
        assert_eq!(result.accumulated_value, 30);
        assert_eq!(result.selected_inputs, vec![1]);
    }

    #[test]
    fn test_knapsack_target_out_of_range() {
        let result = select_coin_knapsack(&[1, 2, 3], KNAPSACK_MAX_TARGET + 1);
        assert!(matches!(
            result,
            Err(SelectionError::KnapsackTargetOutOfRange { target: 1001 })
        ));
    }
}
