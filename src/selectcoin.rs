use crate::{
    algorithms::{
        greedy::select_coin_greedy,
        knapsack::{select_coin_knapsack, KNAPSACK_MAX_TARGET},
        lowestlarger::select_coin_lowestlarger,
    },
    error::{Result, SelectionError},
    types::{OutputCoin, SelectionResult},
};

/// Selects coins from `coins` whose values add up to at least `amount`.
///
/// Coins worth at most `amount` are "small", the rest "large". The slack
/// `gap = sum(small) - amount` picks the strategy:
///
/// * `gap > 1000`: greedy fill over all coins, in input order.
/// * `0 < gap <= 1000`: subset-sum over the small coins to find which ones to leave out.
/// * `gap == 0`: all small coins.
/// * `gap < 0`: the smallest large coin, or `InsufficientFunds` if there is none.
///
/// Both halves of the result keep the input order, and together they hold every input coin
/// exactly once. The function is pure; the same input always yields the same result.
pub fn select_coin(coins: &[OutputCoin], amount: u64) -> Result<SelectionResult> {
    if amount == 0 {
        return Ok(SelectionResult {
            selected: Vec::new(),
            remaining: coins.to_vec(),
            total_selected_value: 0,
        });
    }

    let (small, large): (Vec<usize>, Vec<usize>) =
        (0..coins.len()).partition(|&index| coins[index].value <= amount);

    // Wide enough that neither the sum nor the difference can overflow.
    let small_sum: u128 = small.iter().map(|&index| coins[index].value as u128).sum();
    let gap = small_sum as i128 - amount as i128;

    let selected_indices: Vec<usize> = if gap > KNAPSACK_MAX_TARGET as i128 {
        select_coin_greedy(coins, amount)?.selected_inputs
    } else if gap > 0 {
        // The knapsack runs on the slack, not on the amount: it finds the small coins whose
        // values fit inside `gap` and those are the ones we do NOT spend. What is left of the
        // small coins then sums to at least `sum(small) - gap == amount`.
        let small_values: Vec<u64> = small.iter().map(|&index| coins[index].value).collect();
        let excluded = select_coin_knapsack(&small_values, gap as u64)?;
        let mut excluded_flags = vec![false; small.len()];
        for &position in &excluded.selected_inputs {
            excluded_flags[position] = true;
        }
        small
            .iter()
            .zip(excluded_flags)
            .filter(|(_, is_excluded)| !is_excluded)
            .map(|(&index, _)| index)
            .collect()
    } else if gap == 0 {
        small
    } else {
        let large_coins: Vec<OutputCoin> = large.iter().map(|&index| coins[index].clone()).collect();
        match select_coin_lowestlarger(&large_coins, amount) {
            Ok(output) => output
                .selected_inputs
                .iter()
                .map(|&position| large[position])
                .collect(),
            Err(SelectionError::InsufficientFunds { .. }) => {
                return Err(SelectionError::InsufficientFunds {
                    required: amount,
                    available: small_sum as u64,
                })
            }
            Err(e) => return Err(e),
        }
    };

    let result = split_by_indices(coins, &selected_indices)?;
    tracing::debug!(
        amount,
        gap = gap as i64,
        selected = result.selected.len(),
        remaining = result.remaining.len(),
        total = result.total_selected_value,
        "Selected coins"
    );
    Ok(result)
}

/// Splits `coins` into the ones at `selected_indices` and the rest, preserving input order.
fn split_by_indices(coins: &[OutputCoin], selected_indices: &[usize]) -> Result<SelectionResult> {
    let mut is_selected = vec![false; coins.len()];
    for &index in selected_indices {
        is_selected[index] = true;
    }

    let mut selected = Vec::with_capacity(selected_indices.len());
    let mut remaining = Vec::with_capacity(coins.len() - selected_indices.len());
    let mut total_selected_value: u64 = 0;
    for (coin, chosen) in coins.iter().zip(is_selected) {
        if chosen {
            total_selected_value = total_selected_value
                .checked_add(coin.value)
                .ok_or(SelectionError::AmountOverflow)?;
            selected.push(coin.clone());
        } else {
            remaining.push(coin.clone());
        }
    }

    Ok(SelectionResult {
        selected,
        remaining,
        total_selected_value,
    })
}
