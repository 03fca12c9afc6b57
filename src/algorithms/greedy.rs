use crate::{
    error::{Result, SelectionError},
    types::{OutputCoin, SelectionOutput},
};

/// Performs coin selection by taking coins in the order they are given until the target is
/// reached.
///
/// The inputs are deliberately not sorted, so this is a bin-fill heuristic and can overshoot
/// the target by more than a smarter selection would. Which coins a wallet spends depends on
/// this order, so it must stay as is.
///
/// Returns `InsufficientFunds` if all inputs together do not reach `target`. The accumulated
/// value saturates at `u64::MAX`, which is still enough for any target.
pub fn select_coin_greedy(inputs: &[OutputCoin], target: u64) -> Result<SelectionOutput> {
    let mut accumulated_value: u64 = 0;
    let mut selected_inputs: Vec<usize> = Vec::new();

    for (index, input) in inputs.iter().enumerate() {
        if accumulated_value >= target {
            break;
        }
        accumulated_value = accumulated_value.saturating_add(input.value);
        selected_inputs.push(index);
    }

    if accumulated_value < target {
        Err(SelectionError::InsufficientFunds {
            required: target,
            available: accumulated_value,
        })
    } else {
        Ok(SelectionOutput {
            selected_inputs,
            accumulated_value,
        })
    }
}

#[cfg(test)]
mod test {

    use crate::{
        algorithms::greedy::select_coin_greedy,
        error::SelectionError,
        types::{CoinHash, OutputCoin, PublicKey},
    };

    fn setup_greedy_output_coins() -> Vec<OutputCoin> {
        [5000, 400, 40000, 25000, 600]
            .iter()
            .enumerate()
            .map(|(i, &value)| OutputCoin {
                value,
                owner_key: PublicKey([7u8; 32]),
                coin_hash: CoinHash([i as u8; 32]),
            })
            .collect()
    }

    #[test]
    fn test_greedy_keeps_input_order() {
        let inputs = setup_greedy_output_coins();
        let result = select_coin_greedy(&inputs, 5300).unwrap();
        // 5000 + 400 reaches the target; 40000 is never looked at.
        assert_eq!(result.selected_inputs, vec![0, 1]);
        assert_eq!(result.accumulated_value, 5400);
    }

    #[test]
    fn test_greedy_overshoots() {
        let inputs = setup_greedy_output_coins();
        let result = select_coin_greedy(&inputs, 6000).unwrap();
        // A later 600 coin would have been a tighter fit, greedy takes 40000 anyway.
        assert_eq!(result.selected_inputs, vec![0, 1, 2]);
        assert_eq!(result.accumulated_value, 45400);
    }

    #[test]
    fn test_greedy_huge_coin_after_partial_sum() {
        let mut inputs = setup_greedy_output_coins();
        inputs[1].value = u64::MAX;
        let result = select_coin_greedy(&inputs, 6000).unwrap();
        assert_eq!(result.selected_inputs, vec![0, 1]);
        assert_eq!(result.accumulated_value, u64::MAX);
    }

    #[test]
    fn test_greedy_insufficient() {
        let inputs = setup_greedy_output_coins();
        let result = select_coin_greedy(&inputs, 80000);
        assert!(matches!(
            result,
            Err(SelectionError::InsufficientFunds {
                required: 80000,
                available: 71000
            })
        ));
    }
}
