use crate::{
    error::{Result, SelectionError},
    types::{OutputCoin, SelectionOutput},
};

/// Performs coin selection using the Lowest Larger algorithm: picks the single smallest coin
/// whose value exceeds `target`. Equal values resolve to the earliest index.
///
/// Returns `InsufficientFunds` if no coin is larger than `target`.
pub fn select_coin_lowestlarger(inputs: &[OutputCoin], target: u64) -> Result<SelectionOutput> {
    let lowest_larger = inputs
        .iter()
        .enumerate()
        .filter(|(_, input)| input.value > target)
        .min_by_key(|(_, input)| input.value);

    match lowest_larger {
        Some((index, input)) => Ok(SelectionOutput {
            selected_inputs: vec![index],
            accumulated_value: input.value,
        }),
        None => Err(SelectionError::InsufficientFunds {
            required: target,
            available: inputs.iter().map(|input| input.value).max().unwrap_or(0),
        }),
    }
}
