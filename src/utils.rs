use crate::{
    error::{Result, SelectionError},
    types::{OutputCoin, PaymentTarget},
};

/// Sum of the coin values, failing on overflow.
#[inline]
pub fn sum_values(coins: &[OutputCoin]) -> Result<u64> {
    coins.iter().try_fold(0u64, |acc, coin| {
        acc.checked_add(coin.value)
            .ok_or(SelectionError::AmountOverflow)
    })
}

/// Total amount requested by a set of payment targets.
#[inline]
pub fn total_amount(payment_targets: &[PaymentTarget]) -> Result<u64> {
    payment_targets.iter().try_fold(0u64, |acc, target| {
        acc.checked_add(target.amount)
            .ok_or(SelectionError::AmountOverflow)
    })
}

/// Fee for a transaction of `size_kb` kilobytes at `fee_per_kb`.
#[inline]
pub fn calculate_fee(fee_per_kb: u64, size_kb: u64) -> Result<u64> {
    fee_per_kb
        .checked_mul(size_kb)
        .ok_or(SelectionError::AmountOverflow)
}

/// Rounds a byte count up to whole kilobytes.
#[inline]
pub fn bytes_to_kb(bytes: u64) -> u64 {
    bytes.div_ceil(1024)
}

/// Total value available in a coin pool. Saturates instead of failing, so it is only
/// suitable for reporting.
pub fn total_available(coins: &[OutputCoin]) -> u64 {
    coins
        .iter()
        .fold(0u64, |acc, coin| acc.saturating_add(coin.value))
}
