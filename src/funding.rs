use crate::{
    error::{Result, SelectionError},
    fees::FeeEstimator,
    selectcoin::select_coin,
    types::{FeeParams, FundedSelection, OutputCoin, PaymentAddress, PaymentTarget},
    utils::{sum_values, total_amount, total_available},
};

/// Selects coins covering `payment_targets` plus the fee of the transaction spending them.
///
/// The first pass selects for the payment alone. Any excess becomes a change output to
/// `change_address`, added before the size is estimated so that the fee pays for it. If the
/// first pass does not also cover the fee, a second pass selects the missing amount from the
/// coins the first pass left over. The fee is estimated once, for the first-pass shape.
///
/// A first-pass failure is `InsufficientFunds`; a second-pass failure, including having no
/// coins left at all, is `InsufficientFundsForFee`.
pub fn estimate_and_top_up(
    coins: &[OutputCoin],
    payment_targets: &[PaymentTarget],
    change_address: &PaymentAddress,
    params: &FeeParams,
    fee_estimator: &FeeEstimator<'_>,
) -> Result<FundedSelection> {
    let requested = total_amount(payment_targets)?;
    let first_pass = select_coin(coins, requested)?;

    let mut fee_targets = payment_targets.to_vec();
    let over_balance = first_pass.total_selected_value - requested;
    if over_balance > 0 {
        fee_targets.push(PaymentTarget {
            amount: over_balance,
            recipient: *change_address,
        });
    }

    let fee = fee_estimator.quote(
        &first_pass.selected,
        &fee_targets,
        params.unit_fee,
        params.num_blocks,
        params.has_privacy,
        params.metadata.as_ref(),
    )?;

    let required = requested
        .checked_add(fee.real_fee)
        .ok_or(SelectionError::AmountOverflow)?;
    let mut selected = first_pass.selected;
    if required > first_pass.total_selected_value {
        let fee_gap = required - first_pass.total_selected_value;
        tracing::debug!(
            fee_gap,
            leftover = first_pass.remaining.len(),
            "First pass does not cover the fee, selecting again"
        );
        let second_pass = select_coin(&first_pass.remaining, fee_gap).map_err(|e| match e {
            SelectionError::InsufficientFunds { .. } => SelectionError::InsufficientFundsForFee {
                fee_gap,
                available: total_available(&first_pass.remaining),
            },
            other => other,
        })?;
        selected.extend(second_pass.selected);
    }

    tracing::info!(
        requested,
        real_fee = fee.real_fee,
        selected = selected.len(),
        total = sum_values(&selected)?,
        "Funded payment"
    );

    Ok(FundedSelection { selected, fee })
}
