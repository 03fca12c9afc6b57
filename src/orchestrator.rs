use crate::{
    boundary::{FeeRateOracle, MempoolReservation, OutputCoinStore, TxSizeEstimator},
    config::FeeConfig,
    error::{Result, SelectionError},
    fees::FeeEstimator,
    funding::estimate_and_top_up,
    mempool::filter_reserved_coins,
    types::{FeeParams, FundedInputs, InputCoin, KeySet, PaymentTarget, ShardId, TokenId},
    utils::total_amount,
};

/// Entry point for funding a payment: fetches the sender's coins, drops the ones the mempool
/// already spends, selects for payment and fee and hands back spend-ready inputs.
///
/// No lock is held between fetching and selecting, so two concurrent calls for the same keyset
/// can pick the same coins. Rejecting the resulting double spend is up to the mempool. Nothing
/// is reserved by this type, whether a call succeeds or fails.
pub struct InputSelector<S, M, F, E> {
    coin_store: S,
    mempool: M,
    fee_oracle: F,
    size_estimator: E,
    config: FeeConfig,
}

impl<S, M, F, E> InputSelector<S, M, F, E>
where
    S: OutputCoinStore,
    M: MempoolReservation,
    F: FeeRateOracle,
    E: TxSizeEstimator,
{
    pub fn new(
        coin_store: S,
        mempool: M,
        fee_oracle: F,
        size_estimator: E,
        config: FeeConfig,
    ) -> Self {
        Self {
            coin_store,
            mempool,
            fee_oracle,
            size_estimator,
            config,
        }
    }

    /// Builds the inputs paying for `payment_targets` and the transaction fee. Change goes back to
    /// `keyset.payment_address`.
    pub fn build_inputs(
        &self,
        keyset: &KeySet,
        shard_id: ShardId,
        token_id: &TokenId,
        payment_targets: &[PaymentTarget],
        fee_params: &FeeParams,
    ) -> Result<FundedInputs> {
        let requested = total_amount(payment_targets)?;

        let coins = self
            .coin_store
            .get_unspent_coins(keyset, shard_id, token_id)
            .map_err(|source| SelectionError::UpstreamFetch {
                context: "output coin store",
                source,
            })?;
        tracing::debug!(
            shard = shard_id.0,
            fetched = coins.len(),
            requested,
            "Fetched unspent coins"
        );

        let coins = filter_reserved_coins(coins, &self.mempool);
        if coins.is_empty() && requested > 0 {
            return Err(SelectionError::InsufficientFunds {
                required: requested,
                available: 0,
            });
        }

        let fee_estimator = FeeEstimator::new(
            &self.fee_oracle,
            &self.size_estimator,
            self.config.clone(),
        );
        let funded = estimate_and_top_up(
            &coins,
            payment_targets,
            &keyset.payment_address,
            fee_params,
            &fee_estimator,
        )?;

        let real_fee = funded.real_fee();
        let inputs: Vec<InputCoin> = funded.selected.into_iter().map(InputCoin::from).collect();
        Ok(FundedInputs { inputs, real_fee })
    }
}
