//! Interfaces to the collaborators the engine does not own: the coin store, the mempool,
//! the fee estimator and the transaction size model.
//!
//! All calls are blocking. Any timeout or cancellation belongs inside the implementations.

use crate::{
    error::BoxError,
    types::{CoinHash, KeySet, OutputCoin, PaymentTarget, ShardId, TokenId, TxMetadata},
};

/// Source of the sender's unspent output coins.
pub trait OutputCoinStore {
    fn get_unspent_coins(
        &self,
        keyset: &KeySet,
        shard_id: ShardId,
        token_id: &TokenId,
    ) -> Result<Vec<OutputCoin>, BoxError>;
}

/// The mempool's view of which coins pending transactions already spend.
pub trait MempoolReservation {
    fn is_reserved(&self, coin_hash: &CoinHash) -> Result<bool, BoxError>;
}

/// Per-KB fee rates.
pub trait FeeRateOracle {
    /// Live estimate for confirmation within `num_blocks`. `None` when the shard has no live
    /// estimator.
    fn estimate_fee_per_kb(&self, num_blocks: u64) -> Result<Option<u64>, BoxError>;

    /// Chain wide fallback rate.
    fn default_fee_per_kb(&self) -> u64;
}

/// Size model of the transaction being built.
pub trait TxSizeEstimator {
    fn estimate_size_kb(
        &self,
        coins: &[OutputCoin],
        payment_targets: &[PaymentTarget],
        has_privacy: bool,
        metadata: Option<&TxMetadata>,
    ) -> Result<u64, BoxError>;
}

impl<T: OutputCoinStore + ?Sized> OutputCoinStore for &T {
    fn get_unspent_coins(
        &self,
        keyset: &KeySet,
        shard_id: ShardId,
        token_id: &TokenId,
    ) -> Result<Vec<OutputCoin>, BoxError> {
        (**self).get_unspent_coins(keyset, shard_id, token_id)
    }
}

impl<T: MempoolReservation + ?Sized> MempoolReservation for &T {
    fn is_reserved(&self, coin_hash: &CoinHash) -> Result<bool, BoxError> {
        (**self).is_reserved(coin_hash)
    }
}

impl<T: FeeRateOracle + ?Sized> FeeRateOracle for &T {
    fn estimate_fee_per_kb(&self, num_blocks: u64) -> Result<Option<u64>, BoxError> {
        (**self).estimate_fee_per_kb(num_blocks)
    }

    fn default_fee_per_kb(&self) -> u64 {
        (**self).default_fee_per_kb()
    }
}

impl<T: TxSizeEstimator + ?Sized> TxSizeEstimator for &T {
    fn estimate_size_kb(
        &self,
        coins: &[OutputCoin],
        payment_targets: &[PaymentTarget],
        has_privacy: bool,
        metadata: Option<&TxMetadata>,
    ) -> Result<u64, BoxError> {
        (**self).estimate_size_kb(coins, payment_targets, has_privacy, metadata)
    }
}
