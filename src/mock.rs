//! In-memory collaborators for tests and examples.

use std::collections::{HashMap, HashSet};

use crate::{
    boundary::{FeeRateOracle, MempoolReservation, OutputCoinStore},
    error::BoxError,
    types::{CoinHash, KeySet, OutputCoin, PublicKey, ShardId, TokenId},
};

/// Builds a coin whose hash is `tag` repeated.
pub fn coin(value: u64, tag: u8, owner_key: PublicKey) -> OutputCoin {
    OutputCoin {
        value,
        owner_key,
        coin_hash: CoinHash([tag; 32]),
    }
}

/// Coin store keyed by (owner, shard, token). Coins come back in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCoinStore {
    coins: HashMap<(PublicKey, u8, [u8; 32]), Vec<OutputCoin>>,
    failure: Option<String>,
}

impl InMemoryCoinStore {
    /// A store whose every fetch fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            coins: HashMap::new(),
            failure: Some(message.to_string()),
        }
    }

    pub fn insert(
        &mut self,
        keyset: &KeySet,
        shard_id: ShardId,
        token_id: TokenId,
        coin: OutputCoin,
    ) {
        self.coins
            .entry((keyset.payment_address.public_key, shard_id.0, token_id.0))
            .or_default()
            .push(coin);
    }
}

impl OutputCoinStore for InMemoryCoinStore {
    fn get_unspent_coins(
        &self,
        keyset: &KeySet,
        shard_id: ShardId,
        token_id: &TokenId,
    ) -> Result<Vec<OutputCoin>, BoxError> {
        if let Some(message) = &self.failure {
            return Err(message.clone().into());
        }
        Ok(self
            .coins
            .get(&(keyset.payment_address.public_key, shard_id.0, token_id.0))
            .cloned()
            .unwrap_or_default())
    }
}

/// Mempool holding a fixed set of reserved coin hashes. Hashes marked unreadable make
/// `is_reserved` fail.
#[derive(Debug, Default)]
pub struct InMemoryMempool {
    reserved: HashSet<CoinHash>,
    unreadable: HashSet<CoinHash>,
}

impl InMemoryMempool {
    pub fn reserve(&mut self, coin_hash: CoinHash) {
        self.reserved.insert(coin_hash);
    }

    pub fn mark_unreadable(&mut self, coin_hash: CoinHash) {
        self.unreadable.insert(coin_hash);
    }
}

impl MempoolReservation for InMemoryMempool {
    fn is_reserved(&self, coin_hash: &CoinHash) -> Result<bool, BoxError> {
        if self.unreadable.contains(coin_hash) {
            return Err(format!("no reservation state for {}", coin_hash).into());
        }
        Ok(self.reserved.contains(coin_hash))
    }
}

/// Fee oracle with a fixed live estimate (or none) and a fixed default rate.
#[derive(Debug, Clone, Copy)]
pub struct StaticFeeOracle {
    live: Option<u64>,
    default: u64,
}

impl StaticFeeOracle {
    pub fn new(live: Option<u64>, default: u64) -> Self {
        Self { live, default }
    }
}

impl FeeRateOracle for StaticFeeOracle {
    fn estimate_fee_per_kb(&self, _num_blocks: u64) -> Result<Option<u64>, BoxError> {
        Ok(self.live)
    }

    fn default_fee_per_kb(&self) -> u64 {
        self.default
    }
}
