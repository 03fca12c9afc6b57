use std::fmt;

/// 32-byte public key of a coin owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey(pub [u8; 32]);

/// Unique hash of an output coin (its serial number / key image). The mempool tracks
/// reservations by this hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinHash(pub [u8; 32]);

impl fmt::Display for CoinHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for CoinHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoinHash({})", self)
    }
}

/// Shard the sender's coins live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShardId(pub u8);

/// Token the coins are denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(pub [u8; 32]);

impl TokenId {
    /// The chain's native fee-paying token.
    pub const NATIVE: TokenId = TokenId([4u8; 32]);
}

/// Address a payment (or change) is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentAddress {
    pub public_key: PublicKey,
    pub transmission_key: PublicKey,
}

/// The sender's key material as far as coin selection is concerned: which coins to fetch
/// and where change goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
    pub payment_address: PaymentAddress,
}

/// An unspent output coin owned by the sender. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputCoin {
    /// Value of the coin in the token's base unit.
    pub value: u64,
    /// Key the coin is locked to.
    pub owner_key: PublicKey,
    /// Hash the mempool uses to track the coin once it is spent by a pending transaction.
    pub coin_hash: CoinHash,
}

/// Spend-ready projection of a selected [`OutputCoin`], handed to the transaction builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputCoin {
    pub value: u64,
    pub owner_key: PublicKey,
    pub coin_hash: CoinHash,
}

impl From<OutputCoin> for InputCoin {
    fn from(coin: OutputCoin) -> Self {
        InputCoin {
            value: coin.value,
            owner_key: coin.owner_key,
            coin_hash: coin.coin_hash,
        }
    }
}

/// One output of the transaction being funded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTarget {
    pub amount: u64,
    pub recipient: PaymentAddress,
}

/// Opaque transaction metadata. Fee estimation looks at its serialized size and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxMetadata {
    /// Metadata type tag, as understood by the transaction builder.
    pub kind: u32,
    /// Serialized size of the metadata in bytes.
    pub size_bytes: u64,
}

/// Index based output of the individual selection algorithms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutput {
    /// The selected input indices, refers to the indices of the inputs Slice Reference
    pub selected_inputs: Vec<usize>,
    /// Sum of the values behind `selected_inputs`.
    pub accumulated_value: u64,
}

/// The result of a [`crate::selectcoin::select_coin`] pass.
///
/// `selected` and `remaining` together hold exactly the coins that were passed in, each in
/// its original relative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub selected: Vec<OutputCoin>,
    pub remaining: Vec<OutputCoin>,
    pub total_selected_value: u64,
}

/// How the per-KB fee rate is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitFee {
    /// Ask the fee oracle; fall back to its default rate when it has no live estimate.
    #[default]
    Estimate,
    /// Use the given rate per KB. `Fixed(0)` is a free rate: the per-KB floor does not apply,
    /// only the surcharge.
    Fixed(u64),
}

/// Per call fee knobs supplied by the transaction builder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeeParams {
    pub unit_fee: UnitFee,
    /// Confirmation target in blocks. `0` means use [`crate::config::FeeConfig::default_num_blocks`].
    pub num_blocks: u64,
    pub has_privacy: bool,
    pub metadata: Option<TxMetadata>,
}

/// Fee derived for one transaction shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeQuote {
    pub fee_per_kb: u64,
    pub estimated_size_kb: u64,
    pub real_fee: u64,
}

/// Coins chosen by the fee estimation loop, covering payment and fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundedSelection {
    pub selected: Vec<OutputCoin>,
    pub fee: FeeQuote,
}

impl FundedSelection {
    pub fn real_fee(&self) -> u64 {
        self.fee.real_fee
    }
}

/// What the orchestrator hands back to the transaction builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundedInputs {
    pub inputs: Vec<InputCoin>,
    pub real_fee: u64,
}
