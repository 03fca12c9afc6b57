//! A UTXO coin selection and fee funding library.
//!
//! Given a payment and the sender's unspent output coins, picks the coins to spend so that
//! both the payment and the fee of the resulting transaction are covered, skipping coins that
//! pending transactions already spend.

/// Greedy, subset-sum and lowest-larger selection primitives
pub mod algorithms;
/// Traits for the coin store, mempool, fee oracle and size model
pub mod boundary;
/// Static fee configuration
pub mod config;
/// Crate error type
pub mod error;
/// Fee rate resolution, fee quotes and the default transaction size model
pub mod fees;
/// Two pass selection covering payment and fee
pub mod funding;
/// Removal of mempool reserved coins
pub mod mempool;
/// In-memory collaborators for tests
#[cfg(any(test, feature = "test-helpers"))]
pub mod mock;
/// Top level entry point producing spend-ready inputs
pub mod orchestrator;
/// Single pass coin selection for an amount
pub mod selectcoin;
/// Core types shared by the other modules
pub mod types;
/// Amount and size helpers
pub mod utils;

pub use config::FeeConfig;
pub use error::{Result, SelectionError};
pub use fees::{FeeEstimator, LinearTxSizeEstimator, TxSizeModel};
pub use funding::estimate_and_top_up;
pub use orchestrator::InputSelector;
pub use selectcoin::select_coin;
pub use types::{
    FeeParams, FeeQuote, FundedInputs, FundedSelection, InputCoin, OutputCoin, PaymentTarget,
    SelectionResult, UnitFee,
};
