//! Error types for coin selection and fee funding.

/// Error type produced by the boundary traits in [`crate::boundary`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Error describing failure of a selection or funding attempt
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// The coin pool cannot reach the requested payment amount
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    /// The payment was covered but the coins left over cannot cover the fee gap
    #[error("Insufficient funds to pay fee: fee gap {fee_gap}, available {available}")]
    InsufficientFundsForFee { fee_gap: u64, available: u64 },

    /// The coin store or fee oracle failed
    #[error("Upstream fetch failed ({context}): {source}")]
    UpstreamFetch {
        context: &'static str,
        #[source]
        source: BoxError,
    },

    /// The transaction size estimator failed
    #[error("Transaction size estimation failed: {source}")]
    SizeEstimationFailed {
        #[source]
        source: BoxError,
    },

    /// Checked u64 arithmetic on amounts or fees overflowed
    #[error("Amount overflow")]
    AmountOverflow,

    /// Subset-sum was asked for a capacity outside its window
    #[error("Knapsack target {target} out of range")]
    KnapsackTargetOutOfRange { target: u64 },
}

impl SelectionError {
    /// True for both the payment and the fee-gap flavour of insufficient funds.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(
            self,
            SelectionError::InsufficientFunds { .. } | SelectionError::InsufficientFundsForFee { .. }
        )
    }
}
