//! Transaction fee calculation
//!
//! A fee is a per-KB rate times the estimated size of the transaction in KB. The rate comes
//! from the caller or the fee oracle, then the configured floor and surcharge apply.

use serde::Deserialize;

use crate::{
    boundary::{FeeRateOracle, TxSizeEstimator},
    config::FeeConfig,
    error::{BoxError, Result, SelectionError},
    types::{FeeQuote, OutputCoin, PaymentTarget, TxMetadata, UnitFee},
    utils::{bytes_to_kb, calculate_fee},
};

/// Resolves fee rates and turns transaction shapes into [`FeeQuote`]s.
pub struct FeeEstimator<'a> {
    oracle: &'a dyn FeeRateOracle,
    size_estimator: &'a dyn TxSizeEstimator,
    config: FeeConfig,
}

impl<'a> FeeEstimator<'a> {
    pub fn new(
        oracle: &'a dyn FeeRateOracle,
        size_estimator: &'a dyn TxSizeEstimator,
        config: FeeConfig,
    ) -> Self {
        Self {
            oracle,
            size_estimator,
            config,
        }
    }

    /// Per-KB rate for confirmation within `num_blocks`.
    pub fn fee_per_kb(&self, unit_fee: UnitFee, num_blocks: u64) -> Result<u64> {
        let num_blocks = self.config.num_blocks(num_blocks);
        let base_rate = match unit_fee {
            UnitFee::Fixed(0) => {
                return Ok(self.config.incremental_fee_per_kb);
            }
            UnitFee::Fixed(rate) => rate,
            UnitFee::Estimate => {
                let live = self
                    .oracle
                    .estimate_fee_per_kb(num_blocks)
                    .map_err(|source| SelectionError::UpstreamFetch {
                        context: "fee rate oracle",
                        source,
                    })?;
                match live {
                    Some(rate) if rate > 0 => rate,
                    _ => {
                        tracing::debug!(num_blocks, "No live fee estimate, using default rate");
                        self.oracle.default_fee_per_kb()
                    }
                }
            }
        };

        base_rate
            .max(self.config.limit_fee_per_kb)
            .checked_add(self.config.incremental_fee_per_kb)
            .ok_or(SelectionError::AmountOverflow)
    }

    /// Quote for spending `coins` into `payment_targets`.
    pub fn quote(
        &self,
        coins: &[OutputCoin],
        payment_targets: &[PaymentTarget],
        unit_fee: UnitFee,
        num_blocks: u64,
        has_privacy: bool,
        metadata: Option<&TxMetadata>,
    ) -> Result<FeeQuote> {
        let fee_per_kb = self.fee_per_kb(unit_fee, num_blocks)?;
        let estimated_size_kb = self
            .size_estimator
            .estimate_size_kb(coins, payment_targets, has_privacy, metadata)
            .map_err(|source| SelectionError::SizeEstimationFailed { source })?;
        let min_fee = self.config.min_fee_for(metadata);
        let real_fee = calculate_fee(fee_per_kb, estimated_size_kb)?.max(min_fee);

        tracing::debug!(
            fee_per_kb,
            estimated_size_kb,
            real_fee,
            min_fee,
            inputs = coins.len(),
            outputs = payment_targets.len(),
            "Estimated fee"
        );

        Ok(FeeQuote {
            fee_per_kb,
            estimated_size_kb,
            real_fee,
        })
    }
}

/// Byte sizes of the parts of a transaction, used by [`LinearTxSizeEstimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TxSizeModel {
    /// Version, type, lock time, fee, info and the last byte of the sender's public key.
    pub base_bytes: u64,
    pub sig_pubkey_bytes: u64,
    pub signature_bytes: u64,
    pub privacy_signature_bytes: u64,
    /// Proof data per spent coin.
    pub input_bytes: u64,
    /// Proof data per created coin.
    pub output_bytes: u64,
    /// Extra proof data per spent coin when amounts are hidden.
    pub privacy_input_bytes: u64,
    /// Extra proof data per created coin when amounts are hidden.
    pub privacy_output_bytes: u64,
}

impl Default for TxSizeModel {
    fn default() -> Self {
        TxSizeModel {
            base_bytes: 1 + 5 + 8 + 8 + 512 + 1,
            sig_pubkey_bytes: 32,
            signature_bytes: 64,
            privacy_signature_bytes: 96,
            input_bytes: 65,
            output_bytes: 97,
            privacy_input_bytes: 1_120,
            privacy_output_bytes: 420,
        }
    }
}

/// Size estimator that adds up fixed per-part byte counts and rounds up to whole KB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearTxSizeEstimator {
    model: TxSizeModel,
}

impl LinearTxSizeEstimator {
    pub fn new(model: TxSizeModel) -> Self {
        Self { model }
    }

    pub fn estimate_size_bytes(
        &self,
        num_inputs: usize,
        num_outputs: usize,
        has_privacy: bool,
        metadata: Option<&TxMetadata>,
    ) -> Option<u64> {
        let model = &self.model;
        let (signature, per_input, per_output) = if has_privacy {
            (
                model.privacy_signature_bytes,
                model.input_bytes.checked_add(model.privacy_input_bytes)?,
                model.output_bytes.checked_add(model.privacy_output_bytes)?,
            )
        } else {
            (model.signature_bytes, model.input_bytes, model.output_bytes)
        };

        let inputs = per_input.checked_mul(num_inputs as u64)?;
        let outputs = per_output.checked_mul(num_outputs as u64)?;
        model
            .base_bytes
            .checked_add(model.sig_pubkey_bytes)?
            .checked_add(signature)?
            .checked_add(inputs)?
            .checked_add(outputs)?
            .checked_add(metadata.map_or(0, |meta| meta.size_bytes))
    }
}

impl TxSizeEstimator for LinearTxSizeEstimator {
    fn estimate_size_kb(
        &self,
        coins: &[OutputCoin],
        payment_targets: &[PaymentTarget],
        has_privacy: bool,
        metadata: Option<&TxMetadata>,
    ) -> std::result::Result<u64, BoxError> {
        let bytes = self
            .estimate_size_bytes(coins.len(), payment_targets.len(), has_privacy, metadata)
            .ok_or_else(|| -> BoxError {
                format!(
                    "size of a transaction with {} inputs and {} outputs overflows",
                    coins.len(),
                    payment_targets.len()
                )
                .into()
            })?;
        Ok(bytes_to_kb(bytes))
    }
}

#[cfg(test)]
mod test {
    use crate::{
        boundary::{FeeRateOracle, TxSizeEstimator},
        config::FeeConfig,
        error::{BoxError, SelectionError},
        fees::{FeeEstimator, LinearTxSizeEstimator, TxSizeModel},
        types::{
            CoinHash, OutputCoin, PaymentAddress, PaymentTarget, PublicKey, TxMetadata, UnitFee,
        },
    };

    struct TestOracle {
        live: Option<u64>,
        fail: bool,
    }

    impl FeeRateOracle for TestOracle {
        fn estimate_fee_per_kb(&self, _num_blocks: u64) -> Result<Option<u64>, BoxError> {
            if self.fail {
                return Err("estimator offline".into());
            }
            Ok(self.live)
        }

        fn default_fee_per_kb(&self) -> u64 {
            100
        }
    }

    struct FixedSize(u64);

    impl TxSizeEstimator for FixedSize {
        fn estimate_size_kb(
            &self,
            _coins: &[OutputCoin],
            _payment_targets: &[PaymentTarget],
            _has_privacy: bool,
            _metadata: Option<&TxMetadata>,
        ) -> Result<u64, BoxError> {
            Ok(self.0)
        }
    }

    fn setup_target(amount: u64) -> PaymentTarget {
        PaymentTarget {
            amount,
            recipient: PaymentAddress {
                public_key: PublicKey([5u8; 32]),
                transmission_key: PublicKey([6u8; 32]),
            },
        }
    }

    fn setup_coin(value: u64) -> OutputCoin {
        OutputCoin {
            value,
            owner_key: PublicKey([5u8; 32]),
            coin_hash: CoinHash([value as u8; 32]),
        }
    }

    #[test]
    fn test_live_rate_used() {
        let oracle = TestOracle {
            live: Some(250),
            fail: false,
        };
        let size = FixedSize(1);
        let estimator = FeeEstimator::new(&oracle, &size, FeeConfig::default());
        assert_eq!(estimator.fee_per_kb(UnitFee::Estimate, 0).unwrap(), 250);
    }

    #[test]
    fn test_default_rate_when_no_live_estimate() {
        let size = FixedSize(1);
        for live in [None, Some(0)] {
            let oracle = TestOracle { live, fail: false };
            let estimator = FeeEstimator::new(&oracle, &size, FeeConfig::default());
            assert_eq!(estimator.fee_per_kb(UnitFee::Estimate, 8).unwrap(), 100);
        }
    }

    #[test]
    fn test_fixed_rate_skips_oracle() {
        let oracle = TestOracle {
            live: None,
            fail: true,
        };
        let size = FixedSize(1);
        let estimator = FeeEstimator::new(&oracle, &size, FeeConfig::default());
        assert_eq!(estimator.fee_per_kb(UnitFee::Fixed(40), 0).unwrap(), 40);
    }

    #[test]
    fn test_floor_and_surcharge() {
        let oracle = TestOracle {
            live: Some(10),
            fail: false,
        };
        let size = FixedSize(1);
        let config = FeeConfig {
            limit_fee_per_kb: 50,
            incremental_fee_per_kb: 7,
            ..FeeConfig::default()
        };
        let estimator = FeeEstimator::new(&oracle, &size, config);
        assert_eq!(estimator.fee_per_kb(UnitFee::Estimate, 0).unwrap(), 57);
    }

    #[test]
    fn test_fixed_zero_rate_skips_floor() {
        let oracle = TestOracle {
            live: Some(10),
            fail: false,
        };
        let size = FixedSize(1);
        let config = FeeConfig {
            limit_fee_per_kb: 50,
            incremental_fee_per_kb: 7,
            ..FeeConfig::default()
        };
        let estimator = FeeEstimator::new(&oracle, &size, config);
        assert_eq!(estimator.fee_per_kb(UnitFee::Fixed(0), 0).unwrap(), 7);
        assert_eq!(estimator.fee_per_kb(UnitFee::Fixed(1), 0).unwrap(), 57);
    }

    #[test]
    fn test_oracle_failure_is_upstream_error() {
        let oracle = TestOracle {
            live: None,
            fail: true,
        };
        let size = FixedSize(1);
        let estimator = FeeEstimator::new(&oracle, &size, FeeConfig::default());
        assert!(matches!(
            estimator.fee_per_kb(UnitFee::Estimate, 0),
            Err(SelectionError::UpstreamFetch { .. })
        ));
    }

    #[test]
    fn test_quote_applies_min_fee() {
        let oracle = TestOracle {
            live: Some(10),
            fail: false,
        };
        let size = FixedSize(2);
        let config = FeeConfig {
            min_fee_per_tx: 500,
            ..FeeConfig::default()
        };
        let estimator = FeeEstimator::new(&oracle, &size, config);
        let quote = estimator
            .quote(&[setup_coin(1000)], &[setup_target(900)], UnitFee::Estimate, 0, false, None)
            .unwrap();
        assert_eq!(quote.fee_per_kb, 10);
        assert_eq!(quote.estimated_size_kb, 2);
        assert_eq!(quote.real_fee, 500);
    }

    #[test]
    fn test_quote_specified_fee_for_metadata_kind() {
        let oracle = TestOracle {
            live: Some(10),
            fail: false,
        };
        let size = FixedSize(2);
        let config = FeeConfig {
            min_fee_per_tx: 50,
            specified_fee_per_tx: 1_000,
            specified_fee_kinds: vec![127],
            ..FeeConfig::default()
        };
        let estimator = FeeEstimator::new(&oracle, &size, config);
        let quote_for = |kind: u32| {
            let metadata = TxMetadata {
                kind,
                size_bytes: 100,
            };
            estimator
                .quote(
                    &[setup_coin(5000)],
                    &[setup_target(900)],
                    UnitFee::Estimate,
                    0,
                    false,
                    Some(&metadata),
                )
                .unwrap()
                .real_fee
        };
        assert_eq!(quote_for(127), 1_000);
        assert_eq!(quote_for(44), 50);
    }

    #[test]
    fn test_linear_size_small_transaction() {
        let estimator = LinearTxSizeEstimator::default();
        // 535 + 32 + 64 + 65 + 2 * 97 = 890 bytes
        assert_eq!(estimator.estimate_size_bytes(1, 2, false, None), Some(890));
        let size = estimator
            .estimate_size_kb(
                &[setup_coin(10)],
                &[setup_target(1), setup_target(2)],
                false,
                None,
            )
            .unwrap();
        assert_eq!(size, 1);
    }

    #[test]
    fn test_linear_size_grows_with_privacy_and_metadata() {
        let estimator = LinearTxSizeEstimator::default();
        let plain = estimator.estimate_size_bytes(2, 2, false, None).unwrap();
        let private = estimator.estimate_size_bytes(2, 2, true, None).unwrap();
        let metadata = TxMetadata {
            kind: 44,
            size_bytes: 300,
        };
        let with_meta = estimator
            .estimate_size_bytes(2, 2, false, Some(&metadata))
            .unwrap();
        assert!(private > plain);
        assert_eq!(with_meta, plain + 300);
    }

    #[test]
    fn test_linear_size_overflow() {
        let estimator = LinearTxSizeEstimator::new(TxSizeModel {
            input_bytes: u64::MAX,
            ..TxSizeModel::default()
        });
        assert!(estimator
            .estimate_size_kb(&[setup_coin(1), setup_coin(2)], &[], false, None)
            .is_err());
    }
}
