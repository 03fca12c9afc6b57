//! Static fee configuration of the host service.

use serde::Deserialize;

use crate::types::TxMetadata;

/// Confirmation target used when a caller passes `num_blocks == 0`.
pub const DEFAULT_NUM_BLOCKS: u64 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Confirmation target in blocks used when the caller does not give one.
    pub default_num_blocks: u64,
    /// Surcharge added to every per-KB rate.
    pub incremental_fee_per_kb: u64,
    /// Floor on the per-KB rate, applied before the surcharge. A fixed zero rate is exempt.
    pub limit_fee_per_kb: u64,
    /// Floor on the fee of a whole transaction.
    pub min_fee_per_tx: u64,
    /// Floor on the fee of a transaction whose metadata kind is in `specified_fee_kinds`,
    /// when higher than `min_fee_per_tx`.
    pub specified_fee_per_tx: u64,
    pub specified_fee_kinds: Vec<u32>,
}

impl Default for FeeConfig {
    fn default() -> Self {
        FeeConfig {
            default_num_blocks: DEFAULT_NUM_BLOCKS,
            incremental_fee_per_kb: 0,
            limit_fee_per_kb: 0,
            min_fee_per_tx: 0,
            specified_fee_per_tx: 0,
            specified_fee_kinds: Vec::new(),
        }
    }
}

impl FeeConfig {
    /// Resolves the confirmation target a caller asked for.
    pub fn num_blocks(&self, requested: u64) -> u64 {
        if requested == 0 {
            self.default_num_blocks
        } else {
            requested
        }
    }

    /// Fee floor for a transaction carrying `metadata`.
    pub fn min_fee_for(&self, metadata: Option<&TxMetadata>) -> u64 {
        match metadata {
            Some(meta) if self.specified_fee_kinds.contains(&meta.kind) => {
                self.min_fee_per_tx.max(self.specified_fee_per_tx)
            }
            _ => self.min_fee_per_tx,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        config::{FeeConfig, DEFAULT_NUM_BLOCKS},
        types::TxMetadata,
    };

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FeeConfig =
            serde_json::from_str(r#"{ "incremental_fee_per_kb": 5, "min_fee_per_tx": 100 }"#)
                .unwrap();
        assert_eq!(config.incremental_fee_per_kb, 5);
        assert_eq!(config.min_fee_per_tx, 100);
        assert_eq!(config.default_num_blocks, DEFAULT_NUM_BLOCKS);
        assert_eq!(config.limit_fee_per_kb, 0);
        assert!(config.specified_fee_kinds.is_empty());
    }

    #[test]
    fn test_min_fee_for_specified_kinds() {
        let config: FeeConfig = serde_json::from_str(
            r#"{ "min_fee_per_tx": 100, "specified_fee_per_tx": 400, "specified_fee_kinds": [90, 91] }"#,
        )
        .unwrap();
        let specified = TxMetadata {
            kind: 91,
            size_bytes: 10,
        };
        let other = TxMetadata {
            kind: 44,
            size_bytes: 10,
        };
        assert_eq!(config.min_fee_for(Some(&specified)), 400);
        assert_eq!(config.min_fee_for(Some(&other)), 100);
        assert_eq!(config.min_fee_for(None), 100);
    }

    #[test]
    fn test_num_blocks_fallback() {
        let config = FeeConfig::default();
        assert_eq!(config.num_blocks(0), DEFAULT_NUM_BLOCKS);
        assert_eq!(config.num_blocks(3), 3);
    }
}
