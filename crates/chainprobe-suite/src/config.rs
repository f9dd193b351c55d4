//! Probe-suite configuration.

use alloy_primitives::Address;

/// Number of `eth_blockNumber` samples taken by the block-activity probe.
pub const DEFAULT_BLOCK_SAMPLES: usize = 5;

/// Reward percentiles requested from `eth_feeHistory`.
pub const DEFAULT_REWARD_PERCENTILES: [u32; 3] = [25, 50, 75];

/// Configuration for a [`ProbeSuite`](crate::ProbeSuite).
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Chain id the caller expects. A mismatch is reported, never fatal.
    /// Signed and wide so that any integer the user types is representable.
    pub expected_chain_id: Option<i128>,
    /// Queried by the balance probe in addition to the zero address.
    pub extra_balance_address: Option<Address>,
    pub block_samples: usize,
    pub reward_percentiles: Vec<u32>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            expected_chain_id: None,
            extra_balance_address: None,
            block_samples: DEFAULT_BLOCK_SAMPLES,
            reward_percentiles: DEFAULT_REWARD_PERCENTILES.to_vec(),
        }
    }
}

impl ProbeConfig {
    pub fn with_expected_chain_id(mut self, chain_id: i128) -> Self {
        self.expected_chain_id = Some(chain_id);
        self
    }

    pub fn with_extra_balance_address(mut self, address: Address) -> Self {
        self.extra_balance_address = Some(address);
        self
    }
}
