//! Governance-wide parameter store.
//!
//! Holds the model tag, quorum percentage and voting period. Mutation is
//! owner-gated at the engine boundary; this store only validates ranges.

use crate::error::GovernanceError;

/// Default model tag: one member, one vote.
pub const DEFAULT_GOVERNANCE_MODEL: &str = "direct-democracy";

/// Governance configuration.
///
/// The voting period is captured into each proposal at creation time, so a
/// later change never retroactively moves an existing proposal's end block.
#[derive(Debug, Clone)]
pub struct GovernanceConfig {
    model: String,
    quorum_percentage: u8,
    voting_period_blocks: u64,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GOVERNANCE_MODEL.to_string(),
            quorum_percentage: 50,
            voting_period_blocks: 1440,
        }
    }
}

impl GovernanceConfig {
    /// Create a config with genesis defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the governance model tag.
    pub fn set_model(&mut self, model: &str) -> Result<(), GovernanceError> {
        if model.is_empty() {
            return Err(GovernanceError::InvalidArgument(
                "governance model must be non-empty".to_string(),
            ));
        }
        tracing::debug!("Governance model set to '{}'", model);
        self.model = model.to_string();
        Ok(())
    }

    /// Replace the quorum percentage. Must be in [0, 100].
    pub fn set_quorum_percentage(&mut self, pct: u8) -> Result<(), GovernanceError> {
        if pct > 100 {
            return Err(GovernanceError::InvalidArgument(format!(
                "quorum percentage {} out of range [0, 100]",
                pct
            )));
        }
        self.quorum_percentage = pct;
        Ok(())
    }

    /// Replace the voting period. Must be a positive number of blocks.
    pub fn set_voting_period(&mut self, blocks: u64) -> Result<(), GovernanceError> {
        if blocks == 0 {
            return Err(GovernanceError::InvalidArgument(
                "voting period must be positive".to_string(),
            ));
        }
        self.voting_period_blocks = blocks;
        Ok(())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn quorum_percentage(&self) -> u8 {
        self.quorum_percentage
    }

    pub fn voting_period(&self) -> u64 {
        self.voting_period_blocks
    }

    /// Whether ballots carry ledger weight instead of counting as 1.
    pub fn uses_weighted_voting(&self) -> bool {
        matches!(self.model.as_str(), "representative" | "weighted")
    }
}
