//! Treasury transfer gate.
//!
//! Fund movement is authorized against a dedicated signer ledger: a transfer
//! goes through iff the sender's weight meets the treasury threshold. Actual
//! fund movement belongs to the external ledger; this gate records the
//! authorization. The signer roll is independent of the voter roll.

use agora_types::Principal;
use crate::error::GovernanceError;
use crate::ledger::WeightLedger;

/// A recorded transfer authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferAuthorization {
    /// Amount authorized
    pub amount: u128,
    /// Recipient principal
    pub recipient: Principal,
    /// Signer whose weight cleared the threshold
    pub authorized_by: Principal,
    /// Block at which the authorization was recorded
    pub block: u64,
}

/// Weight-gated treasury. Consumer of [`WeightLedger`], not a
/// reimplementation of it.
#[derive(Debug, Default)]
pub struct Treasury {
    signers: WeightLedger,
    authorizations: Vec<TransferAuthorization>,
}

impl Treasury {
    /// Create a treasury with no signers and threshold 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a signer or overwrite an existing signer's weight.
    pub fn add_signer(&mut self, signer: Principal, weight: u64) {
        self.signers.set_weight(signer, weight);
    }

    /// Remove a signer; removing an unknown signer is a no-op.
    pub fn remove_signer(&mut self, signer: &Principal) {
        self.signers.remove(signer);
    }

    /// Replace the authorization threshold.
    pub fn set_threshold(&mut self, value: u64) {
        self.signers.set_threshold(value);
    }

    pub fn signer_weight(&self, signer: &Principal) -> u64 {
        self.signers.weight_of(signer)
    }

    pub fn threshold(&self) -> u64 {
        self.signers.threshold()
    }

    pub fn total_weight(&self) -> u64 {
        self.signers.total_weight()
    }

    /// Authorize a transfer. All-or-nothing: on any failure no state changes.
    pub fn transfer(
        &mut self,
        amount: u128,
        recipient: Principal,
        sender: Principal,
        current_block: u64,
    ) -> Result<(), GovernanceError> {
        if amount == 0 {
            return Err(GovernanceError::InvalidArgument(
                "transfer amount must be positive".to_string(),
            ));
        }

        if !self.signers.meets_threshold(&sender) {
            return Err(GovernanceError::ThresholdNotMet {
                weight: self.signers.weight_of(&sender),
                threshold: self.signers.threshold(),
            });
        }

        tracing::info!(
            "Transfer of {} to {} authorized by {}",
            amount,
            recipient,
            sender
        );

        self.authorizations.push(TransferAuthorization {
            amount,
            recipient,
            authorized_by: sender,
            block: current_block,
        });
        Ok(())
    }

    /// Authorization history, oldest first.
    pub fn authorizations(&self) -> &[TransferAuthorization] {
        &self.authorizations
    }
}
