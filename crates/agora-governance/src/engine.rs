//! Engine context: the call surface of the governance system.
//!
//! One explicit context object owns all mutable state (no ambient globals):
//! the config store, the voter roll, the proposal registry, the treasury and
//! the integration registry. Every call takes the caller principal from the
//! host's authentication layer and, where the lifecycle depends on time, the
//! current block height from the external sequencing layer. Calls are
//! strictly serialized through `&mut self`; the engine holds no locks.

use agora_types::Principal;
use crate::config::GovernanceConfig;
use crate::error::GovernanceError;
use crate::integration::{Integration, IntegrationRegistry, Notifier};
use crate::ledger::WeightLedger;
use crate::proposal::{Proposal, ProposalRegistry, ProposalStatus, VoteChoice};
use crate::treasury::{TransferAuthorization, Treasury};

/// Resolution of the execute-proposal policy question: who may execute, and
/// whether the voting window must have elapsed first.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionPolicy {
    /// Require `current_block > end_block` before execution
    pub require_window_elapsed: bool,
    /// Restrict execution to the engine owner
    pub owner_only_execution: bool,
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self {
            require_window_elapsed: true,
            owner_only_execution: true,
        }
    }
}

/// Startup configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Owner principal for gated operations
    pub owner: Principal,
    /// Initial governance parameters
    pub governance: GovernanceConfig,
    /// Proposal execution policy
    pub execution_policy: ExecutionPolicy,
}

impl EngineConfig {
    /// Config with genesis defaults and the given owner.
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            governance: GovernanceConfig::default(),
            execution_policy: ExecutionPolicy::default(),
        }
    }
}

/// The governance engine.
///
/// Generic over the notification seam so tests can substitute a recording
/// notifier; production engines use the integration registry.
pub struct GovernanceEngine<N: Notifier = IntegrationRegistry> {
    owner: Principal,
    policy: ExecutionPolicy,
    config: GovernanceConfig,
    voters: WeightLedger,
    proposals: ProposalRegistry,
    treasury: Treasury,
    integrations: N,
}

impl GovernanceEngine<IntegrationRegistry> {
    /// Create an engine from startup configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_notifier(config, IntegrationRegistry::new())
    }
}

impl<N: Notifier> GovernanceEngine<N> {
    /// Create an engine dispatching notifications to the given sink.
    pub fn with_notifier(config: EngineConfig, notifier: N) -> Self {
        Self {
            owner: config.owner,
            policy: config.execution_policy,
            config: config.governance,
            voters: WeightLedger::new(),
            proposals: ProposalRegistry::new(),
            treasury: Treasury::new(),
            integrations: notifier,
        }
    }

    /// The notification sink.
    pub fn notifier(&self) -> &N {
        &self.integrations
    }

    pub fn owner(&self) -> Principal {
        self.owner
    }

    fn require_owner(&self, caller: &Principal, action: &str) -> Result<(), GovernanceError> {
        if caller != &self.owner {
            return Err(GovernanceError::Unauthorized(format!(
                "{} requires the engine owner",
                action
            )));
        }
        Ok(())
    }

    // ---- governance config ----

    pub fn set_governance_model(
        &mut self,
        caller: Principal,
        model: &str,
    ) -> Result<(), GovernanceError> {
        self.require_owner(&caller, "set-governance-model")?;
        self.config.set_model(model)
    }

    pub fn set_quorum_percentage(
        &mut self,
        caller: Principal,
        pct: u8,
    ) -> Result<(), GovernanceError> {
        self.require_owner(&caller, "set-quorum-percentage")?;
        self.config.set_quorum_percentage(pct)
    }

    pub fn set_voting_period(
        &mut self,
        caller: Principal,
        blocks: u64,
    ) -> Result<(), GovernanceError> {
        self.require_owner(&caller, "set-voting-period")?;
        self.config.set_voting_period(blocks)
    }

    pub fn governance_model(&self) -> &str {
        self.config.model()
    }

    pub fn quorum_percentage(&self) -> u8 {
        self.config.quorum_percentage()
    }

    pub fn voting_period(&self) -> u64 {
        self.config.voting_period()
    }

    // ---- voter roll ----

    /// Register a voter or overwrite an existing voter's weight.
    pub fn register_voter(
        &mut self,
        caller: Principal,
        voter: Principal,
        weight: u64,
    ) -> Result<(), GovernanceError> {
        self.require_owner(&caller, "register-voter")?;
        self.voters.set_weight(voter, weight);
        Ok(())
    }

    /// Remove a voter; unknown voters are a no-op.
    pub fn remove_voter(
        &mut self,
        caller: Principal,
        voter: &Principal,
    ) -> Result<(), GovernanceError> {
        self.require_owner(&caller, "remove-voter")?;
        self.voters.remove(voter);
        Ok(())
    }

    pub fn voter_weight(&self, voter: &Principal) -> u64 {
        self.voters.weight_of(voter)
    }

    /// Total eligible weight, the quorum denominator.
    pub fn eligible_weight(&self) -> u64 {
        self.voters.total_weight()
    }

    // ---- proposals ----

    /// Create a proposal; any caller. Returns the new id.
    pub fn create_proposal(
        &mut self,
        caller: Principal,
        title: &str,
        description: &str,
        current_block: u64,
    ) -> Result<u64, GovernanceError> {
        self.proposals.create(
            title,
            description,
            caller,
            current_block,
            self.config.voting_period(),
        )
    }

    /// Cast or replace a ballot; any caller.
    ///
    /// Under the direct-democracy model every ballot counts as weight 1;
    /// under representative/weighted models the ballot carries the voter's
    /// ledger weight as of this call.
    pub fn vote_on_proposal(
        &mut self,
        caller: Principal,
        proposal_id: u64,
        choice: VoteChoice,
        current_block: u64,
    ) -> Result<(), GovernanceError> {
        let weight = if self.config.uses_weighted_voting() {
            self.voters.weight_of(&caller)
        } else {
            1
        };

        let proposal = self
            .proposals
            .get_mut(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
        proposal.cast_vote(caller, choice, weight, current_block)
    }

    /// Execute a proposal, resolving it against the quorum rule.
    pub fn execute_proposal(
        &mut self,
        caller: Principal,
        proposal_id: u64,
        current_block: u64,
    ) -> Result<ProposalStatus, GovernanceError> {
        if self.policy.owner_only_execution {
            self.require_owner(&caller, "execute-proposal")?;
        }

        let quorum = self.config.quorum_percentage();
        let eligible = self.voters.total_weight();
        let proposal = self
            .proposals
            .get_mut(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;

        let status = proposal.resolve(
            quorum,
            eligible,
            current_block,
            self.policy.require_window_elapsed,
        )?;

        tracing::info!("Proposal #{} executed: {}", proposal_id, status);
        self.integrations
            .notify_all(&format!("Proposal #{} {}", proposal_id, status));
        Ok(status)
    }

    /// Full proposal snapshot.
    pub fn proposal(&self, proposal_id: u64) -> Result<&Proposal, GovernanceError> {
        self.proposals
            .get(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))
    }

    /// A voter's recorded choice on an existing proposal; `None` is the
    /// sentinel for "never voted", distinct from any explicit ballot.
    pub fn vote_of(
        &self,
        proposal_id: u64,
        voter: &Principal,
    ) -> Result<Option<VoteChoice>, GovernanceError> {
        Ok(self.proposal(proposal_id)?.vote_of(voter))
    }

    // ---- treasury ----

    pub fn add_signer(
        &mut self,
        caller: Principal,
        signer: Principal,
        weight: u64,
    ) -> Result<(), GovernanceError> {
        self.require_owner(&caller, "add-signer")?;
        self.treasury.add_signer(signer, weight);
        Ok(())
    }

    pub fn remove_signer(
        &mut self,
        caller: Principal,
        signer: &Principal,
    ) -> Result<(), GovernanceError> {
        self.require_owner(&caller, "remove-signer")?;
        self.treasury.remove_signer(signer);
        Ok(())
    }

    pub fn set_treasury_threshold(
        &mut self,
        caller: Principal,
        value: u64,
    ) -> Result<(), GovernanceError> {
        self.require_owner(&caller, "set-threshold")?;
        self.treasury.set_threshold(value);
        Ok(())
    }

    pub fn signer_weight(&self, signer: &Principal) -> u64 {
        self.treasury.signer_weight(signer)
    }

    pub fn treasury_threshold(&self) -> u64 {
        self.treasury.threshold()
    }

    pub fn treasury_total_weight(&self) -> u64 {
        self.treasury.total_weight()
    }

    /// Authorize a transfer; any caller, gated by the signer threshold.
    pub fn transfer(
        &mut self,
        caller: Principal,
        amount: u128,
        recipient: Principal,
        current_block: u64,
    ) -> Result<(), GovernanceError> {
        self.treasury
            .transfer(amount, recipient, caller, current_block)?;
        self.integrations
            .notify_all(&format!("Transfer of {} to {} authorized", amount, recipient));
        Ok(())
    }

    pub fn transfer_authorizations(&self) -> &[TransferAuthorization] {
        self.treasury.authorizations()
    }

    // ---- notifications ----

    /// Notify a single platform. Errors if the sink does not know it.
    pub fn notify(&self, platform: &str, message: &str) -> Result<(), GovernanceError> {
        if self.integrations.notify(platform, message) {
            Ok(())
        } else {
            Err(GovernanceError::IntegrationNotFound(platform.to_string()))
        }
    }
}

// Integration registry management only applies to the production sink.
impl GovernanceEngine<IntegrationRegistry> {
    pub fn add_integration(
        &mut self,
        caller: Principal,
        platform: &str,
        api_key: &str,
        webhook_url: &str,
    ) -> Result<(), GovernanceError> {
        self.require_owner(&caller, "add-integration")?;
        self.integrations.add(platform, api_key, webhook_url);
        Ok(())
    }

    pub fn remove_integration(
        &mut self,
        caller: Principal,
        platform: &str,
    ) -> Result<(), GovernanceError> {
        self.require_owner(&caller, "remove-integration")?;
        self.integrations.remove(platform);
        Ok(())
    }

    pub fn integration(&self, platform: &str) -> Option<&Integration> {
        self.integrations.get(platform)
    }
}
