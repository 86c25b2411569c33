//! Proposal lifecycle management.
//!
//! Proposals go through states: Active -> Passed/Rejected (terminal).
//! Ballots are last-vote-wins: a repeat vote from the same voter replaces the
//! prior ballot and moves the tallies by exactly the prior contribution.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use agora_types::Principal;
use crate::error::GovernanceError;

/// Proposal status in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStatus {
    /// Voting is open
    Active,
    /// Executed with quorum met and yes > no
    Passed,
    /// Executed with quorum failed or yes <= no
    Rejected,
}

impl ProposalStatus {
    /// Check if voting is still possible.
    pub fn is_active(&self) -> bool {
        matches!(self, ProposalStatus::Active)
    }

    /// Check if the proposal reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Active => "active",
            ProposalStatus::Passed => "passed",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A voter's choice on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChoice {
    Yes,
    No,
}

impl VoteChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::Yes => "yes",
            VoteChoice::No => "no",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteChoice {
    type Err = GovernanceError;

    /// Parse the transport-layer choice string. Anything other than
    /// "yes"/"no" is rejected; abstentions are not modeled.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(VoteChoice::Yes),
            "no" => Ok(VoteChoice::No),
            other => Err(GovernanceError::InvalidArgument(format!(
                "vote choice must be \"yes\" or \"no\", got \"{}\"",
                other
            ))),
        }
    }
}

/// A recorded ballot.
///
/// The weight applied at vote time is stored alongside the choice so that a
/// replacement ballot reverses exactly the prior contribution, even if the
/// voter's ledger weight changed in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ballot {
    pub choice: VoteChoice,
    pub weight: u64,
}

/// A governance proposal.
#[derive(Debug, Clone)]
pub struct Proposal {
    /// Unique sequential ID, assigned from 1 and never reused
    pub id: u64,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Proposer principal
    pub proposer: Principal,
    /// Block when voting opened
    pub start_block: u64,
    /// Last block at which votes are accepted
    pub end_block: u64,
    /// Current status
    pub status: ProposalStatus,
    /// Weight-accumulated yes tally
    pub yes_votes: u64,
    /// Weight-accumulated no tally
    pub no_votes: u64,
    /// Ballots by voter (last vote wins)
    ballots: HashMap<Principal, Ballot>,
}

impl Proposal {
    fn new(
        id: u64,
        title: String,
        description: String,
        proposer: Principal,
        current_block: u64,
        voting_period: u64,
    ) -> Self {
        Self {
            id,
            title,
            description,
            proposer,
            start_block: current_block,
            end_block: current_block.saturating_add(voting_period),
            status: ProposalStatus::Active,
            yes_votes: 0,
            no_votes: 0,
            ballots: HashMap::new(),
        }
    }

    /// The voter's recorded choice, or `None` if no ballot exists.
    pub fn vote_of(&self, voter: &Principal) -> Option<VoteChoice> {
        self.ballots.get(voter).map(|b| b.choice)
    }

    /// Total weight cast across both tallies.
    pub fn total_cast(&self) -> u64 {
        self.yes_votes.saturating_add(self.no_votes)
    }

    /// Number of distinct voters with a ballot.
    pub fn ballot_count(&self) -> usize {
        self.ballots.len()
    }

    /// Cast or replace a ballot.
    ///
    /// A repeat vote from the same voter first reverses the prior ballot's
    /// tally contribution, then applies the new one.
    pub fn cast_vote(
        &mut self,
        voter: Principal,
        choice: VoteChoice,
        weight: u64,
        current_block: u64,
    ) -> Result<(), GovernanceError> {
        if !self.status.is_active() || current_block > self.end_block {
            return Err(GovernanceError::VotingClosed(self.id));
        }

        if let Some(prior) = self.ballots.get(&voter) {
            match prior.choice {
                VoteChoice::Yes => self.yes_votes = self.yes_votes.saturating_sub(prior.weight),
                VoteChoice::No => self.no_votes = self.no_votes.saturating_sub(prior.weight),
            }
        }

        match choice {
            VoteChoice::Yes => self.yes_votes = self.yes_votes.saturating_add(weight),
            VoteChoice::No => self.no_votes = self.no_votes.saturating_add(weight),
        }

        self.ballots.insert(voter, Ballot { choice, weight });
        Ok(())
    }

    /// Resolve the proposal's outcome against the governance quorum rule.
    ///
    /// Quorum: total weight cast as a percentage of `eligible_weight` must
    /// reach `quorum_percentage`. Quorum failed means Rejected regardless of
    /// the vote split; quorum met means Passed iff yes > no. The transition
    /// is terminal: a second call fails with `AlreadyExecuted` and mutates
    /// nothing.
    pub fn resolve(
        &mut self,
        quorum_percentage: u8,
        eligible_weight: u64,
        current_block: u64,
        require_window_elapsed: bool,
    ) -> Result<ProposalStatus, GovernanceError> {
        if self.status.is_terminal() {
            return Err(GovernanceError::AlreadyExecuted(self.id));
        }

        if require_window_elapsed && current_block <= self.end_block {
            return Err(GovernanceError::VotingStillOpen(self.id));
        }

        // Compare in u128 so the cross-multiplication cannot overflow
        let cast = self.total_cast() as u128;
        let quorum_met =
            cast * 100 >= (quorum_percentage as u128) * (eligible_weight as u128);

        self.status = if !quorum_met {
            ProposalStatus::Rejected
        } else if self.yes_votes > self.no_votes {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Rejected
        };

        Ok(self.status)
    }
}

/// Registry owning all proposals and the id counter.
#[derive(Debug, Default)]
pub struct ProposalRegistry {
    proposals: HashMap<u64, Proposal>,
    last_id: u64,
}

impl ProposalRegistry {
    /// Create an empty registry. Ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new proposal and return its id.
    ///
    /// The voting period is captured here; later governance config changes do
    /// not move existing proposals' end blocks.
    pub fn create(
        &mut self,
        title: &str,
        description: &str,
        proposer: Principal,
        current_block: u64,
        voting_period: u64,
    ) -> Result<u64, GovernanceError> {
        if title.is_empty() {
            return Err(GovernanceError::InvalidArgument(
                "proposal title must be non-empty".to_string(),
            ));
        }
        if description.is_empty() {
            return Err(GovernanceError::InvalidArgument(
                "proposal description must be non-empty".to_string(),
            ));
        }

        self.last_id += 1;
        let id = self.last_id;

        let proposal = Proposal::new(
            id,
            title.to_string(),
            description.to_string(),
            proposer,
            current_block,
            voting_period,
        );
        self.proposals.insert(id, proposal);

        tracing::info!("Proposal #{} created by {}", id, proposer);
        Ok(id)
    }

    /// Get a proposal.
    pub fn get(&self, id: u64) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    /// Get a proposal mutably.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Proposal> {
        self.proposals.get_mut(&id)
    }

    /// Id of the most recently created proposal (0 if none).
    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    /// All proposals with a given status.
    pub fn by_status(&self, status: ProposalStatus) -> Vec<&Proposal> {
        self.proposals
            .values()
            .filter(|p| p.status == status)
            .collect()
    }

    /// All proposals still accepting votes.
    pub fn active(&self) -> Vec<&Proposal> {
        self.by_status(ProposalStatus::Active)
    }
}
