//! Agora Governance - weighted DAO governance and treasury engine.
//!
//! This crate provides:
//! - Governance parameter configuration (model, quorum, voting period)
//! - Proposal lifecycle with weighted, last-vote-wins balloting
//! - Weighted authorization ledger with threshold predicate
//! - Multi-signature treasury transfer gate
//! - Integration registry for outbound notifications

pub mod config;
pub mod ledger;
pub mod proposal;
pub mod treasury;
pub mod integration;
pub mod engine;
pub mod error;

pub use config::GovernanceConfig;
pub use ledger::WeightLedger;
pub use proposal::{Ballot, Proposal, ProposalRegistry, ProposalStatus, VoteChoice};
pub use treasury::{TransferAuthorization, Treasury};
pub use integration::{Integration, IntegrationRegistry, Notifier};
pub use engine::{EngineConfig, ExecutionPolicy, GovernanceEngine};
pub use error::GovernanceError;
