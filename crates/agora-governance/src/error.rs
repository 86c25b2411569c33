use thiserror::Error;

/// Errors that can occur in governance operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GovernanceError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Proposal not found: {0}")]
    ProposalNotFound(u64),

    #[error("Voting closed for proposal {0}")]
    VotingClosed(u64),

    #[error("Voting still open for proposal {0}")]
    VotingStillOpen(u64),

    #[error("Proposal {0} already executed")]
    AlreadyExecuted(u64),

    #[error("Signer weight below threshold: {weight} < {threshold}")]
    ThresholdNotMet { weight: u64, threshold: u64 },

    #[error("Integration not found: {0}")]
    IntegrationNotFound(String),
}
