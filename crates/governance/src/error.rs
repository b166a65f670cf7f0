//! Error types for governance operations

use thiserror::Error;

/// Error type for governance operations
#[derive(Error, Debug)]
pub enum GovernanceError {
    /// Organization not found
    #[error("Organization not found: {0}")]
    OrganizationNotFound(String),

    /// Proposal not found
    #[error("Proposal not found: {0}")]
    ProposalNotFound(String),

    /// Invalid organization
    #[error("Invalid organization: {0}")]
    InvalidOrganization(String),

    /// Invalid proposal
    #[error("Invalid proposal: {0}")]
    InvalidProposal(String),

    /// Invalid vote choice
    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    /// Voting window is not open
    #[error("Voting is closed for proposal {0}")]
    VotingClosed(String),

    /// A second ballot from the same address when re-voting is disabled
    #[error("Duplicate vote on proposal {proposal_id} by {voter}")]
    DuplicateVote { proposal_id: String, voter: String },

    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Result type for governance operations
pub type GovernanceResult<T> = Result<T, GovernanceError>;
