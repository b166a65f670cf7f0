//! Governance domain for Agora
//!
//! This crate holds the governance state of the dashboard: organizations,
//! their proposals, and the ballots cast on them, together with the vote
//! tallying that turns heterogeneous ballots into per-option totals,
//! percentage shares, and a leading option.
//!
//! All state is in memory. The registry takes every acting wallet address
//! as an explicit argument and the tally is a pure function recomputed
//! from the full vote list on each read.

pub mod error;
pub mod proposal;
pub mod registry;
pub mod seed;
pub mod tally;
pub mod types;

// Re-exports
pub use error::{GovernanceError, GovernanceResult};
pub use proposal::NewProposal;
pub use registry::{
    GovernanceRegistry, NewOrganization, OrganizationUpdate, ProposalUpdate, RegistryConfig,
};
pub use seed::{seed_data, seed_registry};
pub use tally::{ballot_count, leading_option, tally, OptionTally};
pub use types::{
    Chain, Choice, HybridVoting, Organization, Proposal, ProposalStatus, SocialLinks,
    TokenDetails, UserPreferences, Vote, VoteKind,
};
