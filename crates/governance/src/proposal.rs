//! Proposal schedule logic and validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GovernanceError, GovernanceResult};
use crate::tally::{self, OptionTally};
use crate::types::{
    Chain, HybridVoting, Proposal, ProposalStatus, TokenDetails, VoteKind,
};

impl Proposal {
    /// Whether the voting window has opened
    pub fn voting_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.starts_at
    }

    /// Whether the voting window has closed
    pub fn voting_ended(&self, now: DateTime<Utc>) -> bool {
        now > self.ends_at
    }

    /// Whether ballots can currently be cast
    pub fn voting_active(&self, now: DateTime<Utc>) -> bool {
        self.voting_started(now) && !self.voting_ended(now)
    }

    /// Status derived from the schedule and, once closed, from the tally.
    ///
    /// A closed proposal is `Passed` when any vote weight was tallied and
    /// `Failed` when nobody voted.
    pub fn schedule_status(&self, now: DateTime<Utc>) -> ProposalStatus {
        if !self.voting_started(now) {
            ProposalStatus::Pending
        } else if !self.voting_ended(now) {
            ProposalStatus::Active
        } else if self.results().iter().any(|entry| entry.votes > 0.0) {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Failed
        }
    }

    /// Whether an address has already cast a ballot on this proposal
    pub fn has_voted(&self, address: &str) -> bool {
        self.votes.iter().any(|vote| vote.voter == address)
    }

    /// Per-option tally of the recorded votes
    pub fn results(&self) -> Vec<OptionTally> {
        tally::tally(&self.options, &self.votes)
    }

    /// The currently leading option, if any options exist
    pub fn leading(&self) -> Option<OptionTally> {
        let results = self.results();
        tally::leading_option(&results).cloned()
    }

    /// Number of ballots cast, regardless of weight
    pub fn ballot_count(&self) -> usize {
        tally::ballot_count(&self.votes)
    }
}

/// Input for creating a proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProposal {
    /// Organization the proposal belongs to
    pub organization_id: String,
    /// Proposal title
    pub title: String,
    /// Detailed description
    pub description: String,
    /// The ballot style
    pub vote_kind: VoteKind,
    /// Ordered candidate options
    pub options: Vec<String>,
    /// When voting opens
    pub starts_at: DateTime<Utc>,
    /// When voting closes; absent means the registry's default period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    /// Optional summary shown on cards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Chain override for cross-chain organizations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Chain>,
    /// Token metadata for token-weighted proposals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_details: Option<TokenDetails>,
    /// Contract addresses for hybrid voting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid_voting: Option<HybridVoting>,
}

impl NewProposal {
    /// Validate the input before a proposal is created from it
    pub fn validate(&self) -> GovernanceResult<()> {
        if self.title.trim().is_empty() {
            return Err(GovernanceError::InvalidProposal(
                "Title cannot be empty".to_string(),
            ));
        }

        if self.description.trim().is_empty() {
            return Err(GovernanceError::InvalidProposal(
                "Description cannot be empty".to_string(),
            ));
        }

        if self.options.len() < 2 {
            return Err(GovernanceError::InvalidProposal(
                "A proposal needs at least two options".to_string(),
            ));
        }

        if self.options.iter().any(|option| option.trim().is_empty()) {
            return Err(GovernanceError::InvalidProposal(
                "Option labels cannot be empty".to_string(),
            ));
        }

        if let Some(ends_at) = self.ends_at {
            if self.starts_at >= ends_at {
                return Err(GovernanceError::InvalidProposal(
                    "Voting must end after it starts".to_string(),
                ));
            }
        }

        Ok(())
    }
}
