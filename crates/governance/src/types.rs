//! Core data model for organizations, proposals, and votes

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chains an organization can anchor its governance to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Hedera,
    Soneium,
    Ethereum,
    Rootstock,
}

/// Social links attached to an organization profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// A decentralized organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Description shown on the organization profile
    pub description: String,
    /// Wallet address that created the organization
    pub creator: String,
    /// Chain the organization lives on
    pub chain: Chain,
    /// Governance token contract address, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<String>,
    /// Governance token symbol, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
    /// Organization website
    pub website: String,
    /// Social links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    /// Logo image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Member wallet addresses
    pub members: Vec<String>,
    /// IDs of proposals belonging to this organization
    pub proposals: Vec<String>,
    /// When the organization was created
    pub created_at: DateTime<Utc>,
}

/// The ballot style a proposal uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoteKind {
    /// One option per ballot
    SingleChoice,
    /// Any number of options per ballot
    MultipleChoice,
    /// One option per ballot, weighted by token holdings
    TokenWeighted,
}

/// Lifecycle status of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Voting has not opened yet
    Pending,
    /// Open for voting
    Active,
    /// Voting closed with ballots tallied
    Passed,
    /// Voting closed without participation
    Failed,
}

impl Default for ProposalStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Token metadata attached to a token-weighted proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetails {
    pub name: String,
    pub address: String,
}

/// Contract addresses for hybrid NFT/token voting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridVoting {
    pub nft_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<String>,
}

/// The option(s) a ballot selects, by option index.
///
/// A single index and a set of indices are distinct variants, so the
/// equal-split rule for multi-select ballots is carried by the type
/// instead of a runtime shape check. The untagged representation keeps
/// the serialized form a bare number or an array of numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    /// A single option index
    Single(usize),
    /// A set of option indices sharing the ballot's weight equally
    Multiple(Vec<usize>),
}

impl Choice {
    /// Number of options this choice names
    pub fn selection_count(&self) -> usize {
        match self {
            Choice::Single(_) => 1,
            Choice::Multiple(indices) => indices.len(),
        }
    }

    /// Whether every named index falls inside `[0, option_count)`
    pub fn is_within(&self, option_count: usize) -> bool {
        match self {
            Choice::Single(index) => *index < option_count,
            Choice::Multiple(indices) => indices.iter().all(|index| *index < option_count),
        }
    }
}

/// A single ballot cast on a proposal.
///
/// Voter uniqueness is not enforced here; an address may appear more than
/// once and every record is tallied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    /// Wallet address of the voter, treated as an opaque identifier
    pub voter: String,
    /// The selected option index or indices
    pub choice: Choice,
    /// Vote weight; absent means one unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// When the ballot was cast
    pub cast_at: DateTime<Utc>,
}

/// A governance proposal and its recorded ballots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique identifier (`prop-<uuid>`)
    pub id: String,
    /// Organization the proposal belongs to
    pub organization_id: String,
    /// Proposal title
    pub title: String,
    /// Detailed description
    pub description: String,
    /// Wallet address that created the proposal
    pub creator: String,
    /// The ballot style
    pub vote_kind: VoteKind,
    /// Ordered candidate options
    pub options: Vec<String>,
    /// When voting opens
    pub starts_at: DateTime<Utc>,
    /// When voting closes
    pub ends_at: DateTime<Utc>,
    /// Lifecycle status
    pub status: ProposalStatus,
    /// Ballots cast, in the order recorded
    pub votes: Vec<Vote>,
    /// Optional summary shown on cards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// When the proposal was created
    pub created_at: DateTime<Utc>,
    /// When the proposal was last edited, if ever
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_at: Option<DateTime<Utc>>,
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

/// Stored user settings for the dashboard.
///
/// These are persisted data only; nothing in this workspace acts on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Proposal categories the user follows
    #[serde(default)]
    pub categories: Vec<String>,
    /// Keywords the user follows
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Whether the user opted into automatic voting
    #[serde(default)]
    pub auto_vote_enabled: bool,
    /// Preferred outcome per category or keyword
    #[serde(default)]
    pub preferred_outcomes: HashMap<String, Choice>,
}
