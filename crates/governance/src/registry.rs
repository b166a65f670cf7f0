//! In-memory governance registry
//!
//! `GovernanceRegistry` owns all organization and proposal state for the
//! dashboard. Every operation that acts on behalf of a user takes the
//! acting wallet address as an explicit argument; there is no ambient
//! "current user". Tallies are derived views over the stored vote lists
//! and are never cached here.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use agora_common::util::short_address;

use crate::error::{GovernanceError, GovernanceResult};
use crate::proposal::NewProposal;
use crate::tally::OptionTally;
use crate::types::{
    Chain, Choice, Organization, Proposal, ProposalStatus, SocialLinks, Vote, VoteKind,
};

/// Behavior knobs for the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Whether an address may cast more than one ballot per proposal.
    /// When true, re-votes append and every record is tallied.
    pub allow_revote: bool,
    /// Voting period applied when a proposal omits its end time
    pub default_voting_period_secs: i64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            allow_revote: true,
            default_voting_period_secs: 3 * 24 * 60 * 60, // 3 days
        }
    }
}

impl RegistryConfig {
    fn default_voting_period(&self) -> Duration {
        Duration::seconds(self.default_voting_period_secs)
    }
}

/// Input for creating an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub description: String,
    pub chain: Chain,
    pub website: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl NewOrganization {
    fn validate(&self) -> GovernanceResult<()> {
        if self.name.trim().is_empty() {
            return Err(GovernanceError::InvalidOrganization(
                "Name cannot be empty".to_string(),
            ));
        }

        if self.description.trim().is_empty() {
            return Err(GovernanceError::InvalidOrganization(
                "Description cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Partial update for an organization; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub token_address: Option<String>,
    pub token_name: Option<String>,
    pub social_links: Option<SocialLinks>,
    pub logo_url: Option<String>,
    pub members: Option<Vec<String>>,
}

/// Partial update for a proposal; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub options: Option<Vec<String>>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: Option<ProposalStatus>,
}

/// The in-memory store of organizations, proposals, and their votes
pub struct GovernanceRegistry {
    config: RegistryConfig,
    organizations: RwLock<HashMap<String, Organization>>,
    proposals: RwLock<HashMap<String, Proposal>>,
}

impl GovernanceRegistry {
    /// Create an empty registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with the given configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            organizations: RwLock::new(HashMap::new()),
            proposals: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new organization; the creator becomes its first member
    pub async fn create_organization(
        &self,
        creator: &str,
        input: NewOrganization,
    ) -> GovernanceResult<Organization> {
        input.validate()?;

        let organization = Organization {
            id: format!("org-{}", Uuid::new_v4()),
            name: input.name,
            description: input.description,
            creator: creator.to_string(),
            chain: input.chain,
            token_address: input.token_address,
            token_name: input.token_name,
            website: input.website,
            social_links: input.social_links,
            logo_url: input.logo_url,
            members: vec![creator.to_string()],
            proposals: Vec::new(),
            created_at: Utc::now(),
        };

        let mut organizations = self.organizations.write().await;
        organizations.insert(organization.id.clone(), organization.clone());

        info!(
            "Created organization {} ({}) by {}",
            organization.id,
            organization.name,
            short_address(creator)
        );

        Ok(organization)
    }

    /// Get an organization by ID
    pub async fn get_organization(&self, id: &str) -> Option<Organization> {
        let organizations = self.organizations.read().await;
        organizations.get(id).cloned()
    }

    /// List all organizations, oldest first
    pub async fn list_organizations(&self) -> Vec<Organization> {
        let organizations = self.organizations.read().await;
        let mut result: Vec<Organization> = organizations.values().cloned().collect();

        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        result
    }

    /// Apply a partial update to an organization
    pub async fn update_organization(
        &self,
        id: &str,
        update: OrganizationUpdate,
    ) -> GovernanceResult<Organization> {
        let mut organizations = self.organizations.write().await;
        let organization = organizations
            .get_mut(id)
            .ok_or_else(|| GovernanceError::OrganizationNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            organization.name = name;
        }
        if let Some(description) = update.description {
            organization.description = description;
        }
        if let Some(website) = update.website {
            organization.website = website;
        }
        if let Some(token_address) = update.token_address {
            organization.token_address = Some(token_address);
        }
        if let Some(token_name) = update.token_name {
            organization.token_name = Some(token_name);
        }
        if let Some(social_links) = update.social_links {
            organization.social_links = Some(social_links);
        }
        if let Some(logo_url) = update.logo_url {
            organization.logo_url = Some(logo_url);
        }
        if let Some(members) = update.members {
            organization.members = members;
        }

        debug!("Updated organization {}", id);

        Ok(organization.clone())
    }

    /// List the proposals belonging to an organization, oldest first
    pub async fn organization_proposals(
        &self,
        organization_id: &str,
    ) -> GovernanceResult<Vec<Proposal>> {
        {
            let organizations = self.organizations.read().await;
            if !organizations.contains_key(organization_id) {
                return Err(GovernanceError::OrganizationNotFound(
                    organization_id.to_string(),
                ));
            }
        }

        let proposals = self.proposals.read().await;
        let mut result: Vec<Proposal> = proposals
            .values()
            .filter(|proposal| proposal.organization_id == organization_id)
            .cloned()
            .collect();

        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(result)
    }

    /// Create a proposal inside an organization.
    ///
    /// The proposal starts `Pending` and becomes `Active` once its window
    /// opens; a missing end time defaults to the configured voting period.
    pub async fn create_proposal(
        &self,
        creator: &str,
        input: NewProposal,
    ) -> GovernanceResult<Proposal> {
        input.validate()?;

        let now = Utc::now();
        let ends_at = input
            .ends_at
            .unwrap_or(input.starts_at + self.config.default_voting_period());

        let status = if now >= input.starts_at {
            ProposalStatus::Active
        } else {
            ProposalStatus::Pending
        };

        let mut organizations = self.organizations.write().await;
        let organization = organizations
            .get_mut(&input.organization_id)
            .ok_or_else(|| GovernanceError::OrganizationNotFound(input.organization_id.clone()))?;

        let proposal = Proposal {
            id: format!("prop-{}", Uuid::new_v4()),
            organization_id: input.organization_id,
            title: input.title,
            description: input.description,
            creator: creator.to_string(),
            vote_kind: input.vote_kind,
            options: input.options,
            starts_at: input.starts_at,
            ends_at,
            status,
            votes: Vec::new(),
            summary: input.summary,
            created_at: now,
            last_edited_at: None,
            chain: input.chain,
            token_details: input.token_details,
            hybrid_voting: input.hybrid_voting,
        };

        organization.proposals.push(proposal.id.clone());

        let mut proposals = self.proposals.write().await;
        proposals.insert(proposal.id.clone(), proposal.clone());

        info!(
            "Created proposal {} ({}) in {} by {}",
            proposal.id,
            proposal.title,
            proposal.organization_id,
            short_address(creator)
        );

        Ok(proposal)
    }

    /// Get a proposal by ID
    pub async fn get_proposal(&self, id: &str) -> Option<Proposal> {
        let proposals = self.proposals.read().await;
        proposals.get(id).cloned()
    }

    /// List all proposals, newest first
    pub async fn list_proposals(&self) -> Vec<Proposal> {
        let proposals = self.proposals.read().await;
        let mut result: Vec<Proposal> = proposals.values().cloned().collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        result
    }

    /// Whether an address may edit a proposal (creators only)
    pub async fn can_edit_proposal(&self, actor: &str, id: &str) -> bool {
        let proposals = self.proposals.read().await;
        proposals
            .get(id)
            .map(|proposal| proposal.creator == actor)
            .unwrap_or(false)
    }

    /// Apply a partial update to a proposal; only its creator may edit.
    ///
    /// The option list can only be replaced while no ballots exist, since
    /// recorded choices refer to options by index.
    pub async fn update_proposal(
        &self,
        actor: &str,
        id: &str,
        update: ProposalUpdate,
    ) -> GovernanceResult<Proposal> {
        let mut proposals = self.proposals.write().await;
        let proposal = proposals
            .get_mut(id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.to_string()))?;

        if proposal.creator != actor {
            return Err(GovernanceError::PermissionDenied(format!(
                "Only the creator can edit proposal {}",
                id
            )));
        }

        if let Some(options) = update.options {
            if !proposal.votes.is_empty() {
                return Err(GovernanceError::InvalidProposal(
                    "Options cannot change once ballots are recorded".to_string(),
                ));
            }
            if options.len() < 2 {
                return Err(GovernanceError::InvalidProposal(
                    "A proposal needs at least two options".to_string(),
                ));
            }
            proposal.options = options;
        }

        if let Some(title) = update.title {
            proposal.title = title;
        }
        if let Some(description) = update.description {
            proposal.description = description;
        }
        if let Some(summary) = update.summary {
            proposal.summary = Some(summary);
        }
        if let Some(starts_at) = update.starts_at {
            proposal.starts_at = starts_at;
        }
        if let Some(ends_at) = update.ends_at {
            proposal.ends_at = ends_at;
        }
        if let Some(status) = update.status {
            proposal.status = status;
        }

        if proposal.starts_at >= proposal.ends_at {
            return Err(GovernanceError::InvalidProposal(
                "Voting must end after it starts".to_string(),
            ));
        }

        proposal.last_edited_at = Some(Utc::now());

        debug!("Updated proposal {}", id);

        Ok(proposal.clone())
    }

    /// Cast a ballot on a proposal.
    ///
    /// Choice indices are validated against the option list here, before
    /// insertion, so the stored vote data stays well-formed and the tally
    /// never sees an out-of-range index. Ballot style must match the
    /// proposal's vote kind: only multiple-choice proposals accept index
    /// sets.
    pub async fn cast_vote(
        &self,
        voter: &str,
        proposal_id: &str,
        choice: Choice,
        weight: Option<f64>,
    ) -> GovernanceResult<Vote> {
        let now = Utc::now();

        let mut proposals = self.proposals.write().await;
        let proposal = proposals
            .get_mut(proposal_id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(proposal_id.to_string()))?;

        if !proposal.voting_active(now) {
            return Err(GovernanceError::VotingClosed(proposal_id.to_string()));
        }

        if let Choice::Multiple(indices) = &choice {
            if indices.is_empty() {
                return Err(GovernanceError::InvalidChoice(
                    "A ballot must select at least one option".to_string(),
                ));
            }
            if proposal.vote_kind != VoteKind::MultipleChoice {
                return Err(GovernanceError::InvalidChoice(format!(
                    "Proposal {} does not accept multi-option ballots",
                    proposal_id
                )));
            }
        }

        if !choice.is_within(proposal.options.len()) {
            return Err(GovernanceError::InvalidChoice(format!(
                "Choice references an option outside 0..{}",
                proposal.options.len()
            )));
        }

        if !self.config.allow_revote && proposal.has_voted(voter) {
            return Err(GovernanceError::DuplicateVote {
                proposal_id: proposal_id.to_string(),
                voter: voter.to_string(),
            });
        }

        let vote = Vote {
            voter: voter.to_string(),
            choice,
            weight,
            cast_at: now,
        };

        proposal.votes.push(vote.clone());

        debug!(
            "Vote cast on proposal {} by {} ({} ballots)",
            proposal_id,
            short_address(voter),
            proposal.votes.len()
        );

        Ok(vote)
    }

    /// Tally a proposal's votes into per-option totals and percentages
    pub async fn tally_proposal(&self, id: &str) -> GovernanceResult<Vec<OptionTally>> {
        let proposals = self.proposals.read().await;
        let proposal = proposals
            .get(id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.to_string()))?;

        Ok(proposal.results())
    }

    /// The currently leading option of a proposal, if it has any options
    pub async fn leading_option(&self, id: &str) -> GovernanceResult<Option<OptionTally>> {
        let proposals = self.proposals.read().await;
        let proposal = proposals
            .get(id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.to_string()))?;

        Ok(proposal.leading())
    }

    /// Re-derive every stored proposal status from its schedule.
    ///
    /// Pending proposals whose window opened become `Active`; active
    /// proposals whose window closed become `Passed` or `Failed`.
    /// Returns the proposals whose status changed.
    pub async fn refresh_statuses(&self, now: DateTime<Utc>) -> Vec<Proposal> {
        let mut proposals = self.proposals.write().await;
        let mut changed = Vec::new();

        for proposal in proposals.values_mut() {
            let status = proposal.schedule_status(now);
            if proposal.status != status {
                info!(
                    "Proposal {} moved from {:?} to {:?}",
                    proposal.id, proposal.status, status
                );
                proposal.status = status;
                changed.push(proposal.clone());
            }
        }

        changed
    }

    /// Insert a fully formed organization, used by the seed data loader
    pub(crate) async fn insert_organization(&self, organization: Organization) {
        let mut organizations = self.organizations.write().await;
        organizations.insert(organization.id.clone(), organization);
    }

    /// Insert a fully formed proposal, used by the seed data loader
    pub(crate) async fn insert_proposal(&self, proposal: Proposal) {
        let mut proposals = self.proposals.write().await;
        proposals.insert(proposal.id.clone(), proposal);
    }
}

impl Default for GovernanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
