//! Seed data
//!
//! The dashboard ships with a small mock data set so it is browsable
//! before anyone creates an organization: two organizations and three
//! proposals in different voting states, timestamped relative to `now`.

use chrono::{DateTime, Duration, Utc};

use crate::registry::GovernanceRegistry;
use crate::types::{
    Chain, Choice, HybridVoting, Organization, Proposal, ProposalStatus, SocialLinks,
    TokenDetails, Vote, VoteKind,
};

const ALICE: &str = "0x1234567890123456789012345678901234567890";
const BOB: &str = "0x2345678901234567890123456789012345678901";
const DFI_TOKEN: &str = "0xabcdef1234567890abcdef1234567890abcdef12";

/// Build the seed organizations and proposals, timestamped relative to `now`
pub fn seed_data(now: DateTime<Utc>) -> (Vec<Organization>, Vec<Proposal>) {
    let organizations = vec![
        Organization {
            id: "org-1".to_string(),
            name: "DeFi Protocol".to_string(),
            description: "Decentralized finance protocol for lending and borrowing".to_string(),
            creator: ALICE.to_string(),
            chain: Chain::Ethereum,
            token_address: Some(DFI_TOKEN.to_string()),
            token_name: Some("DFI".to_string()),
            website: "https://defi-protocol.io".to_string(),
            social_links: Some(SocialLinks {
                twitter: Some("defiprotocol".to_string()),
                github: Some("defi-protocol".to_string()),
                linkedin: None,
            }),
            logo_url: Some("/uploads/defi-protocol.png".to_string()),
            members: vec![ALICE.to_string()],
            proposals: vec!["prop-1".to_string(), "prop-2".to_string()],
            created_at: now - Duration::milliseconds(1_000_000),
        },
        Organization {
            id: "org-2".to_string(),
            name: "NFT Collective".to_string(),
            description: "Artist collective for NFT creation and curation".to_string(),
            creator: BOB.to_string(),
            chain: Chain::Hedera,
            token_address: None,
            token_name: None,
            website: "https://nft-collective.art".to_string(),
            social_links: None,
            logo_url: Some("/uploads/nft-collective.png".to_string()),
            members: vec![ALICE.to_string(), BOB.to_string()],
            proposals: vec!["prop-3".to_string()],
            created_at: now - Duration::milliseconds(500_000),
        },
    ];

    let proposals = vec![
        Proposal {
            id: "prop-1".to_string(),
            organization_id: "org-1".to_string(),
            title: "Implement DeFi Staking Protocol".to_string(),
            description: "Proposal to implement a staking protocol to allow users to earn \
                          rewards on their cryptocurrency holdings."
                .to_string(),
            creator: ALICE.to_string(),
            vote_kind: VoteKind::SingleChoice,
            options: vec![
                "Approve".to_string(),
                "Reject".to_string(),
                "Abstain".to_string(),
            ],
            starts_at: now - Duration::milliseconds(300_000),
            ends_at: now + Duration::days(3),
            status: ProposalStatus::Active,
            votes: vec![Vote {
                voter: BOB.to_string(),
                choice: Choice::Single(0),
                weight: None,
                cast_at: now - Duration::milliseconds(100_000),
            }],
            summary: Some(
                "This proposal aims to introduce a staking protocol that will enable \
                 platform users to earn rewards by staking their tokens."
                    .to_string(),
            ),
            created_at: now - Duration::milliseconds(300_000),
            last_edited_at: None,
            chain: Some(Chain::Ethereum),
            token_details: Some(TokenDetails {
                name: "DeFi Token".to_string(),
                address: DFI_TOKEN.to_string(),
            }),
            hybrid_voting: None,
        },
        Proposal {
            id: "prop-2".to_string(),
            organization_id: "org-1".to_string(),
            title: "Treasury Allocation for Q2".to_string(),
            description: "Proposal to allocate treasury funds for development, marketing, \
                          and community initiatives in Q2."
                .to_string(),
            creator: ALICE.to_string(),
            vote_kind: VoteKind::TokenWeighted,
            options: vec![
                "Approve Plan A".to_string(),
                "Approve Plan B".to_string(),
                "Reject Both Plans".to_string(),
            ],
            starts_at: now - Duration::milliseconds(500_000),
            ends_at: now - Duration::milliseconds(100_000),
            status: ProposalStatus::Passed,
            votes: vec![
                Vote {
                    voter: ALICE.to_string(),
                    choice: Choice::Single(0),
                    weight: Some(1000.0),
                    cast_at: now - Duration::milliseconds(300_000),
                },
                Vote {
                    voter: BOB.to_string(),
                    choice: Choice::Single(0),
                    weight: Some(500.0),
                    cast_at: now - Duration::milliseconds(200_000),
                },
            ],
            summary: None,
            created_at: now - Duration::milliseconds(500_000),
            last_edited_at: Some(now - Duration::milliseconds(400_000)),
            chain: Some(Chain::Ethereum),
            token_details: Some(TokenDetails {
                name: "DeFi Token".to_string(),
                address: DFI_TOKEN.to_string(),
            }),
            hybrid_voting: None,
        },
        Proposal {
            id: "prop-3".to_string(),
            organization_id: "org-2".to_string(),
            title: "Launch NFT Marketplace".to_string(),
            description: "Proposal to launch an NFT marketplace for the collective with a \
                          focus on sustainable and eco-friendly minting."
                .to_string(),
            creator: BOB.to_string(),
            vote_kind: VoteKind::MultipleChoice,
            options: vec![
                "Launch in Q2".to_string(),
                "Launch in Q3".to_string(),
                "Partner with existing marketplace".to_string(),
                "Delay until next year".to_string(),
            ],
            starts_at: now - Duration::milliseconds(200_000),
            ends_at: now + Duration::days(5),
            status: ProposalStatus::Active,
            votes: Vec::new(),
            summary: None,
            created_at: now - Duration::milliseconds(200_000),
            last_edited_at: None,
            chain: Some(Chain::Hedera),
            token_details: None,
            hybrid_voting: Some(HybridVoting {
                nft_address: "0x3456789012345678901234567890123456789012".to_string(),
                token_address: None,
            }),
        },
    ];

    (organizations, proposals)
}

/// Load the seed data set into a registry
pub async fn seed_registry(registry: &GovernanceRegistry, now: DateTime<Utc>) {
    let (organizations, proposals) = seed_data(now);

    for organization in organizations {
        registry.insert_organization(organization).await;
    }
    for proposal in proposals {
        registry.insert_proposal(proposal).await;
    }
}
