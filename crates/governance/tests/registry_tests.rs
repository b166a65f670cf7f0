//! End-to-end tests for the governance registry

use chrono::{Duration, Utc};

use agora_governance::{
    seed_registry, Chain, Choice, GovernanceError, GovernanceRegistry, NewOrganization,
    NewProposal, ProposalStatus, ProposalUpdate, RegistryConfig, VoteKind,
};

const ALICE: &str = "0x1234567890123456789012345678901234567890";
const BOB: &str = "0x2345678901234567890123456789012345678901";
const CAROL: &str = "0x3456789012345678901234567890123456789012";

fn new_org(name: &str) -> NewOrganization {
    NewOrganization {
        name: name.to_string(),
        description: "A test organization".to_string(),
        chain: Chain::Ethereum,
        website: "https://example.org".to_string(),
        token_address: None,
        token_name: None,
        social_links: None,
        logo_url: None,
    }
}

fn new_proposal(organization_id: &str, kind: VoteKind) -> NewProposal {
    let now = Utc::now();
    NewProposal {
        organization_id: organization_id.to_string(),
        title: "Fund the community grants round".to_string(),
        description: "Allocate funds to the next grants round".to_string(),
        vote_kind: kind,
        options: vec![
            "Approve".to_string(),
            "Reject".to_string(),
            "Abstain".to_string(),
        ],
        starts_at: now - Duration::minutes(5),
        ends_at: Some(now + Duration::days(3)),
        summary: None,
        chain: None,
        token_details: None,
        hybrid_voting: None,
    }
}

#[tokio::test]
async fn organization_crud_roundtrip() {
    let registry = GovernanceRegistry::new();

    let org = registry
        .create_organization(ALICE, new_org("DeFi Protocol"))
        .await
        .unwrap();
    assert_eq!(org.creator, ALICE);
    assert_eq!(org.members, vec![ALICE.to_string()]);

    let fetched = registry.get_organization(&org.id).await.unwrap();
    assert_eq!(fetched.name, "DeFi Protocol");

    let updated = registry
        .update_organization(
            &org.id,
            agora_governance::OrganizationUpdate {
                description: Some("Lending and borrowing".to_string()),
                members: Some(vec![ALICE.to_string(), BOB.to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description, "Lending and borrowing");
    assert_eq!(updated.members.len(), 2);

    assert!(registry.get_organization("org-missing").await.is_none());
    assert_eq!(registry.list_organizations().await.len(), 1);
}

#[tokio::test]
async fn proposal_creation_links_to_organization() {
    let registry = GovernanceRegistry::new();
    let org = registry
        .create_organization(ALICE, new_org("DeFi Protocol"))
        .await
        .unwrap();

    let proposal = registry
        .create_proposal(ALICE, new_proposal(&org.id, VoteKind::SingleChoice))
        .await
        .unwrap();

    assert_eq!(proposal.status, ProposalStatus::Active);
    assert!(proposal.votes.is_empty());

    let org = registry.get_organization(&org.id).await.unwrap();
    assert_eq!(org.proposals, vec![proposal.id.clone()]);

    let listed = registry.organization_proposals(&org.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, proposal.id);

    let missing = registry
        .create_proposal(ALICE, new_proposal("org-missing", VoteKind::SingleChoice))
        .await;
    assert!(matches!(
        missing,
        Err(GovernanceError::OrganizationNotFound(_))
    ));
}

#[tokio::test]
async fn proposal_end_time_defaults_to_configured_period() {
    let registry = GovernanceRegistry::with_config(RegistryConfig {
        allow_revote: true,
        default_voting_period_secs: 7 * 24 * 60 * 60,
    });
    let org = registry
        .create_organization(ALICE, new_org("DeFi Protocol"))
        .await
        .unwrap();

    let mut input = new_proposal(&org.id, VoteKind::SingleChoice);
    input.ends_at = None;
    let proposal = registry.create_proposal(ALICE, input).await.unwrap();

    assert_eq!(proposal.ends_at - proposal.starts_at, Duration::days(7));
}

#[tokio::test]
async fn casting_and_tallying_votes() {
    let registry = GovernanceRegistry::new();
    let org = registry
        .create_organization(ALICE, new_org("DeFi Protocol"))
        .await
        .unwrap();
    let proposal = registry
        .create_proposal(ALICE, new_proposal(&org.id, VoteKind::SingleChoice))
        .await
        .unwrap();

    registry
        .cast_vote(ALICE, &proposal.id, Choice::Single(0), Some(1000.0))
        .await
        .unwrap();
    registry
        .cast_vote(BOB, &proposal.id, Choice::Single(0), Some(500.0))
        .await
        .unwrap();
    registry
        .cast_vote(CAROL, &proposal.id, Choice::Single(1), None)
        .await
        .unwrap();

    let results = registry.tally_proposal(&proposal.id).await.unwrap();
    assert_eq!(results[0].votes, 1500.0);
    assert_eq!(results[1].votes, 1.0);
    assert_eq!(results[2].votes, 0.0);

    let leader = registry
        .leading_option(&proposal.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(leader.option, "Approve");

    let stored = registry.get_proposal(&proposal.id).await.unwrap();
    assert_eq!(stored.ballot_count(), 3);
    assert!(stored.has_voted(ALICE));
}

#[tokio::test]
async fn vote_validation_rejects_bad_ballots() {
    let registry = GovernanceRegistry::new();
    let org = registry
        .create_organization(ALICE, new_org("DeFi Protocol"))
        .await
        .unwrap();
    let proposal = registry
        .create_proposal(ALICE, new_proposal(&org.id, VoteKind::SingleChoice))
        .await
        .unwrap();

    // Out-of-range index
    let result = registry
        .cast_vote(BOB, &proposal.id, Choice::Single(3), None)
        .await;
    assert!(matches!(result, Err(GovernanceError::InvalidChoice(_))));

    // Multi-option ballot on a single-choice proposal
    let result = registry
        .cast_vote(BOB, &proposal.id, Choice::Multiple(vec![0, 1]), None)
        .await;
    assert!(matches!(result, Err(GovernanceError::InvalidChoice(_))));

    // Unknown proposal
    let result = registry
        .cast_vote(BOB, "prop-missing", Choice::Single(0), None)
        .await;
    assert!(matches!(result, Err(GovernanceError::ProposalNotFound(_))));

    // Nothing was recorded
    let stored = registry.get_proposal(&proposal.id).await.unwrap();
    assert!(stored.votes.is_empty());
}

#[tokio::test]
async fn multi_choice_ballots_require_a_selection() {
    let registry = GovernanceRegistry::new();
    let org = registry
        .create_organization(BOB, new_org("NFT Collective"))
        .await
        .unwrap();
    let proposal = registry
        .create_proposal(BOB, new_proposal(&org.id, VoteKind::MultipleChoice))
        .await
        .unwrap();

    let result = registry
        .cast_vote(ALICE, &proposal.id, Choice::Multiple(vec![]), None)
        .await;
    assert!(matches!(result, Err(GovernanceError::InvalidChoice(_))));

    registry
        .cast_vote(ALICE, &proposal.id, Choice::Multiple(vec![0, 2]), Some(2.0))
        .await
        .unwrap();

    let results = registry.tally_proposal(&proposal.id).await.unwrap();
    assert_eq!(results[0].votes, 1.0);
    assert_eq!(results[2].votes, 1.0);
}

#[tokio::test]
async fn voting_outside_the_window_is_rejected() {
    let registry = GovernanceRegistry::new();
    let org = registry
        .create_organization(ALICE, new_org("DeFi Protocol"))
        .await
        .unwrap();

    let mut input = new_proposal(&org.id, VoteKind::SingleChoice);
    input.starts_at = Utc::now() + Duration::days(1);
    input.ends_at = Some(Utc::now() + Duration::days(4));
    let pending = registry.create_proposal(ALICE, input).await.unwrap();
    assert_eq!(pending.status, ProposalStatus::Pending);

    let result = registry
        .cast_vote(BOB, &pending.id, Choice::Single(0), None)
        .await;
    assert!(matches!(result, Err(GovernanceError::VotingClosed(_))));
}

#[tokio::test]
async fn revoting_appends_by_default_and_is_rejected_when_disabled() {
    let registry = GovernanceRegistry::new();
    let org = registry
        .create_organization(ALICE, new_org("DeFi Protocol"))
        .await
        .unwrap();
    let proposal = registry
        .create_proposal(ALICE, new_proposal(&org.id, VoteKind::SingleChoice))
        .await
        .unwrap();

    registry
        .cast_vote(BOB, &proposal.id, Choice::Single(0), None)
        .await
        .unwrap();
    registry
        .cast_vote(BOB, &proposal.id, Choice::Single(1), None)
        .await
        .unwrap();

    // Both ballots are tallied
    let results = registry.tally_proposal(&proposal.id).await.unwrap();
    assert_eq!(results[0].votes, 1.0);
    assert_eq!(results[1].votes, 1.0);

    let strict = GovernanceRegistry::with_config(RegistryConfig {
        allow_revote: false,
        ..Default::default()
    });
    let org = strict
        .create_organization(ALICE, new_org("Strict DAO"))
        .await
        .unwrap();
    let proposal = strict
        .create_proposal(ALICE, new_proposal(&org.id, VoteKind::SingleChoice))
        .await
        .unwrap();

    strict
        .cast_vote(BOB, &proposal.id, Choice::Single(0), None)
        .await
        .unwrap();
    let result = strict
        .cast_vote(BOB, &proposal.id, Choice::Single(1), None)
        .await;
    assert!(matches!(result, Err(GovernanceError::DuplicateVote { .. })));
}

#[tokio::test]
async fn only_the_creator_may_edit_a_proposal() {
    let registry = GovernanceRegistry::new();
    let org = registry
        .create_organization(ALICE, new_org("DeFi Protocol"))
        .await
        .unwrap();
    let proposal = registry
        .create_proposal(ALICE, new_proposal(&org.id, VoteKind::SingleChoice))
        .await
        .unwrap();

    assert!(registry.can_edit_proposal(ALICE, &proposal.id).await);
    assert!(!registry.can_edit_proposal(BOB, &proposal.id).await);

    let result = registry
        .update_proposal(
            BOB,
            &proposal.id,
            ProposalUpdate {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(GovernanceError::PermissionDenied(_))));

    let updated = registry
        .update_proposal(
            ALICE,
            &proposal.id,
            ProposalUpdate {
                summary: Some("A short summary".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.summary.as_deref(), Some("A short summary"));
    assert!(updated.last_edited_at.is_some());
}

#[tokio::test]
async fn options_cannot_change_once_ballots_exist() {
    let registry = GovernanceRegistry::new();
    let org = registry
        .create_organization(ALICE, new_org("DeFi Protocol"))
        .await
        .unwrap();
    let proposal = registry
        .create_proposal(ALICE, new_proposal(&org.id, VoteKind::SingleChoice))
        .await
        .unwrap();

    registry
        .cast_vote(BOB, &proposal.id, Choice::Single(0), None)
        .await
        .unwrap();

    let result = registry
        .update_proposal(
            ALICE,
            &proposal.id,
            ProposalUpdate {
                options: Some(vec!["Yes".to_string(), "No".to_string()]),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(GovernanceError::InvalidProposal(_))));
}

#[tokio::test]
async fn refresh_statuses_follows_the_schedule() {
    let registry = GovernanceRegistry::new();
    let now = Utc::now();
    seed_registry(&registry, now).await;

    // Move past every voting window
    let later = now + Duration::days(6);
    let changed = registry.refresh_statuses(later).await;

    // prop-1 closes with a ballot, prop-3 closes without any
    assert_eq!(changed.len(), 2);

    let staking = registry.get_proposal("prop-1").await.unwrap();
    assert_eq!(staking.status, ProposalStatus::Passed);

    let marketplace = registry.get_proposal("prop-3").await.unwrap();
    assert_eq!(marketplace.status, ProposalStatus::Failed);

    // Already-final statuses stay put
    let treasury = registry.get_proposal("prop-2").await.unwrap();
    assert_eq!(treasury.status, ProposalStatus::Passed);
}

#[tokio::test]
async fn seeded_registry_matches_the_mock_data_set() {
    let registry = GovernanceRegistry::new();
    seed_registry(&registry, Utc::now()).await;

    let organizations = registry.list_organizations().await;
    assert_eq!(organizations.len(), 2);
    assert_eq!(organizations[0].name, "DeFi Protocol");
    assert_eq!(organizations[1].name, "NFT Collective");

    let proposals = registry.list_proposals().await;
    assert_eq!(proposals.len(), 3);

    // Newest first
    assert_eq!(proposals[0].id, "prop-3");

    let defi_proposals = registry.organization_proposals("org-1").await.unwrap();
    assert_eq!(defi_proposals.len(), 2);

    let leader = registry.leading_option("prop-2").await.unwrap().unwrap();
    assert_eq!(leader.option, "Approve Plan A");
    assert!((leader.percentage - 100.0).abs() < 1e-9);
}
