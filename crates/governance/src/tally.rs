//! Vote tallying
//!
//! Aggregates heterogeneous ballots (single-choice, multi-choice,
//! weighted) into per-option totals and percentage shares. The tally is a
//! pure derived view: it is recomputed from the full vote list on every
//! call and never cached or incrementally maintained.

use serde::{Deserialize, Serialize};

use crate::types::{Choice, Vote};

/// Tallied result for one proposal option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionTally {
    /// Option label
    pub option: String,
    /// Position of the option in the proposal's option list
    pub index: usize,
    /// Accumulated vote weight for this option
    pub votes: f64,
    /// Share of the total tallied weight, 0 to 100
    pub percentage: f64,
}

/// Tally a proposal's votes into per-option totals and percentages.
///
/// Returns one entry per option, in option order. A ballot's effective
/// weight is its `weight` when present and positive, otherwise 1. A
/// multi-select ballot splits its weight equally over the indices it
/// names, so selecting more options never multiplies a ballot's
/// influence. Indices outside `[0, options.len())` are ignored and
/// contribute to no accumulator, which keeps the tally resilient to
/// stale vote data; callers that insert votes are expected to validate
/// indices up front (see `GovernanceRegistry::cast_vote`).
///
/// Percentages are shares of the summed accumulators, so they add up to
/// 100 whenever any weight was tallied and are all 0 otherwise.
pub fn tally(options: &[String], votes: &[Vote]) -> Vec<OptionTally> {
    let mut results: Vec<OptionTally> = options
        .iter()
        .enumerate()
        .map(|(index, option)| OptionTally {
            option: option.clone(),
            index,
            votes: 0.0,
            percentage: 0.0,
        })
        .collect();

    for vote in votes {
        let weight = effective_weight(vote.weight);

        match &vote.choice {
            Choice::Single(index) => {
                if let Some(entry) = results.get_mut(*index) {
                    entry.votes += weight;
                }
            }
            Choice::Multiple(indices) => {
                if indices.is_empty() {
                    continue;
                }

                let split = weight / indices.len() as f64;
                for index in indices {
                    if let Some(entry) = results.get_mut(*index) {
                        entry.votes += split;
                    }
                }
            }
        }
    }

    let total: f64 = results.iter().map(|entry| entry.votes).sum();
    if total > 0.0 {
        for entry in &mut results {
            entry.percentage = entry.votes / total * 100.0;
        }
    }

    results
}

/// The entry with the highest tallied weight.
///
/// Exact ties resolve to the earliest entry in option order, so the
/// reported leader is deterministic.
pub fn leading_option(results: &[OptionTally]) -> Option<&OptionTally> {
    results.iter().reduce(|best, candidate| {
        if candidate.votes > best.votes {
            candidate
        } else {
            best
        }
    })
}

/// Raw count of ballots cast, regardless of weight
pub fn ballot_count(votes: &[Vote]) -> usize {
    votes.len()
}

fn effective_weight(weight: Option<f64>) -> f64 {
    match weight {
        Some(weight) if weight > 0.0 => weight,
        _ => 1.0,
    }
}
