//! Greedy per-group matching of transfer-out sources to receive targets.
//!
//! Groups are `(article, om)` pairs and never interact, so they are allocated on
//! the rayon pool and concatenated in ascending group order. Within a group:
//!
//! - sources: ND before RF; then largest quantity first (Option A) or slowest
//!   seller first (Option B); then ascending site
//! - targets: urgent before potential shortage; then highest need score; then
//!   ascending site
//! - each source pairs with the first unsatisfied target at a different site, and
//!   each target accepts at most one inbound transfer
//!
//! Targets carry a ranking score but no need quantity, so a pairing moves the
//! source's whole remaining quantity.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info};

use rebalance_inventory::GroupKey;

use crate::candidate::{CandidatePools, ReceiveCandidate, TransferCandidate};
use crate::recommendation::TransferRecommendation;
use crate::strategy::Strategy;

/// Candidates of one `(article, om)` group, borrowed from the pools.
#[derive(Debug, Default)]
struct GroupPools<'a> {
    sources: Vec<&'a TransferCandidate>,
    targets: Vec<&'a ReceiveCandidate>,
}

/// Allocate every group of the pools under `strategy`.
///
/// Deterministic: the same pools and strategy always give the same list, in the
/// same order, whatever the thread count.
pub fn allocate(pools: &CandidatePools, strategy: Strategy) -> Vec<TransferRecommendation> {
    let groups = partition(pools);
    let matchable: Vec<(GroupKey, GroupPools<'_>)> = groups
        .into_iter()
        .filter(|(_, g)| !g.sources.is_empty() && !g.targets.is_empty())
        .collect();

    let per_group: Vec<Vec<TransferRecommendation>> = matchable
        .into_par_iter()
        .map(|(key, group)| {
            let recs = allocate_group(group.sources, group.targets, strategy);
            debug!(group = %key, recommendations = recs.len(), "allocated group");
            recs
        })
        .collect();

    let recommendations: Vec<TransferRecommendation> = per_group.into_iter().flatten().collect();
    info!(
        %strategy,
        sources = pools.transfer_out.len(),
        targets = pools.receive.len(),
        recommendations = recommendations.len(),
        "allocation finished"
    );
    recommendations
}

fn partition(pools: &CandidatePools) -> BTreeMap<GroupKey, GroupPools<'_>> {
    let mut groups: BTreeMap<GroupKey, GroupPools<'_>> = BTreeMap::new();
    for source in &pools.transfer_out {
        groups.entry(source.group_key()).or_default().sources.push(source);
    }
    for target in &pools.receive {
        groups.entry(target.group_key()).or_default().targets.push(target);
    }
    groups
}

/// Allocate a single group. Candidates from other groups must not be mixed in.
pub fn allocate_group(
    mut sources: Vec<&TransferCandidate>,
    mut targets: Vec<&ReceiveCandidate>,
    strategy: Strategy,
) -> Vec<TransferRecommendation> {
    sources.sort_by(|a, b| source_order(a, b, strategy));
    targets.sort_by(|a, b| target_order(a, b));

    let mut satisfied = vec![false; targets.len()];
    // First target that may still be unsatisfied.
    let mut head = 0;
    let mut recommendations = Vec::new();

    for source in sources {
        if head == targets.len() {
            break;
        }

        let remaining = source.available_qty;
        if remaining == 0 {
            continue;
        }

        let Some(idx) = (head..targets.len())
            .find(|&i| !satisfied[i] && targets[i].site != source.site)
        else {
            continue;
        };

        recommendations.push(TransferRecommendation::pair(source, targets[idx], remaining));
        satisfied[idx] = true;

        while head < targets.len() && satisfied[head] {
            head += 1;
        }
    }

    recommendations
}

fn source_order(a: &TransferCandidate, b: &TransferCandidate, strategy: Strategy) -> Ordering {
    let within_type = if strategy.orders_by_velocity() {
        a.sales_velocity.cmp(&b.sales_velocity)
    } else {
        b.available_qty.cmp(&a.available_qty)
    };

    a.transfer_type
        .cmp(&b.transfer_type)
        .then(within_type)
        .then_with(|| a.site.cmp(&b.site))
}

fn target_order(a: &ReceiveCandidate, b: &ReceiveCandidate) -> Ordering {
    a.receive_priority
        .cmp(&b.receive_priority)
        .then_with(|| b.need_score.total_cmp(&a.need_score))
        .then_with(|| a.site.cmp(&b.site))
}
