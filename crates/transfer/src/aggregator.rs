//! Run statistics: totals, breakdowns and what was left unmatched.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use rebalance_core::{Article, OmId, SiteId};
use rebalance_inventory::GroupKey;

use crate::candidate::{CandidatePools, ReceivePriority, TransferType};
use crate::recommendation::TransferRecommendation;

/// Count and quantity of a slice of recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub count: usize,
    pub quantity: u64,
}

impl Breakdown {
    fn add(&mut self, qty: u32) {
        self.count += 1;
        self.quantity += u64::from(qty);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleBreakdown {
    pub count: usize,
    pub quantity: u64,
    /// Distinct OMs this article moves in.
    pub om_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmBreakdown {
    pub count: usize,
    pub quantity: u64,
    /// Distinct articles moving inside this OM.
    pub article_count: usize,
}

/// Summary of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStatistics {
    pub recommendation_count: usize,
    pub total_quantity: u64,
    pub by_article: BTreeMap<Article, ArticleBreakdown>,
    pub by_om: BTreeMap<OmId, OmBreakdown>,
    pub by_transfer_type: BTreeMap<TransferType, Breakdown>,
    pub by_receive_priority: BTreeMap<ReceivePriority, Breakdown>,
    pub transfer_candidates: usize,
    pub receive_candidates: usize,
    /// Offered transfer-out units that no recommendation used.
    pub unmatched_transfer_qty: u64,
    /// Transfer-out candidates with any supply left over.
    pub unmatched_transfer_candidates: usize,
    /// Receive candidates that got no inbound transfer.
    pub unsatisfied_receive_candidates: usize,
}

/// Summarize recommendations against the pools they were allocated from.
///
/// Pure: inputs are only read, and the same inputs always give equal statistics.
pub fn aggregate(
    recommendations: &[TransferRecommendation],
    pools: &CandidatePools,
) -> TransferStatistics {
    let mut stats = TransferStatistics {
        transfer_candidates: pools.transfer_out.len(),
        receive_candidates: pools.receive.len(),
        ..TransferStatistics::default()
    };

    let mut oms_per_article: BTreeMap<&Article, BTreeSet<&OmId>> = BTreeMap::new();
    let mut articles_per_om: BTreeMap<&OmId, BTreeSet<&Article>> = BTreeMap::new();
    let mut sent: HashMap<(GroupKey, &SiteId), u64> = HashMap::new();
    let mut received: HashSet<(GroupKey, &SiteId)> = HashSet::new();

    for rec in recommendations {
        let qty = u64::from(rec.transfer_qty);
        stats.recommendation_count += 1;
        stats.total_quantity += qty;

        let article = stats.by_article.entry(rec.article.clone()).or_default();
        article.count += 1;
        article.quantity += qty;

        let om = stats.by_om.entry(rec.om.clone()).or_default();
        om.count += 1;
        om.quantity += qty;

        stats
            .by_transfer_type
            .entry(rec.transfer_type)
            .or_default()
            .add(rec.transfer_qty);
        stats
            .by_receive_priority
            .entry(rec.receive_priority)
            .or_default()
            .add(rec.transfer_qty);

        oms_per_article.entry(&rec.article).or_default().insert(&rec.om);
        articles_per_om.entry(&rec.om).or_default().insert(&rec.article);

        *sent.entry((rec.group_key(), &rec.transfer_site)).or_default() += qty;
        received.insert((rec.group_key(), &rec.receive_site));
    }

    for (article, oms) in oms_per_article {
        if let Some(b) = stats.by_article.get_mut(article) {
            b.om_count = oms.len();
        }
    }
    for (om, articles) in articles_per_om {
        if let Some(b) = stats.by_om.get_mut(om) {
            b.article_count = articles.len();
        }
    }

    for source in &pools.transfer_out {
        let used = sent
            .get(&(source.group_key(), &source.site))
            .copied()
            .unwrap_or(0);
        let left = u64::from(source.available_qty).saturating_sub(used);
        if left > 0 {
            stats.unmatched_transfer_qty += left;
            stats.unmatched_transfer_candidates += 1;
        }
    }

    stats.unsatisfied_receive_candidates = pools
        .receive
        .iter()
        .filter(|target| !received.contains(&(target.group_key(), &target.site)))
        .count();

    stats
}
