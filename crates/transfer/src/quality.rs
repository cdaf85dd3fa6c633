//! Post-allocation sanity checks against the canonical snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use rebalance_core::{ARTICLE_LEN, Article, Entity};
use rebalance_inventory::{InventoryRecord, RecordKey};

use crate::recommendation::TransferRecommendation;

/// Check results for one recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCheck {
    pub index: usize,
    /// Both sites hold the article in the same OM in the snapshot.
    pub article_om_match: bool,
    pub positive_transfer_qty: bool,
    /// Quantity does not exceed the source's original net stock.
    pub within_source_stock: bool,
    pub different_sites: bool,
    /// Twelve ASCII digits.
    pub article_is_canonical: bool,
}

impl QualityCheck {
    pub fn passed(&self) -> bool {
        self.article_om_match
            && self.positive_transfer_qty
            && self.within_source_stock
            && self.different_sites
            && self.article_is_canonical
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub checks: Vec<QualityCheck>,
    pub all_passed: bool,
}

impl QualityReport {
    pub fn failures(&self) -> impl Iterator<Item = &QualityCheck> {
        self.checks.iter().filter(|c| !c.passed())
    }
}

/// Re-validate recommendations against the records they were derived from.
pub fn run_quality_checks(
    recommendations: &[TransferRecommendation],
    records: &[InventoryRecord],
) -> QualityReport {
    let by_key: HashMap<RecordKey, &InventoryRecord> =
        records.iter().map(|r| (r.id(), r)).collect();

    let checks: Vec<QualityCheck> = recommendations
        .iter()
        .enumerate()
        .map(|(index, rec)| {
            let key_for = |site: &rebalance_core::SiteId| RecordKey {
                article: rec.article.clone(),
                om: rec.om.clone(),
                site: site.clone(),
            };
            let source = by_key.get(&key_for(&rec.transfer_site));
            let target = by_key.get(&key_for(&rec.receive_site));

            QualityCheck {
                index,
                article_om_match: source.is_some() && target.is_some(),
                positive_transfer_qty: rec.transfer_qty > 0,
                within_source_stock: source.is_some_and(|s| rec.transfer_qty <= s.net_stock),
                different_sites: rec.transfer_site != rec.receive_site,
                article_is_canonical: is_numeric_article(&rec.article),
            }
        })
        .collect();

    let all_passed = checks.iter().all(QualityCheck::passed);
    if !all_passed {
        let failed = checks.iter().filter(|c| !c.passed()).count();
        warn!(failed, total = checks.len(), "quality checks failed");
    }

    QualityReport { checks, all_passed }
}

fn is_numeric_article(article: &Article) -> bool {
    let code = article.as_str();
    code.len() == ARTICLE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}
