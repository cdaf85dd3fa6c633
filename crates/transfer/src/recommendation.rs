use serde::{Deserialize, Serialize};

use rebalance_core::{Article, OmId, SiteId};
use rebalance_inventory::GroupKey;

use crate::candidate::{ReceiveCandidate, ReceivePriority, TransferCandidate, TransferType};

/// One store-to-store move of a single article inside one OM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecommendation {
    pub article: Article,
    pub article_description: String,
    pub om: OmId,
    pub transfer_site: SiteId,
    pub receive_site: SiteId,
    pub transfer_qty: u32,
    pub transfer_type: TransferType,
    pub receive_priority: ReceivePriority,
    /// Source net stock before the move.
    pub transfer_site_stock: u32,
    pub transfer_site_stock_after: u32,
    pub transfer_site_safety_stock: u32,
    pub notes: String,
}

impl TransferRecommendation {
    /// Pair a source with a target for `transfer_qty` units.
    pub(crate) fn pair(source: &TransferCandidate, target: &ReceiveCandidate, transfer_qty: u32) -> Self {
        let stock_before = source.net_stock;

        Self {
            article: source.article.clone(),
            article_description: source.article_description.clone(),
            om: source.om.clone(),
            transfer_site: source.site.clone(),
            receive_site: target.site.clone(),
            transfer_qty,
            transfer_type: source.transfer_type,
            receive_priority: target.receive_priority,
            transfer_site_stock: stock_before,
            transfer_site_stock_after: stock_before.saturating_sub(transfer_qty),
            transfer_site_safety_stock: source.safety_stock,
            notes: notes_for(source),
        }
    }

    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            article: self.article.clone(),
            om: self.om.clone(),
        }
    }
}

fn notes_for(source: &TransferCandidate) -> String {
    let base = match source.transfer_type {
        TransferType::NdFull => "ND transfer-out",
        TransferType::RfSurplus => "RF surplus transfer-out",
    };
    if source.raised_to_min_batch {
        format!("{base}; raised to minimum batch of {}", crate::MIN_TRANSFER_BATCH)
    } else {
        base.to_string()
    }
}
