//! Transfer-out and receive candidates derived from canonical records.
//!
//! Candidates live for one run only: built by the classifier, consumed by the
//! allocator, then discarded.

use serde::{Deserialize, Serialize};

use rebalance_core::{Article, OmId, SiteId};
use rebalance_inventory::GroupKey;

/// Why a store can give stock away. Variant order is allocation order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferType {
    /// Non-replenished store divesting all of its stock.
    NdFull,
    /// Replenished store divesting a capped surplus above safety stock.
    RfSurplus,
}

impl TransferType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferType::NdFull => "ND_FULL",
            TransferType::RfSurplus => "RF_SURPLUS",
        }
    }
}

impl core::fmt::Display for TransferType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How badly a store needs stock. Variant order is allocation order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceivePriority {
    /// Out of stock while still selling.
    UrgentStockout,
    /// Below safety stock while still selling.
    PotentialShortage,
}

impl ReceivePriority {
    pub fn as_str(self) -> &'static str {
        match self {
            ReceivePriority::UrgentStockout => "URGENT_STOCKOUT",
            ReceivePriority::PotentialShortage => "POTENTIAL_SHORTAGE",
        }
    }
}

impl core::fmt::Display for ReceivePriority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A store that can give away `available_qty` units of one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCandidate {
    pub site: SiteId,
    pub article: Article,
    pub om: OmId,
    pub transfer_type: TransferType,
    pub available_qty: u32,
    /// Last month plus month-to-date sales at the source.
    pub sales_velocity: u32,
    pub net_stock: u32,
    pub safety_stock: u32,
    pub article_description: String,
    /// The capped RF surplus was below the minimum batch and got raised.
    pub raised_to_min_batch: bool,
}

impl TransferCandidate {
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            article: self.article.clone(),
            om: self.om.clone(),
        }
    }
}

/// A store that should receive stock of one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiveCandidate {
    pub site: SiteId,
    pub article: Article,
    pub om: OmId,
    pub receive_priority: ReceivePriority,
    /// Ranking key within a priority; higher is more urgent. Not a quantity.
    pub need_score: f64,
    pub net_stock: u32,
    pub safety_stock: u32,
    pub sales_velocity: u32,
}

impl ReceiveCandidate {
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            article: self.article.clone(),
            om: self.om.clone(),
        }
    }
}

/// Output of the classifier: both pools for the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidatePools {
    pub transfer_out: Vec<TransferCandidate>,
    pub receive: Vec<ReceiveCandidate>,
    /// Records that qualified for both pools and were kept as transfer-out only.
    pub suppressed_receives: usize,
}

impl CandidatePools {
    /// Units offered across all transfer-out candidates.
    pub fn offered_qty(&self) -> u64 {
        self.transfer_out
            .iter()
            .map(|c| u64::from(c.available_qty))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_order_matches_allocation_order() {
        assert!(TransferType::NdFull < TransferType::RfSurplus);
        assert!(ReceivePriority::UrgentStockout < ReceivePriority::PotentialShortage);
    }

    #[test]
    fn wire_names_are_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&TransferType::RfSurplus).unwrap(),
            "\"RF_SURPLUS\""
        );
        assert_eq!(
            serde_json::to_string(&ReceivePriority::UrgentStockout).unwrap(),
            "\"URGENT_STOCKOUT\""
        );
        assert_eq!(ReceivePriority::PotentialShortage.to_string(), "POTENTIAL_SHORTAGE");
    }
}
