use core::str::FromStr;

use serde::{Deserialize, Serialize};

use rebalance_core::{Article, DomainError, Entity, OmId, SiteId};

/// Upper bound for the monthly sales columns; larger values are data-entry errors.
pub const MAX_SOLD_QTY: u32 = 100_000;

/// Replenishment policy of a store for one article.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RpType {
    /// Not replenished by the supply chain; surplus should be fully divested.
    #[serde(rename = "ND")]
    Nd,
    /// Replenished through normal channels; only a capped surplus may leave.
    #[serde(rename = "RF")]
    Rf,
}

impl RpType {
    pub fn as_str(self) -> &'static str {
        match self {
            RpType::Nd => "ND",
            RpType::Rf => "RF",
        }
    }
}

impl core::fmt::Display for RpType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ND" => Ok(RpType::Nd),
            "RF" => Ok(RpType::Rf),
            other => Err(DomainError::validation(format!(
                "RP Type: expected ND or RF, got '{other}'"
            ))),
        }
    }
}

/// Scope within which stock may move: one article inside one OM.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub article: Article,
    pub om: OmId,
}

impl core::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{}", self.article, self.om)
    }
}

/// Identity of a single inventory row: one article at one site of one OM.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub article: Article,
    pub om: OmId,
    pub site: SiteId,
}

/// Canonical inventory snapshot row.
///
/// Produced by [`crate::preprocess`]; every numeric field is already non-negative
/// and the sales columns are within `[0, MAX_SOLD_QTY]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub article: Article,
    pub article_description: String,
    pub rp_type: RpType,
    pub site: SiteId,
    pub om: OmId,
    pub moq: u32,
    pub net_stock: u32,
    pub pending_received: u32,
    pub safety_stock: u32,
    pub last_month_sold_qty: u32,
    pub mtd_sold_qty: u32,
}

impl InventoryRecord {
    /// Start a record with all quantities at zero.
    pub fn new(article: Article, om: OmId, site: SiteId, rp_type: RpType) -> Self {
        Self {
            article,
            article_description: String::new(),
            rp_type,
            site,
            om,
            moq: 0,
            net_stock: 0,
            pending_received: 0,
            safety_stock: 0,
            last_month_sold_qty: 0,
            mtd_sold_qty: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.article_description = description.into();
        self
    }

    pub fn with_stock(mut self, net_stock: u32, safety_stock: u32) -> Self {
        self.net_stock = net_stock;
        self.safety_stock = safety_stock;
        self
    }

    pub fn with_pending_received(mut self, pending_received: u32) -> Self {
        self.pending_received = pending_received;
        self
    }

    pub fn with_moq(mut self, moq: u32) -> Self {
        self.moq = moq;
        self
    }

    /// Set both sales columns, clamped to `MAX_SOLD_QTY`.
    pub fn with_sales(mut self, last_month_sold_qty: u32, mtd_sold_qty: u32) -> Self {
        self.last_month_sold_qty = last_month_sold_qty.min(MAX_SOLD_QTY);
        self.mtd_sold_qty = mtd_sold_qty.min(MAX_SOLD_QTY);
        self
    }

    /// Recent sales velocity: last month plus month-to-date.
    pub fn sales_velocity(&self) -> u32 {
        self.last_month_sold_qty + self.mtd_sold_qty
    }

    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            article: self.article.clone(),
            om: self.om.clone(),
        }
    }
}

impl Entity for InventoryRecord {
    type Id = RecordKey;

    fn id(&self) -> Self::Id {
        RecordKey {
            article: self.article.clone(),
            om: self.om.clone(),
            site: self.site.clone(),
        }
    }
}
