//! End-to-end pipeline: preprocess → classify → allocate → aggregate → check.

use serde::Serialize;
use tracing::info;

use rebalance_core::DomainResult;
use rebalance_inventory::{InventoryRecord, PreprocessReport, RawTable, preprocess};

use crate::aggregator::{TransferStatistics, aggregate};
use crate::allocator::allocate;
use crate::candidate::CandidatePools;
use crate::classifier::classify;
use crate::quality::{QualityReport, run_quality_checks};
use crate::recommendation::TransferRecommendation;
use crate::strategy::Strategy;

/// Everything produced from canonical records under one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferPlan {
    pub strategy: Strategy,
    pub pools: CandidatePools,
    pub recommendations: Vec<TransferRecommendation>,
    pub statistics: TransferStatistics,
    pub quality: QualityReport,
}

/// A full run over a raw table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRun {
    pub preprocess: PreprocessReport,
    #[serde(skip)]
    pub records: Vec<InventoryRecord>,
    #[serde(flatten)]
    pub plan: TransferPlan,
}

/// Stateless façade over the engine stages for one strategy.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TransferEngine {
    strategy: Strategy,
}

impl TransferEngine {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// Engine for an RF surplus cap given in percent; only 20 and 50 exist.
    pub fn with_cap_percent(percent: u32) -> DomainResult<Self> {
        Strategy::from_cap_percent(percent).map(Self::new)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Run from raw rows. Fails only when a mandatory column is missing.
    pub fn run(&self, table: &RawTable) -> DomainResult<TransferRun> {
        let preprocessed = preprocess(table)?;
        let plan = self.plan(&preprocessed.records);
        Ok(TransferRun {
            preprocess: preprocessed.report,
            records: preprocessed.records,
            plan,
        })
    }

    /// Run from records that are already canonical.
    pub fn plan(&self, records: &[InventoryRecord]) -> TransferPlan {
        let pools = classify(records, self.strategy);
        let recommendations = allocate(&pools, self.strategy);
        let statistics = aggregate(&recommendations, &pools);
        let quality = run_quality_checks(&recommendations, records);

        info!(
            strategy = %self.strategy,
            records = records.len(),
            recommendations = statistics.recommendation_count,
            total_quantity = statistics.total_quantity,
            unmatched_transfer_qty = statistics.unmatched_transfer_qty,
            unsatisfied_receive_candidates = statistics.unsatisfied_receive_candidates,
            quality_ok = quality.all_passed,
            "transfer plan ready"
        );

        TransferPlan {
            strategy: self.strategy,
            pools,
            recommendations,
            statistics,
            quality,
        }
    }
}
