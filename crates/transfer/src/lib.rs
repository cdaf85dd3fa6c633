//! Store-to-store transfer engine.
//!
//! Pure, deterministic decision logic over canonical inventory records: which
//! stores give stock away, which receive it, and how much moves between them.
//! No IO happens here; callers hand in records and render the results.

pub mod aggregator;
pub mod allocator;
pub mod candidate;
pub mod classifier;
pub mod engine;
pub mod quality;
pub mod recommendation;
pub mod strategy;

pub use aggregator::{ArticleBreakdown, Breakdown, OmBreakdown, TransferStatistics, aggregate};
pub use allocator::{allocate, allocate_group};
pub use candidate::{
    CandidatePools, ReceiveCandidate, ReceivePriority, TransferCandidate, TransferType,
};
pub use classifier::{classify, receive_candidate, rf_transferable, transfer_out_candidate};
pub use engine::{TransferEngine, TransferPlan, TransferRun};
pub use quality::{QualityCheck, QualityReport, run_quality_checks};
pub use recommendation::TransferRecommendation;
pub use strategy::{MIN_TRANSFER_BATCH, Strategy};
