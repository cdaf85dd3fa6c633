//! Report files: suggestion rows as CSV, run summary as JSON.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use rebalance_inventory::PreprocessReport;
use rebalance_transfer::{
    QualityReport, Strategy, TransferRecommendation, TransferRun, TransferStatistics,
};

/// Timestamp format shared by both output file names.
pub const FILE_STAMP: &str = "%Y%m%d_%H%M%S";

/// One line of the suggestion sheet, headed the way the store teams read it.
#[derive(Debug, Serialize)]
pub struct RecommendationRow<'a> {
    #[serde(rename = "Article")]
    pub article: &'a str,
    #[serde(rename = "Article Description")]
    pub article_description: &'a str,
    #[serde(rename = "OM")]
    pub om: &'a str,
    #[serde(rename = "Transfer Site")]
    pub transfer_site: &'a str,
    #[serde(rename = "Receive Site")]
    pub receive_site: &'a str,
    #[serde(rename = "Transfer Qty")]
    pub transfer_qty: u32,
    #[serde(rename = "Transfer Site Original Stock")]
    pub transfer_site_stock: u32,
    #[serde(rename = "Transfer Site After Stock")]
    pub transfer_site_stock_after: u32,
    #[serde(rename = "Transfer Site Safety Stock")]
    pub transfer_site_safety_stock: u32,
    #[serde(rename = "Transfer Type")]
    pub transfer_type: &'static str,
    #[serde(rename = "Receive Priority")]
    pub receive_priority: &'static str,
    #[serde(rename = "Notes")]
    pub notes: &'a str,
}

impl<'a> From<&'a TransferRecommendation> for RecommendationRow<'a> {
    fn from(rec: &'a TransferRecommendation) -> Self {
        Self {
            article: rec.article.as_str(),
            article_description: &rec.article_description,
            om: rec.om.as_str(),
            transfer_site: rec.transfer_site.as_str(),
            receive_site: rec.receive_site.as_str(),
            transfer_qty: rec.transfer_qty,
            transfer_site_stock: rec.transfer_site_stock,
            transfer_site_stock_after: rec.transfer_site_stock_after,
            transfer_site_safety_stock: rec.transfer_site_safety_stock,
            transfer_type: rec.transfer_type.as_str(),
            receive_priority: rec.receive_priority.as_str(),
            notes: &rec.notes,
        }
    }
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    generated_at: String,
    strategy: Strategy,
    rf_cap_percent: u32,
    preprocess: &'a PreprocessReport,
    statistics: &'a TransferStatistics,
    quality: &'a QualityReport,
}

/// Paths of the files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub suggestions: PathBuf,
    pub summary: PathBuf,
}

/// Write suggestion rows as CSV. A header is written even when there are no rows.
pub fn write_recommendations<W: Write>(
    writer: W,
    recommendations: &[TransferRecommendation],
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADERS)?;
    for rec in recommendations {
        csv_writer.serialize(RecommendationRow::from(rec))?;
    }
    csv_writer.flush()?;
    Ok(())
}

const HEADERS: [&str; 12] = [
    "Article",
    "Article Description",
    "OM",
    "Transfer Site",
    "Receive Site",
    "Transfer Qty",
    "Transfer Site Original Stock",
    "Transfer Site After Stock",
    "Transfer Site Safety Stock",
    "Transfer Type",
    "Receive Priority",
    "Notes",
];

/// Write both report files into `dir`, creating it if needed.
pub fn write_outputs(run: &TransferRun, dir: &Path, stamp: DateTime<Local>) -> Result<OutputFiles> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;

    let suffix = stamp.format(FILE_STAMP).to_string();
    let files = OutputFiles {
        suggestions: dir.join(format!("transfer_suggestions_{suffix}.csv")),
        summary: dir.join(format!("transfer_summary_{suffix}.json")),
    };

    let csv_file = File::create(&files.suggestions)
        .with_context(|| format!("failed to create '{}'", files.suggestions.display()))?;
    write_recommendations(BufWriter::new(csv_file), &run.plan.recommendations)
        .with_context(|| format!("failed to write '{}'", files.suggestions.display()))?;

    let summary = RunSummary {
        generated_at: stamp.to_rfc3339(),
        strategy: run.plan.strategy,
        rf_cap_percent: run.plan.strategy.rf_cap_percent(),
        preprocess: &run.preprocess,
        statistics: &run.plan.statistics,
        quality: &run.plan.quality,
    };
    let json_file = File::create(&files.summary)
        .with_context(|| format!("failed to create '{}'", files.summary.display()))?;
    let mut json_writer = BufWriter::new(json_file);
    serde_json::to_writer_pretty(&mut json_writer, &summary)
        .with_context(|| format!("failed to write '{}'", files.summary.display()))?;
    json_writer.flush()?;

    info!(
        suggestions = %files.suggestions.display(),
        summary = %files.summary.display(),
        "reports written"
    );
    Ok(files)
}
