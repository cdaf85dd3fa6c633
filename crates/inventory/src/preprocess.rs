//! Raw table → canonical [`InventoryRecord`]s.
//!
//! Only a missing mandatory column is fatal. Everything else is a soft correction:
//! the value is fixed in place, counted in the [`PreprocessReport`], and logged
//! once per column and correction kind.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rebalance_core::{Article, DomainError, DomainResult, Entity, OmId, SiteId};

use crate::raw::{Column, RawTable};
use crate::record::{InventoryRecord, MAX_SOLD_QTY, RecordKey, RpType};

/// Kinds of in-place correction applied to a cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correction {
    /// Article code padded or truncated to 12 characters.
    ArticleLength,
    /// Cell empty or absent; defaulted to 0.
    MissingNumeric,
    /// Cell not a number; defaulted to 0.
    NonNumeric,
    /// Negative value raised to 0.
    Negative,
    /// Sales value above the upper bound lowered to it.
    AboveSalesBound,
}

/// Outcome counts of a preprocessing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessReport {
    pub input_rows: usize,
    pub output_records: usize,
    pub dropped_missing_identity: usize,
    pub dropped_invalid_rp_type: usize,
    pub dropped_duplicate_key: usize,
    pub corrected_article_length: usize,
    pub defaulted_numeric: usize,
    pub corrected_negative: usize,
    pub clamped_sales: usize,
    /// One human-readable line per (column, correction) that occurred.
    pub log: Vec<String>,
}

impl PreprocessReport {
    pub fn dropped_rows(&self) -> usize {
        self.dropped_missing_identity + self.dropped_invalid_rp_type + self.dropped_duplicate_key
    }

    pub fn corrected_cells(&self) -> usize {
        self.corrected_article_length
            + self.defaulted_numeric
            + self.corrected_negative
            + self.clamped_sales
    }
}

/// Canonical records plus the report describing how they were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    pub records: Vec<InventoryRecord>,
    pub report: PreprocessReport,
}

/// Normalize and validate a raw table.
///
/// Fails with [`DomainError::MissingColumns`] when any mandatory header is absent.
pub fn preprocess(table: &RawTable) -> DomainResult<Preprocessed> {
    let missing = table.missing_columns();
    if !missing.is_empty() {
        return Err(DomainError::missing_columns(
            missing.iter().map(|c| c.header()),
        ));
    }

    let columns = ColumnMap::resolve(table)?;
    let mut tally = Tally::default();
    let mut seen: BTreeSet<RecordKey> = BTreeSet::new();
    let mut records = Vec::with_capacity(table.len());

    for row in table.rows() {
        let cell = |c: Column| columns.cell(row, c);

        let (Some(raw_article), Ok(site), Ok(om)) = (
            cell(Column::Article).filter(|s| !s.trim().is_empty()),
            SiteId::new(cell(Column::Site).unwrap_or_default()),
            OmId::new(cell(Column::Om).unwrap_or_default()),
        ) else {
            tally.dropped_missing_identity += 1;
            continue;
        };

        let Ok(rp_type) = cell(Column::RpType).unwrap_or_default().parse::<RpType>() else {
            tally.dropped_invalid_rp_type += 1;
            continue;
        };

        let (article, article_corrected) = Article::canonicalize(raw_article);
        let mut record = InventoryRecord::new(article, om, site, rp_type)
            .with_description(cell(Column::ArticleDescription).unwrap_or_default().trim());

        if !seen.insert(record.id()) {
            tally.dropped_duplicate_key += 1;
            continue;
        }

        if article_corrected {
            tally.note(Column::Article, Correction::ArticleLength);
        }

        record.moq = tally.quantity(Column::Moq, cell(Column::Moq));
        record.net_stock = tally.quantity(Column::NetStock, cell(Column::NetStock));
        record.pending_received =
            tally.quantity(Column::PendingReceived, cell(Column::PendingReceived));
        record.safety_stock = tally.quantity(Column::SafetyStock, cell(Column::SafetyStock));
        record.last_month_sold_qty =
            tally.quantity(Column::LastMonthSoldQty, cell(Column::LastMonthSoldQty));
        record.mtd_sold_qty = tally.quantity(Column::MtdSoldQty, cell(Column::MtdSoldQty));

        records.push(record);
    }

    let report = tally.into_report(table.len(), records.len());
    info!(
        input_rows = report.input_rows,
        output_records = report.output_records,
        dropped = report.dropped_rows(),
        corrected = report.corrected_cells(),
        "preprocessed inventory snapshot"
    );

    Ok(Preprocessed { records, report })
}

/// Resolved header positions for the mandatory columns.
struct ColumnMap {
    positions: BTreeMap<Column, usize>,
}

impl ColumnMap {
    fn resolve(table: &RawTable) -> DomainResult<Self> {
        let mut positions = BTreeMap::new();
        for column in Column::MANDATORY {
            let index = table
                .column_index(column)
                .ok_or_else(|| DomainError::missing_columns([column.header()]))?;
            positions.insert(column, index);
        }
        Ok(Self { positions })
    }

    fn cell<'a>(&self, row: &'a [Option<String>], column: Column) -> Option<&'a str> {
        let index = *self.positions.get(&column)?;
        row.get(index)?.as_deref()
    }
}

enum ParsedNumber {
    Value(f64),
    Missing,
    NonNumeric,
}

fn parse_number(cell: Option<&str>) -> ParsedNumber {
    let Some(text) = cell.map(str::trim).filter(|t| !t.is_empty()) else {
        return ParsedNumber::Missing;
    };
    // Overflowing exponents parse to ±inf and are clamped like any other
    // out-of-range value; only NaN is not a number.
    match text.parse::<f64>() {
        Ok(v) if !v.is_nan() => ParsedNumber::Value(v),
        _ => ParsedNumber::NonNumeric,
    }
}

#[derive(Default)]
struct Tally {
    dropped_missing_identity: usize,
    dropped_invalid_rp_type: usize,
    dropped_duplicate_key: usize,
    corrections: BTreeMap<(Column, Correction), usize>,
}

impl Tally {
    fn note(&mut self, column: Column, correction: Correction) {
        *self.corrections.entry((column, correction)).or_default() += 1;
    }

    /// Parse one quantity cell into its canonical value, recording any correction.
    fn quantity(&mut self, column: Column, cell: Option<&str>) -> u32 {
        let value = match parse_number(cell) {
            ParsedNumber::Value(v) => v.trunc(),
            ParsedNumber::Missing => {
                self.note(column, Correction::MissingNumeric);
                return 0;
            }
            ParsedNumber::NonNumeric => {
                self.note(column, Correction::NonNumeric);
                return 0;
            }
        };

        if value < 0.0 {
            self.note(column, Correction::Negative);
            return 0;
        }
        if column.is_sales() && value > f64::from(MAX_SOLD_QTY) {
            self.note(column, Correction::AboveSalesBound);
            return MAX_SOLD_QTY;
        }
        // Float-to-int casts saturate at u32::MAX.
        value as u32
    }

    fn into_report(self, input_rows: usize, output_records: usize) -> PreprocessReport {
        let mut report = PreprocessReport {
            input_rows,
            output_records,
            dropped_missing_identity: self.dropped_missing_identity,
            dropped_invalid_rp_type: self.dropped_invalid_rp_type,
            dropped_duplicate_key: self.dropped_duplicate_key,
            ..PreprocessReport::default()
        };

        for (&(column, correction), &count) in &self.corrections {
            match correction {
                Correction::ArticleLength => report.corrected_article_length += count,
                Correction::MissingNumeric | Correction::NonNumeric => {
                    report.defaulted_numeric += count
                }
                Correction::Negative => report.corrected_negative += count,
                Correction::AboveSalesBound => report.clamped_sales += count,
            }

            let line = correction_line(column, correction, count);
            warn!(column = column.header(), ?correction, count, "{line}");
            report.log.push(line);
        }

        for (count, what) in [
            (report.dropped_missing_identity, "missing Article, Site or OM"),
            (report.dropped_invalid_rp_type, "RP Type other than ND/RF"),
            (report.dropped_duplicate_key, "duplicate Article/OM/Site key"),
        ] {
            if count > 0 {
                let line = format!("{count} row(s) dropped: {what}");
                warn!(count, "{line}");
                report.log.push(line);
            }
        }

        report
    }
}

fn correction_line(column: Column, correction: Correction, count: usize) -> String {
    match correction {
        Correction::ArticleLength => {
            format!("'{column}': {count} value(s) padded or truncated to 12 characters")
        }
        Correction::MissingNumeric => format!("'{column}': {count} empty value(s) set to 0"),
        Correction::NonNumeric => format!("'{column}': {count} non-numeric value(s) set to 0"),
        Correction::Negative => format!("'{column}': {count} value(s) below 0 corrected to 0"),
        Correction::AboveSalesBound => format!(
            "'{column}': {count} value(s) above {MAX_SOLD_QTY} corrected to {MAX_SOLD_QTY}"
        ),
    }
}
