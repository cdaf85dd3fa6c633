//! Untyped tabular input, as handed over by whatever read the spreadsheet.

use serde::{Deserialize, Serialize};

/// Mandatory columns of an inventory snapshot, identified by their header text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    Article,
    ArticleDescription,
    RpType,
    Site,
    Om,
    Moq,
    NetStock,
    PendingReceived,
    SafetyStock,
    LastMonthSoldQty,
    MtdSoldQty,
}

impl Column {
    /// Every column the preprocessor requires, in report order.
    pub const MANDATORY: [Column; 11] = [
        Column::Article,
        Column::ArticleDescription,
        Column::RpType,
        Column::Site,
        Column::Om,
        Column::Moq,
        Column::NetStock,
        Column::PendingReceived,
        Column::SafetyStock,
        Column::LastMonthSoldQty,
        Column::MtdSoldQty,
    ];

    /// Header text as it appears in the exported sheet.
    pub fn header(self) -> &'static str {
        match self {
            Column::Article => "Article",
            Column::ArticleDescription => "Article Description",
            Column::RpType => "RP Type",
            Column::Site => "Site",
            Column::Om => "OM",
            Column::Moq => "MOQ",
            Column::NetStock => "SaSa Net Stock",
            Column::PendingReceived => "Pending Received",
            Column::SafetyStock => "Safety Stock",
            Column::LastMonthSoldQty => "Last Month Sold Qty",
            Column::MtdSoldQty => "MTD Sold Qty",
        }
    }

    /// Sales columns are clamped to an upper bound as well as to zero.
    pub fn is_sales(self) -> bool {
        matches!(self, Column::LastMonthSoldQty | Column::MtdSoldQty)
    }
}

impl core::fmt::Display for Column {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.header())
    }
}

/// A header row plus data rows of optional text cells.
///
/// Rows shorter than the header read as missing cells; extra cells are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(|h| h.into().trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Table whose header is exactly the mandatory column set.
    pub fn with_mandatory_headers() -> Self {
        Self::new(Column::MANDATORY.iter().map(|c| c.header()))
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.rows
            .push(cells.into_iter().map(|c| c.map(Into::into)).collect());
    }

    /// Append a row where every cell is present.
    pub fn push_text_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells.into_iter().map(Some));
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the header, if present.
    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.headers.iter().position(|h| h == column.header())
    }

    /// Mandatory columns absent from the header, in report order.
    pub fn missing_columns(&self) -> Vec<Column> {
        Column::MANDATORY
            .into_iter()
            .filter(|c| self.column_index(*c).is_none())
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<String>]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
