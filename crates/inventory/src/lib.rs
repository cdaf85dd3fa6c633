//! Inventory snapshot model.
//!
//! Turns loosely-typed spreadsheet rows into canonical, strongly-typed
//! [`InventoryRecord`]s. Nothing downstream ever sees a raw row.

pub mod preprocess;
pub mod raw;
pub mod record;

pub use preprocess::{Correction, PreprocessReport, Preprocessed, preprocess};
pub use raw::{Column, RawTable};
pub use record::{GroupKey, InventoryRecord, MAX_SOLD_QTY, RecordKey, RpType};
