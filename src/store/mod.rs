//! Raw table intake and the labelled structures extracted from it.
pub mod extract;
pub mod table;
pub mod types;

pub use extract::{ExtractedTable, TableExtractor};
pub use table::{Cell, RawTable};
pub use types::{ModelKind, Sectors, HOUSEHOLDS_LABEL};
