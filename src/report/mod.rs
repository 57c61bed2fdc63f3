//! Balance-sheet report view.
//!
//! Used by `balance-cli` to display what the proxy relays. The proxy
//! handler itself never parses the report; it forwards opaque JSON.

pub mod model;
pub mod table;

pub use model::{BalanceSheetDocument, Cell, Report, ReportError, Row};
pub use table::{render, table_lines, TableLine};
