//! Page component renderers
//!
//! Each renderer writes into a `Document` target and returns what it did,
//! including any rows it had to skip. None of them log or fail the page.
//!
//! # Components
//! - `table.rs`: record tables with optional row numbering
//! - `dropdown.rs`: ticker `<select>` options
//! - `flash.rs`: auto-dismissing alerts
//! - `popup.rs`: confirmation and action modals
//! - `chart.rs`: line, candlestick, performance and pie figures

pub mod chart;
pub mod dropdown;
pub mod flash;
pub mod popup;
pub mod table;

pub use chart::{ChartTheme, Figure};
pub use dropdown::{DropdownOptions, DropdownReport, populate_dropdown, populate_dropdown_with};
pub use flash::{FlashLevel, FlashMessage, flash_message};
pub use table::{TableOptions, TableReport, render_table};
