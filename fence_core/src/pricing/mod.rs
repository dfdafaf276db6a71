//! # Pricing
//!
//! Price table loading, row selection, and the fence cost calculation.
//!
//! - [`table`] - `PriceRow` / `PriceTable`, dependent option lists, exact-match selection
//! - [`loader`] - reading price tables from `.xlsx`/`.xls`/`.ods`/`.csv`
//! - [`calculator`] - `FenceInput` → itemized `CostBreakdown`

pub mod calculator;
pub mod loader;
pub mod table;

// Re-export commonly used types
pub use calculator::{calculate, calculate_from_table, CostBreakdown, FenceInput, LineItem, LineItemKind};
pub use loader::load_price_table;
pub use table::{PriceField, PriceRow, PriceTable, ProfileOptions, KEY_COLUMNS};
