//! # fence_core - Metal Fence Cost Engine
//!
//! `fence_core` prices a metal fence from its dimensions and a price table.
//! It selects the price row for the chosen (metal type, profile height,
//! thickness) and sums a fixed set of weighted line items (material, coating,
//! posts, post depth, gates, doors, foundation, delivery) into a total.
//!
//! ## Design Philosophy
//!
//! - **Stateless core**: [`pricing::calculate`] is a pure function of input and price row
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **All-or-nothing state**: [`session::CalculatorSession`] never keeps a half-applied change
//!
//! ## Quick Start
//!
//! ```rust
//! use fence_core::pricing::{calculate_from_table, FenceInput, PriceField, PriceRow, PriceTable};
//!
//! let table = PriceTable::from_rows(vec![
//!     PriceRow::new("Steel", 20.0, 0.45, 500.0).with_price(PriceField::Post, 300.0),
//! ]);
//!
//! let input = FenceInput {
//!     length_m: 10.0,
//!     height_m: 1.8,
//!     posts: 10,
//!     ..FenceInput::new("Steel", 20.0, 0.45)
//! };
//!
//! let (_row, breakdown) = calculate_from_table(&table, &input).unwrap();
//! assert_eq!(breakdown.total, 12000.0);
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Price tables, loading, row selection, cost calculation
//! - [`input`] - Form text parsing
//! - [`session`] - Loaded table and last result
//! - [`export`] - Results workbook
//! - [`file_io`] - Atomic file writes
//! - [`display`] - Money formatting
//! - [`config`] - Settings file and environment
//! - [`logging`] - Tracing subscriber setup
//! - [`errors`] - Structured error types

pub mod config;
pub mod display;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod input;
pub mod logging;
pub mod pricing;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use config::AppConfig;
pub use errors::{CalcError, CalcResult};
pub use input::FormInput;
pub use pricing::{CostBreakdown, FenceInput, LineItem, LineItemKind, PriceRow, PriceTable};
pub use session::{Calculation, CalculatorSession};
