//! UI module for the fence calculator
//!
//! # Panel Structure
//! - `toolbar` - Header and actions (Load prices, Calculate, Save results)
//! - `input_panel` - Left panel: fence dimensions, price selection, options
//! - `results_panel` - Right panel: total and line items, or the last error
//! - `status_bar` - Bottom status messages

pub mod toolbar;
pub mod input_panel;
pub mod results_panel;
pub mod status_bar;
