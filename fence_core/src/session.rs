//! # Calculator Session
//!
//! The only state in the application: the currently loaded price table and
//! the most recent calculation (kept for export). Each operation either
//! succeeds and replaces the relevant piece of state, or fails and leaves
//! everything exactly as it was.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fence_core::input::FormInput;
//! use fence_core::session::CalculatorSession;
//! use std::path::Path;
//!
//! let mut session = CalculatorSession::new();
//! session.load_prices(Path::new("prices.xlsx"))?;
//!
//! let mut form = FormInput::default();
//! form.metal_type = "Steel".to_string();
//! form.profile_height = "20".to_string();
//! form.thickness = "0.45".to_string();
//!
//! let calculation = session.calculate(&form)?;
//! println!("Total: {:.2}", calculation.breakdown.total);
//!
//! session.save_results(Path::new("result.xlsx"), "руб.")?;
//! # Ok::<(), fence_core::errors::CalcError>(())
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::display::yes_no;
use crate::errors::{CalcError, CalcResult};
use crate::export;
use crate::input::FormInput;
use crate::pricing::{calculate_from_table, load_price_table, CostBreakdown, FenceInput, PriceRow, PriceTable};

/// A completed calculation, retained for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub input: FenceInput,
    /// The price row the breakdown was computed from
    pub price_row: PriceRow,
    pub breakdown: CostBreakdown,
    pub calculated_at: DateTime<Utc>,
}

impl Calculation {
    /// Input parameters as (name, value) pairs for reports
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        let input = &self.input;
        vec![
            ("Length", format!("{} m", input.length_m)),
            ("Height", format!("{} m", input.height_m)),
            ("Posts", input.posts.to_string()),
            ("Post depth", format!("{} m", input.post_depth_m)),
            ("Metal type", input.metal_type.clone()),
            ("Profile height", format!("{} mm", input.profile_height_mm)),
            ("Metal thickness", format!("{} mm", input.thickness_mm)),
            ("Coating", yes_no(input.coating).to_string()),
            ("Gates", input.gates.to_string()),
            ("Doors", input.doors.to_string()),
            ("Foundation", yes_no(input.foundation).to_string()),
            ("Delivery distance", format!("{} km", input.delivery_distance_km)),
            (
                "Calculated at",
                self.calculated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            ),
        ]
    }
}

/// Loaded price table plus last result.
#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    table: Option<PriceTable>,
    last: Option<Calculation>,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently loaded price table
    pub fn price_table(&self) -> Option<&PriceTable> {
        self.table.as_ref()
    }

    /// Most recent successful calculation
    pub fn last_calculation(&self) -> Option<&Calculation> {
        self.last.as_ref()
    }

    /// Load a price file, replacing the current table on success.
    ///
    /// On failure the previously loaded table stays in place.
    pub fn load_prices(&mut self, path: &Path) -> CalcResult<&PriceTable> {
        match load_price_table(path) {
            Ok(table) => {
                let loaded: &PriceTable = self.table.insert(table);
                Ok(loaded)
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    code = e.error_code(),
                    data_error = e.is_data_error(),
                    error = %e,
                    "Price load failed"
                );
                Err(e)
            }
        }
    }

    /// Replace the price table with one built in memory
    pub fn set_price_table(&mut self, table: PriceTable) {
        self.table = Some(table);
    }

    /// Parse the form and calculate, replacing the last result on success.
    ///
    /// # Errors
    ///
    /// * `CalcError::NoPriceTable` - nothing loaded yet
    /// * `CalcError::InvalidInput` - a form field is not a valid number
    /// * `CalcError::ConfigNotFound` - no row for the selected key
    /// * `CalcError::MissingField` - gates/doors requested without a price
    pub fn calculate(&mut self, form: &FormInput) -> CalcResult<&Calculation> {
        let result = form.parse().and_then(|input| self.compute(input));
        self.commit(result)
    }

    /// Export the last calculation to a workbook.
    ///
    /// # Errors
    ///
    /// * `CalcError::NoResult` - nothing has been calculated yet
    /// * `CalcError::FileError` - the workbook could not be written
    pub fn save_results(&self, path: &Path, currency: &str) -> CalcResult<()> {
        let calculation = self.last.as_ref().ok_or(CalcError::NoResult)?;
        export::save_workbook(calculation, path, currency).inspect_err(|e| {
            warn!(path = %path.display(), code = e.error_code(), error = %e, "Export failed");
        })
    }

    fn compute(&self, input: FenceInput) -> CalcResult<Calculation> {
        let table = self.table.as_ref().ok_or(CalcError::NoPriceTable)?;
        let (price_row, breakdown) = calculate_from_table(table, &input)?;
        Ok(Calculation {
            input,
            price_row,
            breakdown,
            calculated_at: Utc::now(),
        })
    }

    fn commit(&mut self, result: CalcResult<Calculation>) -> CalcResult<&Calculation> {
        match result {
            Ok(calculation) => {
                info!(
                    metal_type = %calculation.input.metal_type,
                    profile_height = calculation.input.profile_height_mm,
                    thickness = calculation.input.thickness_mm,
                    items = calculation.breakdown.items.len(),
                    total = calculation.breakdown.total,
                    "Calculation complete"
                );
                let stored: &Calculation = self.last.insert(calculation);
                Ok(stored)
            }
            Err(e) => {
                warn!(code = e.error_code(), error = %e, "Calculation failed");
                Err(e)
            }
        }
    }
}
