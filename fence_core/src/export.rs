//! # Spreadsheet Export
//!
//! Writes a [`Calculation`] to an `.xlsx` workbook with three sheets:
//!
//! - **Breakdown** - one row per line item plus a `TOTAL` row
//! - **Parameters** - the inputs the calculation was run with
//! - **Total** - a single formatted total-cost cell
//!
//! The workbook is built in memory and written with [`write_atomic`], so a
//! failed save leaves no partial file behind.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use crate::display::format_money;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::write_atomic;
use crate::session::Calculation;

pub const BREAKDOWN_SHEET: &str = "Breakdown";
pub const PARAMETERS_SHEET: &str = "Parameters";
pub const TOTAL_SHEET: &str = "Total";

/// Label of the closing row on the breakdown sheet
pub const TOTAL_ROW_LABEL: &str = "TOTAL";

const MONEY_FORMAT: &str = "#,##0.00";

/// Build the workbook and return its bytes.
pub fn build_workbook(calculation: &Calculation, currency: &str) -> CalcResult<Vec<u8>> {
    build(calculation, currency).map_err(|e| CalcError::file_error("build workbook", "<memory>", e.to_string()))
}

/// Build the workbook and write it to `path`.
///
/// # Errors
///
/// `CalcError::FileError` if the workbook cannot be built or written.
pub fn save_workbook(calculation: &Calculation, path: &Path, currency: &str) -> CalcResult<()> {
    let bytes = build_workbook(calculation, currency)?;
    write_atomic(path, &bytes)?;
    info!(path = %path.display(), total = calculation.breakdown.total, "Saved results workbook");
    Ok(())
}

fn build(calculation: &Calculation, currency: &str) -> Result<Vec<u8>, XlsxError> {
    let header = Format::new().set_bold();
    let money = Format::new().set_num_format(MONEY_FORMAT);
    let money_bold = Format::new().set_bold().set_num_format(MONEY_FORMAT);
    let cost_header = if currency.is_empty() {
        "Cost".to_string()
    } else {
        format!("Cost, {}", currency)
    };

    let mut workbook = Workbook::new();

    let breakdown = workbook.add_worksheet();
    breakdown.set_name(BREAKDOWN_SHEET)?;
    breakdown.write_string_with_format(0, 0, "Component", &header)?;
    breakdown.write_string_with_format(0, 1, cost_header.as_str(), &header)?;
    breakdown.write_string_with_format(0, 2, "Note", &header)?;

    let mut row: u32 = 1;
    for item in &calculation.breakdown.items {
        breakdown.write_string(row, 0, item.label.as_str())?;
        breakdown.write_number_with_format(row, 1, item.cost, &money)?;
        breakdown.write_string(row, 2, item.detail.as_str())?;
        row += 1;
    }
    breakdown.write_string_with_format(row, 0, TOTAL_ROW_LABEL, &header)?;
    breakdown.write_number_with_format(row, 1, calculation.breakdown.total, &money_bold)?;
    breakdown.set_column_width(0, 18)?;
    breakdown.set_column_width(1, 16)?;
    breakdown.set_column_width(2, 48)?;

    let parameters = workbook.add_worksheet();
    parameters.set_name(PARAMETERS_SHEET)?;
    parameters.write_string_with_format(0, 0, "Parameter", &header)?;
    parameters.write_string_with_format(0, 1, "Value", &header)?;
    for (index, (name, value)) in calculation.parameters().iter().enumerate() {
        let row = index as u32 + 1;
        parameters.write_string(row, 0, *name)?;
        parameters.write_string(row, 1, value.as_str())?;
    }
    parameters.set_column_width(0, 20)?;
    parameters.set_column_width(1, 24)?;

    let total = workbook.add_worksheet();
    total.set_name(TOTAL_SHEET)?;
    total.write_string_with_format(0, 0, "Total cost", &header)?;
    total.write_string(1, 0, format_money(calculation.breakdown.total, currency))?;
    total.set_column_width(0, 24)?;

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{calculate, FenceInput, PriceField, PriceRow};
    use calamine::{open_workbook_auto, Data, Reader};
    use chrono::Utc;
    use std::env::temp_dir;
    use std::fs;

    fn sample_calculation() -> Calculation {
        let row = PriceRow::new("Steel", 20.0, 0.45, 500.0)
            .with_price(PriceField::Post, 300.0)
            .with_price(PriceField::Coating, 75.5);
        let input = FenceInput {
            length_m: 10.0,
            height_m: 1.8,
            posts: 10,
            coating: true,
            ..FenceInput::new("Steel", 20.0, 0.45)
        };
        let breakdown = calculate(&input, &row).unwrap();
        Calculation {
            input,
            price_row: row,
            breakdown,
            calculated_at: Utc::now(),
        }
    }

    #[test]
    fn test_workbook_sheets_and_contents() {
        let calculation = sample_calculation();
        let path = temp_dir().join("fence_calc_export_test.xlsx");
        save_workbook(&calculation, &path, "руб.").unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(
            workbook.sheet_names().to_vec(),
            vec![BREAKDOWN_SHEET, PARAMETERS_SHEET, TOTAL_SHEET]
        );

        let breakdown = workbook.worksheet_range(BREAKDOWN_SHEET).unwrap();
        // header + 3 items (material, coating, posts) + total
        assert_eq!(breakdown.height(), 5);
        assert_eq!(breakdown.get_value((1, 0)), Some(&Data::String("Material".to_string())));
        assert_eq!(breakdown.get_value((1, 1)), Some(&Data::Float(9000.0)));
        assert_eq!(
            breakdown.get_value((4, 0)),
            Some(&Data::String(TOTAL_ROW_LABEL.to_string()))
        );
        assert_eq!(
            breakdown.get_value((4, 1)),
            Some(&Data::Float(calculation.breakdown.total))
        );

        let parameters = workbook.worksheet_range(PARAMETERS_SHEET).unwrap();
        assert_eq!(parameters.get_value((1, 1)), Some(&Data::String("10 m".to_string())));

        let total = workbook.worksheet_range(TOTAL_SHEET).unwrap();
        assert_eq!(
            total.get_value((1, 0)),
            Some(&Data::String("13,359.00 руб.".to_string()))
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_build_workbook_in_memory() {
        let bytes = build_workbook(&sample_calculation(), "").unwrap();
        // xlsx is a zip archive
        assert_eq!(&bytes[..2], b"PK");
    }
}
