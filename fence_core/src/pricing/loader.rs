//! # Price Table Loader
//!
//! Reads a price list from a spreadsheet (`.xlsx`, `.xlsm`, `.xls`, `.ods`
//! via calamine) or a `.csv` file. The first row is the header; columns are
//! matched by name, case-insensitively, and unknown columns are ignored.
//!
//! Required columns: `metal_type`, `profile_height`, `thickness`, `base_price`.
//! Optional columns: `coating_price`, `post_price`, `post_depth_price`,
//! `gate_price`, `door_price`, `foundation_price`, `delivery_price_per_km`.
//! An empty optional cell means the row does not define that price.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use super::table::{PriceField, PriceRow, PriceTable, KEY_COLUMNS};
use crate::errors::{CalcError, CalcResult};
use crate::input::parse_decimal;

/// A single cell, normalized across file formats
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::from_text(s),
            other => Cell::from_text(&other.to_string()),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Number(_) | Cell::Empty => None,
            Cell::Text(s) => parse_decimal(s),
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(n.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

/// Header plus data rows, each tagged with its 1-based sheet row
struct Grid {
    header_row: usize,
    header: Vec<String>,
    rows: Vec<(usize, Vec<Cell>)>,
}

/// Load a price table from a file, choosing the reader by extension.
///
/// # Errors
///
/// * `CalcError::FileError` - file missing, unreadable, or unsupported type
/// * `CalcError::MissingColumn` - a required column is absent
/// * `CalcError::InvalidData` - a cell cannot be interpreted, or no data rows
///
/// # Example
///
/// ```rust,no_run
/// use fence_core::pricing::load_price_table;
/// use std::path::Path;
///
/// let table = load_price_table(Path::new("prices.xlsx"))?;
/// println!("{} rows, metals: {:?}", table.len(), table.metal_types());
/// # Ok::<(), fence_core::errors::CalcError>(())
/// ```
pub fn load_price_table(path: &Path) -> CalcResult<PriceTable> {
    if !path.is_file() {
        return Err(CalcError::file_error(
            "open",
            path.display().to_string(),
            "file not found",
        ));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let grid = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        other => {
            return Err(CalcError::file_error(
                "open",
                path.display().to_string(),
                format!("unsupported file type '{}' (expected .xlsx, .xls, .ods or .csv)", other),
            ))
        }
    };

    let table = parse_grid(&path.display().to_string(), grid)?.with_source(path);

    info!(
        path = %path.display(),
        rows = table.len(),
        metal_types = table.metal_types().len(),
        "Loaded price table"
    );

    Ok(table)
}

fn read_workbook(path: &Path) -> CalcResult<Grid> {
    let path_str = path.display().to_string();

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| CalcError::file_error("open workbook", path_str.clone(), e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CalcError::file_error("read workbook", path_str.clone(), "workbook has no sheets"))?;

    debug!(sheet = %sheet_name, "Reading price sheet");

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| CalcError::file_error("read sheet", path_str.clone(), e.to_string()))?;

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows();

    let header = rows
        .next()
        .map(|cells| {
            cells
                .iter()
                .map(|c| Cell::from_data(c).as_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    // calamine keeps empty rows inside the range, so the offset is the sheet row
    let header_row = first_row + 1;
    Ok(Grid {
        header_row,
        header,
        rows: rows
            .enumerate()
            .map(|(offset, cells)| (header_row + 1 + offset, cells.iter().map(Cell::from_data).collect()))
            .collect(),
    })
}

fn read_csv(path: &Path) -> CalcResult<Grid> {
    let path_str = path.display().to_string();

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| CalcError::file_error("open", path_str.clone(), e.to_string()))?;

    let header = reader
        .headers()
        .map_err(|e| CalcError::file_error("read header", path_str.clone(), e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    // Blank lines never become records, so take the line from the record itself
    let mut rows = Vec::new();
    for (offset, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CalcError::file_error("read", path_str.clone(), e.to_string()))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(2 + offset);
        rows.push((line, record.iter().map(Cell::from_text).collect()));
    }

    Ok(Grid {
        header_row: 1,
        header,
        rows,
    })
}

fn normalize_header(name: &str) -> String {
    name.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_ascii_lowercase()
}

fn parse_grid(path: &str, grid: Grid) -> CalcResult<PriceTable> {
    let mut columns: HashMap<String, usize> = HashMap::new();
    for (index, name) in grid.header.iter().enumerate() {
        columns.entry(normalize_header(name)).or_insert(index);
    }

    let required = |column: &str| {
        columns
            .get(column)
            .copied()
            .ok_or_else(|| CalcError::missing_column(column, path))
    };

    let metal_col = required(KEY_COLUMNS[0])?;
    let height_col = required(KEY_COLUMNS[1])?;
    let thickness_col = required(KEY_COLUMNS[2])?;
    let base_col = required(PriceField::Base.column())?;

    let optional_cols: Vec<(PriceField, usize)> = PriceField::ALL
        .iter()
        .filter(|field| !field.is_required())
        .filter_map(|field| columns.get(field.column()).map(|&index| (*field, index)))
        .collect();

    let mut rows = Vec::with_capacity(grid.rows.len());

    for &(sheet_row, ref cells) in &grid.rows {
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        let cell = |index: usize| cells.get(index).unwrap_or(&EMPTY_CELL);

        let metal_type = cell(metal_col).as_text().ok_or_else(|| {
            CalcError::invalid_data(path, sheet_row, KEY_COLUMNS[0], "value is required")
        })?;
        let profile_height = required_number(path, sheet_row, KEY_COLUMNS[1], cell(height_col))?;
        let thickness = required_number(path, sheet_row, KEY_COLUMNS[2], cell(thickness_col))?;
        let base_price = required_number(path, sheet_row, PriceField::Base.column(), cell(base_col))?;

        let mut row = PriceRow::new(metal_type, profile_height, thickness, base_price);
        for &(field, index) in &optional_cols {
            let value = cell(index);
            if value.is_empty() {
                continue;
            }
            let number = value.as_number().ok_or_else(|| {
                CalcError::invalid_data(path, sheet_row, field.column(), "not a number")
            })?;
            row.set_price(field, Some(number));
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(CalcError::invalid_data(
            path,
            grid.header_row + 1,
            KEY_COLUMNS[0],
            "price table has no data rows",
        ));
    }

    Ok(PriceTable::from_rows(rows))
}

fn required_number(path: &str, sheet_row: usize, column: &str, cell: &Cell) -> CalcResult<f64> {
    if cell.is_empty() {
        return Err(CalcError::invalid_data(path, sheet_row, column, "value is required"));
    }
    cell.as_number()
        .ok_or_else(|| CalcError::invalid_data(path, sheet_row, column, "not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::env::temp_dir;
    use std::fs;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = temp_dir().join(format!("fence_calc_loader_{}", name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_csv_with_optional_columns() {
        let path = temp_file(
            "optional.csv",
            "metal_type,profile_height,thickness,base_price,post_price,gate_price\n\
             Steel,20,0.45,500,300,\n\
             Steel,20,\"0,5\",560,320,15000\n",
        );

        let table = load_price_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.source(), Some(path.as_path()));

        let first = table.select("Steel", 20.0, 0.45).unwrap();
        assert_eq!(first.post_price, Some(300.0));
        assert_eq!(first.gate_price, None);
        assert_eq!(first.coating_price, None);

        let second = table.select("Steel", 20.0, 0.5).unwrap();
        assert_eq!(second.gate_price, Some(15000.0));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_headers_are_case_insensitive_and_unknown_columns_ignored() {
        let path = temp_file(
            "headers.csv",
            " Metal_Type ,PROFILE_HEIGHT,Thickness,Base_Price,Comment\n\
             Zinc,8,0.4,410,cheap\n",
        );

        let table = load_price_table(&path).unwrap();
        assert_eq!(table.metal_types(), vec!["Zinc"]);
        assert_eq!(table.rows()[0].base_price, 410.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_required_column() {
        let path = temp_file(
            "missing_column.csv",
            "metal_type,profile_height,thickness\nSteel,20,0.45\n",
        );

        let err = load_price_table(&path).unwrap_err();
        assert!(matches!(err, CalcError::MissingColumn { ref column, .. } if column == "base_price"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_cell_reports_sheet_row() {
        let path = temp_file(
            "invalid_cell.csv",
            "metal_type,profile_height,thickness,base_price\n\
             Steel,20,0.45,500\n\
             Steel,twenty,0.5,560\n",
        );

        let err = load_price_table(&path).unwrap_err();
        match err {
            CalcError::InvalidData { row, column, .. } => {
                assert_eq!(row, 3);
                assert_eq!(column, "profile_height");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_csv_blank_lines_skipped_and_rows_counted_from_file() {
        let path = temp_file(
            "blank_lines.csv",
            "metal_type,profile_height,thickness,base_price,gate_price\n\
             \n\
             ,,,,\n\
             Steel,20,0.45,500,abc\n",
        );

        let err = load_price_table(&path).unwrap_err();
        match err {
            CalcError::InvalidData { row, column, .. } => {
                assert_eq!(row, 4);
                assert_eq!(column, "gate_price");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_csv_blank_rows_between_data() {
        let path = temp_file(
            "blank_between.csv",
            "metal_type,profile_height,thickness,base_price\n\
             Steel,20,0.45,500\n\
             \n\
             ,,,\n\
             Zinc,8,0.4,410\n",
        );

        let table = load_price_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.metal_types(), vec!["Steel", "Zinc"]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unparsable_optional_cell() {
        let path = temp_file(
            "bad_optional.csv",
            "metal_type,profile_height,thickness,base_price,coating_price\n\
             Steel,20,0.45,500,eighty\n",
        );

        let err = load_price_table(&path).unwrap_err();
        assert!(err.is_data_error());
        match err {
            CalcError::InvalidData { row, column, reason, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "coating_price");
                assert_eq!(reason, "not a number");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_table_rejected() {
        let path = temp_file("empty.csv", "metal_type,profile_height,thickness,base_price\n");
        let err = load_price_table(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DATA");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_and_unsupported_extension() {
        let missing = temp_dir().join("fence_calc_loader_does_not_exist.xlsx");
        assert_eq!(load_price_table(&missing).unwrap_err().error_code(), "FILE_ERROR");

        let path = temp_file("prices.txt", "metal_type\n");
        assert_eq!(load_price_table(&path).unwrap_err().error_code(), "FILE_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_xlsx() {
        let path = temp_dir().join("fence_calc_loader_prices.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let header = [
            "metal_type",
            "profile_height",
            "thickness",
            "base_price",
            "coating_price",
            "delivery_price_per_km",
        ];
        for (col, name) in header.iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        sheet.write_string(1, 0, "Steel").unwrap();
        sheet.write_number(1, 1, 20.0).unwrap();
        sheet.write_number(1, 2, 0.45).unwrap();
        sheet.write_number(1, 3, 500.0).unwrap();
        sheet.write_number(1, 4, 80.0).unwrap();
        sheet.write_number(1, 5, 45.0).unwrap();
        // Numeric metal type
        sheet.write_number(2, 0, 3.0).unwrap();
        sheet.write_number(2, 1, 10.0).unwrap();
        sheet.write_number(2, 2, 0.5).unwrap();
        sheet.write_number(2, 3, 420.0).unwrap();
        workbook.save(&path).unwrap();

        let table = load_price_table(&path).unwrap();
        assert_eq!(table.metal_types(), vec!["Steel", "3"]);

        let steel = table.select("Steel", 20.0, 0.45).unwrap();
        assert_eq!(steel.coating_price, Some(80.0));
        assert_eq!(steel.delivery_price_per_km, Some(45.0));

        let numeric = table.select("3", 10.0, 0.5).unwrap();
        assert_eq!(numeric.coating_price, None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_xlsx_blank_row_skipped_and_rows_counted_from_sheet() {
        let path = temp_dir().join("fence_calc_loader_blank_row.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in ["metal_type", "profile_height", "thickness", "base_price"].iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        sheet.write_string(1, 0, "Steel").unwrap();
        sheet.write_number(1, 1, 20.0).unwrap();
        sheet.write_number(1, 2, 0.45).unwrap();
        sheet.write_number(1, 3, 500.0).unwrap();
        // Sheet row 3 left empty
        sheet.write_string(3, 0, "Zinc").unwrap();
        sheet.write_number(3, 1, 8.0).unwrap();
        sheet.write_number(3, 2, 0.4).unwrap();
        sheet.write_number(3, 3, 410.0).unwrap();
        workbook.save(&path).unwrap();

        let table = load_price_table(&path).unwrap();
        assert_eq!(table.metal_types(), vec!["Steel", "Zinc"]);

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in ["metal_type", "profile_height", "thickness", "base_price"].iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        sheet.write_string(1, 0, "Steel").unwrap();
        sheet.write_number(1, 1, 20.0).unwrap();
        sheet.write_number(1, 2, 0.45).unwrap();
        sheet.write_number(1, 3, 500.0).unwrap();
        sheet.write_string(3, 0, "Zinc").unwrap();
        sheet.write_number(3, 1, 8.0).unwrap();
        sheet.write_number(3, 2, 0.4).unwrap();
        sheet.write_string(3, 3, "n/a").unwrap();
        workbook.save(&path).unwrap();

        match load_price_table(&path).unwrap_err() {
            CalcError::InvalidData { row, column, .. } => {
                assert_eq!(row, 4);
                assert_eq!(column, "base_price");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let _ = fs::remove_file(&path);
    }
}
