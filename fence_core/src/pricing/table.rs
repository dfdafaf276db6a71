//! # Price Table
//!
//! In-memory price list keyed by (metal type, profile height, thickness).
//!
//! Rows are kept in file order. Uniqueness of the key is not enforced:
//! [`PriceTable::select`] returns the first row whose key matches exactly.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::pricing::{PriceField, PriceRow, PriceTable};
//!
//! let table = PriceTable::from_rows(vec![
//!     PriceRow::new("steel", 20.0, 0.45, 500.0).with_price(PriceField::Post, 300.0),
//!     PriceRow::new("steel", 20.0, 0.5, 560.0),
//! ]);
//!
//! let row = table.select("steel", 20.0, 0.5).unwrap();
//! assert_eq!(row.base_price, 560.0);
//! assert_eq!(table.thicknesses("steel"), vec![0.45, 0.5]);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Key columns every price table must have.
pub const KEY_COLUMNS: [&str; 3] = ["metal_type", "profile_height", "thickness"];

/// Per-unit price columns.
///
/// `Base` is required; every other field may be absent for a given row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceField {
    /// Sheet material per m² of fence
    Base,
    /// Polymer coating per m² of fence
    Coating,
    /// Per post
    Post,
    /// Per metre of post depth, per post
    PostDepth,
    /// Per gate
    Gate,
    /// Per door (wicket)
    Door,
    /// Foundation fill per linear metre
    Foundation,
    /// Delivery per km
    DeliveryPerKm,
}

impl PriceField {
    /// All price fields in column order
    pub const ALL: [PriceField; 8] = [
        PriceField::Base,
        PriceField::Coating,
        PriceField::Post,
        PriceField::PostDepth,
        PriceField::Gate,
        PriceField::Door,
        PriceField::Foundation,
        PriceField::DeliveryPerKm,
    ];

    /// Column header used in price files
    pub fn column(&self) -> &'static str {
        match self {
            PriceField::Base => "base_price",
            PriceField::Coating => "coating_price",
            PriceField::Post => "post_price",
            PriceField::PostDepth => "post_depth_price",
            PriceField::Gate => "gate_price",
            PriceField::Door => "door_price",
            PriceField::Foundation => "foundation_price",
            PriceField::DeliveryPerKm => "delivery_price_per_km",
        }
    }

    /// Whether a price file without this column is rejected
    pub fn is_required(&self) -> bool {
        matches!(self, PriceField::Base)
    }
}

/// One configuration's full set of per-unit prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub metal_type: String,
    /// Profile (corrugation) height in mm
    pub profile_height: f64,
    /// Sheet thickness in mm
    pub thickness: f64,
    pub base_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coating_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_depth_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foundation_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_price_per_km: Option<f64>,
}

impl PriceRow {
    /// Create a row with only the base price set
    pub fn new(metal_type: impl Into<String>, profile_height: f64, thickness: f64, base_price: f64) -> Self {
        PriceRow {
            metal_type: metal_type.into(),
            profile_height,
            thickness,
            base_price,
            coating_price: None,
            post_price: None,
            post_depth_price: None,
            gate_price: None,
            door_price: None,
            foundation_price: None,
            delivery_price_per_km: None,
        }
    }

    /// Builder-style setter for any price field
    pub fn with_price(mut self, field: PriceField, value: f64) -> Self {
        self.set_price(field, Some(value));
        self
    }

    /// Get a price field, `None` if the row does not define it
    pub fn price(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::Base => Some(self.base_price),
            PriceField::Coating => self.coating_price,
            PriceField::Post => self.post_price,
            PriceField::PostDepth => self.post_depth_price,
            PriceField::Gate => self.gate_price,
            PriceField::Door => self.door_price,
            PriceField::Foundation => self.foundation_price,
            PriceField::DeliveryPerKm => self.delivery_price_per_km,
        }
    }

    /// Set a price field. Setting `Base` to `None` is ignored.
    pub fn set_price(&mut self, field: PriceField, value: Option<f64>) {
        match field {
            PriceField::Base => {
                if let Some(v) = value {
                    self.base_price = v;
                }
            }
            PriceField::Coating => self.coating_price = value,
            PriceField::Post => self.post_price = value,
            PriceField::PostDepth => self.post_depth_price = value,
            PriceField::Gate => self.gate_price = value,
            PriceField::Door => self.door_price = value,
            PriceField::Foundation => self.foundation_price = value,
            PriceField::DeliveryPerKm => self.delivery_price_per_km = value,
        }
    }

    /// Exact key comparison, no numeric tolerance
    pub fn matches(&self, metal_type: &str, profile_height: f64, thickness: f64) -> bool {
        self.metal_type == metal_type
            && self.profile_height == profile_height
            && self.thickness == thickness
    }
}

/// Profile heights and thicknesses available for one metal type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileOptions {
    pub profile_heights: Vec<f64>,
    pub thicknesses: Vec<f64>,
}

/// The loaded price list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    /// File the table was read from, if any
    source: Option<PathBuf>,
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Build a table from rows already in memory
    pub fn from_rows(rows: Vec<PriceRow>) -> Self {
        PriceTable { source: None, rows }
    }

    pub(crate) fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    /// Path of the file this table was loaded from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// File name of the source, for status lines
    pub fn source_name(&self) -> Option<String> {
        self.source
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct metal types in order of first appearance
    pub fn metal_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for row in &self.rows {
            if !types.iter().any(|t| t == &row.metal_type) {
                types.push(row.metal_type.clone());
            }
        }
        types
    }

    /// Distinct profile heights offered for a metal type, ascending
    pub fn profile_heights(&self, metal_type: &str) -> Vec<f64> {
        self.distinct_for(metal_type, |row| row.profile_height)
    }

    /// Distinct thicknesses offered for a metal type, ascending
    ///
    /// Filtered by metal type only, independently of profile height.
    pub fn thicknesses(&self, metal_type: &str) -> Vec<f64> {
        self.distinct_for(metal_type, |row| row.thickness)
    }

    /// Both dependent option lists for a metal type
    pub fn options(&self, metal_type: &str) -> ProfileOptions {
        ProfileOptions {
            profile_heights: self.profile_heights(metal_type),
            thicknesses: self.thicknesses(metal_type),
        }
    }

    /// Select the first row matching the key exactly.
    ///
    /// # Errors
    ///
    /// `CalcError::ConfigNotFound` if no row matches.
    pub fn select(&self, metal_type: &str, profile_height: f64, thickness: f64) -> CalcResult<&PriceRow> {
        self.rows
            .iter()
            .find(|row| row.matches(metal_type, profile_height, thickness))
            .ok_or_else(|| CalcError::config_not_found(metal_type, profile_height, thickness))
    }

    fn distinct_for(&self, metal_type: &str, value: impl Fn(&PriceRow) -> f64) -> Vec<f64> {
        let mut values: Vec<f64> = self
            .rows
            .iter()
            .filter(|row| row.metal_type == metal_type)
            .map(value)
            .collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> PriceTable {
        PriceTable::from_rows(vec![
            PriceRow::new("Zinc", 20.0, 0.5, 520.0),
            PriceRow::new("Steel", 21.0, 0.45, 500.0).with_price(PriceField::Post, 300.0),
            PriceRow::new("Steel", 8.0, 0.5, 450.0),
            PriceRow::new("Steel", 21.0, 0.45, 999.0),
            PriceRow::new("Zinc", 20.0, 0.4, 480.0),
        ])
    }

    #[test]
    fn test_metal_types_in_first_appearance_order() {
        assert_eq!(sample_table().metal_types(), vec!["Zinc", "Steel"]);
    }

    #[test]
    fn test_dependent_options_sorted_and_distinct() {
        let table = sample_table();
        assert_eq!(table.profile_heights("Steel"), vec![8.0, 21.0]);
        assert_eq!(table.thicknesses("Steel"), vec![0.45, 0.5]);
        assert_eq!(table.thicknesses("Zinc"), vec![0.4, 0.5]);
        assert!(table.profile_heights("Copper").is_empty());
    }

    #[test]
    fn test_select_first_match_wins() {
        let table = sample_table();
        let row = table.select("Steel", 21.0, 0.45).unwrap();
        assert_eq!(row.base_price, 500.0);
        assert_eq!(row.post_price, Some(300.0));
    }

    #[test]
    fn test_select_missing_combination() {
        let table = sample_table();
        // 8 mm and 0.45 mm are both offered for Steel, but not together
        let err = table.select("Steel", 8.0, 0.45).unwrap_err();
        assert_eq!(err, CalcError::config_not_found("Steel", 8.0, 0.45));
    }

    #[test]
    fn test_select_is_exact() {
        let table = sample_table();
        assert!(table.select("steel", 21.0, 0.45).is_err());
        assert!(table.select("Steel", 21.0, 0.450001).is_err());
    }

    #[test]
    fn test_price_field_accessors() {
        let mut row = PriceRow::new("Steel", 20.0, 0.5, 500.0);
        assert_eq!(row.price(PriceField::Base), Some(500.0));
        assert_eq!(row.price(PriceField::Gate), None);

        row.set_price(PriceField::Gate, Some(15000.0));
        assert_eq!(row.gate_price, Some(15000.0));

        row.set_price(PriceField::Base, None);
        assert_eq!(row.base_price, 500.0);
    }

    #[test]
    fn test_row_json_omits_absent_prices() {
        let row = PriceRow::new("Steel", 20.0, 0.5, 500.0).with_price(PriceField::Coating, 50.0);
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("coating_price"));
        assert!(!json.contains("gate_price"));
    }
}
