//! # Fence Cost Calculation
//!
//! Pure function from a [`FenceInput`] and the matching [`PriceRow`] to an
//! itemized [`CostBreakdown`]. Line items are produced in a fixed order:
//!
//! | # | Item       | Cost                                   | Included when                         |
//! |---|------------|----------------------------------------|---------------------------------------|
//! | 1 | Material   | length × height × base_price           | always                                |
//! | 2 | Coating    | length × height × coating_price        | coating flag set and price present    |
//! | 3 | Posts      | posts × post_price                     | price present                         |
//! | 4 | Post depth | posts × post_depth × post_depth_price  | price present                         |
//! | 5 | Gates      | gates × gate_price                     | gates > 0 (price required)            |
//! | 6 | Doors      | doors × door_price                     | doors > 0 (price required)            |
//! | 7 | Foundation | length × foundation_price              | foundation flag set and price present |
//! | 8 | Delivery   | distance × delivery_price_per_km       | distance > 0 and price present        |
//!
//! The total is the plain sum of the listed items. Nothing is rounded here;
//! rounding to two decimals happens only when displaying or exporting.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::pricing::{calculate, FenceInput, LineItemKind, PriceField, PriceRow};
//!
//! let row = PriceRow::new("Steel", 20.0, 0.45, 500.0).with_price(PriceField::Post, 300.0);
//! let input = FenceInput {
//!     length_m: 10.0,
//!     height_m: 1.8,
//!     posts: 10,
//!     coating: false,
//!     foundation: false,
//!     ..FenceInput::new("Steel", 20.0, 0.45)
//! };
//!
//! let breakdown = calculate(&input, &row).unwrap();
//! assert_eq!(breakdown.cost_of(LineItemKind::Material), Some(9000.0));
//! assert_eq!(breakdown.cost_of(LineItemKind::Posts), Some(3000.0));
//! assert_eq!(breakdown.total, 12000.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::table::{PriceField, PriceRow, PriceTable};
use crate::errors::{CalcError, CalcResult};

/// Dimensions, quantities and options for one fence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceInput {
    /// Fence length in metres
    pub length_m: f64,
    /// Fence height in metres
    pub height_m: f64,
    /// Number of posts
    pub posts: u32,
    /// Post embedment depth in metres
    pub post_depth_m: f64,
    /// Number of gates
    pub gates: u32,
    /// Number of doors (wickets)
    pub doors: u32,
    /// Delivery distance in km
    pub delivery_distance_km: f64,
    pub metal_type: String,
    /// Profile height in mm
    pub profile_height_mm: f64,
    /// Sheet thickness in mm
    pub thickness_mm: f64,
    /// Add foundation fill along the fence line
    pub foundation: bool,
    /// Add polymer coating
    pub coating: bool,
}

impl FenceInput {
    /// Input for a price key with zero dimensions and both options off
    pub fn new(metal_type: impl Into<String>, profile_height_mm: f64, thickness_mm: f64) -> Self {
        FenceInput {
            length_m: 0.0,
            height_m: 0.0,
            posts: 0,
            post_depth_m: 0.0,
            gates: 0,
            doors: 0,
            delivery_distance_km: 0.0,
            metal_type: metal_type.into(),
            profile_height_mm,
            thickness_mm,
            foundation: false,
            coating: false,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let measures = [
            ("length_m", self.length_m),
            ("height_m", self.height_m),
            ("post_depth_m", self.post_depth_m),
            ("delivery_distance_km", self.delivery_distance_km),
        ];
        for (field, value) in measures {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Value must be a non-negative number",
                ));
            }
        }
        if self.metal_type.trim().is_empty() {
            return Err(CalcError::invalid_input("metal_type", "", "Metal type is required"));
        }
        Ok(())
    }

    /// Fence face area in m²
    pub fn area_m2(&self) -> f64 {
        self.length_m * self.height_m
    }
}

/// The cost categories, in breakdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItemKind {
    Material,
    Coating,
    Posts,
    PostDepth,
    Gates,
    Doors,
    Foundation,
    Delivery,
}

impl LineItemKind {
    /// All kinds in breakdown order
    pub const ALL: [LineItemKind; 8] = [
        LineItemKind::Material,
        LineItemKind::Coating,
        LineItemKind::Posts,
        LineItemKind::PostDepth,
        LineItemKind::Gates,
        LineItemKind::Doors,
        LineItemKind::Foundation,
        LineItemKind::Delivery,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LineItemKind::Material => "Material",
            LineItemKind::Coating => "Coating",
            LineItemKind::Posts => "Posts",
            LineItemKind::PostDepth => "Post depth",
            LineItemKind::Gates => "Gates",
            LineItemKind::Doors => "Doors",
            LineItemKind::Foundation => "Foundation",
            LineItemKind::Delivery => "Delivery",
        }
    }

    /// The price column this item is priced from
    pub fn price_field(&self) -> PriceField {
        match self {
            LineItemKind::Material => PriceField::Base,
            LineItemKind::Coating => PriceField::Coating,
            LineItemKind::Posts => PriceField::Post,
            LineItemKind::PostDepth => PriceField::PostDepth,
            LineItemKind::Gates => PriceField::Gate,
            LineItemKind::Doors => PriceField::Door,
            LineItemKind::Foundation => PriceField::Foundation,
            LineItemKind::Delivery => PriceField::DeliveryPerKm,
        }
    }
}

impl std::fmt::Display for LineItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One named cost component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub kind: LineItemKind,
    /// Short name, e.g. "Posts"
    pub label: String,
    /// Name with quantities, e.g. "Posts (10 pcs)"
    pub detail: String,
    pub cost: f64,
}

impl LineItem {
    fn new(kind: LineItemKind, detail: impl Into<String>, cost: f64) -> Self {
        LineItem {
            kind,
            label: kind.label().to_string(),
            detail: detail.into(),
            cost,
        }
    }
}

/// Itemized cost with total.
///
/// `total` is always the sum of `items` in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub items: Vec<LineItem>,
    pub total: f64,
}

impl CostBreakdown {
    fn from_items(items: Vec<LineItem>) -> Self {
        let total = items.iter().map(|item| item.cost).sum();
        CostBreakdown { items, total }
    }

    /// Find a line item by kind
    pub fn get(&self, kind: LineItemKind) -> Option<&LineItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    /// Cost of a line item, `None` if it was not included
    pub fn cost_of(&self, kind: LineItemKind) -> Option<f64> {
        self.get(kind).map(|item| item.cost)
    }
}

/// Compute the itemized cost of a fence from one price row.
///
/// # Errors
///
/// * `CalcError::InvalidInput` - a dimension is negative or not finite, or a cost overflows
/// * `CalcError::MissingField` - gates or doors requested but the row has no price for them
pub fn calculate(input: &FenceInput, row: &PriceRow) -> CalcResult<CostBreakdown> {
    input.validate()?;

    let mut items = Vec::with_capacity(LineItemKind::ALL.len());
    let area = input.area_m2();
    let posts = f64::from(input.posts);

    items.push(LineItem::new(
        LineItemKind::Material,
        format!(
            "Material ({}, profile {} mm, thickness {} mm)",
            input.metal_type, input.profile_height_mm, input.thickness_mm
        ),
        area * row.base_price,
    ));

    if input.coating {
        if let Some(price) = row.coating_price {
            items.push(LineItem::new(LineItemKind::Coating, "Polymer coating", area * price));
        }
    }

    if let Some(price) = row.post_price {
        items.push(LineItem::new(
            LineItemKind::Posts,
            format!("Posts ({} pcs)", input.posts),
            posts * price,
        ));
    }

    if let Some(price) = row.post_depth_price {
        items.push(LineItem::new(
            LineItemKind::PostDepth,
            format!("Post depth ({} m)", input.post_depth_m),
            posts * input.post_depth_m * price,
        ));
    }

    if input.gates > 0 {
        let price = required_price(row, LineItemKind::Gates)?;
        items.push(LineItem::new(
            LineItemKind::Gates,
            format!("Gates ({} pcs)", input.gates),
            f64::from(input.gates) * price,
        ));
    }

    if input.doors > 0 {
        let price = required_price(row, LineItemKind::Doors)?;
        items.push(LineItem::new(
            LineItemKind::Doors,
            format!("Doors ({} pcs)", input.doors),
            f64::from(input.doors) * price,
        ));
    }

    if input.foundation {
        if let Some(price) = row.foundation_price {
            items.push(LineItem::new(
                LineItemKind::Foundation,
                "Foundation fill",
                input.length_m * price,
            ));
        }
    }

    if input.delivery_distance_km > 0.0 {
        if let Some(price) = row.delivery_price_per_km {
            items.push(LineItem::new(
                LineItemKind::Delivery,
                format!("Delivery ({} km)", input.delivery_distance_km),
                input.delivery_distance_km * price,
            ));
        }
    }

    if let Some(item) = items.iter().find(|item| !item.cost.is_finite()) {
        return Err(CalcError::invalid_input(
            item.kind.label(),
            item.cost.to_string(),
            "Cost is too large to represent",
        ));
    }

    let breakdown = CostBreakdown::from_items(items);
    if !breakdown.total.is_finite() {
        return Err(CalcError::invalid_input(
            "Total",
            breakdown.total.to_string(),
            "Cost is too large to represent",
        ));
    }

    debug!(items = breakdown.items.len(), total = breakdown.total, "Computed cost breakdown");
    Ok(breakdown)
}

/// Select the matching row from a table and calculate against it.
///
/// Returns the row used alongside the breakdown.
pub fn calculate_from_table(table: &PriceTable, input: &FenceInput) -> CalcResult<(PriceRow, CostBreakdown)> {
    let row = table.select(&input.metal_type, input.profile_height_mm, input.thickness_mm)?;
    let breakdown = calculate(input, row)?;
    Ok((row.clone(), breakdown))
}

fn required_price(row: &PriceRow, kind: LineItemKind) -> CalcResult<f64> {
    let field = kind.price_field();
    row.price(field)
        .ok_or_else(|| CalcError::missing_field(field.column()))
}
