//! # Form Input
//!
//! Raw text from the calculator form and its conversion into a typed
//! [`FenceInput`]. Numbers accept either `.` or `,` as the decimal
//! separator. Count fields (posts, gates, doors) accept any non-negative
//! number and drop the fractional part.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::input::FormInput;
//!
//! let mut form = FormInput::default();
//! form.length = "12,5".to_string();
//! form.metal_type = "Steel".to_string();
//! form.profile_height = "20".to_string();
//! form.thickness = "0.45".to_string();
//!
//! let input = form.parse().unwrap();
//! assert_eq!(input.length_m, 12.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::pricing::FenceInput;

/// Parse a decimal number, accepting `,` as decimal separator.
///
/// Returns `None` for empty, non-numeric, NaN, or infinite text.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Text of every form field, exactly as typed or selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub length: String,
    pub height: String,
    pub posts: String,
    pub post_depth: String,
    pub gates: String,
    pub doors: String,
    pub delivery_distance: String,
    pub metal_type: String,
    pub profile_height: String,
    pub thickness: String,
    pub foundation: bool,
    pub coating: bool,
}

impl Default for FormInput {
    fn default() -> Self {
        FormInput {
            length: "10".to_string(),
            height: "1.8".to_string(),
            posts: "10".to_string(),
            post_depth: "1.2".to_string(),
            gates: "0".to_string(),
            doors: "0".to_string(),
            delivery_distance: "0".to_string(),
            metal_type: String::new(),
            profile_height: String::new(),
            thickness: String::new(),
            foundation: true,
            coating: true,
        }
    }
}

impl FormInput {
    /// Convert the form text into a typed input.
    ///
    /// # Errors
    ///
    /// `CalcError::InvalidInput` naming the first offending field.
    pub fn parse(&self) -> CalcResult<FenceInput> {
        let metal_type = self.metal_type.trim();
        if metal_type.is_empty() {
            return Err(CalcError::invalid_input(
                "Metal type",
                &self.metal_type,
                "Select a metal type",
            ));
        }

        Ok(FenceInput {
            length_m: parse_measure("Fence length", &self.length)?,
            height_m: parse_measure("Fence height", &self.height)?,
            posts: parse_count("Post count", &self.posts)?,
            post_depth_m: parse_measure("Post depth", &self.post_depth)?,
            gates: parse_count("Gate count", &self.gates)?,
            doors: parse_count("Door count", &self.doors)?,
            delivery_distance_km: parse_measure("Delivery distance", &self.delivery_distance)?,
            metal_type: metal_type.to_string(),
            profile_height_mm: parse_measure("Profile height", &self.profile_height)?,
            thickness_mm: parse_measure("Metal thickness", &self.thickness)?,
            foundation: self.foundation,
            coating: self.coating,
        })
    }
}

fn parse_measure(field: &str, text: &str) -> CalcResult<f64> {
    if text.trim().is_empty() {
        return Err(CalcError::invalid_input(field, text, "A value is required"));
    }
    let value = parse_decimal(text)
        .ok_or_else(|| CalcError::invalid_input(field, text, "Not a valid number"))?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, text, "Value must not be negative"));
    }
    Ok(value)
}

fn parse_count(field: &str, text: &str) -> CalcResult<u32> {
    let value = parse_measure(field, text)?.trunc();
    if value > f64::from(u32::MAX) {
        return Err(CalcError::invalid_input(field, text, "Value is too large"));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> FormInput {
        FormInput {
            metal_type: "Steel".to_string(),
            profile_height: "20".to_string(),
            thickness: "0.45".to_string(),
            ..FormInput::default()
        }
    }

    #[test]
    fn test_parse_decimal_variants() {
        assert_eq!(parse_decimal("1.8"), Some(1.8));
        assert_eq!(parse_decimal(" 1,8 "), Some(1.8));
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn test_default_form_parses() {
        let input = filled_form().parse().unwrap();
        assert_eq!(input.length_m, 10.0);
        assert_eq!(input.height_m, 1.8);
        assert_eq!(input.posts, 10);
        assert_eq!(input.post_depth_m, 1.2);
        assert_eq!(input.gates, 0);
        assert_eq!(input.metal_type, "Steel");
        assert_eq!(input.profile_height_mm, 20.0);
        assert_eq!(input.thickness_mm, 0.45);
        assert!(input.foundation);
        assert!(input.coating);
    }

    #[test]
    fn test_non_numeric_field_named_in_error() {
        let form = FormInput {
            height: "tall".to_string(),
            ..filled_form()
        };
        let err = form.parse().unwrap_err();
        assert_eq!(err, CalcError::invalid_input("Fence height", "tall", "Not a valid number"));
    }

    #[test]
    fn test_empty_and_negative_rejected() {
        let empty = FormInput {
            gates: "  ".to_string(),
            ..filled_form()
        };
        assert_eq!(empty.parse().unwrap_err().error_code(), "INVALID_INPUT");

        let negative = FormInput {
            delivery_distance: "-5".to_string(),
            ..filled_form()
        };
        assert!(matches!(
            negative.parse().unwrap_err(),
            CalcError::InvalidInput { ref field, .. } if field == "Delivery distance"
        ));
    }

    #[test]
    fn test_counts_truncate() {
        let form = FormInput {
            posts: "12,9".to_string(),
            doors: "1.0".to_string(),
            ..filled_form()
        };
        let input = form.parse().unwrap();
        assert_eq!(input.posts, 12);
        assert_eq!(input.doors, 1);
    }

    #[test]
    fn test_metal_type_required() {
        let form = FormInput {
            metal_type: " ".to_string(),
            ..filled_form()
        };
        assert!(matches!(
            form.parse().unwrap_err(),
            CalcError::InvalidInput { ref field, .. } if field == "Metal type"
        ));
    }
}
