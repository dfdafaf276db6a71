//! # Application Settings
//!
//! Settings come from an optional TOML file layered under environment
//! variables (`FENCE_CALC__CURRENCY`, `FENCE_CALC__DEFAULTS__LENGTH`, ...).
//! Any field missing from both falls back to its default, so running
//! without a settings file is normal.
//!
//! ```toml
//! prices_file = "prices.xlsx"
//! output_file = "result.xlsx"
//! currency = "руб."
//! log_level = "info"
//!
//! [defaults]
//! length = "10"
//! height = "1.8"
//! posts = "10"
//! post_depth = "1.2"
//! foundation = true
//! coating = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::input::FormInput;

/// Settings file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "fence_calc.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "FENCE_CALC";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Price table opened at start-up and offered first in the open dialog
    pub prices_file: PathBuf,
    /// Suggested name for exported results
    pub output_file: PathBuf,
    /// Suffix shown after every amount
    pub currency: String,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Initial text of the form fields
    pub defaults: FormDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            prices_file: PathBuf::from("prices.xlsx"),
            output_file: PathBuf::from("result.xlsx"),
            currency: "руб.".to_string(),
            log_level: "info".to_string(),
            defaults: FormDefaults::default(),
        }
    }
}

/// Initial form values. Numeric fields are text, exactly as they appear in the form.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormDefaults {
    pub length: String,
    pub height: String,
    pub posts: String,
    pub post_depth: String,
    pub gates: String,
    pub doors: String,
    pub delivery_distance: String,
    pub foundation: bool,
    pub coating: bool,
}

impl Default for FormDefaults {
    fn default() -> Self {
        let form = FormInput::default();
        FormDefaults {
            length: form.length,
            height: form.height,
            posts: form.posts,
            post_depth: form.post_depth,
            gates: form.gates,
            doors: form.doors,
            delivery_distance: form.delivery_distance,
            foundation: form.foundation,
            coating: form.coating,
        }
    }
}

impl FormDefaults {
    /// A form pre-filled with these defaults and no price key selected
    pub fn to_form(&self) -> FormInput {
        FormInput {
            length: self.length.clone(),
            height: self.height.clone(),
            posts: self.posts.clone(),
            post_depth: self.post_depth.clone(),
            gates: self.gates.clone(),
            doors: self.doors.clone(),
            delivery_distance: self.delivery_distance.clone(),
            metal_type: String::new(),
            profile_height: String::new(),
            thickness: String::new(),
            foundation: self.foundation,
            coating: self.coating,
        }
    }
}

impl AppConfig {
    /// Load settings from `path` (or [`DEFAULT_CONFIG_FILE`]) plus the environment.
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// `CalcError::Config` if the file is malformed or a value fails validation.
    pub fn load(path: Option<&Path>) -> CalcResult<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .map_err(|e| CalcError::Config {
                reason: format!("{}: {}", path.display(), e),
            })?;

        let cfg: AppConfig = settings.try_deserialize().map_err(|e| CalcError::Config {
            reason: format!("{}: {}", path.display(), e),
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check values that serde accepts but the application cannot use
    pub fn validate(&self) -> CalcResult<()> {
        if self.log_level.trim().is_empty() {
            return Err(CalcError::Config {
                reason: "log_level must not be empty".to_string(),
            });
        }
        if self.currency.trim().is_empty() {
            return Err(CalcError::Config {
                reason: "currency must not be empty".to_string(),
            });
        }
        if self.output_file.as_os_str().is_empty() {
            return Err(CalcError::Config {
                reason: "output_file must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
