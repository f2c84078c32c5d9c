//! Configuration for drop menus.
//!
//! Every text a menu renders (prefixes, separators, placeholder sentinels)
//! comes from [`MenuConfig`]. All fields default to the stock labels, so an
//! empty file, a partial file, or no file at all are equally valid.
//!
//! # Configuration File
//!
//! Looked up as `dropmenu.toml` in the config directory
//! (`$XDG_CONFIG_HOME/dropmenu` or `~/.config/dropmenu`):
//!
//! ```toml
//! [aggregation]
//! prefix = "Aggregated by"
//! infix = "then"
//! placeholder = "select aggregation type..."
//!
//! [datasources]
//! infix = "then"
//! type-placeholder = "select type..."
//! source-placeholder = "select data source..."
//! custom-label = "Custom"
//! date-format = "%Y-%m-%d"
//! ```

mod error;
pub mod load;

use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use load::{CONFIG_FILE_NAME, ConfigLoadReport, default_config_dir, load_config_from_dir};

/// Labels for every menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
	pub aggregation: AggregationLabels,
	pub datasources: DataSourceLabels,
}

impl MenuConfig {
	/// Parses a TOML document.
	pub fn from_toml_str(content: &str) -> Result<Self> {
		Ok(toml::from_str(content)?)
	}
}

/// Texts of the aggregation menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AggregationLabels {
	/// Shown before the rendered query on the menu toggle.
	pub prefix: String,
	/// Separator word between consecutive aggregators.
	pub infix: String,
	/// Selector sentinel meaning "no aggregator chosen".
	pub placeholder: String,
}

impl Default for AggregationLabels {
	fn default() -> Self {
		Self {
			prefix: "Aggregated by".into(),
			infix: "then".into(),
			placeholder: "select aggregation type...".into(),
		}
	}
}

/// Texts of the data-source menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DataSourceLabels {
	pub infix: String,
	pub type_placeholder: String,
	pub source_placeholder: String,
	/// Resting text of the custom-date button.
	pub custom_label: String,
	/// `chrono` format used to parse custom dates.
	pub date_format: String,
}

impl Default for DataSourceLabels {
	fn default() -> Self {
		Self {
			infix: "then".into(),
			type_placeholder: "select type...".into(),
			source_placeholder: "select data source...".into(),
			custom_label: "Custom".into(),
			date_format: "%Y-%m-%d".into(),
		}
	}
}
