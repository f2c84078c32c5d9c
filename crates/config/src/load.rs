//! Config file loading utilities.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{ConfigError, MenuConfig};

/// File name looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "dropmenu.toml";

/// Result of loading the user configuration.
#[derive(Debug, Default)]
pub struct ConfigLoadReport {
	/// Parsed config if the file exists and is valid.
	pub config: Option<MenuConfig>,
	/// File read or parse errors keyed by source file path.
	pub errors: Vec<(PathBuf, String)>,
}

impl ConfigLoadReport {
	/// Returns the loaded config, or the defaults.
	pub fn config_or_default(&self) -> MenuConfig {
		self.config.clone().unwrap_or_default()
	}
}

/// Returns `$XDG_CONFIG_HOME/dropmenu`, if a config directory is known.
pub fn default_config_dir() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("dropmenu"))
}

/// Loads `dropmenu.toml` from `config_dir`.
///
/// A missing file is not an error. Read and parse failures are collected in
/// the report rather than returned, so a broken file falls back to defaults.
pub fn load_config_from_dir(config_dir: &Path) -> ConfigLoadReport {
	let mut report = ConfigLoadReport::default();
	let path = config_dir.join(CONFIG_FILE_NAME);
	if !path.exists() {
		return report;
	}

	let parsed = std::fs::read_to_string(&path)
		.map_err(|error| ConfigError::Io {
			path: path.clone(),
			error,
		})
		.and_then(|content| MenuConfig::from_toml_str(&content));

	match parsed {
		Ok(config) => report.config = Some(config),
		Err(error) => {
			warn!(path = %path.display(), %error, "dropmenu.config.load_failed");
			report.errors.push((path, error.to_string()));
		}
	}
	report
}
