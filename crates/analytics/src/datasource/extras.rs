//! Per-row "latest vs. custom date" controls.

/// Which date control a row exposes next to its source selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateVariant {
	/// Free date field; sets the entry's `date`.
	Plain,
	/// Calendar picker; sets the entry's `versionDate`.
	Version,
	/// Correction field; sets the entry's `correctionDate`.
	Correction,
}

/// Active button of the latest/custom pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateMode {
	#[default]
	Latest,
	Custom,
}

/// Extra options shown beside a row's source selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraOptions {
	/// `None` when the row has no date control.
	pub variant: Option<DateVariant>,
	/// Inputs accept clicks only while the row holds an entry.
	pub enabled: bool,
	pub mode: DateMode,
	/// Text on the custom button: the resting label, or the chosen date.
	pub custom_text: String,
}

impl ExtraOptions {
	pub(super) fn hidden(custom_label: &str) -> Self {
		Self {
			variant: None,
			enabled: false,
			mode: DateMode::Latest,
			custom_text: custom_label.to_string(),
		}
	}

	/// Enables or disables the inputs; both directions reset to "latest".
	pub(super) fn set_enabled(&mut self, enabled: bool, custom_label: &str) {
		self.enabled = enabled;
		self.show_latest(custom_label);
	}

	pub(super) fn show_latest(&mut self, custom_label: &str) {
		self.mode = DateMode::Latest;
		self.custom_text = custom_label.to_string();
	}

	pub(super) fn show_custom(&mut self, value: &str) {
		self.mode = DateMode::Custom;
		self.custom_text = value.to_string();
	}
}
