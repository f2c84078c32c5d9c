use std::borrow::Cow;

use chrono::NaiveDate;
use dropmenu_entries::Entry;

use super::SourceKind;

/// Explicit date attached to a data-source entry. At most one per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateQualifier {
	/// Plain historical date, kept as entered.
	Date(String),
	/// Version date picked from a calendar.
	Version(NaiveDate),
	/// Correction date, kept as entered.
	Correction(String),
}

/// A `{type, source}` pair chosen on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceEntry {
	pub position: usize,
	pub kind: SourceKind,
	pub source: String,
	pub qualifier: Option<DateQualifier>,
}

impl DataSourceEntry {
	pub fn new(position: usize, kind: SourceKind, source: impl Into<String>) -> Self {
		Self {
			position,
			kind,
			source: source.into(),
			qualifier: None,
		}
	}

	pub fn date(&self) -> Option<&str> {
		match &self.qualifier {
			Some(DateQualifier::Date(date)) => Some(date),
			_ => None,
		}
	}

	pub fn version_date(&self) -> Option<NaiveDate> {
		match self.qualifier {
			Some(DateQualifier::Version(date)) => Some(date),
			_ => None,
		}
	}

	pub fn correction_date(&self) -> Option<&str> {
		match &self.qualifier {
			Some(DateQualifier::Correction(date)) => Some(date),
			_ => None,
		}
	}
}

impl Entry for DataSourceEntry {
	fn position(&self) -> usize {
		self.position
	}

	fn set_position(&mut self, position: usize) {
		self.position = position;
	}

	fn label(&self) -> Cow<'_, str> {
		Cow::Owned(format!("{}:{}", self.kind, self.source))
	}
}
