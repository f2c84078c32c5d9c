use std::borrow::Cow;

use dropmenu_entries::Entry;
use serde::Serialize;

/// A chosen aggregator on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationEntry {
	pub position: usize,
	pub value: String,
	pub required_field: bool,
}

impl AggregationEntry {
	pub fn new(position: usize, value: impl Into<String>) -> Self {
		Self {
			position,
			value: value.into(),
			required_field: false,
		}
	}
}

impl Entry for AggregationEntry {
	fn position(&self) -> usize {
		self.position
	}

	fn set_position(&mut self, position: usize) {
		self.position = position;
	}

	fn label(&self) -> Cow<'_, str> {
		Cow::Borrowed(&self.value)
	}

	/// Reselecting an aggregator keeps the row's required flag.
	fn update_from(&mut self, other: Self) {
		self.value = other.value;
	}
}

/// Backend view of one aggregation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregator {
	pub name: String,
	pub required_field: bool,
}

impl From<&AggregationEntry> for Aggregator {
	fn from(entry: &AggregationEntry) -> Self {
		Self {
			name: entry.value.clone(),
			required_field: entry.required_field,
		}
	}
}
