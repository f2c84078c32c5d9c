//! Aggregation chain menu.

mod entry;

use dropmenu_config::AggregationLabels;
use dropmenu_entries::{Choice, EntryList, RowDeletion, RowId, Rows};
use dropmenu_lifecycle::{EventResult, MenuHandler, MenuLifecycle};
use tracing::debug;

pub use self::entry::{AggregationEntry, Aggregator};
use crate::{MenuError, Result};

/// Control interactions raised by the aggregation menu's UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationControl {
	/// Menu toggle button.
	Toggle,
	/// "Add" link below the rows.
	AddRow,
	/// Delete icon on a row.
	DeleteRow { row: RowId },
	/// Aggregator selector changed; `value` is the selector's raw value.
	Select { row: RowId, value: String },
	/// "Required field" checkbox changed.
	Required { row: RowId, checked: bool },
}

/// View state of one aggregation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationRow {
	pub selected: Choice<String>,
	pub required: bool,
	/// The required checkbox only accepts input once an aggregator is chosen.
	pub checkbox_enabled: bool,
}

impl Default for AggregationRow {
	fn default() -> Self {
		Self {
			selected: Choice::Placeholder,
			required: false,
			checkbox_enabled: false,
		}
	}
}

/// Builds an ordered chain of aggregators, one per row.
#[derive(Debug)]
pub struct AggregationMenu {
	lifecycle: MenuLifecycle,
	labels: AggregationLabels,
	options: Vec<String>,
	rows: Rows<AggregationRow>,
	entries: EntryList<AggregationEntry>,
}

impl AggregationMenu {
	/// Creates a closed menu with one empty row.
	///
	/// `options` are the aggregators the selectors offer; the menu never shows
	/// more rows than there are options.
	pub fn new(labels: AggregationLabels, options: Vec<String>) -> Self {
		Self {
			lifecycle: MenuLifecycle::new(),
			labels,
			options,
			rows: Rows::with_first(AggregationRow::default()),
			entries: EntryList::new(),
		}
	}

	pub fn options(&self) -> &[String] {
		&self.options
	}

	pub fn rows(&self) -> &Rows<AggregationRow> {
		&self.rows
	}

	pub fn row(&self, row: RowId) -> Option<&AggregationRow> {
		self.rows.get(row)
	}

	pub fn entries(&self) -> &EntryList<AggregationEntry> {
		&self.entries
	}

	/// Row whose selector takes focus after the menu is toggled open.
	pub fn focus_target(&self) -> Option<RowId> {
		self.rows.last()
	}

	/// Appends an empty row. Returns `None` once every option has a row.
	pub fn add_row(&mut self) -> Option<RowId> {
		if self.rows.len() >= self.options.len() {
			debug!(rows = self.rows.len(), options = self.options.len(), "dropmenu.aggregation.add_refused");
			return None;
		}
		Some(self.rows.push(AggregationRow::default()))
	}

	/// Applies the aggregator selector of `row`. Values outside
	/// [`options`](Self::options) are unhandled.
	pub fn select(&mut self, row: RowId, choice: Choice<String>) -> Result<EventResult> {
		let (position, state) = self.rows.lookup_mut(row).ok_or(MenuError::UnknownRow(row))?;
		if let Choice::Value(value) = &choice
			&& !self.options.contains(value)
		{
			debug!(%row, value = %value, "dropmenu.aggregation.unknown_option");
			return Ok(EventResult::Unhandled);
		}
		let entry = choice.clone().map(|value| AggregationEntry::new(position, value));
		let inserting = self.entries.index_of(position).is_none();
		state.selected = choice;
		if state.selected.is_placeholder() {
			state.checkbox_enabled = false;
			state.required = false;
		} else if inserting {
			state.checkbox_enabled = true;
			state.required = false;
		}
		self.entries.upsert(position, entry);
		Ok(EventResult::Consumed)
	}

	/// Applies the required checkbox of `row`.
	pub fn set_required(&mut self, row: RowId, checked: bool) -> Result<EventResult> {
		let (position, state) = self.rows.lookup_mut(row).ok_or(MenuError::UnknownRow(row))?;
		if !state.checkbox_enabled {
			return Ok(EventResult::Unhandled);
		}
		state.required = checked;
		if let Some(entry) = self.entries.find_mut(position) {
			entry.required_field = checked;
		}
		Ok(EventResult::Consumed)
	}

	/// Deletes `row`; the last remaining row is reset instead.
	pub fn delete_row(&mut self, row: RowId) -> Result<EventResult> {
		let count = self.rows.len();
		if count == 1 {
			let state = self.rows.get_mut(row).ok_or(MenuError::UnknownRow(row))?;
			*state = AggregationRow::default();
			self.entries.delete_row(0, 1);
			return Ok(EventResult::Consumed);
		}

		let (position, _) = self.rows.remove(row).ok_or(MenuError::UnknownRow(row))?;
		if let RowDeletion::Removed { entry } = self.entries.delete_row(position, count) {
			debug!(position, had_entry = entry.is_some(), "dropmenu.aggregation.row_deleted");
		}
		debug_assert!(self.entries.fits_rows(self.rows.len()));
		Ok(EventResult::Consumed)
	}

	/// Rendered chain, e.g. `"Sum then Mean"`, or the placeholder when empty.
	pub fn get_query(&self) -> String {
		self.entries.render(&self.labels.infix, &self.labels.placeholder)
	}

	/// Toggle-button text: the prefix followed by the rendered chain.
	pub fn display(&self) -> String {
		format!("{} {}", self.labels.prefix, self.get_query())
	}

	/// Chosen aggregators in row order.
	pub fn aggregators(&self) -> Vec<Aggregator> {
		self.entries.sorted().into_iter().map(Aggregator::from).collect()
	}
}

impl MenuHandler for AggregationMenu {
	type Event = AggregationControl;
	type Error = MenuError;

	fn dispatch(&mut self, event: AggregationControl) -> Result<EventResult> {
		match event {
			AggregationControl::Toggle => {
				self.toggle();
				Ok(EventResult::Consumed)
			}
			AggregationControl::AddRow => Ok(match self.add_row() {
				Some(_) => EventResult::Consumed,
				None => EventResult::Unhandled,
			}),
			AggregationControl::DeleteRow { row } => self.delete_row(row),
			AggregationControl::Select { row, value } => {
				let choice = Choice::from_control(&value, &self.labels.placeholder);
				self.select(row, choice)
			}
			AggregationControl::Required { row, checked } => self.set_required(row, checked),
		}
	}

	fn lifecycle(&self) -> &MenuLifecycle {
		&self.lifecycle
	}

	fn lifecycle_mut(&mut self) -> &mut MenuLifecycle {
		&mut self.lifecycle
	}
}
