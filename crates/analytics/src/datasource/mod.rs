//! Market-data source menu.
//!
//! Each row is chosen in two stages: a type selector (live, snapshot or
//! historical) and a source selector whose options depend on the type. Once a
//! source is chosen the row gains an entry and its date controls unlock.

mod entry;
mod extras;
mod kind;
mod request;
#[cfg(test)]
mod tests;

use chrono::NaiveDate;
use dropmenu_config::DataSourceLabels;
use dropmenu_entries::{Choice, EntryList, RowDeletion, RowId, Rows};
use dropmenu_lifecycle::{EventResult, MenuHandler, MenuLifecycle};
use tracing::{debug, warn};

pub use self::entry::{DataSourceEntry, DateQualifier};
pub use self::extras::{DateMode, DateVariant, ExtraOptions};
pub use self::kind::{SourceKind, UnknownSourceKind};
pub use self::request::MarketDataRequest;
use crate::{FetchError, FetchTicket, MenuError, Result};

/// Control interactions raised by the data-source menu's UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceControl {
	Toggle,
	AddRow,
	DeleteRow { row: RowId },
	/// Type selector changed; `value` is its raw value.
	SelectType { row: RowId, value: String },
	/// Source selector changed; `value` is its raw value.
	SelectSource { row: RowId, value: String },
	/// A custom date was picked.
	CustomDate { row: RowId, value: String },
	/// The "latest" button was clicked.
	LatestDate { row: RowId },
}

/// Notifications queued for the host, drained with [`DataSourceMenu::drain_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceEvent {
	/// A row's type was reset to the placeholder.
	TypeReset { row: RowId },
	TypeSelected { row: RowId, kind: SourceKind },
	/// A row's source was chosen and the query changed.
	DataSelected { row: RowId },
	/// A row was deleted and later rows moved up.
	RowsRepositioned,
}

impl DataSourceEvent {
	pub fn name(&self) -> &'static str {
		match self {
			DataSourceEvent::TypeReset { .. } => "dropmenu:ds:typereset",
			DataSourceEvent::TypeSelected { .. } => "dropmenu:ds:typesselected",
			DataSourceEvent::DataSelected { .. } => "dropmenu:ds:dataselected",
			DataSourceEvent::RowsRepositioned => "dropmenu:ds:optsrespositioned",
		}
	}
}

/// View state of one data-source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceRow {
	/// Current value of the type selector.
	pub kind: Option<SourceKind>,
	/// Type whose options currently fill the source selector.
	pub decorated: Option<SourceKind>,
	pub options: Vec<String>,
	pub source: Choice<String>,
	pub extras: ExtraOptions,
	generation: u64,
	/// Generation of the fetch still awaited, if any.
	pending: Option<u64>,
}

impl DataSourceRow {
	fn new(custom_label: &str) -> Self {
		Self {
			kind: None,
			decorated: None,
			options: Vec::new(),
			source: Choice::Placeholder,
			extras: ExtraOptions::hidden(custom_label),
			generation: 0,
			pending: None,
		}
	}

	/// Drops type-dependent decoration: source options, chosen source, date controls.
	fn strip(&mut self, custom_label: &str) {
		self.decorated = None;
		self.options.clear();
		self.source = Choice::Placeholder;
		self.extras = ExtraOptions::hidden(custom_label);
	}

	/// Invalidates any in-flight fetch for this row.
	fn next_generation(&mut self) -> u64 {
		self.generation += 1;
		self.pending = None;
		self.generation
	}

	fn populate(&mut self, kind: SourceKind, options: Vec<String>, custom_label: &str) {
		self.decorated = Some(kind);
		self.options = options;
		self.source = Choice::Placeholder;
		self.extras = ExtraOptions::hidden(custom_label);
		if kind == SourceKind::Historical {
			self.extras.variant = Some(DateVariant::Plain);
		}
	}
}

/// Builds an ordered list of market-data sources, one per row.
#[derive(Debug)]
pub struct DataSourceMenu {
	lifecycle: MenuLifecycle,
	labels: DataSourceLabels,
	rows: Rows<DataSourceRow>,
	entries: EntryList<DataSourceEntry>,
	resolver_keys: Option<Vec<String>>,
	tickets: Vec<FetchTicket>,
	events: Vec<DataSourceEvent>,
}

impl DataSourceMenu {
	/// Creates a closed menu with one empty row.
	pub fn new(labels: DataSourceLabels) -> Self {
		let rows = Rows::with_first(DataSourceRow::new(&labels.custom_label));
		Self {
			lifecycle: MenuLifecycle::new(),
			labels,
			rows,
			entries: EntryList::new(),
			resolver_keys: None,
			tickets: Vec::new(),
			events: Vec::new(),
		}
	}

	/// Caches historical resolver keys so historical rows populate without a fetch.
	pub fn set_resolver_keys(&mut self, keys: Vec<String>) {
		self.resolver_keys = Some(keys);
	}

	pub fn resolver_keys(&self) -> Option<&[String]> {
		self.resolver_keys.as_deref()
	}

	pub fn rows(&self) -> &Rows<DataSourceRow> {
		&self.rows
	}

	pub fn row(&self, row: RowId) -> Option<&DataSourceRow> {
		self.rows.get(row)
	}

	pub fn entries(&self) -> &EntryList<DataSourceEntry> {
		&self.entries
	}

	/// Row whose type selector takes focus after the menu is toggled open.
	pub fn focus_target(&self) -> Option<RowId> {
		self.rows.last()
	}

	pub fn add_row(&mut self) -> RowId {
		self.rows.push(DataSourceRow::new(&self.labels.custom_label))
	}

	/// Replaces the date control a row exposes.
	///
	/// Switching to a different control returns the row to "latest" and drops
	/// any date set through the previous one.
	pub fn set_date_variant(&mut self, row: RowId, variant: Option<DateVariant>) -> Result<()> {
		let custom_label = self.labels.custom_label.as_str();
		let (position, state) = self.rows.lookup_mut(row).ok_or(MenuError::UnknownRow(row))?;
		if state.extras.variant == variant {
			return Ok(());
		}
		state.extras.variant = variant;
		state.extras.show_latest(custom_label);
		if let Some(entry) = self.entries.find_mut(position) {
			entry.qualifier = None;
		}
		debug!(%row, variant = ?variant, "dropmenu.datasource.date_variant");
		Ok(())
	}

	/// Takes the fetches queued by type selections.
	pub fn take_fetch_tickets(&mut self) -> Vec<FetchTicket> {
		std::mem::take(&mut self.tickets)
	}

	pub fn drain_events(&mut self) -> impl Iterator<Item = DataSourceEvent> + '_ {
		self.events.drain(..)
	}

	/// Applies the type selector of `row`.
	pub fn select_type(&mut self, row: RowId, choice: Choice<SourceKind>) -> Result<EventResult> {
		let custom_label = self.labels.custom_label.as_str();
		let (position, state) = self.rows.lookup_mut(row).ok_or(MenuError::UnknownRow(row))?;

		let kind = match choice {
			Choice::Placeholder => {
				state.kind = None;
				state.next_generation();
				state.strip(custom_label);
				self.entries.remove_at(position);
				self.events.push(DataSourceEvent::TypeReset { row });
				return Ok(EventResult::Consumed);
			}
			Choice::Value(kind) => kind,
		};

		if state.decorated.is_some() {
			self.entries.remove_at(position);
			state.strip(custom_label);
		}
		state.kind = Some(kind);
		let generation = state.next_generation();

		match (kind, &self.resolver_keys) {
			(SourceKind::Historical, Some(keys)) => state.populate(kind, keys.clone(), custom_label),
			_ => {
				debug!(%row, kind = kind.as_str(), generation, "dropmenu.datasource.fetch_queued");
				state.pending = Some(generation);
				self.tickets.push(FetchTicket { row, kind, generation });
			}
		}
		self.events.push(DataSourceEvent::TypeSelected { row, kind });
		Ok(EventResult::Consumed)
	}

	/// Delivers the result of a queued fetch.
	///
	/// Returns `true` if the row's source options were populated. Results for
	/// deleted rows, superseded type selections, already completed tickets and
	/// failed fetches are dropped.
	pub fn complete_fetch(&mut self, ticket: FetchTicket, result: std::result::Result<Vec<String>, FetchError>) -> bool {
		let options = match result {
			Ok(options) => options,
			Err(error) => {
				warn!(row = %ticket.row, kind = ticket.kind.as_str(), %error, "dropmenu.datasource.fetch_failed");
				return false;
			}
		};
		if ticket.kind == SourceKind::Historical {
			self.resolver_keys = Some(options.clone());
		}

		let custom_label = self.labels.custom_label.as_str();
		let Some(state) = self.rows.get_mut(ticket.row) else {
			debug!(row = %ticket.row, "dropmenu.datasource.fetch_orphaned");
			return false;
		};
		if state.pending != Some(ticket.generation) || state.kind != Some(ticket.kind) {
			debug!(
				row = %ticket.row,
				ticket = ticket.generation,
				current = state.generation,
				pending = ?state.pending,
				"dropmenu.datasource.fetch_stale"
			);
			return false;
		}
		state.pending = None;
		state.populate(ticket.kind, options, custom_label);
		true
	}

	/// Applies the source selector of `row`.
	pub fn select_source(&mut self, row: RowId, choice: Choice<String>) -> Result<EventResult> {
		let custom_label = self.labels.custom_label.as_str();
		let (position, state) = self.rows.lookup_mut(row).ok_or(MenuError::UnknownRow(row))?;
		let Some(kind) = state.decorated else {
			return Ok(EventResult::Unhandled);
		};

		match choice {
			Choice::Placeholder => {
				state.source = Choice::Placeholder;
				state.extras.set_enabled(false, custom_label);
				self.entries.remove_at(position);
			}
			Choice::Value(source) => {
				if !state.options.contains(&source) {
					debug!(%row, source = %source, "dropmenu.datasource.unknown_source");
					return Ok(EventResult::Unhandled);
				}
				let entry = DataSourceEntry::new(position, kind, source.clone());
				state.source = Choice::Value(source);
				state.extras.set_enabled(true, custom_label);
				self.entries.upsert(position, Choice::Value(entry));
				self.events.push(DataSourceEvent::DataSelected { row });
			}
		}
		Ok(EventResult::Consumed)
	}

	/// Sets an explicit date on `row`'s entry through its date control.
	pub fn set_custom_date(&mut self, row: RowId, value: &str) -> Result<EventResult> {
		let (position, state) = self.rows.lookup_mut(row).ok_or(MenuError::UnknownRow(row))?;
		let (true, Some(variant)) = (state.extras.enabled, state.extras.variant) else {
			return Ok(EventResult::Unhandled);
		};
		let Some(entry) = self.entries.find_mut(position) else {
			return Ok(EventResult::Unhandled);
		};
		if value.is_empty() {
			return Ok(EventResult::Unhandled);
		}

		let qualifier = match variant {
			DateVariant::Plain => DateQualifier::Date(value.to_string()),
			DateVariant::Version => {
				let date = NaiveDate::parse_from_str(value, &self.labels.date_format).map_err(|source| {
					MenuError::InvalidDate {
						value: value.to_string(),
						source,
					}
				})?;
				DateQualifier::Version(date)
			}
			DateVariant::Correction => DateQualifier::Correction(value.to_string()),
		};
		entry.qualifier = Some(qualifier);
		state.extras.show_custom(value);
		Ok(EventResult::Consumed)
	}

	/// Clears `row`'s explicit date, returning it to "latest".
	pub fn set_latest(&mut self, row: RowId) -> Result<EventResult> {
		let custom_label = self.labels.custom_label.as_str();
		let (position, state) = self.rows.lookup_mut(row).ok_or(MenuError::UnknownRow(row))?;
		if !state.extras.enabled {
			return Ok(EventResult::Unhandled);
		}
		state.extras.show_latest(custom_label);
		if let Some(entry) = self.entries.find_mut(position) {
			entry.qualifier = None;
		}
		Ok(EventResult::Consumed)
	}

	/// Deletes `row`; the last remaining row is reset instead.
	pub fn delete_row(&mut self, row: RowId) -> Result<EventResult> {
		let count = self.rows.len();
		if count == 1 {
			let custom_label = self.labels.custom_label.as_str();
			let state = self.rows.get_mut(row).ok_or(MenuError::UnknownRow(row))?;
			state.kind = None;
			state.next_generation();
			state.strip(custom_label);
			self.entries.delete_row(0, 1);
			self.events.push(DataSourceEvent::TypeReset { row });
			return Ok(EventResult::Consumed);
		}

		let (position, _) = self.rows.remove(row).ok_or(MenuError::UnknownRow(row))?;
		if let RowDeletion::Removed { entry } = self.entries.delete_row(position, count) {
			debug!(position, had_entry = entry.is_some(), "dropmenu.datasource.row_deleted");
		}
		debug_assert!(self.entries.fits_rows(self.rows.len()));
		self.events.push(DataSourceEvent::RowsRepositioned);
		Ok(EventResult::Consumed)
	}

	/// Rendered list, e.g. `"live:BLOOMBERG then snapshot:EOD"`, or the placeholder when empty.
	pub fn render(&self) -> String {
		self.entries.render(&self.labels.infix, &self.labels.source_placeholder)
	}

	/// Backend requests in row order; `None` when nothing is selected.
	pub fn get_query(&self) -> Option<Vec<MarketDataRequest>> {
		if self.entries.is_empty() {
			return None;
		}
		Some(self.entries.sorted().into_iter().map(MarketDataRequest::from).collect())
	}

	fn classify_type(&self, value: &str) -> Option<Choice<SourceKind>> {
		match Choice::from_control(value, &self.labels.type_placeholder) {
			Choice::Placeholder => Some(Choice::Placeholder),
			Choice::Value(value) => match value.parse() {
				Ok(kind) => Some(Choice::Value(kind)),
				Err(error) => {
					debug!(%error, "dropmenu.datasource.unknown_type");
					None
				}
			},
		}
	}
}

impl MenuHandler for DataSourceMenu {
	type Event = DataSourceControl;
	type Error = MenuError;

	fn dispatch(&mut self, event: DataSourceControl) -> Result<EventResult> {
		match event {
			DataSourceControl::Toggle => {
				self.toggle();
				Ok(EventResult::Consumed)
			}
			DataSourceControl::AddRow => {
				self.add_row();
				Ok(EventResult::Consumed)
			}
			DataSourceControl::DeleteRow { row } => self.delete_row(row),
			DataSourceControl::SelectType { row, value } => match self.classify_type(&value) {
				Some(choice) => self.select_type(row, choice),
				None => Ok(EventResult::Unhandled),
			},
			DataSourceControl::SelectSource { row, value } => {
				let choice = Choice::from_control(&value, &self.labels.source_placeholder);
				self.select_source(row, choice)
			}
			DataSourceControl::CustomDate { row, value } => self.set_custom_date(row, &value),
			DataSourceControl::LatestDate { row } => self.set_latest(row),
		}
	}

	fn lifecycle(&self) -> &MenuLifecycle {
		&self.lifecycle
	}

	fn lifecycle_mut(&mut self) -> &mut MenuLifecycle {
		&mut self.lifecycle
	}
}
