//! Stable row identity.

use std::fmt;

/// Identifier of an on-screen row. Never reused within one [`Rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl fmt::Display for RowId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "row#{}", self.0)
	}
}

/// On-screen rows in display order, each carrying per-row UI state `S`.
///
/// A row's position is its index here. Appending never moves existing rows;
/// removing a row moves every later row up by one.
#[derive(Debug, Clone)]
pub struct Rows<S> {
	rows: Vec<(RowId, S)>,
	next_id: u64,
}

impl<S> Rows<S> {
	/// Creates the column with its first row.
	pub fn with_first(state: S) -> Self {
		let mut rows = Self {
			rows: Vec::new(),
			next_id: 0,
		};
		rows.push(state);
		rows
	}

	/// Appends a row and returns its id.
	pub fn push(&mut self, state: S) -> RowId {
		let id = RowId(self.next_id);
		self.next_id += 1;
		self.rows.push((id, state));
		id
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn position(&self, id: RowId) -> Option<usize> {
		self.rows.iter().position(|(row, _)| *row == id)
	}

	pub fn id_at(&self, position: usize) -> Option<RowId> {
		self.rows.get(position).map(|(id, _)| *id)
	}

	pub fn get(&self, id: RowId) -> Option<&S> {
		self.rows.iter().find(|(row, _)| *row == id).map(|(_, state)| state)
	}

	pub fn get_mut(&mut self, id: RowId) -> Option<&mut S> {
		self.rows.iter_mut().find(|(row, _)| *row == id).map(|(_, state)| state)
	}

	/// Returns the row's position and state together.
	pub fn lookup_mut(&mut self, id: RowId) -> Option<(usize, &mut S)> {
		self.rows
			.iter_mut()
			.enumerate()
			.find(|(_, (row, _))| *row == id)
			.map(|(position, (_, state))| (position, state))
	}

	/// Removes a row, returning the position it held and its state.
	pub fn remove(&mut self, id: RowId) -> Option<(usize, S)> {
		let position = self.position(id)?;
		let (_, state) = self.rows.remove(position);
		Some((position, state))
	}

	pub fn first(&self) -> Option<RowId> {
		self.id_at(0)
	}

	pub fn last(&self) -> Option<RowId> {
		self.rows.last().map(|(id, _)| *id)
	}

	/// Iterates `(position, id, state)` in display order.
	pub fn iter(&self) -> impl Iterator<Item = (usize, RowId, &S)> {
		self.rows.iter().enumerate().map(|(position, (id, state))| (position, *id, state))
	}
}
