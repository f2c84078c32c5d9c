//! Insert/update/delete with renumbering, and the sort+join reduction.

use tracing::debug;

use crate::{Choice, Entry};

/// Effect of [`EntryList::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
	Inserted,
	Updated,
	Removed,
	/// Placeholder chosen on a row that had no entry.
	Unchanged,
}

/// Effect of [`EntryList::delete_row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDeletion<E> {
	/// The last remaining row was reset; the list is now empty.
	Reset,
	/// The row was removed and later entries shifted down by one.
	Removed { entry: Option<E> },
}

/// Entries keyed by row position.
///
/// Positions are unique. Storage is kept in ascending position order, but
/// [`render`](Self::render) sorts anyway so the output never depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryList<E> {
	entries: Vec<E>,
}

impl<E> Default for EntryList<E> {
	fn default() -> Self {
		Self { entries: Vec::new() }
	}
}

impl<E: Entry> EntryList<E> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates entries in storage order.
	pub fn iter(&self) -> impl Iterator<Item = &E> {
		self.entries.iter()
	}

	pub fn get(&self, index: usize) -> Option<&E> {
		self.entries.get(index)
	}

	pub fn get_mut(&mut self, index: usize) -> Option<&mut E> {
		self.entries.get_mut(index)
	}

	/// Returns the storage index of the entry at `position`.
	pub fn index_of(&self, position: usize) -> Option<usize> {
		self.entries.iter().position(|entry| entry.position() == position)
	}

	pub fn find(&self, position: usize) -> Option<&E> {
		self.index_of(position).map(|index| &self.entries[index])
	}

	pub fn find_mut(&mut self, position: usize) -> Option<&mut E> {
		self.index_of(position).map(move |index| &mut self.entries[index])
	}

	/// Positions of all entries in storage order.
	pub fn positions(&self) -> Vec<usize> {
		self.entries.iter().map(Entry::position).collect()
	}

	/// Applies a selector change on the row at `position`.
	///
	/// A placeholder removes the row's entry (the row itself stays, so nothing
	/// is renumbered). A value overwrites the existing entry in place or
	/// inserts a new one.
	pub fn upsert(&mut self, position: usize, choice: Choice<E>) -> Change {
		let existing = self.index_of(position);
		let change = match (choice, existing) {
			(Choice::Placeholder, Some(index)) => {
				self.entries.remove(index);
				Change::Removed
			}
			(Choice::Placeholder, None) => Change::Unchanged,
			(Choice::Value(entry), Some(index)) => {
				self.entries[index].update_from(entry);
				Change::Updated
			}
			(Choice::Value(mut entry), None) => {
				entry.set_position(position);
				let at = self.entries.partition_point(|existing| existing.position() < position);
				self.entries.insert(at, entry);
				Change::Inserted
			}
		};
		debug!(position, change = ?change, len = self.entries.len(), "dropmenu.entries.upsert");
		self.check_invariants();
		change
	}

	/// Removes the entry at `position` without renumbering.
	pub fn remove_at(&mut self, position: usize) -> Option<E> {
		let index = self.index_of(position)?;
		let entry = self.entries.remove(index);
		self.check_invariants();
		Some(entry)
	}

	/// Handles deletion of the row at `position` when `rows` rows are on screen.
	///
	/// The last remaining row is never removed: it is reset and the list
	/// cleared. Otherwise the row's entry (if any) is dropped and every entry
	/// after it moves down one position, whether or not the deleted row had an
	/// entry.
	pub fn delete_row(&mut self, position: usize, rows: usize) -> RowDeletion<E> {
		if rows <= 1 {
			debug_assert!(self.entries.len() <= 1, "single row holds at most one entry");
			self.entries.clear();
			debug!(position, "dropmenu.entries.reset");
			return RowDeletion::Reset;
		}

		let entry = self.index_of(position).map(|index| self.entries.remove(index));
		let mut shifted = 0usize;
		for later in self.entries.iter_mut().filter(|entry| entry.position() > position) {
			later.set_position(later.position() - 1);
			shifted += 1;
		}
		debug!(position, removed = entry.is_some(), shifted, "dropmenu.entries.delete_row");
		self.check_invariants();
		RowDeletion::Removed { entry }
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Entries ordered by ascending position.
	pub fn sorted(&self) -> Vec<&E> {
		let mut sorted: Vec<&E> = self.entries.iter().collect();
		sorted.sort_by_key(|entry| entry.position());
		sorted
	}

	/// Joins entry labels in position order, separated by `infix`.
	///
	/// An empty list renders as `placeholder`.
	pub fn render(&self, infix: &str, placeholder: &str) -> String {
		if self.entries.is_empty() {
			return placeholder.to_string();
		}
		let separator = format!(" {infix} ");
		self.sorted()
			.into_iter()
			.enumerate()
			.fold(String::new(), |mut out, (i, entry)| {
				if i > 0 {
					out.push_str(&separator);
				}
				out.push_str(&entry.label());
				out
			})
	}

	/// Checks that every entry sits on an existing row.
	pub fn fits_rows(&self, rows: usize) -> bool {
		self.entries.iter().all(|entry| entry.position() < rows)
	}

	fn check_invariants(&self) {
		debug_assert!(
			self.entries.windows(2).all(|pair| pair[0].position() < pair[1].position()),
			"entry positions must be unique and ascending: {:?}",
			self.positions()
		);
	}
}
