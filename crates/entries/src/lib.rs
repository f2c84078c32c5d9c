//! Ordered selection entries.
//!
//! A drop menu shows a column of rows. Each row that holds a resolved choice
//! contributes one [`Entry`] to an [`EntryList`], keyed by the row's position.
//! [`Rows`] owns the row id → position mapping; positions change only when a
//! row is deleted, and [`EntryList::delete_row`] applies the same shift to the
//! entries.

pub mod choice;
pub mod entry;
pub mod list;
pub mod rows;

pub use choice::Choice;
pub use entry::Entry;
pub use list::{Change, EntryList, RowDeletion};
pub use rows::{RowId, Rows};
