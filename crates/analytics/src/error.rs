use dropmenu_entries::RowId;
use thiserror::Error;

/// Errors reported to the host by menu dispatch.
#[derive(Debug, Error)]
pub enum MenuError {
	/// The event names a row that is not (or no longer) on screen.
	#[error("unknown row {0}")]
	UnknownRow(RowId),

	/// A version date that does not match the configured date format.
	#[error("invalid date {value:?}: {source}")]
	InvalidDate {
		value: String,
		#[source]
		source: chrono::ParseError,
	},
}

pub type Result<T> = std::result::Result<T, MenuError>;
