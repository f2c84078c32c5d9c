use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Market-data source family chosen by a row's type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
	Live,
	Snapshot,
	Historical,
}

impl SourceKind {
	pub const ALL: [SourceKind; 3] = [SourceKind::Live, SourceKind::Snapshot, SourceKind::Historical];

	pub fn as_str(self) -> &'static str {
		match self {
			SourceKind::Live => "live",
			SourceKind::Snapshot => "snapshot",
			SourceKind::Historical => "historical",
		}
	}
}

impl fmt::Display for SourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error for a type selector value outside the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown source type '{0}'")]
pub struct UnknownSourceKind(pub String);

impl FromStr for SourceKind {
	type Err = UnknownSourceKind;

	/// Selector labels are matched case-insensitively (`"Live"`, `"live"`).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lower = s.trim().to_ascii_lowercase();
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str() == lower)
			.ok_or_else(|| UnknownSourceKind(s.to_string()))
	}
}
