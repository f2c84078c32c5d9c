//! Source-option collaborator.
//!
//! The data-source menu never fetches anything itself. Selecting a type
//! queues a [`FetchTicket`]; the host runs [`fetch_options`] against its
//! [`SourceProvider`] and hands the result back through
//! [`DataSourceMenu::complete_fetch`](crate::DataSourceMenu::complete_fetch).

use async_trait::async_trait;
use dropmenu_entries::RowId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::SourceKind;

/// Failure reported by a [`SourceProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// The provider answered with an error indicator.
	#[error("source list unavailable: {0}")]
	Unavailable(String),

	/// The snapshot endpoint returned no listing.
	#[error("snapshot listing is empty")]
	EmptySnapshotListing,
}

/// A named option as returned by the live-source and snapshot endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSource {
	pub name: String,
}

impl From<&str> for NamedSource {
	fn from(name: &str) -> Self {
		Self { name: name.to_string() }
	}
}

/// One element of the snapshot endpoint's response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotListing {
	#[serde(default)]
	pub snapshots: Vec<NamedSource>,
}

/// Supplies the option lists behind each [`SourceKind`].
#[async_trait]
pub trait SourceProvider: Send + Sync {
	async fn live_sources(&self) -> Result<Vec<NamedSource>, FetchError>;

	async fn snapshots(&self) -> Result<Vec<SnapshotListing>, FetchError>;

	/// Historical time-series rating configs, each `"A|KEY|..."`.
	async fn historical_resolver_config(&self) -> Result<Vec<String>, FetchError>;
}

/// In-memory provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StaticSourceProvider {
	pub live: Vec<NamedSource>,
	pub snapshots: Vec<SnapshotListing>,
	pub resolver_config: Vec<String>,
}

#[async_trait]
impl SourceProvider for StaticSourceProvider {
	async fn live_sources(&self) -> Result<Vec<NamedSource>, FetchError> {
		Ok(self.live.clone())
	}

	async fn snapshots(&self) -> Result<Vec<SnapshotListing>, FetchError> {
		Ok(self.snapshots.clone())
	}

	async fn historical_resolver_config(&self) -> Result<Vec<String>, FetchError> {
		Ok(self.resolver_config.clone())
	}
}

/// Pending option fetch for one row.
///
/// `generation` identifies the type selection that issued it; the menu drops
/// the result if the row has been reselected or deleted since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
	pub row: RowId,
	pub kind: SourceKind,
	pub generation: u64,
}

/// Extracts the resolver key (second `|`-separated field) of a rating config.
pub fn resolver_key(config: &str) -> Option<&str> {
	config.split('|').nth(1)
}

/// Resolver keys of every config line that has one.
pub fn resolver_keys<S: AsRef<str>>(configs: &[S]) -> Vec<String> {
	configs
		.iter()
		.filter_map(|config| resolver_key(config.as_ref()))
		.map(str::to_string)
		.collect()
}

/// Runs the fetch matching `kind` and reduces it to option names.
pub async fn fetch_options(provider: &dyn SourceProvider, kind: SourceKind) -> Result<Vec<String>, FetchError> {
	let names: Vec<String> = match kind {
		SourceKind::Live => provider.live_sources().await?.into_iter().map(|source| source.name).collect(),
		SourceKind::Snapshot => provider
			.snapshots()
			.await?
			.into_iter()
			.next()
			.ok_or(FetchError::EmptySnapshotListing)?
			.snapshots
			.into_iter()
			.map(|snapshot| snapshot.name)
			.collect(),
		SourceKind::Historical => resolver_keys(&provider.historical_resolver_config().await?),
	};
	debug!(kind = kind.as_str(), count = names.len(), "dropmenu.provider.fetched");
	Ok(names)
}
