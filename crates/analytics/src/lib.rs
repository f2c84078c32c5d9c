//! Analytics drop menus.
//!
//! * [`AggregationMenu`]: ordered chain of aggregators, rendered as `"Sum then Mean"`
//! * [`DataSourceMenu`]: ordered market-data sources, rendered as text and as
//!   [`MarketDataRequest`] payloads
//! * [`SourceProvider`]: async collaborator supplying source options per [`SourceKind`]
//!
//! Both menus hold a [`MenuLifecycle`](dropmenu_lifecycle::MenuLifecycle) and
//! implement [`MenuHandler`](dropmenu_lifecycle::MenuHandler); the host feeds
//! them control events and reads back queries.

pub mod aggregation;
pub mod datasource;
mod error;
pub mod provider;

pub use aggregation::{AggregationControl, AggregationEntry, AggregationMenu, AggregationRow, Aggregator};
pub use datasource::{
	DataSourceControl, DataSourceEntry, DataSourceEvent, DataSourceMenu, DataSourceRow, DateMode, DateQualifier,
	DateVariant, ExtraOptions, MarketDataRequest, SourceKind,
};
pub use dropmenu_entries::RowId;
pub use error::{MenuError, Result};
pub use provider::{
	FetchError, FetchTicket, NamedSource, SnapshotListing, SourceProvider, StaticSourceProvider, fetch_options,
	resolver_key, resolver_keys,
};
