use serde::{Deserialize, Serialize};

use super::{DataSourceEntry, SourceKind};

/// Backend request for one data source.
///
/// Serializes as a flat object tagged by `marketDataType`, e.g.
/// `{"marketDataType":"fixedHistorical","date":"2020-01-01","resolverKey":"DEFAULT"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "marketDataType", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MarketDataRequest {
	Live { source: String },
	Snapshot { snapshot_id: String },
	LatestHistorical { resolver_key: String },
	FixedHistorical { date: String, resolver_key: String },
}

impl From<&DataSourceEntry> for MarketDataRequest {
	fn from(entry: &DataSourceEntry) -> Self {
		match entry.kind {
			SourceKind::Live => MarketDataRequest::Live {
				source: entry.source.clone(),
			},
			SourceKind::Snapshot => MarketDataRequest::Snapshot {
				snapshot_id: entry.source.clone(),
			},
			SourceKind::Historical => match entry.date().filter(|date| !date.is_empty()) {
				Some(date) => MarketDataRequest::FixedHistorical {
					date: date.to_string(),
					resolver_key: entry.source.clone(),
				},
				None => MarketDataRequest::LatestHistorical {
					resolver_key: entry.source.clone(),
				},
			},
		}
	}
}
