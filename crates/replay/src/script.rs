//! Script format and replay loop.

use anyhow::{Context, anyhow, bail};
use dropmenu_analytics::{
	AggregationControl, AggregationMenu, Aggregator, DataSourceControl, DataSourceMenu, MarketDataRequest, RowId,
	SourceKind, StaticSourceProvider, fetch_options,
};
use dropmenu_config::MenuConfig;
use dropmenu_lifecycle::MenuHandler;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A replay script.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Script {
	/// Aggregators offered by the aggregation selectors.
	#[serde(default)]
	pub aggregators: Vec<String>,
	/// Data behind the source selectors.
	#[serde(default)]
	pub provider: StaticSourceProvider,
	/// Load resolver keys before the first step, as a mounted menu would.
	#[serde(default)]
	pub prefetch_resolver_keys: bool,
	pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuKind {
	Aggregation,
	Datasources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
	Toggle,
	AddRow,
	DeleteRow,
	Select,
	Required,
	SelectType,
	SelectSource,
	CustomDate,
	LatestDate,
}

/// One UI interaction, addressed by row position.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
	pub menu: MenuKind,
	pub control: ControlKind,
	#[serde(default)]
	pub position: Option<usize>,
	#[serde(default)]
	pub value: Option<String>,
	#[serde(default)]
	pub checked: Option<bool>,
}

impl Step {
	fn value(&self) -> anyhow::Result<String> {
		self.value.clone().ok_or_else(|| anyhow!("{:?} needs a value", self.control))
	}
}

/// Final state of both menus.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
	pub aggregation: AggregationReport,
	pub datasources: DataSourceReport,
	/// Steps the menus did not act on, by index.
	pub unhandled: Vec<usize>,
	/// Data-source notifications in emission order.
	pub events: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationReport {
	pub display: String,
	pub query: String,
	pub aggregators: Vec<Aggregator>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceReport {
	pub display: String,
	pub query: Option<Vec<MarketDataRequest>>,
}

/// Runs every step in order, settling source fetches after each one.
pub async fn run(script: Script, config: MenuConfig) -> anyhow::Result<Report> {
	let provider = script.provider;
	let mut aggregation = AggregationMenu::new(config.aggregation, script.aggregators);
	let mut datasources = DataSourceMenu::new(config.datasources);
	let mut unhandled = Vec::new();
	let mut events = Vec::new();

	if script.prefetch_resolver_keys {
		match fetch_options(&provider, SourceKind::Historical).await {
			Ok(keys) => datasources.set_resolver_keys(keys),
			Err(error) => debug!(%error, "resolver keys unavailable"),
		}
	}

	for (index, step) in script.steps.iter().enumerate() {
		let result = match step.menu {
			MenuKind::Aggregation => {
				let control = aggregation_control(&aggregation, step)?;
				aggregation.dispatch(control)
			}
			MenuKind::Datasources => {
				let control = datasource_control(&datasources, step)?;
				datasources.dispatch(control)
			}
		}
		.with_context(|| format!("step {index}"))?;

		if !result.is_consumed() {
			debug!(index, control = ?step.control, "step unhandled");
			unhandled.push(index);
		}

		for ticket in datasources.take_fetch_tickets() {
			let options = fetch_options(&provider, ticket.kind).await;
			datasources.complete_fetch(ticket, options);
		}
		events.extend(datasources.drain_events().map(|event| event.name()));
	}

	Ok(Report {
		aggregation: AggregationReport {
			display: aggregation.display(),
			query: aggregation.get_query(),
			aggregators: aggregation.aggregators(),
		},
		datasources: DataSourceReport {
			display: datasources.render(),
			query: datasources.get_query(),
		},
		unhandled,
		events,
	})
}

fn row_at(ids: impl Fn(usize) -> Option<RowId>, step: &Step) -> anyhow::Result<RowId> {
	let position = step
		.position
		.ok_or_else(|| anyhow!("{:?} needs a position", step.control))?;
	ids(position).ok_or_else(|| anyhow!("no row at position {position}"))
}

fn aggregation_control(menu: &AggregationMenu, step: &Step) -> anyhow::Result<AggregationControl> {
	let row = || row_at(|position| menu.rows().id_at(position), step);
	Ok(match step.control {
		ControlKind::Toggle => AggregationControl::Toggle,
		ControlKind::AddRow => AggregationControl::AddRow,
		ControlKind::DeleteRow => AggregationControl::DeleteRow { row: row()? },
		ControlKind::Select => AggregationControl::Select {
			row: row()?,
			value: step.value()?,
		},
		ControlKind::Required => AggregationControl::Required {
			row: row()?,
			checked: step.checked.unwrap_or(true),
		},
		other => bail!("{other:?} is not an aggregation control"),
	})
}

fn datasource_control(menu: &DataSourceMenu, step: &Step) -> anyhow::Result<DataSourceControl> {
	let row = || row_at(|position| menu.rows().id_at(position), step);
	Ok(match step.control {
		ControlKind::Toggle => DataSourceControl::Toggle,
		ControlKind::AddRow => DataSourceControl::AddRow,
		ControlKind::DeleteRow => DataSourceControl::DeleteRow { row: row()? },
		ControlKind::SelectType => DataSourceControl::SelectType {
			row: row()?,
			value: step.value()?,
		},
		ControlKind::SelectSource => DataSourceControl::SelectSource {
			row: row()?,
			value: step.value()?,
		},
		ControlKind::CustomDate => DataSourceControl::CustomDate {
			row: row()?,
			value: step.value()?,
		},
		ControlKind::LatestDate => DataSourceControl::LatestDate { row: row()? },
		other => bail!("{other:?} is not a data-source control"),
	})
}
