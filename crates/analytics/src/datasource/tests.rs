use chrono::NaiveDate;
use dropmenu_config::DataSourceLabels;
use dropmenu_entries::{Choice, RowId};
use dropmenu_lifecycle::{EventResult, MenuHandler};
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::{
	DataSourceControl, DataSourceEvent, DataSourceMenu, DateMode, DateQualifier, DateVariant, MarketDataRequest,
	SourceKind,
};
use crate::{FetchError, MenuError};

fn menu() -> DataSourceMenu {
	DataSourceMenu::new(DataSourceLabels::default())
}

fn first(menu: &DataSourceMenu) -> RowId {
	menu.rows().first().unwrap()
}

fn choose_type(menu: &mut DataSourceMenu, row: RowId, value: &str) {
	menu.dispatch(DataSourceControl::SelectType { row, value: value.into() })
		.unwrap();
}

fn fulfil(menu: &mut DataSourceMenu, options: &[&str]) {
	for ticket in menu.take_fetch_tickets() {
		let options = options.iter().map(|s| s.to_string()).collect();
		menu.complete_fetch(ticket, Ok(options));
	}
}

fn choose_source(menu: &mut DataSourceMenu, row: RowId, value: &str) -> EventResult {
	menu.dispatch(DataSourceControl::SelectSource { row, value: value.into() })
		.unwrap()
}

#[test]
fn test_type_selection_queues_fetch_without_entry() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "Live");
	let tickets = menu.take_fetch_tickets();
	assert_eq!(tickets.len(), 1);
	assert_eq!(tickets[0].kind, SourceKind::Live);
	assert_eq!(tickets[0].row, row);
	assert!(menu.entries().is_empty());
	assert_eq!(menu.get_query(), None);
}

#[test]
fn test_live_source_builds_request() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "live");
	fulfil(&mut menu, &["BLOOMBERG", "REUTERS"]);
	assert_eq!(menu.row(row).unwrap().decorated, Some(SourceKind::Live));

	assert_eq!(choose_source(&mut menu, row, "BLOOMBERG"), EventResult::Consumed);
	assert_eq!(menu.render(), "live:BLOOMBERG");
	assert_eq!(
		menu.get_query(),
		Some(vec![MarketDataRequest::Live {
			source: "BLOOMBERG".into()
		}])
	);
	assert!(menu.row(row).unwrap().extras.enabled);
}

#[test]
fn test_snapshot_request_uses_snapshot_id() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "snapshot");
	fulfil(&mut menu, &["EOD"]);
	choose_source(&mut menu, row, "EOD");
	assert_eq!(
		menu.get_query(),
		Some(vec![MarketDataRequest::Snapshot {
			snapshot_id: "EOD".into()
		}])
	);
}

#[test]
fn test_historical_uses_cached_resolver_keys() {
	let mut menu = menu();
	menu.set_resolver_keys(vec!["DEFAULT".into()]);
	let row = first(&menu);
	choose_type(&mut menu, row, "historical");
	assert!(menu.take_fetch_tickets().is_empty());
	assert_eq!(menu.row(row).unwrap().options, vec!["DEFAULT".to_string()]);
	assert_eq!(menu.row(row).unwrap().extras.variant, Some(DateVariant::Plain));
}

#[test]
fn test_historical_custom_then_latest() {
	let mut menu = menu();
	menu.set_resolver_keys(vec!["DEFAULT".into()]);
	let row = first(&menu);
	choose_type(&mut menu, row, "historical");
	choose_source(&mut menu, row, "DEFAULT");
	assert_eq!(
		menu.get_query(),
		Some(vec![MarketDataRequest::LatestHistorical {
			resolver_key: "DEFAULT".into()
		}])
	);

	menu.dispatch(DataSourceControl::CustomDate {
		row,
		value: "2020-01-01".into(),
	})
	.unwrap();
	assert_eq!(
		menu.get_query(),
		Some(vec![MarketDataRequest::FixedHistorical {
			date: "2020-01-01".into(),
			resolver_key: "DEFAULT".into()
		}])
	);
	let extras = &menu.row(row).unwrap().extras;
	assert_eq!(extras.mode, DateMode::Custom);
	assert_eq!(extras.custom_text, "2020-01-01");

	menu.dispatch(DataSourceControl::LatestDate { row }).unwrap();
	assert_eq!(
		menu.get_query(),
		Some(vec![MarketDataRequest::LatestHistorical {
			resolver_key: "DEFAULT".into()
		}])
	);
	let extras = &menu.row(row).unwrap().extras;
	assert_eq!(extras.mode, DateMode::Latest);
	assert_eq!(extras.custom_text, "Custom");
}

#[rstest]
#[case(DateVariant::Version, DateQualifier::Version(NaiveDate::from_ymd_opt(2021, 3, 4).unwrap()))]
#[case(DateVariant::Correction, DateQualifier::Correction("2021-03-04".into()))]
#[case(DateVariant::Plain, DateQualifier::Date("2021-03-04".into()))]
fn test_date_variant_sets_single_qualifier(#[case] variant: DateVariant, #[case] expected: DateQualifier) {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "snapshot");
	fulfil(&mut menu, &["EOD"]);
	menu.set_date_variant(row, Some(variant)).unwrap();
	choose_source(&mut menu, row, "EOD");

	let result = menu.set_custom_date(row, "2021-03-04").unwrap();
	assert_eq!(result, EventResult::Consumed);
	let entry = menu.entries().find(0).unwrap();
	assert_eq!(entry.qualifier, Some(expected));

	menu.set_latest(row).unwrap();
	let entry = menu.entries().find(0).unwrap();
	assert_eq!(entry.qualifier, None);
	assert_eq!(entry.date(), None);
	assert_eq!(entry.version_date(), None);
	assert_eq!(entry.correction_date(), None);
}

#[test]
fn test_switching_date_variant_drops_previous_date() {
	let mut menu = menu();
	menu.set_resolver_keys(vec!["DEFAULT".into()]);
	let row = first(&menu);
	choose_type(&mut menu, row, "historical");
	choose_source(&mut menu, row, "DEFAULT");
	menu.set_custom_date(row, "2020-01-01").unwrap();
	assert_eq!(menu.entries().find(0).unwrap().date(), Some("2020-01-01"));

	menu.set_date_variant(row, Some(DateVariant::Version)).unwrap();
	let entry = menu.entries().find(0).unwrap();
	assert_eq!(entry.qualifier, None);
	let extras = &menu.row(row).unwrap().extras;
	assert_eq!(extras.mode, DateMode::Latest);
	assert_eq!(extras.custom_text, "Custom");
	assert!(extras.enabled);

	menu.set_custom_date(row, "2021-03-04").unwrap();
	let entry = menu.entries().find(0).unwrap();
	assert_eq!(entry.version_date(), NaiveDate::from_ymd_opt(2021, 3, 4));
	assert_eq!(entry.date(), None);
	assert_eq!(
		menu.get_query(),
		Some(vec![MarketDataRequest::LatestHistorical {
			resolver_key: "DEFAULT".into()
		}])
	);
}

#[test]
fn test_same_date_variant_keeps_custom_date() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "snapshot");
	fulfil(&mut menu, &["EOD"]);
	menu.set_date_variant(row, Some(DateVariant::Correction)).unwrap();
	choose_source(&mut menu, row, "EOD");
	menu.set_custom_date(row, "2021-03-04").unwrap();

	menu.set_date_variant(row, Some(DateVariant::Correction)).unwrap();
	assert_eq!(menu.entries().find(0).unwrap().correction_date(), Some("2021-03-04"));
	assert_eq!(menu.row(row).unwrap().extras.mode, DateMode::Custom);
}

#[test]
fn test_invalid_version_date_is_rejected() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "snapshot");
	fulfil(&mut menu, &["EOD"]);
	menu.set_date_variant(row, Some(DateVariant::Version)).unwrap();
	choose_source(&mut menu, row, "EOD");

	let err = menu.set_custom_date(row, "04/03/2021").unwrap_err();
	assert!(matches!(err, MenuError::InvalidDate { ref value, .. } if value == "04/03/2021"));
	assert_eq!(menu.entries().find(0).unwrap().qualifier, None);
}

#[test]
fn test_custom_date_needs_entry() {
	let mut menu = menu();
	menu.set_resolver_keys(vec!["DEFAULT".into()]);
	let row = first(&menu);
	choose_type(&mut menu, row, "historical");
	let result = menu.set_custom_date(row, "2020-01-01").unwrap();
	assert_eq!(result, EventResult::Unhandled);
}

#[test]
fn test_source_placeholder_removes_entry() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "live");
	fulfil(&mut menu, &["BLOOMBERG"]);
	choose_source(&mut menu, row, "BLOOMBERG");
	choose_source(&mut menu, row, "select data source...");

	assert_eq!(menu.get_query(), None);
	assert_eq!(menu.render(), "select data source...");
	let state = menu.row(row).unwrap();
	assert!(!state.extras.enabled);
	assert_eq!(state.decorated, Some(SourceKind::Live), "options stay for reselection");
}

#[test]
fn test_source_outside_options_is_unhandled() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "live");
	assert_eq!(choose_source(&mut menu, row, "BLOOMBERG"), EventResult::Unhandled);
	fulfil(&mut menu, &["REUTERS"]);
	assert_eq!(choose_source(&mut menu, row, "BLOOMBERG"), EventResult::Unhandled);
	assert!(menu.entries().is_empty());
}

#[test]
fn test_type_placeholder_resets_row() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "live");
	fulfil(&mut menu, &["BLOOMBERG"]);
	choose_source(&mut menu, row, "BLOOMBERG");
	menu.drain_events().for_each(drop);

	choose_type(&mut menu, row, "select type...");
	assert!(menu.entries().is_empty());
	let state = menu.row(row).unwrap();
	assert_eq!(state.kind, None);
	assert_eq!(state.decorated, None);
	assert!(state.options.is_empty());
	assert_eq!(menu.drain_events().collect::<Vec<_>>(), vec![DataSourceEvent::TypeReset { row }]);
}

#[test]
fn test_retyping_decorated_row_drops_entry() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "live");
	fulfil(&mut menu, &["BLOOMBERG"]);
	choose_source(&mut menu, row, "BLOOMBERG");

	choose_type(&mut menu, row, "snapshot");
	assert!(menu.entries().is_empty());
	assert_eq!(menu.row(row).unwrap().decorated, None);
	assert_eq!(menu.row(row).unwrap().kind, Some(SourceKind::Snapshot));
}

#[test]
fn test_stale_fetch_is_discarded() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "live");
	let live = menu.take_fetch_tickets().remove(0);
	choose_type(&mut menu, row, "snapshot");
	let snapshot = menu.take_fetch_tickets().remove(0);

	assert!(!menu.complete_fetch(live, Ok(vec!["BLOOMBERG".into()])));
	assert!(menu.row(row).unwrap().options.is_empty());
	assert!(menu.complete_fetch(snapshot, Ok(vec!["EOD".into()])));
	assert_eq!(menu.row(row).unwrap().options, vec!["EOD".to_string()]);
}

#[test]
fn test_redelivered_fetch_keeps_chosen_source() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "live");
	let ticket = menu.take_fetch_tickets().remove(0);
	assert!(menu.complete_fetch(ticket, Ok(vec!["BLOOMBERG".into()])));
	choose_source(&mut menu, row, "BLOOMBERG");

	assert!(!menu.complete_fetch(ticket, Ok(vec!["BLOOMBERG".into()])));
	let state = menu.row(row).unwrap();
	assert_eq!(state.source, Choice::Value("BLOOMBERG".into()));
	assert!(state.extras.enabled);
	assert_eq!(
		menu.get_query(),
		Some(vec![MarketDataRequest::Live {
			source: "BLOOMBERG".into()
		}])
	);
}

#[test]
fn test_completed_ticket_cannot_repopulate() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "live");
	let ticket = menu.take_fetch_tickets().remove(0);
	assert!(menu.complete_fetch(ticket, Ok(vec!["BLOOMBERG".into()])));
	assert!(!menu.complete_fetch(ticket, Ok(vec!["REUTERS".into()])));
	assert_eq!(menu.row(row).unwrap().options, vec!["BLOOMBERG".to_string()]);
}

#[test]
fn test_fetch_for_deleted_row_is_discarded() {
	let mut menu = menu();
	let row1 = menu.add_row();
	choose_type(&mut menu, row1, "live");
	let ticket = menu.take_fetch_tickets().remove(0);
	menu.delete_row(row1).unwrap();
	assert!(!menu.complete_fetch(ticket, Ok(vec!["BLOOMBERG".into()])));
}

#[test]
fn test_failed_fetch_leaves_row_empty() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "live");
	let ticket = menu.take_fetch_tickets().remove(0);
	assert!(!menu.complete_fetch(ticket, Err(FetchError::Unavailable("503".into()))));
	assert_eq!(menu.row(row).unwrap().decorated, None);
	assert!(menu.row(row).unwrap().options.is_empty());
}

#[test]
fn test_historical_fetch_caches_keys() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "historical");
	fulfil(&mut menu, &["DEFAULT", "BBG"]);
	assert_eq!(menu.resolver_keys(), Some(&["DEFAULT".to_string(), "BBG".to_string()][..]));

	let row1 = menu.add_row();
	choose_type(&mut menu, row1, "historical");
	assert!(menu.take_fetch_tickets().is_empty());
}

#[test]
fn test_delete_renumbers_and_keeps_order() {
	let mut menu = menu();
	menu.set_resolver_keys(vec!["DEFAULT".into()]);
	let row0 = first(&menu);
	let row1 = menu.add_row();
	let row2 = menu.add_row();
	for row in [row0, row1, row2] {
		choose_type(&mut menu, row, "historical");
	}
	choose_source(&mut menu, row0, "DEFAULT");
	choose_source(&mut menu, row2, "DEFAULT");
	menu.set_custom_date(row2, "2019-12-31").unwrap();

	menu.dispatch(DataSourceControl::DeleteRow { row: row1 }).unwrap();
	assert_eq!(menu.entries().positions(), vec![0, 1]);
	assert_eq!(
		menu.get_query(),
		Some(vec![
			MarketDataRequest::LatestHistorical {
				resolver_key: "DEFAULT".into()
			},
			MarketDataRequest::FixedHistorical {
				date: "2019-12-31".into(),
				resolver_key: "DEFAULT".into()
			},
		])
	);
	assert!(menu.drain_events().any(|event| event == DataSourceEvent::RowsRepositioned));
}

#[test]
fn test_delete_last_row_resets_state() {
	let mut menu = menu();
	let row = first(&menu);
	choose_type(&mut menu, row, "live");
	fulfil(&mut menu, &["BLOOMBERG"]);
	choose_source(&mut menu, row, "BLOOMBERG");

	menu.dispatch(DataSourceControl::DeleteRow { row }).unwrap();
	assert_eq!(menu.rows().len(), 1);
	assert_eq!(menu.get_query(), None);
	let state = menu.row(row).unwrap();
	assert_eq!(state.kind, None);
	assert_eq!(state.source, Choice::Placeholder);
}

#[test]
fn test_unknown_type_is_unhandled() {
	let mut menu = menu();
	let row = first(&menu);
	let result = menu
		.dispatch(DataSourceControl::SelectType {
			row,
			value: "forecast".into(),
		})
		.unwrap();
	assert_eq!(result, EventResult::Unhandled);
	assert!(menu.take_fetch_tickets().is_empty());
}

#[test]
fn test_render_joins_type_and_source() {
	let mut menu = menu();
	let row0 = first(&menu);
	let row1 = menu.add_row();
	choose_type(&mut menu, row1, "snapshot");
	choose_type(&mut menu, row0, "live");
	for ticket in menu.take_fetch_tickets() {
		let options = match ticket.kind {
			SourceKind::Live => vec!["BLOOMBERG".to_string()],
			_ => vec!["EOD".to_string()],
		};
		menu.complete_fetch(ticket, Ok(options));
	}
	choose_source(&mut menu, row1, "EOD");
	choose_source(&mut menu, row0, "BLOOMBERG");
	assert_eq!(menu.render(), "live:BLOOMBERG then snapshot:EOD");
}

#[rstest]
#[case("Live", Some(SourceKind::Live))]
#[case("HISTORICAL", Some(SourceKind::Historical))]
#[case(" snapshot ", Some(SourceKind::Snapshot))]
#[case("forecast", None)]
fn test_source_kind_parse(#[case] value: &str, #[case] expected: Option<SourceKind>) {
	assert_eq!(value.parse::<SourceKind>().ok(), expected);
}
