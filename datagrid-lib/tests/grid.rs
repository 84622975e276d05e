use std::sync::Arc;
use std::sync::Mutex;

use datagrid_lib::GridError;
use datagrid_lib::export::ExportFormat;
use datagrid_lib::export::MemorySink;
use datagrid_lib::grid::DataGrid;
use datagrid_lib::grid::EventResult;
use datagrid_lib::grid::GridAction;
use datagrid_lib::grid::GridConfig;
use datagrid_lib::grid::GridEvent;
use datagrid_lib::grid::PaginationConfig;
use datagrid_lib::layout::PointerCapture;
use datagrid_lib::model::CellValue;
use datagrid_lib::model::Column;
use datagrid_lib::model::FixedSide;
use datagrid_lib::model::RowKey;
use datagrid_lib::query::SortDirection;
use datagrid_lib::selection::HeaderCheckState;
use datagrid_lib::selection::SelectionMode;
use serde_json::Value;
use serde_json::json;

fn people(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            let status = if i % 3 == 0 { "inactive" } else { "active" };
            json!({"id": i, "name": format!("user{:02}", i), "status": status, "age": 20 + (i % 7)})
        })
        .collect()
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::field("id", "ID").width(60).sortable(),
        Column::field("name", "Name").width(200).sortable(),
        Column::field("status", "Status").width(100),
        Column::field("age", "Age").width(100).sortable(),
    ]
}

fn grid(n: usize, config: GridConfig) -> DataGrid<Value> {
    DataGrid::new(columns(), people(n), config).unwrap()
}

#[test]
fn test_go_to_page_clamps_to_last_page() {
    let mut grid = grid(25, GridConfig::default().with_pagination(PaginationConfig::new(10)));

    assert_eq!(grid.go_to_page(5).unwrap(), EventResult::Consumed);
    let view = grid.view().unwrap();
    assert_eq!(view.page.current_page, 3);
    assert_eq!(view.page.page_count, 3);
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.page.summary(), "21-25 of 25");
}

#[test]
fn test_page_clamps_after_filter_shrinks_rows() {
    let mut grid = grid(30, GridConfig::default().with_pagination(PaginationConfig::new(5)));
    grid.go_to_page(6).unwrap();
    grid.toggle_filter_value("status", "inactive");

    let view = grid.view().unwrap();
    assert_eq!(view.page.total, 10);
    assert_eq!(view.page.current_page, 2);
    assert!(view.rows.iter().all(|r| r.record["status"] == "inactive"));
}

#[test]
fn test_set_page_size_resets_page() {
    let mut grid = grid(30, GridConfig::default());
    grid.go_to_page(3).unwrap();
    assert_eq!(grid.set_page_size(20).unwrap(), EventResult::Consumed);

    let events = grid.drain_events();
    match events.last() {
        Some(GridEvent::PageChanged(meta)) => {
            assert_eq!(meta.current_page, 1);
            assert_eq!(meta.page_size, 20);
            assert_eq!(meta.page_count, 2);
        }
        other => panic!("expected PageChanged, got {:?}", other),
    }
}

#[test]
fn test_sorting_another_column_clears_previous() {
    let mut grid = grid(5, GridConfig::default());
    grid.toggle_sort("name");
    assert_eq!(grid.sort_state().direction_for("name"), Some(SortDirection::Ascend));

    grid.toggle_sort("age");
    assert_eq!(grid.sort_state().direction_for("name"), None);
    assert_eq!(grid.sort_state().direction_for("age"), Some(SortDirection::Ascend));

    let view = grid.view().unwrap();
    let name = view.header.iter().find(|h| h.key == "name").unwrap();
    let age = view.header.iter().find(|h| h.key == "age").unwrap();
    assert_eq!(name.aria_sort, "none");
    assert_eq!(age.aria_sort, "ascending");
}

#[test]
fn test_sort_cycle_returns_to_dataset_order() {
    let mut grid = grid(4, GridConfig::default());
    let original: Vec<usize> = grid.ordered_indices().unwrap().to_vec();

    grid.toggle_sort("id");
    grid.toggle_sort("id");
    assert_eq!(grid.ordered_indices().unwrap(), &[3, 2, 1, 0]);

    grid.toggle_sort("id");
    assert!(!grid.sort_state().is_sorted());
    assert_eq!(grid.ordered_indices().unwrap(), original.as_slice());
}

#[test]
fn test_custom_comparator_reverses_for_descend() {
    let rows = vec![
        json!({"id": 1, "name": "ccc"}),
        json!({"id": 2, "name": "a"}),
        json!({"id": 3, "name": "bb"}),
        json!({"id": 4, "name": "dd"}),
    ];
    let by_len = |a: &Value, b: &Value| {
        let len = |v: &Value| v["name"].as_str().map_or(0, str::len);
        len(a).cmp(&len(b))
    };
    let columns = vec![Column::field("name", "Name").sort_by(by_len)];
    let mut grid = DataGrid::new(columns, rows, GridConfig::default()).unwrap();

    assert_eq!(grid.toggle_sort("name"), EventResult::Consumed);
    assert_eq!(grid.ordered_indices().unwrap(), &[1, 2, 3, 0]);

    // Ties keep dataset order in both directions.
    grid.toggle_sort("name");
    assert_eq!(grid.sort_state().direction_for("name"), Some(SortDirection::Descend));
    assert_eq!(grid.ordered_indices().unwrap(), &[0, 2, 3, 1]);

    grid.toggle_sort("name");
    assert_eq!(grid.ordered_indices().unwrap(), &[0, 1, 2, 3]);
}

#[test]
fn test_column_sort_directions_override_config() {
    let columns = vec![
        Column::field("id", "ID").sortable(),
        Column::field("age", "Age")
            .sortable()
            .sort_directions(vec![SortDirection::Descend]),
    ];
    let config = GridConfig::default().with_sort_directions(vec![SortDirection::Ascend]);
    let mut grid = DataGrid::new(columns, people(4), config).unwrap();

    grid.toggle_sort("age");
    assert_eq!(grid.sort_state().direction_for("age"), Some(SortDirection::Descend));
    grid.toggle_sort("age");
    assert!(!grid.sort_state().is_sorted());

    grid.toggle_sort("id");
    assert_eq!(grid.sort_state().direction_for("id"), Some(SortDirection::Ascend));
    grid.toggle_sort("id");
    assert!(!grid.sort_state().is_sorted());
}

#[test]
fn test_toggle_sort_on_unsortable_column_is_ignored() {
    let mut grid = grid(3, GridConfig::default());
    assert_eq!(grid.toggle_sort("status"), EventResult::Ignored);
    assert_eq!(grid.toggle_sort("missing"), EventResult::Ignored);
    assert!(grid.drain_events().is_empty());
}

#[test]
fn test_filter_within_column_is_or_across_columns_is_and() {
    let mut grid = grid(12, GridConfig::default().without_pagination());
    grid.toggle_filter_value("name", "user01");
    grid.toggle_filter_value("name", "user03");
    assert_eq!(grid.ordered_indices().unwrap().len(), 2);

    grid.toggle_filter_value("status", "INACTIVE");
    assert_eq!(grid.ordered_indices().unwrap(), &[2]);

    assert_eq!(grid.reset_filter("name"), EventResult::Consumed);
    assert_eq!(grid.ordered_indices().unwrap().len(), 4);
}

#[test]
fn test_filter_menu_open_and_reset_closes() {
    let mut grid = grid(3, GridConfig::default());
    grid.open_filter_menu("status");
    assert_eq!(grid.filter_state().open_menu(), Some("status"));
    {
        let view = grid.view().unwrap();
        let status = view.header.iter().find(|h| h.key == "status").unwrap();
        assert!(status.filter_open);
    }

    grid.toggle_filter_value("status", "active");
    grid.reset_filter("status");
    assert_eq!(grid.filter_state().open_menu(), None);
    assert!(!grid.filter_state().is_active("status"));
}

#[test]
fn test_duplicate_row_keys_share_selection() {
    let rows = vec![json!({"key": "x", "v": 1}), json!({"key": "x", "v": 2})];
    let config = GridConfig::default().with_selection(SelectionMode::Multiple);
    let mut grid = DataGrid::new(vec![Column::field("v", "V")], rows, config).unwrap();

    grid.select_row("x", true);
    grid.select_row("x", true);

    assert_eq!(grid.selected_keys(), vec!["x"]);
    assert_eq!(grid.selected_records().len(), 2);
    {
        let view = grid.view().unwrap();
        assert!(view.rows.iter().all(|r| r.selected));
    }

    // Either row's checkbox flips the shared key for both.
    assert_eq!(grid.toggle_row_selection("x"), EventResult::Consumed);
    assert!(grid.selected_keys().is_empty());
    let view = grid.view().unwrap();
    assert!(view.rows.iter().all(|r| !r.selected));
}

#[test]
fn test_selection_event_carries_records() {
    let config = GridConfig::default().with_selection(SelectionMode::Multiple);
    let mut grid = grid(5, config);
    grid.toggle_row_selection("2");
    grid.toggle_row_selection("4");

    let events = grid.drain_events();
    assert_eq!(events.len(), 2);
    match &events[1] {
        GridEvent::SelectionChanged { keys, records } => {
            assert_eq!(keys, &vec!["2".to_string(), "4".to_string()]);
            assert_eq!(records.len(), 2);
            assert_eq!(records[0]["id"], 2);
        }
        other => panic!("expected SelectionChanged, got {:?}", other),
    }
}

#[test]
fn test_single_selection_replaces() {
    let mut grid = grid(5, GridConfig::default().with_selection(SelectionMode::Single));
    grid.toggle_row_selection("1");
    grid.toggle_row_selection("3");
    assert_eq!(grid.selected_keys(), vec!["3"]);

    let view = grid.view().unwrap();
    assert_eq!(view.header_check, None);
}

#[test]
fn test_header_checkbox_toggles_current_page_only() {
    let config = GridConfig::default()
        .with_pagination(PaginationConfig::new(5))
        .with_selection(SelectionMode::Multiple);
    let mut grid = grid(12, config);
    grid.toggle_row_selection("8");

    grid.toggle_page_selection().unwrap();
    assert_eq!(grid.selected_keys().len(), 6);
    assert_eq!(grid.view().unwrap().header_check, Some(HeaderCheckState::Checked));

    grid.toggle_page_selection().unwrap();
    assert_eq!(grid.selected_keys(), vec!["8"]);
    assert_eq!(grid.view().unwrap().header_check, Some(HeaderCheckState::Unchecked));

    grid.go_to_page(2).unwrap();
    assert_eq!(grid.view().unwrap().header_check, Some(HeaderCheckState::Indeterminate));
}

#[test]
fn test_unselectable_rows_are_skipped() {
    let config = GridConfig::default().with_selection(SelectionMode::Multiple);
    let mut grid = grid(6, config).with_row_selectable(|row: &Value| row["status"] == "active");

    assert_eq!(grid.toggle_row_selection("3"), EventResult::Ignored);
    grid.toggle_page_selection().unwrap();
    assert_eq!(grid.selected_keys(), vec!["1", "2", "4", "5"]);

    let view = grid.view().unwrap();
    assert_eq!(view.header_check, Some(HeaderCheckState::Checked));
    let row3 = view.rows.iter().find(|r| r.key == "3").unwrap();
    assert!(!row3.selectable);
    assert!(!row3.selected);
}

#[test]
fn test_controlled_selection_only_proposes() {
    let config = GridConfig::default().with_selection(SelectionMode::Multiple);
    let mut grid = grid(4, config).with_controlled_selection();

    grid.toggle_row_selection("1");
    assert!(grid.selected_keys().is_empty());

    let proposed = match grid.drain_events().pop() {
        Some(GridEvent::SelectionChanged { keys, .. }) => keys,
        other => panic!("expected SelectionChanged, got {:?}", other),
    };
    assert_eq!(proposed, vec!["1"]);

    grid.set_selected_keys(proposed);
    assert_eq!(grid.selected_keys(), vec!["1"]);
    assert!(grid.drain_events().is_empty());
}

#[test]
fn test_selection_disabled_ignores_clicks() {
    let mut grid = grid(3, GridConfig::default());
    assert_eq!(grid.toggle_row_selection("1"), EventResult::Ignored);
    assert_eq!(grid.toggle_page_selection().unwrap(), EventResult::Ignored);
    assert_eq!(grid.view().unwrap().control_width, None);
}

#[test]
fn test_selection_survives_sort_and_filter() {
    let config = GridConfig::default().with_selection(SelectionMode::Multiple);
    let mut grid = grid(9, config);
    grid.toggle_row_selection("3");
    grid.toggle_sort("name");
    grid.toggle_sort("name");
    grid.toggle_filter_value("status", "active");

    assert_eq!(grid.selected_keys(), vec!["3"]);
}

#[test]
fn test_expansion_respects_predicate() {
    let config = GridConfig::default().with_expandable();
    let mut grid = grid(4, config).with_row_expandable(|row: &Value| row["id"] != 2);

    assert_eq!(grid.toggle_expansion("1"), EventResult::Consumed);
    assert_eq!(grid.toggle_expansion("2"), EventResult::Ignored);
    assert!(grid.expansion().is_expanded("1"));

    match grid.drain_events().as_slice() {
        [GridEvent::ExpansionChanged { key, expanded, keys }] => {
            assert_eq!(key, "1");
            assert!(*expanded);
            assert_eq!(keys, &vec!["1".to_string()]);
        }
        other => panic!("unexpected events {:?}", other),
    }

    let view = grid.view().unwrap();
    assert_eq!(view.control_width, Some(48));
    assert!(view.rows[0].expanded);
    assert!(!view.rows[1].expandable);
}

#[test]
fn test_expansion_disabled_is_ignored() {
    let mut grid = grid(2, GridConfig::default());
    assert_eq!(grid.toggle_expansion("1"), EventResult::Ignored);
}

#[test]
fn test_resize_follows_pointer_with_floor() {
    let mut grid = grid(3, GridConfig::default().with_min_column_width(80));

    assert_eq!(grid.begin_resize("age", 500).unwrap(), EventResult::StartDrag);
    grid.resize_to(550);
    assert_eq!(grid.layout().width("age"), Some(150));

    grid.resize_to(300);
    assert_eq!(grid.layout().width("age"), Some(80));

    grid.resize_to(530);
    assert_eq!(grid.end_resize(), EventResult::Consumed);
    assert_eq!(grid.layout().width("age"), Some(130));
    assert_eq!(
        grid.drain_events(),
        vec![GridEvent::ColumnResized {
            key: "age".to_string(),
            width: 130
        }]
    );

    assert_eq!(grid.layout().width("name"), Some(200));
}

#[test]
fn test_resize_unknown_column_errors() {
    let mut grid = grid(1, GridConfig::default());
    assert!(matches!(
        grid.begin_resize("nope", 0),
        Err(GridError::UnknownColumn(_))
    ));
}

#[derive(Default, Clone)]
struct Recorder(Arc<Mutex<Vec<String>>>);

impl PointerCapture for Recorder {
    fn acquire(&mut self, subject_id: &str) {
        if let Ok(mut log) = self.0.lock() {
            log.push(format!("acquire {}", subject_id));
        }
    }

    fn release(&mut self, subject_id: &str) {
        if let Ok(mut log) = self.0.lock() {
            log.push(format!("release {}", subject_id));
        }
    }
}

#[test]
fn test_dropping_grid_mid_drag_releases_capture() {
    let recorder = Recorder::default();
    let log = recorder.0.clone();
    let mut grid = grid(1, GridConfig::default()).with_pointer_capture(recorder);

    grid.begin_resize("id", 0).unwrap();
    drop(grid);

    assert_eq!(*log.lock().unwrap(), vec!["acquire id", "release id"]);
}

#[test]
fn test_reorder_updates_view_and_sticky_offsets() {
    let columns = vec![
        Column::field("id", "ID").width(60).fixed(FixedSide::Left),
        Column::field("name", "Name").width(200).fixed(FixedSide::Left),
        Column::field("status", "Status").width(100),
    ];
    let config = GridConfig::default().with_selection(SelectionMode::Multiple);
    let mut grid = DataGrid::new(columns, people(2), config).unwrap();

    grid.begin_reorder("name").unwrap();
    assert_eq!(grid.drop_on("id"), EventResult::Consumed);
    assert_eq!(
        grid.drain_events(),
        vec![GridEvent::ColumnsReordered(vec![
            "name".to_string(),
            "id".to_string(),
            "status".to_string()
        ])]
    );

    let view = grid.view().unwrap();
    let keys: Vec<&str> = view.header.iter().map(|h| h.key).collect();
    assert_eq!(keys, vec!["name", "id", "status"]);
    assert_eq!(view.sticky.control, Some(0));
    assert_eq!(view.header[0].sticky_offset, Some(48));
    assert_eq!(view.header[1].sticky_offset, Some(248));
    assert_eq!(view.header[2].sticky_offset, None);
    assert_eq!(view.rows[0].cells[0].column_key, "name");
    assert_eq!(view.total_width, 48 + 360);
}

#[test]
fn test_drop_on_self_is_ignored() {
    let mut grid = grid(1, GridConfig::default());
    grid.begin_reorder("id").unwrap();
    assert_eq!(grid.drop_on("id"), EventResult::Ignored);
    assert!(grid.layout().drag().is_none());
}

#[test]
fn test_virtualized_view_renders_window_only() {
    let config = GridConfig::default()
        .without_pagination()
        .with_row_height(40)
        .with_viewport_height(400)
        .with_buffer_rows(5);
    let mut grid = grid(1000, config);
    grid.scroll_to(4000);

    let view = grid.view().unwrap();
    assert_eq!(view.window.start_index, 95);
    assert_eq!(view.window.end_index, 115);
    assert_eq!(view.rows.len(), 20);
    assert_eq!(view.rows[0].position, 95);
    assert_eq!(view.window.top_padding, 3800);
    assert_eq!(
        view.window.top_padding + 20 * 40 + view.window.bottom_padding,
        1000 * 40
    );
}

#[test]
fn test_scroll_clamps_when_page_shrinks() {
    let config = GridConfig::default()
        .without_pagination()
        .with_row_height(48)
        .with_viewport_height(480)
        .with_buffer_rows(2);
    let mut grid = grid(1000, config);
    grid.scroll_to(48 * 500);
    assert_eq!(grid.view().unwrap().window.start_index, 498);

    grid.toggle_filter_value("name", "user0");
    let view = grid.view().unwrap();
    assert_eq!(view.page.total, 9);
    assert_eq!(view.rows.len(), 9);
    assert_eq!(view.window.top_padding, 0);
    assert_eq!(view.empty_text, None);
    drop(view);
    assert_eq!(grid.scroll_top(), 0);

    grid.reset_filter("name");
    grid.scroll_to(48 * 900);
    grid.set_rows(people(20));
    let view = grid.view().unwrap();
    assert_eq!(view.window.range(), 8..20);
    assert_eq!(view.rows.len(), 12);
    drop(view);
    assert_eq!(grid.scroll_top(), 20 * 48 - 480);
}

#[test]
fn test_huge_fixed_widths_do_not_overflow_view() {
    let columns = vec![
        Column::field("id", "ID").fixed(FixedSide::Left),
        Column::field("name", "Name").fixed(FixedSide::Left),
        Column::field("status", "Status"),
    ];
    let config = GridConfig::default().with_selection(SelectionMode::Multiple);
    let mut grid = DataGrid::new(columns, people(2), config).unwrap();
    grid.set_column_width("id", 3_000_000_000).unwrap();
    grid.set_column_width("name", 3_000_000_000).unwrap();

    let view = grid.view().unwrap();
    assert_eq!(view.header[1].sticky_offset, Some(3_000_000_048));
    assert_eq!(view.total_width, u32::MAX);
    assert_eq!(view.rows.len(), 2);
}

#[test]
fn test_scroll_without_viewport_is_ignored() {
    let mut grid = grid(10, GridConfig::default());
    assert_eq!(grid.scroll_to(100), EventResult::Ignored);
    assert_eq!(grid.scroll_top(), 0);
}

#[test]
fn test_empty_view_shows_placeholder() {
    let mut grid = grid(5, GridConfig::default().with_empty_text("Nothing here"));
    grid.toggle_filter_value("name", "zzz");

    let view = grid.view().unwrap();
    assert!(view.is_empty());
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_text, Some("Nothing here"));
    assert_eq!(view.page.current_page, 1);
}

#[test]
fn test_export_covers_all_pages_in_display_order() {
    let config = GridConfig::default().with_pagination(PaginationConfig::new(2));
    let mut grid = grid(9, config);
    grid.toggle_filter_value("status", "inactive");
    grid.toggle_sort("id");
    grid.toggle_sort("id");

    let mut sink = MemorySink::new();
    let location = grid.export(ExportFormat::Csv, &mut sink).unwrap();
    let file = sink.last().unwrap();

    assert!(location.starts_with("memory:table-export-"));
    assert!(file.filename.ends_with(".csv"));
    assert_eq!(file.row_count, 3);

    let text = String::from_utf8(file.bytes.clone()).unwrap();
    let lines: Vec<&str> = text.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], r#""ID","Name","Status","Age""#);
    assert!(lines[1].starts_with(r#""9","user09""#));

    assert!(matches!(
        grid.drain_events().last(),
        Some(GridEvent::Exported { row_count: 3, .. })
    ));
}

#[test]
fn test_export_json_uses_raw_rows() {
    let mut grid = grid(3, GridConfig::default());
    grid.toggle_filter_value("name", "user02");
    let file = grid.export_file(ExportFormat::Json, 1_700_000_000_000).unwrap();

    assert_eq!(file.filename, "table-export-1700000000000.json");
    let parsed: Value = serde_json::from_slice(&file.bytes).unwrap();
    assert_eq!(parsed, json!([{"id": 2, "name": "user02", "status": "active", "age": 22}]));
}

#[test]
fn test_export_csv_follows_visual_column_order() {
    let mut grid = grid(1, GridConfig::default());
    grid.move_column("age", "id");
    let file = grid.export_file(ExportFormat::Csv, 0).unwrap();
    let text = String::from_utf8(file.bytes).unwrap();
    assert!(text.starts_with(r#""Age","ID","Name","Status""#));
}

#[test]
fn test_custom_row_key_and_renderer() {
    let columns = vec![
        Column::field("name", "Name").render(|value: &CellValue, _row: &Value, _i| {
            value.to_string().to_uppercase()
        }),
    ];
    let mut grid = DataGrid::new(columns, people(2), GridConfig::default())
        .unwrap()
        .with_row_key(RowKey::from_fn(|row: &Value| format!("person-{}", row["id"])));

    let view = grid.view().unwrap();
    assert_eq!(view.row_keys(), vec!["person-1", "person-2"]);
    assert_eq!(view.rows[0].cells[0].text, "USER01");
}

#[test]
fn test_accessor_failure_surfaces_from_view() {
    let columns = vec![Column::computed("Broken", |_row: &Value| {
        Err::<CellValue, _>("boom".to_string())
    })];
    let mut grid = DataGrid::new(columns, people(1), GridConfig::default()).unwrap();

    match grid.view() {
        Err(GridError::Accessor { column, row_index, message }) => {
            assert_eq!(column, "column-0");
            assert_eq!(row_index, 0);
            assert_eq!(message, "boom");
        }
        other => panic!("expected accessor error, got {:?}", other.map(|v| v.rows.len())),
    }
}

#[test]
fn test_dispatch_matches_direct_calls() {
    let config = GridConfig::default().with_selection(SelectionMode::Multiple);
    let mut grid = grid(6, config);

    let actions = vec![
        GridAction::ToggleSort("age".to_string()),
        GridAction::ToggleFilterValue {
            column: "status".to_string(),
            value: "active".to_string(),
        },
        GridAction::ToggleRow("1".to_string()),
        GridAction::GoToPage(1),
    ];
    let results: Vec<EventResult> = actions
        .into_iter()
        .map(|a| grid.dispatch(a).unwrap())
        .collect();

    assert_eq!(
        results,
        vec![
            EventResult::Consumed,
            EventResult::Consumed,
            EventResult::Consumed,
            EventResult::Ignored
        ]
    );
    assert_eq!(grid.drain_events().len(), 3);
}

#[test]
fn test_default_seeds_apply() {
    let config = GridConfig::default()
        .with_selection(SelectionMode::Multiple)
        .with_expandable()
        .with_selected_keys(vec!["2".to_string()])
        .with_expanded_keys(vec!["3".to_string()])
        .with_default_sort(datagrid_lib::query::SortOrder::descend("id"));
    let mut grid = grid(3, config);

    let view = grid.view().unwrap();
    assert_eq!(view.row_keys(), vec!["3", "2", "1"]);
    assert!(view.rows[1].selected);
    assert!(view.rows[0].expanded);
}

#[test]
fn test_set_rows_keeps_state_by_key() {
    let config = GridConfig::default().with_selection(SelectionMode::Multiple);
    let mut grid = grid(3, config);
    grid.toggle_row_selection("2");
    grid.set_rows(people(5));

    let view = grid.view().unwrap();
    assert_eq!(view.rows.len(), 5);
    assert!(view.rows[1].selected);
}

#[test]
fn test_set_columns_keeps_known_layout() {
    let mut grid = grid(3, GridConfig::default());
    grid.set_column_width("name", 300).unwrap();
    grid.move_column("age", "id");

    grid.set_columns(vec![
        Column::field("id", "ID").width(60),
        Column::field("name", "Name").width(200),
        Column::field("age", "Age").width(100),
        Column::field("email", "Email").width(250),
    ]);

    assert_eq!(grid.layout().order(), &["age", "id", "name", "email"]);
    assert_eq!(grid.layout().width("name"), Some(300));
    assert_eq!(grid.layout().width("email"), Some(250));
    assert_eq!(grid.layout().width("status"), None);

    let view = grid.view().unwrap();
    let keys: Vec<&str> = view.header.iter().map(|h| h.key).collect();
    assert_eq!(keys, vec!["age", "id", "name", "email"]);
    assert_eq!(view.rows[0].cells.len(), 4);
    assert_eq!(view.rows[0].cells[3].text, "");
}
