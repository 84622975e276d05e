mod args;
mod render;

use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use clap::Parser;
use datagrid_lib::export::DirectorySink;
use datagrid_lib::grid::DataGrid;
use datagrid_lib::grid::GridConfig;
use datagrid_lib::grid::PaginationConfig;
use datagrid_lib::model::ColumnSpec;
use datagrid_lib::model::RowKey;
use datagrid_lib::query::SortState;
use datagrid_lib::selection::SelectionMode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use simplelog::Config;
use simplelog::WriteLogger;

use crate::args::Cli;

/// Contents of the `--grid` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GridFile {
    columns: Vec<ColumnSpec>,
    config: GridConfig,
    /// Field holding the row key; falls back to `key`, `id`, then position.
    row_key: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let log_file = File::create(&cli.log)?;
    WriteLogger::init(cli.log_level(), Config::default(), log_file)?;

    let rows: Vec<Value> = read_json(&cli.rows)?;
    let grid_file: GridFile = read_json(&cli.grid)?;
    log::info!(
        "loaded {} rows and {} columns",
        rows.len(),
        grid_file.columns.len()
    );

    let mut config = grid_file.config;
    if let Some(page_size) = cli.page_size {
        config
            .pagination
            .get_or_insert_with(PaginationConfig::default)
            .page_size = page_size;
    }
    if !cli.selected.is_empty() && config.selection_mode.is_none() {
        config.selection_mode = Some(SelectionMode::Multiple);
    }

    let columns = grid_file
        .columns
        .into_iter()
        .map(ColumnSpec::into_column)
        .collect();
    let mut grid = DataGrid::new(columns, rows, config)?;
    if let Some(field) = grid_file.row_key {
        grid = grid.with_row_key(RowKey::field(field));
    }

    if let Some(order) = cli.sort {
        if !grid.columns().contains(&order.column_key) {
            log::warn!("sort column '{}' not found", order.column_key);
        }
        grid.set_sort(SortState::by(order));
    }

    let mut filters: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in cli.filters {
        filters.entry(key).or_default().push(value);
    }
    for (key, values) in filters {
        if !grid.set_filter_values(&key, values).is_handled() {
            log::warn!("filter column '{}' not found", key);
        }
    }

    for key in &cli.selected {
        if !grid.select_row(key, true).is_handled() {
            log::warn!("row '{}' not found or not selectable", key);
        }
    }

    if let Some(page) = cli.page {
        grid.go_to_page(page)?;
    }
    if let Some(scroll_top) = cli.scroll_top {
        grid.scroll_to(scroll_top);
    }

    if let Some(format) = cli.export {
        let mut sink = DirectorySink::new(&cli.out);
        let location = grid.export(format, &mut sink)?;
        println!("{}", location);
        return Ok(());
    }

    let selected = grid.selected_keys();
    let view = grid.view()?;
    print!("{}", render::render_table(&view, &selected));
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
