//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use datagrid_lib::export::ExportFormat;
use datagrid_lib::query::SortDirection;
use datagrid_lib::query::SortOrder;
use simplelog::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "datagrid")]
#[command(about = "Sort, filter, page and export tabular JSON data", long_about = None)]
pub struct Cli {
    /// JSON array of row objects
    #[arg(long)]
    pub rows: PathBuf,

    /// Grid description: columns, config and row key field
    #[arg(long)]
    pub grid: PathBuf,

    /// Page to show (1-based, clamped)
    #[arg(long)]
    pub page: Option<usize>,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Sort column, optionally with a direction: KEY[:ascend|descend]
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortOrder>,

    /// Accept VALUE in column KEY; repeat to accept more
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Select a row by key; repeat to select more
    #[arg(long = "select")]
    pub selected: Vec<String>,

    /// Scroll offset in pixels (needs a viewport height)
    #[arg(long)]
    pub scroll_top: Option<u32>,

    /// Export every matching row instead of printing the page
    #[arg(long)]
    pub export: Option<ExportFormat>,

    /// Directory for exported files
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Log file
    #[arg(long, default_value = "datagrid.log")]
    pub log: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_sort(s: &str) -> Result<SortOrder, String> {
    let (key, direction) = match s.split_once(':') {
        Some((key, "ascend" | "asc")) => (key, SortDirection::Ascend),
        Some((key, "descend" | "desc")) => (key, SortDirection::Descend),
        Some((_, other)) => return Err(format!("unknown sort direction '{}'", other)),
        None => (s, SortDirection::Ascend),
    };
    if key.is_empty() {
        return Err("sort key is empty".to_string());
    }
    Ok(SortOrder::new(key, direction))
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}
