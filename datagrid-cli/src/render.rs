//! Plain-text rendering of a grid view.

use std::fmt::Write;

use datagrid_lib::grid::GridView;
use datagrid_lib::query::SortDirection;

const GAP: &str = "  ";

/// Render the header, visible rows and a summary as an aligned table.
pub fn render_table<T>(view: &GridView<'_, T>, selected: &[String]) -> String {
    let mut out = String::new();

    let mut widths: Vec<usize> = view
        .header
        .iter()
        .map(|h| h.title.chars().count() + sort_marker(h.sort).len())
        .collect();
    for row in &view.rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.text.chars().count());
        }
    }

    let control = view.control_width.is_some();
    let mut line = String::new();
    if control {
        line.push_str("   ");
        line.push_str(GAP);
    }
    for (header, &width) in view.header.iter().zip(&widths) {
        let title = format!("{}{}", header.title, sort_marker(header.sort));
        let _ = write!(line, "{:<width$}{}", title, GAP, width = width);
    }
    push_line(&mut out, &line);

    let rule: usize = widths.iter().map(|w| w + GAP.len()).sum::<usize>()
        + if control { 3 + GAP.len() } else { 0 };
    push_line(&mut out, &"-".repeat(rule.saturating_sub(GAP.len())));

    if let Some(empty) = view.empty_text {
        push_line(&mut out, empty);
    }

    for row in &view.rows {
        let mut line = String::new();
        if control {
            line.push_str(if row.selected { "[x]" } else { "[ ]" });
            line.push_str(GAP);
        }
        for (cell, &width) in row.cells.iter().zip(&widths) {
            let _ = write!(line, "{:<width$}{}", cell.text, GAP, width = width);
        }
        push_line(&mut out, &line);
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "{} (page {}/{})",
        view.page.summary(),
        view.page.current_page,
        view.page.page_count.max(1)
    );
    if !selected.is_empty() {
        let _ = writeln!(out, "selected: {}", selected.join(", "));
    }
    out
}

fn sort_marker(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Ascend) => " ^",
        Some(SortDirection::Descend) => " v",
        None => "",
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}
