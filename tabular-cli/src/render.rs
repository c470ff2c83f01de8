//! Plain-text table rendering.

use tabular_lib::Table;
use tabular_lib::row_model::RowModel;
use tabular_lib::sort::Direction;
use tabular_lib::sort::SortState;

use crate::demo::format_cell;

const GAP: &str = "  ";

/// Renders a row model as aligned text, marking sorted headers with ▲/▼.
///
/// Columns whose meta sets `isNumeric` are right-aligned.
pub fn render<R>(table: &Table<R>, model: &RowModel<'_, R>, sort: &SortState) -> String {
    let columns: Vec<_> = table.columns().iter().collect();

    let headers: Vec<String> = columns
        .iter()
        .map(|column| {
            let title = column.header().unwrap_or(column.id());
            match sort.direction_of(column.id()) {
                Some(Direction::Asc) => format!("{} ▲", title),
                Some(Direction::Desc) => format!("{} ▼", title),
                None => title.to_string(),
            }
        })
        .collect();

    let cells: Vec<Vec<String>> = model
        .iter()
        .map(|row| {
            row.cells()
                .map(|cell| format_cell(cell.column, cell.value))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            cells
                .iter()
                .map(|row| width(&row[i]))
                .chain(std::iter::once(width(&headers[i])))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let numeric: Vec<bool> = columns
        .iter()
        .map(|column| column.meta()["isNumeric"].as_bool().unwrap_or(false))
        .collect();

    let mut out = String::new();
    push_line(&mut out, &headers, &widths, &numeric);
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths, &numeric);
    for row in &cells {
        push_line(&mut out, row, &widths, &numeric);
    }
    out
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize], numeric: &[bool]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        let pad = " ".repeat(widths[i].saturating_sub(width(cell)));
        if numeric[i] {
            line.push_str(&pad);
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&pad);
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use tabular_lib::TableOptions;

    use super::*;
    use crate::demo;

    #[test]
    fn test_render_sorted_by_age() {
        let people = demo::load(None).unwrap();
        let table = demo::table(TableOptions::default()).unwrap();
        let sort = SortState::desc("age");
        let model = table.row_model(&people, &sort).unwrap();
        let text = render(&table, &model, &sort);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].contains("Age ▼"));
        assert!(!lines[0].contains('▲'));
        assert!(lines[2].starts_with("John Smith"));
        assert!(lines[6].starts_with("Jane Doe"));
        assert!(lines[2].contains("2023-11-01"));
    }

    #[test]
    fn test_push_line_aligns_numeric_right() {
        let mut out = String::new();
        let cells = ["Jo".to_string(), "7".to_string(), "x".to_string()];
        push_line(&mut out, &cells, &[4, 3, 3], &[false, true, false]);
        assert_eq!(out, "Jo      7  x\n");
    }
}
