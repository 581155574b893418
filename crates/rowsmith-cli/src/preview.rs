use rowsmith_generate::RowSet;

const MAX_CELL_WIDTH: usize = 32;
const ELLIPSIS: &str = "...";

/// Renders rows as a left-aligned text table with a header and a rule line.
pub fn render_table(rows: &RowSet) -> String {
    let header: Vec<String> = rows.columns().iter().map(|name| clip(name)).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.values().map(|value| clip(&value.to_string())).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

fn clip(text: &str) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= MAX_CELL_WIDTH {
        return single_line;
    }
    let keep = MAX_CELL_WIDTH - ELLIPSIS.len();
    let mut clipped: String = single_line.chars().take(keep).collect();
    clipped.push_str(ELLIPSIS);
    clipped
}

#[cfg(test)]
mod tests {
    use rowsmith_generate::{CellValue, Row};

    use super::*;

    fn row(id: i64, name: &str, score: f64) -> Row {
        Row::new(vec![
            ("id".to_string(), CellValue::Int(id)),
            ("name".to_string(), CellValue::Text(name.to_string())),
            ("score".to_string(), CellValue::Float(score)),
        ])
    }

    #[test]
    fn aligns_columns_to_widest_cell() {
        let rows = RowSet::new(
            vec!["id".to_string(), "name".to_string(), "score".to_string()],
            vec![row(0, "ada", 1.5), row(1, "grace", 10.25)],
        );

        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines,
            vec![
                "id | name  | score",
                "-- | ----- | -----",
                "0  | ada   | 1.5",
                "1  | grace | 10.25",
            ]
        );
    }

    #[test]
    fn clips_long_cells() {
        let long = "x".repeat(80);
        let rows = RowSet::new(
            vec!["note".to_string()],
            vec![Row::new(vec![(
                "note".to_string(),
                CellValue::Text(long),
            )])],
        );

        let table = render_table(&rows);
        let last = table.lines().last().expect("body line");
        assert_eq!(last.chars().count(), MAX_CELL_WIDTH);
        assert!(last.ends_with(ELLIPSIS));
    }

    #[test]
    fn empty_row_set_renders_header_only() {
        let rows = RowSet::new(vec!["id".to_string()], Vec::new());
        assert_eq!(render_table(&rows), "id\n--\n");
    }
}
