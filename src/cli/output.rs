//! Plain-text table rendering for command output.

use std::fmt::Write;

/// Left-aligned columns, padded to the widest cell.
pub(crate) struct TextTable {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub(crate) fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        let headers: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        write_row(&mut out, &headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(&mut out, &rule, &widths);
        for row in &self.rows {
            write_row(&mut out, row, &widths);
        }
        out
    }
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

pub(crate) fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn optional(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// `Page 2 of 5 (43 rows)`
pub(crate) fn page_footer(page_index: usize, page_count: usize, total: usize) -> String {
    format!(
        "Page {} of {} ({} rows)",
        page_index + 1,
        page_count.max(1),
        total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pads_columns() {
        let mut table = TextTable::new(vec!["ID", "NAME"]);
        table.push(vec!["1".into(), "Rice".into()]);
        table.push(vec!["12".into(), "Soy sauce".into()]);

        assert_eq!(
            table.render(),
            "ID  NAME\n--  ---------\n1   Rice\n12  Soy sauce\n"
        );
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(3.0), "3");
        assert_eq!(number(1.5), "1.50");
    }

    #[test]
    fn test_page_footer_never_reports_zero_pages() {
        assert_eq!(page_footer(0, 0, 0), "Page 1 of 1 (0 rows)");
        assert_eq!(page_footer(1, 5, 43), "Page 2 of 5 (43 rows)");
    }
}
