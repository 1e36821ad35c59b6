//! Box-drawn table rendering for terminal reports.

use std::fmt;

/// Column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Pad on the right
    Left,
    /// Pad on the left (numbers)
    #[default]
    Right,
}

/// A rendered-on-demand text table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    align: Vec<Align>,
}

impl Table {
    /// Column headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).chain(std::iter::once(self.headers.len())).max().unwrap_or(0)
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.column_count()];
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    fn rule(f: &mut fmt::Formatter<'_>, widths: &[usize], (l, m, r): (char, char, char)) -> fmt::Result {
        write!(f, "{l}")?;
        for (i, w) in widths.iter().enumerate() {
            write!(f, "{}", "─".repeat(w + 2))?;
            write!(f, "{}", if i + 1 == widths.len() { r } else { m })?;
        }
        writeln!(f)
    }

    fn line(&self, f: &mut fmt::Formatter<'_>, widths: &[usize], row: &[String]) -> fmt::Result {
        write!(f, "│")?;
        for (i, w) in widths.iter().enumerate() {
            let cell = row.get(i).map_or("", String::as_str);
            match self.align.get(i).copied().unwrap_or_default() {
                Align::Left => write!(f, " {cell:<w$} │")?,
                Align::Right => write!(f, " {cell:>w$} │")?,
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        if widths.is_empty() {
            return Ok(());
        }
        Self::rule(f, &widths, ('┌', '┬', '┐'))?;
        if !self.headers.is_empty() {
            self.line(f, &widths, &self.headers)?;
            Self::rule(f, &widths, ('├', '┼', '┤'))?;
        }
        for row in &self.rows {
            self.line(f, &widths, row)?;
        }
        Self::rule(f, &widths, ('└', '┴', '┘'))
    }
}

/// Builder for [`Table`].
#[derive(Debug, Default)]
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    /// Start an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set column headers.
    pub fn headers<S: Into<String>>(mut self, headers: Vec<S>) -> Self {
        self.table.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Append a data row.
    pub fn row<S: Into<String>>(mut self, row: Vec<S>) -> Self {
        self.table.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Set per-column alignment; unspecified columns are right-aligned.
    pub fn align(mut self, align: Vec<Align>) -> Self {
        self.table.align = align;
        self
    }

    /// Finish the table.
    pub fn build(self) -> Table {
        self.table
    }
}

/// Format a duration in microseconds with two decimals and unit suffix.
pub fn format_micros(value: f64) -> String {
    format!("{value:.2} μs")
}

/// Format an optional value with two decimals, `NaN` when undefined.
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_renders_aligned_columns() {
        let table = TableBuilder::new()
            .headers(vec!["Clave", "Media"])
            .row(vec!["1", "10.00"])
            .row(vec!["12", "5.50"])
            .align(vec![Align::Left])
            .build();

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("Clave"));
        assert!(lines[3].starts_with("│ 1     │"));
        assert!(lines[4].contains("  5.50 │"));
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        assert_eq!(Table::default().to_string(), "");
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_micros(12.345), "12.35 μs");
        assert_eq!(format_optional(None), "NaN");
        assert_eq!(format_optional(Some(1.0)), "1.00");
    }
}
