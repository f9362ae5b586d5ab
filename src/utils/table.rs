/// Column alignment inside a [`Table`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Plain-text table for terminal output
pub struct Table {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers, all left-aligned
    pub fn new(headers: &[&str]) -> Self {
        Table {
            col_widths: headers.iter().map(|h| h.chars().count()).collect(),
            aligns: vec![Align::Left; headers.len()],
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn align(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.aligns.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// Add a row; cells beyond the header count are dropped
    pub fn add_row(&mut self, row: Vec<String>) {
        let mut row: Vec<String> = row.into_iter().take(self.headers.len()).collect();
        row.resize(self.headers.len(), String::new());

        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.chars().count());
        }
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.render_row(&self.headers));
        lines.push(self.render_separator());
        for row in &self.rows {
            lines.push(self.render_row(row));
        }
        lines.join("\n")
    }

    fn render_row(&self, row: &[String]) -> String {
        row.iter()
            .zip(&self.col_widths)
            .zip(&self.aligns)
            .map(|((cell, &width), align)| match align {
                Align::Left => format!("{:<width$}", cell, width = width),
                Align::Right => format!("{:>width$}", cell, width = width),
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}
