use unicode_width::UnicodeWidthStr;

use crate::schema::Table;

/// Rough text metrics for estimating how large a rendered table card is.
#[derive(Debug, Clone)]
pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub header_padding: f64,
    pub min_node_width: f64,
    pub min_node_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            padding_x: 12.0,
            padding_y: 8.0,
            header_padding: 4.0,
            min_node_width: 160.0,
            min_node_height: 60.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Header plus one row per column; each row shows name, type and a key marker.
    pub fn table_size(&self, table: &Table) -> (f64, f64) {
        let header_width = self.text_width(&table.name);

        let max_col_width = table
            .columns
            .iter()
            .map(|c| {
                let marker = if c.is_primary_key { 3.0 } else { 0.0 };
                self.text_width(&c.name)
                    + self.text_width(&c.typ)
                    + self.char_width * (2.0 + marker)
            })
            .fold(0.0, f64::max);

        let content_width = header_width.max(max_col_width) + self.padding_x * 2.0;
        let width = content_width.max(self.min_node_width);

        let header_height = self.line_height + self.header_padding * 2.0;
        let body_height = if table.columns.is_empty() {
            0.0
        } else {
            table.columns.len() as f64 * self.line_height + self.padding_y * 2.0
        };

        let height = (header_height + body_height).max(self.min_node_height);

        (width, height)
    }
}
