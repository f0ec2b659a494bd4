//! Comma-separated output.
//!
//! Pure string transforms, kept apart from report shaping so the quoting
//! rules can be checked on their own.

use serde_json::Value;

/// Quote `text` if it contains a comma, double quote, CR or LF, doubling
/// any inner quotes. Otherwise return it unchanged.
pub fn escape_text(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Render one JSON value as a CSV cell.
///
/// `null` is empty, scalars use their JSON text, and objects or arrays are
/// always emitted as a quoted JSON string.
pub fn escape_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => escape_text(s),
        Value::Array(_) | Value::Object(_) => {
            format!("\"{}\"", value.to_string().replace('"', "\"\""))
        }
    }
}

/// A rectangular table: one header row plus data rows of the same width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padded or truncated to the header width.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// Header and rows joined by `\n`, without a trailing newline.
    pub fn to_csv(&self) -> String {
        let header = self
            .columns
            .iter()
            .map(|c| escape_text(c))
            .collect::<Vec<_>>()
            .join(",");

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(header);
        for row in &self.rows {
            lines.push(row.iter().map(escape_cell).collect::<Vec<_>>().join(","));
        }
        lines.join("\n")
    }
}
