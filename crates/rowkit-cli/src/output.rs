use nu_ansi_term::Color::Cyan;
use rowkit_db::Value;
use tabled::{
    builder::Builder,
    settings::{themes::BorderCorrection, Panel, Style},
};
use tracing::info;

use crate::{
    error::CliResult,
    utils::{display_value, json_value, Colored},
};

/// Rows with the column names they were read under.
pub struct RowSet {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub fn new<S: AsRef<str>>(title: impl Into<String>, columns: &[S], rows: Vec<Vec<Value>>) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows,
        }
    }

    /// Column name for `idx`, falling back to its position.
    fn column(&self, idx: usize) -> String {
        self.columns
            .get(idx)
            .cloned()
            .unwrap_or_else(|| format!("column{}", idx + 1))
    }

    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object = row
                    .iter()
                    .enumerate()
                    .map(|(idx, value)| (self.column(idx), json_value(value)))
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }

    pub fn to_table(&self) -> String {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(self.columns.len());

        let mut builder = Builder::new();
        builder.push_record((0..width).map(|idx| self.column(idx)));
        for row in &self.rows {
            builder.push_record(row.iter().map(display_value));
        }

        builder
            .build()
            .with(Panel::header(self.title.as_str()))
            .with(Style::rounded())
            .with(BorderCorrection {})
            .to_string()
    }

    pub fn print(&self, json: bool) -> CliResult<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&self.to_json())?);
            return Ok(());
        }

        if self.rows.is_empty() {
            info!("No rows in {}", Colored(Cyan, &self.title));
            return Ok(());
        }

        info!("\n{}", self.to_table());
        info!("{} row(s)", self.rows.len());
        Ok(())
    }
}
