//! INSERT builder.

use rusqlite::{types::Value, ToSql};
use tracing::debug;

use crate::{
    connection::DbConnection,
    error::Result,
    ident,
    traits::{ColumnName, IntoValue},
};

/// Builds `INSERT INTO <table>(c1, c2, ...) VALUES (?,?,...)`.
///
/// Errors are returned to the caller; inserts never swallow failures.
pub struct InsertQuery {
    db: DbConnection,
    table: String,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl InsertQuery {
    pub fn into(db: DbConnection, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
            columns: vec![],
            values: vec![],
        }
    }

    pub fn set<C: ColumnName, V: IntoValue>(mut self, col: C, value: V) -> Self {
        self.columns.push(col.column_name().to_string());
        self.values.push(value.into_value());
        self
    }

    /// Executes the insert and returns the new row id.
    pub fn execute(self) -> Result<i64> {
        let (sql, params) = self.build()?;
        debug!(sql = sql.as_str(), params = params.len(), "inserting row");

        self.db.with(|conn| {
            let params_ref: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
            conn.execute(&sql, params_ref.as_slice())?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn build(&self) -> Result<(String, Vec<Value>)> {
        let mut columns = Vec::with_capacity(self.columns.len());
        for col in &self.columns {
            columns.push(ident::column(col)?);
        }
        let placeholders = vec!["?"; self.values.len()].join(",");

        let sql = format!(
            "INSERT INTO {}({}) VALUES ({})",
            ident::table(&self.table)?,
            columns.join(", "),
            placeholders
        );

        Ok((sql, self.values.clone()))
    }
}
