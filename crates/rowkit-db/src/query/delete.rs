//! DELETE builder.

use rusqlite::{types::Value, ToSql};
use tracing::debug;

use crate::{
    connection::DbConnection,
    error::Result,
    ident,
    query::{clause::push_where, filter::Filter},
    traits::{ColumnName, IntoValue},
};

/// Builds `DELETE FROM <table> [WHERE c1 = ? AND ...]`.
///
/// With no filter this deletes every row; the guarded entry point for that
/// is [`crate::delete_all`].
pub struct DeleteQuery {
    db: DbConnection,
    table: String,
    filter: Filter,
}

impl DeleteQuery {
    pub fn from(db: DbConnection, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
            filter: Filter::new(),
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        for (col, val) in filter.iter() {
            self.filter.push(col, val.clone());
        }
        self
    }

    pub fn eq<C: ColumnName, V: IntoValue>(mut self, column: C, value: V) -> Self {
        self.filter.push(column, value);
        self
    }

    pub fn is_filtered(&self) -> bool {
        !self.filter.is_empty()
    }

    /// Executes the delete and returns the number of rows removed.
    pub fn execute(self) -> Result<usize> {
        let (sql, params) = self.build()?;
        debug!(sql = sql.as_str(), params = params.len(), "deleting rows");

        self.db.with(|conn| {
            let params_ref: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
            conn.execute(&sql, params_ref.as_slice())
        })
    }

    pub fn build(&self) -> Result<(String, Vec<Value>)> {
        let mut params = Vec::with_capacity(self.filter.len());
        let mut sql = format!("DELETE FROM {}", ident::table(&self.table)?);

        let predicate = self.filter.conjunction(&mut params)?;
        push_where(&mut sql, predicate.as_deref());

        Ok((sql, params))
    }

    /// The WHERE predicate as it appears in the statement, without values.
    pub fn predicate(&self) -> Result<Option<String>> {
        self.filter.conjunction(&mut Vec::new())
    }
}
