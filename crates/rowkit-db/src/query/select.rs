//! Filtered SELECT.

use std::marker::PhantomData;

use rusqlite::{types::Value, ToSql};
use tracing::debug;

use crate::{
    connection::DbConnection,
    error::Result,
    ident,
    query::{
        clause::{push_where, OrderClause},
        filter::Filter,
    },
    traits::{ColumnName, FromRow, IntoValue},
};

/// A SELECT builder over a single table.
///
/// Filters are equality predicates joined with `AND`; with no filters the
/// `WHERE` clause is left out and every row is returned.
///
/// # Type Parameters
///
/// - `E`: the row type (must implement [`FromRow`]); use
///   [`crate::models::Record`] for untyped rows.
///
/// # Example
///
/// ```rust
/// use rowkit_db::{filter, models::Record, DbConnection, SelectQuery};
///
/// let db = DbConnection::open_in_memory().unwrap();
/// db.with(|conn| {
///     conn.execute_batch(
///         "CREATE TABLE tasks (id INTEGER PRIMARY KEY, status TEXT);
///          INSERT INTO tasks (status) VALUES ('done'), ('started');",
///     )
/// })
/// .unwrap();
///
/// let rows = SelectQuery::<Record>::from(db, "tasks")
///     .filter(filter!(status = "done"))
///     .fetch()
///     .unwrap();
/// assert_eq!(rows.len(), 1);
/// ```
pub struct SelectQuery<E> {
    db: DbConnection,
    table: String,
    filter: Filter,
    orders: Vec<OrderClause>,
    limit: Option<u32>,
    _entity: PhantomData<E>,
}

impl<E> SelectQuery<E> {
    /// Starts a new query on the given table.
    pub fn from(db: DbConnection, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
            filter: Filter::new(),
            orders: vec![],
            limit: None,
            _entity: PhantomData,
        }
    }

    /// Appends every entry of `filter` to the WHERE conjunction.
    pub fn filter(mut self, filter: Filter) -> Self {
        for (col, val) in filter.iter() {
            self.filter.push(col, val.clone());
        }
        self
    }

    /// Appends a single `column = value` predicate.
    pub fn eq<C: ColumnName, V: IntoValue>(mut self, column: C, value: V) -> Self {
        self.filter.push(column, value);
        self
    }

    /// Adds an ORDER BY clause.
    pub fn order_by<C: ColumnName>(mut self, column: C, desc: bool) -> Self {
        self.orders.push(OrderClause {
            column: column.column_name().to_string(),
            desc,
        });
        self
    }

    /// Limit the number of results
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Builds the statement text and its bound values.
    pub fn build(&self) -> Result<(String, Vec<Value>)> {
        let mut params = vec![];
        let mut sql = format!("SELECT * FROM {}", ident::table(&self.table)?);

        let predicate = self.filter.conjunction(&mut params)?;
        push_where(&mut sql, predicate.as_deref());

        if !self.orders.is_empty() {
            let mut orders = Vec::with_capacity(self.orders.len());
            for o in &self.orders {
                orders.push(format!(
                    "{} {}",
                    ident::column(&o.column)?,
                    if o.desc { "DESC" } else { "ASC" }
                ));
            }
            sql.push_str(" ORDER BY ");
            sql.push_str(&orders.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        Ok((sql, params))
    }

    /// Counts matching rows.
    pub fn count(self) -> Result<i64> {
        let mut params = vec![];
        let mut sql = format!("SELECT COUNT(*) FROM {}", ident::table(&self.table)?);
        let predicate = self.filter.conjunction(&mut params)?;
        push_where(&mut sql, predicate.as_deref());

        debug!(sql = sql.as_str(), params = params.len(), "counting rows");

        self.db.with(|conn| {
            let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
            conn.query_row(&sql, params_ref.as_slice(), |row| row.get(0))
        })
    }
}

impl<E: FromRow> SelectQuery<E> {
    /// Runs the query and maps every row through [`FromRow`].
    pub fn fetch(self) -> Result<Vec<E>> {
        let (sql, params) = self.build()?;
        debug!(sql = sql.as_str(), params = params.len(), "selecting rows");

        self.db.with(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
            let rows = stmt.query_map(params_ref.as_slice(), E::from_row)?;
            rows.collect()
        })
    }

    /// Runs the query with `LIMIT 1`.
    pub fn fetch_one(self) -> Result<Option<E>> {
        let mut results = self.limit(1).fetch()?;
        Ok(results.pop())
    }
}
