//! UPDATE builder keyed by row id.

use rusqlite::{types::Value, ToSql};
use tracing::debug;

use crate::{
    connection::DbConnection,
    error::{DbError, Result},
    ident,
    query::filter::Assignments,
    traits::{ColumnName, IntoValue},
};

/// Builds `UPDATE <table> SET c1 = ?, c2 = ? ... WHERE id = ?`.
///
/// Values are bound in assignment order, followed by the row id.
pub struct UpdateQuery {
    db: DbConnection,
    table: String,
    id: Value,
    updates: Assignments,
}

impl UpdateQuery {
    pub fn table(db: DbConnection, table: impl Into<String>, id: impl IntoValue) -> Self {
        Self {
            db,
            table: table.into(),
            id: id.into_value(),
            updates: Assignments::new(),
        }
    }

    pub fn set<C: ColumnName, V: IntoValue>(mut self, col: C, value: V) -> Self {
        self.updates.push(col, value);
        self
    }

    /// Appends every entry of `assignments` to the SET list.
    pub fn set_all(mut self, assignments: &Assignments) -> Self {
        for (col, val) in assignments.iter() {
            self.updates.push(col, val.clone());
        }
        self
    }

    /// Executes the update and returns the number of rows changed.
    pub fn execute(self) -> Result<usize> {
        let (sql, params) = self.build()?;
        debug!(sql = sql.as_str(), params = params.len(), "updating rows");

        self.db.with(|conn| {
            let params_ref: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
            conn.execute(&sql, params_ref.as_slice())
        })
    }

    pub fn build(&self) -> Result<(String, Vec<Value>)> {
        let table = ident::table(&self.table)?;
        if self.updates.is_empty() {
            return Err(DbError::EmptyAssignment(table.to_string()));
        }

        let mut params = Vec::with_capacity(self.updates.len() + 1);
        let sets = self.updates.assignments(&mut params)?;
        params.push(self.id.clone());

        Ok((format!("UPDATE {table} SET {sets} WHERE id = ?"), params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_db;

    #[test]
    fn test_build_binds_id_last() {
        let db = setup_db();
        let (sql, params) = UpdateQuery::table(db, "tasks", 2)
            .set("status", "started")
            .set("end_date", "2020-05-12")
            .build()
            .unwrap();

        assert_eq!(sql, "UPDATE tasks SET status = ?, end_date = ? WHERE id = ?");
        assert_eq!(
            params,
            vec![
                Value::Text("started".into()),
                Value::Text("2020-05-12".into()),
                Value::Integer(2),
            ]
        );
    }

    #[test]
    fn test_empty_assignment_rejected() {
        let db = setup_db();
        let err = UpdateQuery::table(db, "tasks", 1).build().unwrap_err();
        assert!(matches!(err, DbError::EmptyAssignment(ref t) if t == "tasks"));
    }

    #[test]
    fn test_execute_nonexistent_id_affects_nothing() {
        let db = setup_db();
        let affected = UpdateQuery::table(db, "projects", 42)
            .set("name", "ghost")
            .execute()
            .unwrap();
        assert_eq!(affected, 0);
    }
}
