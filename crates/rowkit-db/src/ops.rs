//! Table-generic operations built on the query builders.
//!
//! Selects return their errors. Update, delete and delete-all commit after
//! the statement runs and follow the swallow-and-log policy: failures,
//! including a failed commit, are logged and come back as
//! [`Outcome::Failed`], so they never abort the caller's control flow.

use tracing::info;

use crate::{
    connection::DbConnection,
    error::{DbError, Result},
    models::Record,
    query::{Assignments, DeleteQuery, Filter, Outcome, SelectQuery, UpdateQuery},
    traits::IntoValue,
};

/// `SELECT * FROM <table> WHERE k1 = ? AND ...`; an empty filter selects all rows.
pub fn select_where(db: &DbConnection, table: &str, filter: &Filter) -> Result<Vec<Record>> {
    SelectQuery::<Record>::from(db.clone(), table)
        .filter(filter.clone())
        .fetch()
}

/// `SELECT * FROM <table>`.
pub fn select_all(db: &DbConnection, table: &str) -> Result<Vec<Record>> {
    SelectQuery::<Record>::from(db.clone(), table).fetch()
}

/// `UPDATE <table> SET ... WHERE id = ?`.
///
/// A missing row is not an error: the outcome reports zero affected rows.
pub fn update(
    db: &DbConnection,
    table: &str,
    id: impl IntoValue,
    assignments: &Assignments,
) -> Outcome {
    let outcome = Outcome::record(
        UpdateQuery::table(db.clone(), table, id)
            .set_all(assignments)
            .execute()
            .and_then(|affected| committed(db, affected)),
    );
    if let Some(affected) = outcome.affected() {
        info!("OK: updated {affected} row(s) in {table}");
    }
    outcome
}

/// `DELETE FROM <table> WHERE k1 = ? AND ...`.
///
/// An empty filter is refused with [`DbError::EmptyFilter`] rather than
/// wiping the table; use [`delete_all`] for that.
pub fn delete_where(db: &DbConnection, table: &str, filter: &Filter) -> Outcome {
    let query = DeleteQuery::from(db.clone(), table).filter(filter.clone());

    let result = if query.is_filtered() {
        query.predicate().and_then(|predicate| {
            let affected = committed(db, query.execute()?)?;
            info!(
                "Deleted from {table}, where: {}",
                predicate.unwrap_or_default()
            );
            Ok(affected)
        })
    } else {
        Err(DbError::EmptyFilter(table.to_string()))
    };

    Outcome::record(result)
}

/// `DELETE FROM <table>`.
pub fn delete_all(db: &DbConnection, table: &str) -> Outcome {
    let outcome = Outcome::record(
        DeleteQuery::from(db.clone(), table)
            .execute()
            .and_then(|affected| committed(db, affected)),
    );
    if outcome.is_done() {
        info!("Deleted all records from {table}");
    }
    outcome
}

fn committed(db: &DbConnection, affected: usize) -> Result<usize> {
    db.commit()?;
    Ok(affected)
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value;

    use super::*;
    use crate::{
        filter,
        repository::project::{add_project, add_task, select_task_by_status},
        schema::execute_sql,
        test_utils::setup_db,
    };

    fn seed(db: &DbConnection) -> i64 {
        let project = add_project(db, ("English review", "2020-05-11", "2020-05-13")).unwrap();
        add_task(
            db,
            (project, "Regular verbs", "Page 30", "started", "2020-05-11 12:00:00", "2020-05-11 15:00:00"),
        )
        .unwrap();
        add_task(
            db,
            (project, "Irregular verbs", "Page 31", "done", "2020-05-12 12:00:00", "2020-05-12 15:00:00"),
        )
        .unwrap();
        project
    }

    #[test]
    fn test_select_where_by_id() {
        let db = setup_db();
        let id = seed(&db);
        assert_eq!(id, 1);

        let rows = select_where(&db, "projects", &filter!(id = 1)).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].values(),
            &[
                Value::Integer(1),
                Value::Text("English review".into()),
                Value::Text("2020-05-11".into()),
                Value::Text("2020-05-13".into()),
            ]
        );
    }

    #[test]
    fn test_select_where_empty_filter_matches_select_all() {
        let db = setup_db();
        seed(&db);

        let filtered = select_where(&db, "tasks", &Filter::new()).unwrap();
        let all = select_all(&db, "tasks").unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered, all);
    }

    #[test]
    fn test_update_changes_row() {
        let db = setup_db();
        seed(&db);

        let outcome = update(&db, "tasks", 1, &filter!(status = "done"));
        assert_eq!(outcome.affected(), Some(1));

        assert_eq!(select_task_by_status(&db, "done").unwrap().len(), 2);
    }

    #[test]
    fn test_update_nonexistent_id_is_not_failure() {
        let db = setup_db();
        seed(&db);

        let outcome = update(&db, "tasks", 999, &filter!(status = "done"));
        assert!(outcome.is_done());
        assert_eq!(outcome.affected(), Some(0));
    }

    #[test]
    fn test_update_bad_column_is_swallowed() {
        let db = setup_db();
        seed(&db);

        let outcome = update(&db, "tasks", 1, &filter!(no_such_column = 1));
        assert!(matches!(outcome.error(), Some(DbError::QueryError(_))));

        let outcome = update(&db, "tasks", 1, &Assignments::new());
        assert!(matches!(outcome.error(), Some(DbError::EmptyAssignment(_))));
    }

    #[test]
    fn test_update_constraint_violation_is_swallowed() {
        let db = setup_db();
        seed(&db);

        let outcome = update(&db, "tasks", 1, &filter!(status = None::<String>));
        assert!(!outcome.is_done());
    }

    #[test]
    fn test_delete_where_then_select_by_status() {
        let db = setup_db();
        seed(&db);

        let outcome = delete_where(&db, "tasks", &filter!(status = "done"));
        assert_eq!(outcome.affected(), Some(1));

        assert!(select_task_by_status(&db, "done").unwrap().is_empty());
        assert_eq!(select_task_by_status(&db, "started").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_where_multiple_predicates() {
        let db = setup_db();
        seed(&db);

        let outcome = delete_where(
            &db,
            "tasks",
            &filter!(status = "started", name = "Irregular verbs"),
        );
        assert_eq!(outcome.affected(), Some(0));
        assert_eq!(select_all(&db, "tasks").unwrap().len(), 2);
    }

    #[test]
    fn test_delete_where_empty_filter_refused() {
        let db = setup_db();
        seed(&db);

        let outcome = delete_where(&db, "tasks", &Filter::new());
        assert!(matches!(outcome.error(), Some(DbError::EmptyFilter(_))));
        assert_eq!(select_all(&db, "tasks").unwrap().len(), 2);
    }

    #[test]
    fn test_delete_all_then_select_is_empty() {
        let db = setup_db();
        seed(&db);

        let outcome = delete_all(&db, "tasks");
        assert_eq!(outcome.affected(), Some(2));

        assert!(select_where(&db, "tasks", &filter!(status = "started"))
            .unwrap()
            .is_empty());
        assert!(select_all(&db, "tasks").unwrap().is_empty());
    }

    #[test]
    fn test_delete_all_unknown_table_is_swallowed() {
        let db = setup_db();
        let outcome = delete_all(&db, "missing");
        assert!(matches!(outcome.error(), Some(DbError::QueryError(_))));
    }

    fn project_name(db: &DbConnection, id: i64) -> Option<Value> {
        select_where(db, "projects", &filter!(id = id))
            .unwrap()
            .first()
            .and_then(|row| row.get(1).cloned())
    }

    #[test]
    fn test_update_commits_open_transaction() {
        let db = setup_db();
        let id = seed(&db);

        assert!(execute_sql(&db, "BEGIN;").is_done());
        let outcome = update(&db, "projects", id, &filter!(name = "Grammar review"));
        assert_eq!(outcome.affected(), Some(1));
        assert!(db.is_autocommit().unwrap());

        assert!(!execute_sql(&db, "ROLLBACK;").is_done());
        assert_eq!(
            project_name(&db, id),
            Some(Value::Text("Grammar review".into()))
        );
    }

    #[test]
    fn test_deletes_commit_open_transaction() {
        let db = setup_db();
        seed(&db);

        assert!(execute_sql(&db, "BEGIN;").is_done());
        assert!(delete_where(&db, "tasks", &filter!(status = "done")).is_done());
        assert!(db.is_autocommit().unwrap());
        execute_sql(&db, "ROLLBACK;");
        assert!(select_task_by_status(&db, "done").unwrap().is_empty());

        assert!(execute_sql(&db, "BEGIN;").is_done());
        assert!(delete_all(&db, "tasks").is_done());
        assert!(db.is_autocommit().unwrap());
        execute_sql(&db, "ROLLBACK;");
        assert!(select_all(&db, "tasks").unwrap().is_empty());
    }
}
