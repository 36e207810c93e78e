//! Projects and tasks.

use crate::{
    connection::DbConnection,
    error::Result,
    models::{NewProject, NewTask, Task},
    query::{InsertQuery, SelectQuery},
    schema::{projects, tasks},
};

/// Inserts a project and returns its id.
///
/// Runs `INSERT INTO projects(name, start_date, end_date) VALUES (?,?,?)`
/// and commits. Errors propagate to the caller.
pub fn add_project(db: &DbConnection, project: impl Into<NewProject>) -> Result<i64> {
    let project = project.into();
    let id = InsertQuery::into(db.clone(), projects::TABLE)
        .set(projects::NAME, project.name)
        .set(projects::START_DATE, project.start_date)
        .set(projects::END_DATE, project.end_date)
        .execute()?;
    db.commit()?;
    Ok(id)
}

/// Inserts a task and returns its id.
///
/// Runs `INSERT INTO tasks(project_id, name, description, status, start_date,
/// end_date) VALUES (?,?,?,?,?,?)` and commits. Errors propagate to the
/// caller.
pub fn add_task(db: &DbConnection, task: impl Into<NewTask>) -> Result<i64> {
    let task = task.into();
    let id = InsertQuery::into(db.clone(), tasks::TABLE)
        .set(tasks::PROJECT_ID, task.project_id)
        .set(tasks::NAME, task.name)
        .set(tasks::DESCRIPTION, task.description)
        .set(tasks::STATUS, task.status)
        .set(tasks::START_DATE, task.start_date)
        .set(tasks::END_DATE, task.end_date)
        .execute()?;
    db.commit()?;
    Ok(id)
}

/// All tasks with the given status.
pub fn select_task_by_status(db: &DbConnection, status: &str) -> Result<Vec<Task>> {
    SelectQuery::<Task>::from(db.clone(), tasks::TABLE)
        .eq(tasks::STATUS, status)
        .fetch()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::DbError, models::Project, schema::execute_sql, test_utils::setup_db};

    #[test]
    fn test_add_project_returns_first_id() {
        let db = setup_db();

        let id = add_project(&db, ("English review", "2020-05-11", "2020-05-13")).unwrap();
        assert_eq!(id, 1);

        let project = SelectQuery::<Project>::from(db, projects::TABLE)
            .eq(projects::ID, id)
            .fetch_one()
            .unwrap()
            .unwrap();
        assert_eq!(project.name, "English review");
        assert_eq!(project.start_date.as_deref(), Some("2020-05-11"));
        assert_eq!(project.end_date.as_deref(), Some("2020-05-13"));
    }

    #[test]
    fn test_ids_strictly_increase() {
        let db = setup_db();

        let mut last = 0;
        for name in ["a", "b", "c"] {
            let id = add_project(&db, (name, "2020-01-01", "2020-01-02")).unwrap();
            assert!(id > last);
            last = id;
        }
    }

    #[test]
    fn test_add_task_and_select_by_status() {
        let db = setup_db();
        let project = add_project(&db, ("p", "2020-05-11", "2020-05-13")).unwrap();

        let task_id = add_task(
            &db,
            (project, "Regular verbs", "Page 30", "started", "2020-05-11 12:00:00", "2020-05-11 15:00:00"),
        )
        .unwrap();

        let started = select_task_by_status(&db, "started").unwrap();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].id, task_id);
        assert_eq!(started[0].project_id, project);
        assert_eq!(started[0].description.as_deref(), Some("Page 30"));

        assert!(select_task_by_status(&db, "done").unwrap().is_empty());
    }

    #[test]
    fn test_add_task_missing_table_propagates() {
        let db = crate::DbConnection::open_in_memory().unwrap();
        let err = add_task(&db, (1_i64, "n", "d", "s", "a", "b")).unwrap_err();
        assert!(matches!(err, DbError::QueryError(_)));
    }

    #[test]
    fn test_add_task_unknown_project_with_foreign_keys() {
        let db = setup_db();
        db.enable_foreign_keys().unwrap();

        let err = add_task(&db, (99_i64, "n", "d", "s", "a", "b")).unwrap_err();
        assert!(matches!(err, DbError::QueryError(_)));
    }

    #[test]
    fn test_inserts_commit_open_transaction() {
        let db = setup_db();

        assert!(execute_sql(&db, "BEGIN;").is_done());
        let project = add_project(&db, ("p", "2020-05-11", "2020-05-13")).unwrap();
        assert!(db.is_autocommit().unwrap());

        assert!(execute_sql(&db, "BEGIN;").is_done());
        add_task(&db, (project, "n", "d", "started", "a", "b")).unwrap();
        assert!(db.is_autocommit().unwrap());
        execute_sql(&db, "ROLLBACK;");

        let found = SelectQuery::<Project>::from(db.clone(), projects::TABLE)
            .eq(projects::ID, project)
            .fetch_one()
            .unwrap();
        assert!(found.is_some());
        assert_eq!(select_task_by_status(&db, "started").unwrap().len(), 1);
    }
}
