//! Table-generic commands: select, update, delete and purge.

use rowkit_db::{
    delete_all, delete_where, models::Record, schema::table_columns, update, DbConnection,
    Outcome, SelectQuery,
};
use tracing::warn;

use crate::{
    error::{CliError, CliResult},
    output::RowSet,
    utils::parse_filter,
};

pub fn select_rows(
    db: &DbConnection,
    table: &str,
    filters: &[String],
    limit: Option<u32>,
    json: bool,
) -> CliResult<()> {
    let filter = parse_filter(filters)?;

    let mut query = SelectQuery::<Record>::from(db.clone(), table).filter(filter);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    let records = query.fetch()?;

    let columns = table_columns(db, table)?;
    let rows = records.into_iter().map(|record| record.0).collect();
    RowSet::new(table, &columns, rows).print(json)
}

pub fn update_row(
    db: &DbConnection,
    table: &str,
    id: i64,
    assignments: &[String],
) -> CliResult<()> {
    let assignments = parse_filter(assignments)?;
    report(update(db, table, id, &assignments), table)
}

pub fn delete_rows(db: &DbConnection, table: &str, filters: &[String]) -> CliResult<()> {
    let filter = parse_filter(filters)?;
    report(delete_where(db, table, &filter), table)
}

pub fn purge_table(db: &DbConnection, table: &str) -> CliResult<()> {
    report(delete_all(db, table), table)
}

/// The library has already logged a failure; the binary still exits non-zero.
fn report(outcome: Outcome, table: &str) -> CliResult<()> {
    match outcome {
        Outcome::Done {
            affected: 0,
        } => {
            warn!("No rows in {table} matched");
            Ok(())
        }
        Outcome::Done {
            ..
        } => Ok(()),
        Outcome::Failed {
            error,
        } => Err(CliError::Db(error)),
    }
}

#[cfg(test)]
mod tests {
    use rowkit_db::{add_project, schema::create_projects_and_tasks, select_all, DbError, Value};

    use super::*;

    fn setup() -> DbConnection {
        let db = DbConnection::open_in_memory().unwrap();
        create_projects_and_tasks(&db).unwrap();
        add_project(&db, ("English review", "2020-05-11", "2020-05-13")).unwrap();
        add_project(&db, ("Maths", "2020-06-01", "2020-06-02")).unwrap();
        db
    }

    #[test]
    fn test_select_rows() {
        let db = setup();
        select_rows(&db, "projects", &["name=Maths".into()], Some(1), true).unwrap();
        assert!(matches!(
            select_rows(&db, "projects", &["name".into()], None, false),
            Err(CliError::InvalidPair(_))
        ));
    }

    #[test]
    fn test_update_row() {
        let db = setup();
        update_row(&db, "projects", 2, &["end_date=2020-06-30".into()]).unwrap();

        let rows = select_all(&db, "projects").unwrap();
        assert_eq!(rows[1].get(3), Some(&Value::Text("2020-06-30".into())));

        let err = update_row(&db, "projects", 2, &["nope=1".into()]).unwrap_err();
        assert!(matches!(err, CliError::Db(DbError::QueryError(_))));
    }

    #[test]
    fn test_delete_and_purge() {
        let db = setup();
        delete_rows(&db, "projects", &["id=1".into()]).unwrap();
        assert_eq!(select_all(&db, "projects").unwrap().len(), 1);

        purge_table(&db, "projects").unwrap();
        assert!(select_all(&db, "projects").unwrap().is_empty());

        assert!(purge_table(&db, "missing").is_err());
    }
}
