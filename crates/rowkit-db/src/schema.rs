//! Table definitions.
//!
//! The DDL is idempotent (`CREATE TABLE IF NOT EXISTS`); there is no
//! migration tracking.

use tracing::debug;

use crate::{connection::DbConnection, define_entity, error::Result, ident, query::Outcome};

pub const CREATE_PROJECTS: &str = "
-- projects table
CREATE TABLE IF NOT EXISTS projects (
  id integer PRIMARY KEY,
  name text NOT NULL,
  start_date text,
  end_date text
);
";

pub const CREATE_TASKS: &str = "
-- tasks table
CREATE TABLE IF NOT EXISTS tasks (
  id integer PRIMARY KEY,
  project_id integer NOT NULL,
  name VARCHAR(250) NOT NULL,
  description TEXT,
  status VARCHAR(15) NOT NULL,
  start_date text NOT NULL,
  end_date text NOT NULL,
  FOREIGN KEY (project_id) REFERENCES projects (id)
);
";

pub const CREATE_STATIONS: &str = "
CREATE TABLE IF NOT EXISTS stations (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  station TEXT,
  latitude REAL,
  longitude REAL,
  elevation REAL,
  name TEXT,
  country TEXT,
  state TEXT
);
";

pub const CREATE_MEASUREMENTS: &str = "
CREATE TABLE IF NOT EXISTS measurements (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  station TEXT,
  date DATE,
  precip REAL,
  tobs REAL
);
";

define_entity!(
    projects {
        table: "projects",
        columns: {
            ID: i64 => "id",
            NAME: String => "name",
            START_DATE: Option<String> => "start_date",
            END_DATE: Option<String> => "end_date",
        }
    }
);

define_entity!(
    tasks {
        table: "tasks",
        columns: {
            ID: i64 => "id",
            PROJECT_ID: i64 => "project_id",
            NAME: String => "name",
            DESCRIPTION: Option<String> => "description",
            STATUS: String => "status",
            START_DATE: String => "start_date",
            END_DATE: String => "end_date",
        }
    }
);

define_entity!(
    stations {
        table: "stations",
        columns: {
            ID: i64 => "id",
            STATION: String => "station",
            LATITUDE: f64 => "latitude",
            LONGITUDE: f64 => "longitude",
            ELEVATION: f64 => "elevation",
            NAME: String => "name",
            COUNTRY: String => "country",
            STATE: String => "state",
        }
    }
);

define_entity!(
    measurements {
        table: "measurements",
        columns: {
            ID: i64 => "id",
            STATION: String => "station",
            DATE: String => "date",
            PRECIP: Option<f64> => "precip",
            TOBS: Option<f64> => "tobs",
        }
    }
);

/// Runs an SQL script, logging failures instead of returning them.
pub fn execute_sql(db: &DbConnection, sql: &str) -> Outcome {
    debug!(sql = sql.trim(), "executing script");
    Outcome::record(db.with(|conn| {
        conn.execute_batch(sql)?;
        let changes: i64 = conn.query_row("SELECT changes()", [], |row| row.get(0))?;
        Ok(usize::try_from(changes).unwrap_or_default())
    }))
}

/// Creates the `projects` and `tasks` tables.
pub fn create_projects_and_tasks(db: &DbConnection) -> Result<()> {
    db.with(|conn| {
        conn.execute_batch(CREATE_PROJECTS)?;
        conn.execute_batch(CREATE_TASKS)
    })
}

/// Creates the `stations` and `measurements` tables.
pub fn create_weather_tables(db: &DbConnection) -> Result<()> {
    db.with(|conn| {
        conn.execute_batch(CREATE_STATIONS)?;
        conn.execute_batch(CREATE_MEASUREMENTS)
    })
}

/// Column names of `table` in declaration order; empty if the table does not exist.
pub fn table_columns(db: &DbConnection, table: &str) -> Result<Vec<String>> {
    let table = ident::table(table)?;
    db.with(|conn| {
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
        let names = stmt.query_map([table], |row| row.get(0))?;
        names.collect()
    })
}

/// Creates every table rowkit knows about.
pub fn create_all(db: &DbConnection) -> Result<()> {
    create_projects_and_tasks(db)?;
    create_weather_tables(db)
}
