use rusqlite::Row;

use crate::traits::FromRow;

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl FromRow for Project {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            start_date: row.get("start_date")?,
            end_date: row.get("end_date")?,
        })
    }
}

/// Project fields in insert order: name, start date, end date.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

impl<N, S, E> From<(N, S, E)> for NewProject
where
    N: Into<String>,
    S: Into<String>,
    E: Into<String>,
{
    fn from((name, start_date, end_date): (N, S, E)) -> Self {
        Self {
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
}

impl FromRow for Task {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            project_id: row.get("project_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            status: row.get("status")?,
            start_date: row.get("start_date")?,
            end_date: row.get("end_date")?,
        })
    }
}

/// Task fields in insert order: project id, name, description, status,
/// start date, end date.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub project_id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
}

impl<N, D, St, S, E> From<(i64, N, D, St, S, E)> for NewTask
where
    N: Into<String>,
    D: Into<String>,
    St: Into<String>,
    S: Into<String>,
    E: Into<String>,
{
    fn from(
        (project_id, name, description, status, start_date, end_date): (i64, N, D, St, S, E),
    ) -> Self {
        Self {
            project_id,
            name: name.into(),
            description: description.into(),
            status: status.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}
