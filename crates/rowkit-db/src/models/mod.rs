//! Row types.

pub mod project;
pub mod weather;

use rusqlite::{types::Value, Row};

pub use project::{NewProject, NewTask, Project, Task};
pub use weather::{Measurement, NewMeasurement, NewStation, Station};

use crate::traits::FromRow;

/// An untyped row: column values in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(pub Vec<Value>);

impl Record {
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.0.get(idx)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

impl FromRow for Record {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let count = row.as_ref().column_count();
        (0..count)
            .map(|idx| row.get::<_, Value>(idx))
            .collect::<rusqlite::Result<Vec<_>>>()
            .map(Record)
    }
}
