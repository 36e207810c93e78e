use chrono::NaiveDate;
use rusqlite::{types::Type, Row};

use crate::traits::FromRow;

/// Date format used by the measurements CSV and the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: i64,
    pub station: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl FromRow for Station {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            station: row.get("station")?,
            latitude: row.get("latitude")?,
            longitude: row.get("longitude")?,
            elevation: row.get("elevation")?,
            name: row.get("name")?,
            country: row.get("country")?,
            state: row.get("state")?,
        })
    }
}

/// A station ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStation {
    pub station: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub name: String,
    pub country: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub id: i64,
    pub station: Option<String>,
    pub date: Option<NaiveDate>,
    pub precip: Option<f64>,
    pub tobs: Option<f64>,
}

impl FromRow for Measurement {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let date = match row.get::<_, Option<String>>("date")? {
            Some(text) => Some(NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
            })?),
            None => None,
        };

        Ok(Self {
            id: row.get("id")?,
            station: row.get("station")?,
            date,
            precip: row.get("precip")?,
            tobs: row.get("tobs")?,
        })
    }
}

/// A measurement ready to insert; empty readings are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasurement {
    pub station: String,
    pub date: NaiveDate,
    pub precip: Option<f64>,
    pub tobs: Option<f64>,
}
