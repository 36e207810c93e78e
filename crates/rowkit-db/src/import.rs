//! CSV ingestion for the weather tables.
//!
//! Each CSV line becomes one INSERT; there is no enclosing transaction, so a
//! failure part way through leaves the earlier rows in place.

use std::{fs::File, io::Read, path::Path};

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    connection::DbConnection,
    error::{DbError, Result},
    models::{weather::DATE_FORMAT, NewMeasurement, NewStation},
    repository::weather::{add_measurement, add_station},
};

#[derive(Debug, Deserialize)]
struct StationLine {
    station: String,
    latitude: String,
    longitude: String,
    elevation: String,
    name: String,
    country: String,
    state: String,
}

#[derive(Debug, Deserialize)]
struct MeasurementLine {
    station: String,
    date: String,
    precip: String,
    tobs: String,
}

fn parse_float(line: u64, column: &'static str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| DbError::InvalidField {
        line,
        column,
        value: value.to_string(),
    })
}

/// Empty cells are missing readings.
fn parse_optional_float(line: u64, column: &'static str, value: &str) -> Result<Option<f64>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_float(line, column, value).map(Some)
    }
}

fn parse_date(line: u64, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| DbError::InvalidField {
        line,
        column: "date",
        value: value.to_string(),
    })
}

/// Reads every line of a headed CSV, handing each deserialized row and its
/// line number to `insert`.
fn for_each_line<R, T, F>(reader: R, mut insert: F) -> Result<usize>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
    F: FnMut(u64, T) -> Result<()>,
{
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut record = StringRecord::new();
    let mut count = 0;

    while rdr.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: T = record.deserialize(Some(&headers))?;
        insert(line, row)?;
        count += 1;
    }

    Ok(count)
}

/// Loads stations from CSV with header
/// `station,latitude,longitude,elevation,name,country,state`.
pub fn import_stations<R: Read>(db: &DbConnection, reader: R) -> Result<usize> {
    let count = for_each_line(reader, |line, row: StationLine| {
        let station = NewStation {
            latitude: parse_float(line, "latitude", &row.latitude)?,
            longitude: parse_float(line, "longitude", &row.longitude)?,
            elevation: parse_float(line, "elevation", &row.elevation)?,
            station: row.station,
            name: row.name,
            country: row.country,
            state: row.state,
        };
        let id = add_station(db, &station)?;
        debug!(id, station = station.station.as_str(), "inserted station");
        Ok(())
    })?;

    info!("Imported {count} stations");
    Ok(count)
}

/// Loads measurements from CSV with header `station,date,precip,tobs`.
pub fn import_measurements<R: Read>(db: &DbConnection, reader: R) -> Result<usize> {
    let count = for_each_line(reader, |line, row: MeasurementLine| {
        let measurement = NewMeasurement {
            date: parse_date(line, &row.date)?,
            precip: parse_optional_float(line, "precip", &row.precip)?,
            tobs: parse_optional_float(line, "tobs", &row.tobs)?,
            station: row.station,
        };
        add_measurement(db, &measurement)?;
        Ok(())
    })?;

    info!("Imported {count} measurements");
    Ok(count)
}

pub fn import_stations_file<P: AsRef<Path>>(db: &DbConnection, path: P) -> Result<usize> {
    debug!(path = %path.as_ref().display(), "reading stations");
    import_stations(db, File::open(path)?)
}

pub fn import_measurements_file<P: AsRef<Path>>(db: &DbConnection, path: P) -> Result<usize> {
    debug!(path = %path.as_ref().display(), "reading measurements");
    import_measurements(db, File::open(path)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{
        models::{Measurement, Record},
        ops::select_all,
        query::SelectQuery,
        repository::weather::sample_stations,
        schema::{create_weather_tables, measurements},
    };

    const STATIONS: &str = "\
station,latitude,longitude,elevation,name,country,state
USC00519397,21.2716,-157.8168,3.0,WAIKIKI 717.2,US,HI
USC00513117,21.4234,-157.8015,14.6,KANEOHE 838.1,US,HI
";

    const MEASUREMENTS: &str = "\
station,date,precip,tobs
USC00519397,2010-01-01,0.08,65
USC00519397,2010-01-02,,63
USC00519397,2010-01-03,0.0,
";

    fn setup() -> DbConnection {
        let db = DbConnection::open_in_memory().unwrap();
        create_weather_tables(&db).unwrap();
        db
    }

    #[test]
    fn test_import_stations() {
        let db = setup();
        let count = import_stations(&db, STATIONS.as_bytes()).unwrap();
        assert_eq!(count, 2);

        let sample = sample_stations(&db, 5).unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[1].name.as_deref(), Some("KANEOHE 838.1"));
        assert_eq!(sample[1].elevation, Some(14.6));
    }

    #[test]
    fn test_import_measurements_empty_readings_are_null() {
        let db = setup();
        let count = import_measurements(&db, MEASUREMENTS.as_bytes()).unwrap();
        assert_eq!(count, 3);

        let rows = SelectQuery::<Measurement>::from(db, measurements::TABLE)
            .order_by(measurements::ID, false)
            .fetch()
            .unwrap();

        assert_eq!(rows[0].precip, Some(0.08));
        assert_eq!(rows[1].precip, None);
        assert_eq!(rows[1].tobs, Some(63.0));
        assert_eq!(rows[2].tobs, None);
        assert_eq!(rows[2].date, NaiveDate::from_ymd_opt(2010, 1, 3));
    }

    #[test]
    fn test_bad_float_reports_line_and_column() {
        let db = setup();
        let input = "\
station,latitude,longitude,elevation,name,country,state
A,1.0,2.0,3.0,n,US,HI
B,north,2.0,3.0,n,US,HI
";
        let err = import_stations(&db, input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidField { line: 3, column: "latitude", ref value } if value == "north"
        ));

        // rows before the bad line stay in place
        assert_eq!(select_all(&db, "stations").unwrap().len(), 1);
    }

    #[test]
    fn test_bad_date_rejected() {
        let db = setup();
        let input = "station,date,precip,tobs\nA,01/02/2010,1,2\n";
        let err = import_measurements(&db, input.as_bytes()).unwrap_err();
        assert!(matches!(err, DbError::InvalidField { column: "date", .. }));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let db = setup();
        let input = "station,date\nA,2010-01-01\n";
        let err = import_measurements(&db, input.as_bytes()).unwrap_err();
        assert!(matches!(err, DbError::Csv(_)));
    }

    #[test]
    fn test_import_from_file() {
        let db = setup();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STATIONS.as_bytes()).unwrap();

        assert_eq!(import_stations_file(&db, file.path()).unwrap(), 2);

        let rows: Vec<Record> = SelectQuery::from(db, "stations").fetch().unwrap();
        assert_eq!(rows[0].len(), 8);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let db = setup();
        let err = import_stations_file(&db, "/nonexistent/clean_stations.csv").unwrap_err();
        assert!(matches!(err, DbError::IoError(_)));
    }
}
