//! Weather stations and measurements.

use crate::{
    connection::DbConnection,
    error::Result,
    models::{weather::DATE_FORMAT, NewMeasurement, NewStation, Station},
    query::{InsertQuery, SelectQuery},
    schema::{measurements, stations},
};

pub fn add_station(db: &DbConnection, station: &NewStation) -> Result<i64> {
    let id = InsertQuery::into(db.clone(), stations::TABLE)
        .set(stations::STATION, &station.station)
        .set(stations::LATITUDE, station.latitude)
        .set(stations::LONGITUDE, station.longitude)
        .set(stations::ELEVATION, station.elevation)
        .set(stations::NAME, &station.name)
        .set(stations::COUNTRY, &station.country)
        .set(stations::STATE, &station.state)
        .execute()?;
    db.commit()?;
    Ok(id)
}

pub fn add_measurement(db: &DbConnection, measurement: &NewMeasurement) -> Result<i64> {
    let id = InsertQuery::into(db.clone(), measurements::TABLE)
        .set(measurements::STATION, &measurement.station)
        .set(
            measurements::DATE,
            measurement.date.format(DATE_FORMAT).to_string(),
        )
        .set(measurements::PRECIP, measurement.precip)
        .set(measurements::TOBS, measurement.tobs)
        .execute()?;
    db.commit()?;
    Ok(id)
}

/// `SELECT * FROM stations LIMIT <limit>`.
pub fn sample_stations(db: &DbConnection, limit: u32) -> Result<Vec<Station>> {
    SelectQuery::<Station>::from(db.clone(), stations::TABLE)
        .limit(limit)
        .fetch()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{models::Measurement, schema::create_weather_tables};

    fn setup() -> DbConnection {
        let db = DbConnection::open_in_memory().unwrap();
        create_weather_tables(&db).unwrap();
        db
    }

    fn station(code: &str) -> NewStation {
        NewStation {
            station: code.to_string(),
            latitude: 21.2716,
            longitude: -157.8168,
            elevation: 3.0,
            name: "WAIKIKI 717.2".to_string(),
            country: "US".to_string(),
            state: "HI".to_string(),
        }
    }

    #[test]
    fn test_sample_stations_limit() {
        let db = setup();
        for i in 0..7 {
            add_station(&db, &station(&format!("USC0051912{i}"))).unwrap();
        }

        let sample = sample_stations(&db, 5).unwrap();
        assert_eq!(sample.len(), 5);
        assert_eq!(sample[0].station.as_deref(), Some("USC00519120"));
        assert_eq!(sample[0].latitude, Some(21.2716));
    }

    #[test]
    fn test_measurement_round_trips_date_and_nulls() {
        let db = setup();
        let id = add_measurement(
            &db,
            &NewMeasurement {
                station: "USC00519397".to_string(),
                date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
                precip: None,
                tobs: Some(65.0),
            },
        )
        .unwrap();

        let stored = SelectQuery::<Measurement>::from(db, measurements::TABLE)
            .eq(measurements::ID, id)
            .fetch_one()
            .unwrap()
            .unwrap();

        assert_eq!(stored.date, NaiveDate::from_ymd_opt(2010, 1, 1));
        assert_eq!(stored.precip, None);
        assert_eq!(stored.tobs, Some(65.0));
    }
}
