use std::path::{Path, PathBuf};

use nu_ansi_term::Color::{Green, Yellow};
use rowkit_config::{config::Config, paths::resolve_path};
use rowkit_db::{
    import::{import_measurements_file, import_stations_file},
    models::Station,
    repository::weather::sample_stations,
    schema::{create_weather_tables, stations},
    DbConnection, Value,
};
use tracing::info;

use crate::{cli::WeatherAction, error::CliResult, output::RowSet, utils::Colored};

pub fn handle_weather(
    db: &DbConnection,
    config: &Config,
    action: WeatherAction,
    json: bool,
) -> CliResult<()> {
    match action {
        WeatherAction::Import {
            stations,
            measurements,
        } => {
            let stations = file_or(stations, || config.get_stations_file())?;
            let measurements = file_or(measurements, || config.get_measurements_file())?;
            import(db, &stations, &measurements)
        }
        WeatherAction::Sample {
            limit,
        } => {
            let limit = limit.unwrap_or_else(|| config.sample_limit());
            let found = sample_stations(db, limit)?;
            station_rows(&found).print(json)
        }
    }
}

fn file_or<F>(arg: Option<String>, fallback: F) -> CliResult<PathBuf>
where
    F: FnOnce() -> rowkit_config::error::Result<PathBuf>,
{
    match arg {
        Some(path) => Ok(resolve_path(&path)?),
        None => Ok(fallback()?),
    }
}

pub fn import(db: &DbConnection, stations: &Path, measurements: &Path) -> CliResult<()> {
    create_weather_tables(db)?;

    let station_count = import_stations_file(db, stations)?;
    let measurement_count = import_measurements_file(db, measurements)?;

    info!(
        "Loaded {} stations from {} and {} measurements from {}",
        Colored(Green, station_count),
        Colored(Yellow, stations.display()),
        Colored(Green, measurement_count),
        Colored(Yellow, measurements.display())
    );
    Ok(())
}

fn station_rows(found: &[Station]) -> RowSet {
    let rows = found
        .iter()
        .map(|s| {
            vec![
                Value::Integer(s.id),
                s.station.clone().into(),
                s.latitude.into(),
                s.longitude.into(),
                s.elevation.into(),
                s.name.clone().into(),
                s.country.clone().into(),
                s.state.clone().into(),
            ]
        })
        .collect();

    RowSet::new(stations::TABLE, stations::COLUMNS, rows)
}
