//! Flat csv files of measurements joined with their stations, for use in visualization tools.

use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::KnmiDataErr, station::StationCode};

/// One line of the export: the station fields followed by the measurement fields.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub code: StationCode,
    pub name: String,
    pub longitude: Decimal,
    pub latitude: Decimal,
    pub altitude: Decimal,
    pub time: DateTime<Utc>,
    pub wind_direction: Option<Decimal>,
    pub wind_speed: Option<Decimal>,
    pub gust_of_wind: Option<Decimal>,
    pub temperature: Option<Decimal>,
    pub dew_temperature: Option<Decimal>,
    pub sunshine: Option<Decimal>,
    pub radiation: Option<Decimal>,
    pub precipitation_duration: Option<Decimal>,
    pub precipitation: Option<Decimal>,
    pub air_pressure: Option<Decimal>,
    pub visibility: Option<Decimal>,
    pub cloud_cover: Option<Decimal>,
    pub relative_humidity: Option<Decimal>,
    pub mist: bool,
    pub rain: bool,
    pub snow: bool,
    pub lightning: bool,
    pub icing: bool,
}

/// Write the rows to `path` with a header line. Returns the number of rows written.
pub fn write_csv(rows: &[ExportRow], path: &Path) -> Result<usize, KnmiDataErr> {
    log::info!("writing {} rows to {}", rows.len(), path.display());

    let mut wtr = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        // serialize() only writes the header together with the first row
        wtr.write_record(HEADER)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    Ok(rows.len())
}

/// Read an export back in.
pub fn read_csv(path: &Path) -> Result<Vec<ExportRow>, KnmiDataErr> {
    let mut rdr = csv::Reader::from_path(path)?;

    let rows: Result<Vec<ExportRow>, csv::Error> = rdr.deserialize().collect();
    Ok(rows?)
}

const HEADER: [&str; 24] = [
    "code",
    "name",
    "longitude",
    "latitude",
    "altitude",
    "time",
    "wind_direction",
    "wind_speed",
    "gust_of_wind",
    "temperature",
    "dew_temperature",
    "sunshine",
    "radiation",
    "precipitation_duration",
    "precipitation",
    "air_pressure",
    "visibility",
    "cloud_cover",
    "relative_humidity",
    "mist",
    "rain",
    "snow",
    "lightning",
    "icing",
];
