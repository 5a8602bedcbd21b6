use std::path::Path;

use log::{debug, info, warn};
use rusqlite::{params, Statement, Transaction};

use super::{decimal_to_sql, Store};

use crate::{
    errors::KnmiDataErr,
    measurement::{parse_measurements, Measurement},
    mode::DataMode,
    station::{parse_stations, Station},
};

/// A table that is only ever replaced as a whole.
pub(crate) trait Table {
    /// Name of the table in the database.
    const NAME: &'static str;
    /// Statement inserting one row.
    const INSERT: &'static str;

    /// Bind the values of this row to the insert statement and run it.
    fn insert(&self, stmt: &mut Statement) -> rusqlite::Result<usize>;
}

impl Table for Station {
    const NAME: &'static str = "stations";
    const INSERT: &'static str = include_str!("modify/insert_station.sql");

    fn insert(&self, stmt: &mut Statement) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.code,
            self.longitude.to_string(),
            self.latitude.to_string(),
            self.altitude.to_string(),
            self.name,
        ])
    }
}

impl Table for Measurement {
    const NAME: &'static str = "measurements";
    const INSERT: &'static str = include_str!("modify/insert_measurement.sql");

    fn insert(&self, stmt: &mut Statement) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.station,
            self.day,
            self.hour,
            self.time,
            decimal_to_sql(&self.wind_direction),
            decimal_to_sql(&self.wind_speed),
            decimal_to_sql(&self.gust_of_wind),
            decimal_to_sql(&self.temperature),
            decimal_to_sql(&self.dew_temperature),
            decimal_to_sql(&self.sunshine),
            decimal_to_sql(&self.radiation),
            decimal_to_sql(&self.precipitation_duration),
            decimal_to_sql(&self.precipitation),
            decimal_to_sql(&self.air_pressure),
            decimal_to_sql(&self.visibility),
            decimal_to_sql(&self.cloud_cover),
            decimal_to_sql(&self.relative_humidity),
            self.mist,
            self.rain,
            self.snow,
            self.lightning,
            self.icing,
        ])
    }
}

/// Delete every row of the table.
fn clear<T: Table>(tx: &Transaction) -> Result<usize, KnmiDataErr> {
    Ok(tx.execute(&format!("DELETE FROM {}", T::NAME), [])?)
}

/// Insert all rows, stopping at the first failure.
fn bulk_insert<T: Table>(tx: &Transaction, rows: &[T]) -> Result<usize, KnmiDataErr> {
    let mut stmt = tx.prepare(T::INSERT)?;
    for row in rows {
        row.insert(&mut stmt)?;
    }

    Ok(rows.len())
}

impl Store {
    /// Replace all measurements with `measurements`.
    ///
    /// Nothing happens for an empty list. Otherwise the old rows are deleted and the new ones
    /// inserted in a single transaction, if anything fails the old rows are kept.
    pub fn replace_measurements(&mut self, measurements: &[Measurement]) -> Result<usize, KnmiDataErr> {
        if measurements.is_empty() {
            info!("no measurements to import, keeping the current ones");
            return Ok(0);
        }

        let count = self.replace_table(measurements)?;
        info!("{} measurements processed", count);
        Ok(count)
    }

    /// Replace the station registry with `stations`.
    ///
    /// Unlike measurements an empty list is not ignored, it leaves the registry empty. Deleting a
    /// station deletes its measurements too.
    pub fn replace_stations(&mut self, stations: &[Station]) -> Result<usize, KnmiDataErr> {
        if stations.is_empty() {
            warn!("replacing the station registry with an empty list");
        }

        let count = self.replace_table(stations)?;
        info!("{} stations processed", count);
        Ok(count)
    }

    /// Parse the contents of an hourly csv file and replace all measurements with it.
    pub fn import_measurements(&mut self, mode: DataMode, text: &str) -> Result<usize, KnmiDataErr> {
        mode.ensure_importable()?;

        let stations = self.station_registry()?;
        let measurements = parse_measurements(text, &stations)?;
        debug!("parsed {} measurements", measurements.len());

        self.replace_measurements(&measurements)
    }

    /// Import measurements from a downloaded file.
    pub fn import_measurements_file(
        &mut self,
        mode: DataMode,
        path: &Path,
    ) -> Result<usize, KnmiDataErr> {
        mode.ensure_importable()?;

        info!("importing {} measurements from {}", mode, path.display());
        let text = std::fs::read_to_string(path)?;
        self.import_measurements(mode, &text)
    }

    /// Parse the station reference file contents and replace the registry with it.
    pub fn import_stations(&mut self, text: &str) -> Result<usize, KnmiDataErr> {
        let stations = parse_stations(text)?;
        self.replace_stations(&stations)
    }

    /// Import the station reference file.
    pub fn import_stations_file(&mut self, path: &Path) -> Result<usize, KnmiDataErr> {
        info!("importing stations from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        self.import_stations(&text)
    }

    // The transaction rolls back when dropped without a commit.
    fn replace_table<T: Table>(&mut self, rows: &[T]) -> Result<usize, KnmiDataErr> {
        let tx = self.db_conn.transaction()?;

        let removed = clear::<T>(&tx)?;
        let added = bulk_insert(&tx, rows)?;

        tx.commit()?;
        debug!("{}: removed {} rows, added {}", T::NAME, removed, added);

        Ok(added)
    }
}
