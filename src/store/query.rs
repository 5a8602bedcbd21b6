use std::{collections::HashMap, path::Path};

use super::{decimal_column, required_decimal_column, Store};

use crate::{
    errors::KnmiDataErr,
    export::{write_csv, ExportRow},
    measurement::Measurement,
    station::{Station, StationCode},
};

impl Store {
    /// Retrieve a list of stations in the store, ordered by code.
    pub fn stations(&self) -> Result<Vec<Station>, KnmiDataErr> {
        let mut stmt = self.db_conn.prepare(
            "SELECT code, longitude, latitude, altitude, name FROM stations ORDER BY code",
        )?;

        let vals: Result<Vec<Station>, KnmiDataErr> = stmt
            .query_and_then([], Self::parse_row_to_station)?
            .map(|res| res.map_err(KnmiDataErr::Database))
            .collect();

        vals
    }

    /// Retrieve the information about a single station.
    pub fn station(&self, code: StationCode) -> Option<Station> {
        self.db_conn
            .query_row_and_then(
                "SELECT code, longitude, latitude, altitude, name FROM stations WHERE code = ?1",
                [code],
                Self::parse_row_to_station,
            )
            .ok()
    }

    /// All stations keyed by their code, for resolving the station column of the feed.
    pub fn station_registry(&self) -> Result<HashMap<StationCode, Station>, KnmiDataErr> {
        Ok(self
            .stations()?
            .into_iter()
            .map(|station| (station.code, station))
            .collect())
    }

    /// Number of stations in the registry.
    pub fn station_count(&self) -> Result<usize, KnmiDataErr> {
        self.count_rows("stations")
    }

    /// All measurements ordered by day, hour and station.
    pub fn measurements(&self) -> Result<Vec<Measurement>, KnmiDataErr> {
        self.query_measurements(None)
    }

    /// The measurements of one station ordered by day and hour.
    pub fn measurements_for_station(
        &self,
        code: StationCode,
    ) -> Result<Vec<Measurement>, KnmiDataErr> {
        self.query_measurements(Some(code))
    }

    /// Number of measurements in the store.
    pub fn measurement_count(&self) -> Result<usize, KnmiDataErr> {
        self.count_rows("measurements")
    }

    /// Every measurement joined with its station, ordered by station code and time.
    pub fn export_rows(&self) -> Result<Vec<ExportRow>, KnmiDataErr> {
        let mut stmt = self.db_conn.prepare(include_str!("query/export_rows.sql"))?;

        let vals: Result<Vec<ExportRow>, KnmiDataErr> = stmt
            .query_and_then([], Self::parse_row_to_export_row)?
            .map(|res| res.map_err(KnmiDataErr::Database))
            .collect();

        vals
    }

    /// Write every measurement joined with its station to a csv file.
    pub fn export(&self, path: &Path) -> Result<usize, KnmiDataErr> {
        let rows = self.export_rows()?;
        write_csv(&rows, path)
    }

    fn count_rows(&self, table: &str) -> Result<usize, KnmiDataErr> {
        let count: i64 = self.db_conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table),
            [],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }

    fn query_measurements(
        &self,
        code: Option<StationCode>,
    ) -> Result<Vec<Measurement>, KnmiDataErr> {
        let mut stmt = self
            .db_conn
            .prepare(include_str!("query/retrieve_measurements.sql"))?;

        let vals: Result<Vec<Measurement>, KnmiDataErr> = stmt
            .query_and_then([code], Self::parse_row_to_measurement)?
            .map(|res| res.map_err(KnmiDataErr::Database))
            .collect();

        vals
    }

    fn parse_row_to_station(row: &rusqlite::Row) -> Result<Station, rusqlite::Error> {
        Ok(Station {
            code: row.get(0)?,
            longitude: required_decimal_column(row, 1)?,
            latitude: required_decimal_column(row, 2)?,
            altitude: required_decimal_column(row, 3)?,
            name: row.get(4)?,
        })
    }

    fn parse_row_to_measurement(row: &rusqlite::Row) -> Result<Measurement, rusqlite::Error> {
        Ok(Measurement {
            station: row.get(0)?,
            day: row.get(1)?,
            hour: row.get(2)?,
            time: row.get(3)?,
            wind_direction: decimal_column(row, 4)?,
            wind_speed: decimal_column(row, 5)?,
            gust_of_wind: decimal_column(row, 6)?,
            temperature: decimal_column(row, 7)?,
            dew_temperature: decimal_column(row, 8)?,
            sunshine: decimal_column(row, 9)?,
            radiation: decimal_column(row, 10)?,
            precipitation_duration: decimal_column(row, 11)?,
            precipitation: decimal_column(row, 12)?,
            air_pressure: decimal_column(row, 13)?,
            visibility: decimal_column(row, 14)?,
            cloud_cover: decimal_column(row, 15)?,
            relative_humidity: decimal_column(row, 16)?,
            mist: row.get(17)?,
            rain: row.get(18)?,
            snow: row.get(19)?,
            lightning: row.get(20)?,
            icing: row.get(21)?,
        })
    }

    fn parse_row_to_export_row(row: &rusqlite::Row) -> Result<ExportRow, rusqlite::Error> {
        Ok(ExportRow {
            code: row.get(0)?,
            name: row.get(1)?,
            longitude: required_decimal_column(row, 2)?,
            latitude: required_decimal_column(row, 3)?,
            altitude: required_decimal_column(row, 4)?,
            time: row.get(5)?,
            wind_direction: decimal_column(row, 6)?,
            wind_speed: decimal_column(row, 7)?,
            gust_of_wind: decimal_column(row, 8)?,
            temperature: decimal_column(row, 9)?,
            dew_temperature: decimal_column(row, 10)?,
            sunshine: decimal_column(row, 11)?,
            radiation: decimal_column(row, 12)?,
            precipitation_duration: decimal_column(row, 13)?,
            precipitation: decimal_column(row, 14)?,
            air_pressure: decimal_column(row, 15)?,
            visibility: decimal_column(row, 16)?,
            cloud_cover: decimal_column(row, 17)?,
            relative_humidity: decimal_column(row, 18)?,
            mist: row.get(19)?,
            rain: row.get(20)?,
            snow: row.get(21)?,
            lightning: row.get(22)?,
            icing: row.get(23)?,
        })
    }
}
