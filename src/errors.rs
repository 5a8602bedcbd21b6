//! Module for errors.
use crate::station::StationCode;
use thiserror::Error;

/// Error from the store, the parsers and the fetcher.
#[derive(Debug, Error)]
pub enum KnmiDataErr {
    // Inherited errors from std
    /// Error forwarded from std
    #[error("std lib io error: {0}")]
    IO(#[from] std::io::Error),

    // Other forwarded errors
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Error forwarded from the HTTP client
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Error forwarded from the csv crate
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// Error forwarded from the geojson crate
    #[error("geojson error: {0}")]
    GeoJson(#[from] Box<geojson::Error>),
    /// Error serializing json
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// A configuration file could not be parsed
    #[error("invalid configuration file: {0}")]
    Config(#[from] toml::de::Error),

    // My own errors from this crate
    /// The requested data mode does not exist.
    #[error("unknown data mode {given}. Choose from: {known}")]
    UnknownMode {
        /// The name that was asked for.
        given: String,
        /// Comma separated list of valid names.
        known: String,
    },
    /// The data provider answered with something other than 200 OK. Carries the response body.
    #[error("download failed: {0}")]
    Download(String),
    /// The operation exists in principle, but has not been built yet.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    /// A measurement refers to a station that is not in the registry.
    #[error("unknown station code: {0}")]
    UnknownStation(StationCode),
    /// Hour of day outside of 1 through 24.
    #[error("hour of day must be in 1..=24, got {0}")]
    InvalidHour(u32),
    /// Malformed input.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// One based line number in the input.
        line: u64,
        /// What went wrong.
        message: String,
    },
    /// The database structure is wrong.
    #[error("invalid store format")]
    InvalidSchema,
    /// A GeoJSON document that is not a feature collection.
    #[error("expected a GeoJSON FeatureCollection")]
    NotAFeatureCollection,
}

impl From<geojson::Error> for KnmiDataErr {
    fn from(err: geojson::Error) -> KnmiDataErr {
        KnmiDataErr::GeoJson(Box::new(err))
    }
}

impl KnmiDataErr {
    pub(crate) fn parse<M: Into<String>>(line: u64, message: M) -> Self {
        KnmiDataErr::Parse {
            line,
            message: message.into(),
        }
    }
}
