#![deny(missing_docs)]
//! Package to download, store, and export weather measurements published by the KNMI.

//
// Public API
//
pub use cmd_line::{setup_logging, CommonCmdLineArgs};
pub use config::Config;
pub use errors::KnmiDataErr;
pub use export::{read_csv, write_csv, ExportRow};
pub use fetch::Fetcher;
pub use measurement::{parse_measurements, parse_tenths, Measurement};
pub use mode::DataMode;
pub use station::{parse_stations, Station, StationCode};
pub use store::Store;
pub use streets::{filter_file, filter_streets, HIGHWAY_WHITELIST};
pub use timestamp::derive_time;

//
// Implementation only
//
mod cmd_line;
mod config;
mod errors;
mod export;
mod fetch;
mod measurement;
mod mode;
mod station;
mod store;
mod streets;
mod timestamp;
