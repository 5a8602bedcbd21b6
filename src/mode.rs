//! Granularity of the data offered by the KNMI.

use std::{fmt, str::FromStr};

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::errors::KnmiDataErr;

/// Data modes offered by the data provider.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumString, IntoStaticStr, EnumIter, Hash)]
#[strum(ascii_case_insensitive)]
pub enum DataMode {
    /// One record per station per day.
    #[strum(to_string = "day", serialize = "per_day")]
    Day,
    /// One record per station per hour.
    #[strum(to_string = "hour", serialize = "per_hour")]
    Hour,
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DataMode::Day => write!(f, "per day"),
            DataMode::Hour => write!(f, "per hour"),
        }
    }
}

impl DataMode {
    /// Look up a mode by name, case insensitive.
    pub fn from_name(name: &str) -> Result<Self, KnmiDataErr> {
        DataMode::from_str(name).map_err(|_| KnmiDataErr::UnknownMode {
            given: name.to_owned(),
            known: DataMode::iter()
                .map(DataMode::as_static_str)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// The short name of this mode, e.g. `hour`.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// Endpoint of the data provider for this mode.
    pub fn default_url(self) -> &'static str {
        match self {
            DataMode::Day => "http://projects.knmi.nl/klimatologie/daggegevens/getdata_dag.cgi",
            DataMode::Hour => "http://projects.knmi.nl/klimatologie/uurgegevens/getdata_uur.cgi",
        }
    }

    /// Name of the file a download in this mode is stored in.
    pub fn file_name(self) -> String {
        let stem = match self {
            DataMode::Day => "per_day",
            DataMode::Hour => "per_hour",
        };
        format!("{}_knmi.csv", stem)
    }

    /// Only hourly measurements can be stored.
    pub fn ensure_importable(self) -> Result<(), KnmiDataErr> {
        match self {
            DataMode::Day => Err(KnmiDataErr::NotImplemented(
                "no model yet for per day measurements",
            )),
            DataMode::Hour => Ok(()),
        }
    }
}
