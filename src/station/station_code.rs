use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// New type wrapper for a station code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationCode {
    code: u16,
}

impl From<u16> for StationCode {
    fn from(val: u16) -> Self {
        StationCode { code: val }
    }
}

impl From<StationCode> for u16 {
    fn from(code: StationCode) -> u16 {
        code.code
    }
}

impl From<StationCode> for i64 {
    fn from(code: StationCode) -> i64 {
        i64::from(code.code)
    }
}

impl Display for StationCode {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        Display::fmt(&self.code, formatter)
    }
}

impl FromStr for StationCode {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>().map(StationCode::from)
    }
}

impl rusqlite::ToSql for StationCode {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        Ok(rusqlite::types::ToSqlOutput::from(i64::from(self.code)))
    }
}

impl rusqlite::types::FromSql for StationCode {
    fn column_result(value: rusqlite::types::ValueRef<'_>) -> rusqlite::types::FromSqlResult<Self> {
        u16::column_result(value).map(StationCode::from)
    }
}

impl StationCode {
    /// Test to see if this is a valid station code.
    pub fn is_valid(self) -> bool {
        self.code > 0
    }

    /// Create a new one.
    pub const fn new(code: u16) -> Self {
        StationCode { code }
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let code: StationCode = "260".parse().unwrap();
        assert_eq!(code, StationCode::new(260));
        assert_eq!(code.to_string(), "260");
        assert!(code.is_valid());
        assert!(!StationCode::new(0).is_valid());
        assert!("26a".parse::<StationCode>().is_err());
    }
}
