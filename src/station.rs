//! Weather stations and the reference file they are loaded from.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

use crate::errors::KnmiDataErr;

mod station_code;

pub use station_code::StationCode;

/// Number of decimal places the station coordinates are stored with.
const COORD_DECIMAL_PLACES: u32 = 3;

/// Description of a weather station.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Station {
    pub code: StationCode,
    pub longitude: Decimal,
    pub latitude: Decimal,
    pub altitude: Decimal,
    pub name: String,
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

/// Parse the station reference file.
///
/// Every non-blank line looks like `# 209:   4.518   52.465   -0.30  IJMOND`. The first column
/// is ignored, the code is the first three characters of the second column and the name is made
/// of all remaining columns. A line without a name gets an empty one.
pub fn parse_stations(text: &str) -> Result<Vec<Station>, KnmiDataErr> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_station_line(idx as u64 + 1, line))
        .collect()
}

fn parse_station_line(line_num: u64, line: &str) -> Result<Station, KnmiDataErr> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 5 {
        return Err(KnmiDataErr::parse(
            line_num,
            format!("expected at least 5 columns, found {}", tokens.len()),
        ));
    }

    let code_str: String = tokens[1].chars().take(3).collect();
    let code = StationCode::from_str(code_str.trim_end_matches(':'))
        .map_err(|err| KnmiDataErr::parse(line_num, format!("station code {}: {}", tokens[1], err)))?;
    if !code.is_valid() {
        return Err(KnmiDataErr::parse(
            line_num,
            format!("station code {} must be positive", tokens[1]),
        ));
    }

    let coord = |column: usize| -> Result<Decimal, KnmiDataErr> {
        let mut val = Decimal::from_str(tokens[column]).map_err(|err| {
            KnmiDataErr::parse(line_num, format!("column {} ({}): {}", column, tokens[column], err))
        })?;
        val.rescale(COORD_DECIMAL_PLACES);
        Ok(val)
    };

    Ok(Station {
        code,
        longitude: coord(2)?,
        latitude: coord(3)?,
        altitude: coord(4)?,
        name: capitalize(&tokens[5..].join(" ")),
    })
}

/// Upper case the first character and lower case the rest.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
