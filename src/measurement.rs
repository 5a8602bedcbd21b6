//! Hourly measurements and the parser for the KNMI hourly csv feed.

use std::{collections::HashMap, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    errors::KnmiDataErr,
    station::{Station, StationCode},
    timestamp::derive_time,
};

/// Number of decimal places the readings are stored with.
const READING_DECIMAL_PLACES: u32 = 1;

/// Column names as used in the header of the hourly feed.
const COLUMNS: [&str; 25] = [
    "STN", "YYYYMMDD", "HH", "DD", "FH", "FF", "FX", "T", "T10N", "TD", "SQ", "Q", "DR", "RH",
    "P", "VV", "N", "U", "WW", "IX", "M", "R", "S", "O", "Y",
];

/// The readings of a single station during a single hour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Measurement {
    /// The station that made the observations.
    pub station: StationCode,
    /// Calendar day of the observation.
    pub day: NaiveDate,
    /// Hour of the day, 1 through 24, marking the end of the hour covered.
    pub hour: u32,
    /// Start of the hour covered, derived from `day` and `hour`.
    pub time: DateTime<Utc>,

    /// Wind direction in degrees averaged over the last 10 minutes of the hour (360 north, 90
    /// east, 180 south, 270 west, 0 calm, 990 variable).
    pub wind_direction: Option<Decimal>,
    /// Hourly mean wind speed in m/s.
    pub wind_speed: Option<Decimal>,
    /// Highest wind gust in m/s.
    pub gust_of_wind: Option<Decimal>,
    /// Temperature in degrees Celsius at 1.5 m.
    pub temperature: Option<Decimal>,
    /// Dew point temperature in degrees Celsius at 1.5 m.
    pub dew_temperature: Option<Decimal>,
    /// Duration of sunshine in hours, -1 for less than 0.05 hour.
    pub sunshine: Option<Decimal>,
    /// Global radiation in J/cm2.
    pub radiation: Option<Decimal>,
    /// Duration of precipitation in hours.
    pub precipitation_duration: Option<Decimal>,
    /// Precipitation amount in mm, -1 for less than 0.05 mm.
    pub precipitation: Option<Decimal>,
    /// Air pressure reduced to sea level in hPa.
    pub air_pressure: Option<Decimal>,
    /// Horizontal visibility code.
    pub visibility: Option<Decimal>,
    /// Cloud cover in octants, 9 for sky invisible.
    pub cloud_cover: Option<Decimal>,
    /// Relative humidity in percent at 1.5 m.
    pub relative_humidity: Option<Decimal>,

    /// Mist occurred during the hour.
    pub mist: bool,
    /// Rain occurred during the hour.
    pub rain: bool,
    /// Snow occurred during the hour.
    pub snow: bool,
    /// Thunder occurred during the hour.
    pub lightning: bool,
    /// Ice formation occurred during the hour.
    pub icing: bool,
}

/// Parse a number the feed records in tenths of a unit.
///
/// `Some("24")` becomes 2.4, `None` stays `None`.
pub fn parse_tenths(field: Option<&str>) -> Result<Option<Decimal>, rust_decimal::Error> {
    field
        .map(|val| -> Result<Decimal, rust_decimal::Error> {
            let mut val = Decimal::from_str(val)? / Decimal::TEN;
            val.rescale(READING_DECIMAL_PLACES);
            Ok(val)
        })
        .transpose()
}

/// Parse the contents of an hourly csv file.
///
/// Every station code must be present in `stations`. Any bad line fails the whole batch.
pub fn parse_measurements(
    text: &str,
    stations: &HashMap<StationCode, Station>,
) -> Result<Vec<Measurement>, KnmiDataErr> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .quoting(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut measurements = vec![];
    for record in rdr.records() {
        let record = record?;
        // Only lines starting with '#' are comments to the reader, indented ones show up here.
        if record.iter().all(str::is_empty)
            || record.get(0).map_or(false, |first| first.starts_with('#'))
        {
            continue;
        }

        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        let fields: Vec<&str> = record.iter().collect();
        measurements.push(parse_record(line, &fields, stations)?);
    }

    Ok(measurements)
}

fn parse_record(
    line: u64,
    fields: &[&str],
    stations: &HashMap<StationCode, Station>,
) -> Result<Measurement, KnmiDataErr> {
    if fields.len() < COLUMNS.len() {
        return Err(KnmiDataErr::parse(
            line,
            format!("expected {} columns, found {}", COLUMNS.len(), fields.len()),
        ));
    }
    let rec = Record { line, fields };

    let station = StationCode::from_str(fields[0]).map_err(|err| rec.err(0, err))?;
    if !station.is_valid() {
        return Err(rec.err(0, "station code must be positive"));
    }
    if !stations.contains_key(&station) {
        return Err(KnmiDataErr::UnknownStation(station));
    }

    let day = rec.day(1)?;
    let hour: u32 = fields[2].parse().map_err(|err| rec.err(2, err))?;
    let time = derive_time(day, hour).map_err(|err| rec.err(2, err))?;

    Ok(Measurement {
        station,
        day,
        hour,
        time,
        wind_direction: rec.tenths(3)?,
        wind_speed: rec.tenths(4)?,
        gust_of_wind: rec.tenths(6)?,
        temperature: rec.tenths(7)?,
        dew_temperature: rec.tenths(9)?,
        sunshine: rec.tenths(10)?,
        radiation: rec.decimal(11)?,
        precipitation_duration: rec.tenths(12)?,
        precipitation: rec.tenths(13)?,
        air_pressure: rec.tenths(14)?,
        visibility: rec.decimal(15)?,
        cloud_cover: rec.decimal(16)?,
        relative_humidity: rec.decimal(17)?,
        mist: rec.flag(20)?,
        rain: rec.flag(21)?,
        snow: rec.flag(22)?,
        lightning: rec.flag(23)?,
        icing: rec.flag(24)?,
    })
}

// One line of the feed, split into its columns.
struct Record<'a> {
    line: u64,
    fields: &'a [&'a str],
}

impl<'a> Record<'a> {
    fn err<E: std::fmt::Display>(&self, column: usize, err: E) -> KnmiDataErr {
        KnmiDataErr::parse(
            self.line,
            format!("column {} ({:?}): {}", COLUMNS[column], self.fields[column], err),
        )
    }

    fn optional(&self, column: usize) -> Option<&'a str> {
        Some(self.fields[column]).filter(|val| !val.is_empty())
    }

    fn day(&self, column: usize) -> Result<NaiveDate, KnmiDataErr> {
        let val = self.fields[column];
        if val.len() != 8 || !val.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.err(column, "expected YYYYMMDD"));
        }

        NaiveDate::parse_from_str(val, "%Y%m%d").map_err(|err| self.err(column, err))
    }

    fn tenths(&self, column: usize) -> Result<Option<Decimal>, KnmiDataErr> {
        parse_tenths(self.optional(column)).map_err(|err| self.err(column, err))
    }

    fn decimal(&self, column: usize) -> Result<Option<Decimal>, KnmiDataErr> {
        self.optional(column)
            .map(|val| -> Result<Decimal, KnmiDataErr> {
                let mut val = Decimal::from_str(val).map_err(|err| self.err(column, err))?;
                val.rescale(READING_DECIMAL_PLACES);
                Ok(val)
            })
            .transpose()
    }

    // Not reported counts as did not occur.
    fn flag(&self, column: usize) -> Result<bool, KnmiDataErr> {
        match self.fields[column] {
            "" | "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(self.err(column, "expected 0, 1 or nothing")),
        }
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    use chrono::TimeZone;

    const DE_BILT_LINE: &str = "260,20210128,1,240,40,,60,100,,80,0,0,0,0,10120,80,8,90,,,0,0,0,0,0";

    fn registry(codes: &[u16]) -> HashMap<StationCode, Station> {
        codes
            .iter()
            .map(|&code| {
                let code = StationCode::new(code);
                (
                    code,
                    Station {
                        code,
                        longitude: Decimal::new(5180, 3),
                        latitude: Decimal::new(52100, 3),
                        altitude: Decimal::new(1900, 3),
                        name: "De bilt".to_owned(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_parse_tenths() {
        for n in -1000i64..=1000 {
            let parsed = parse_tenths(Some(n.to_string().as_str())).unwrap().unwrap();
            assert_eq!(parsed, Decimal::new(n, 1));
        }

        assert_eq!(parse_tenths(Some("24")).unwrap(), Some(Decimal::new(24, 1)));
        assert_eq!(parse_tenths(Some("24")).unwrap().unwrap().to_string(), "2.4");
        assert_eq!(parse_tenths(Some("-1")).unwrap(), Some(Decimal::new(-1, 1)));
        assert_eq!(parse_tenths(None).unwrap(), None);
        assert!(parse_tenths(Some("abc")).is_err());
    }

    #[test]
    fn test_parse_de_bilt_line() {
        let measurements = parse_measurements(DE_BILT_LINE, &registry(&[260])).unwrap();
        assert_eq!(measurements.len(), 1);

        let m = &measurements[0];
        assert_eq!(m.station, StationCode::new(260));
        assert_eq!(m.day, NaiveDate::from_ymd_opt(2021, 1, 28).unwrap());
        assert_eq!(m.hour, 1);
        assert_eq!(m.time, Utc.with_ymd_and_hms(2021, 1, 28, 0, 0, 0).unwrap());

        assert_eq!(m.wind_direction, Some(Decimal::new(240, 1)));
        assert_eq!(m.wind_speed, Some(Decimal::new(40, 1)));
        assert_eq!(m.gust_of_wind, Some(Decimal::new(60, 1)));
        assert_eq!(m.temperature, Some(Decimal::new(100, 1)));
        assert_eq!(m.dew_temperature, Some(Decimal::new(80, 1)));
        assert_eq!(m.sunshine, Some(Decimal::ZERO));
        assert_eq!(m.radiation, Some(Decimal::ZERO));
        assert_eq!(m.precipitation_duration, Some(Decimal::ZERO));
        assert_eq!(m.precipitation, Some(Decimal::ZERO));
        assert_eq!(m.air_pressure, Some(Decimal::new(10120, 1)));
        assert_eq!(m.visibility, Some(Decimal::new(80, 0)));
        assert_eq!(m.cloud_cover, Some(Decimal::new(8, 0)));
        assert_eq!(m.relative_humidity, Some(Decimal::new(90, 0)));
        assert!(!m.mist && !m.rain && !m.snow && !m.lightning && !m.icing);
    }

    #[test]
    fn test_empty_fields_are_none() {
        let line = "209,20210128,   24,  230,   70,   70,   90,     ,      ,     ,     ,     ,     ,     ,      ,     ,     ,     ,     ,    6,     ,     ,     ,     ,     ";
        let m = &parse_measurements(line, &registry(&[209])).unwrap()[0];

        assert_eq!(m.hour, 24);
        assert_eq!(m.time, Utc.with_ymd_and_hms(2021, 1, 28, 23, 0, 0).unwrap());
        assert_eq!(m.wind_direction, Some(Decimal::new(230, 1)));
        assert_eq!(m.temperature, None);
        assert_eq!(m.dew_temperature, None);
        assert_eq!(m.radiation, None);
        assert_eq!(m.air_pressure, None);
        assert_eq!(m.relative_humidity, None);
        assert!(!m.mist && !m.rain && !m.snow && !m.lightning && !m.icing);
    }

    #[test]
    fn test_flags() {
        let line = "260,20210128,1,240,40,,60,100,,80,0,0,0,0,10120,80,8,90,,,1,0,1,,1";
        let m = &parse_measurements(line, &registry(&[260])).unwrap()[0];
        assert!(m.mist);
        assert!(!m.rain);
        assert!(m.snow);
        assert!(!m.lightning);
        assert!(m.icing);

        let line = "260,20210128,1,240,40,,60,100,,80,0,0,0,0,10120,80,8,90,,,2,0,0,0,0";
        assert!(matches!(
            parse_measurements(line, &registry(&[260])),
            Err(KnmiDataErr::Parse { .. })
        ));
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let text = format!(
            "# BRON: KONINKLIJK NEDERLANDS METEOROLOGISCH INSTITUUT (KNMI)\n\
             # STN,YYYYMMDD,   HH,   DD\n\
             \n\
             {}\n\
             #\n",
            DE_BILT_LINE
        );
        assert_eq!(parse_measurements(&text, &registry(&[260])).unwrap().len(), 1);

        assert!(parse_measurements("# only a header\n", &registry(&[260]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_indented_comments_are_skipped() {
        let text = format!(
            "  # STN,YYYYMMDD,   HH,   DD\n\t# YYYYMMDD = datum\n{}\n",
            DE_BILT_LINE
        );

        let measurements = parse_measurements(&text, &registry(&[260])).unwrap();
        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements[0].station, StationCode::new(260));
    }

    #[test]
    fn test_zero_station_code_fails() {
        let line = "000,20210128,1,240,40,,60,100,,80,0,0,0,0,10120,80,8,90,,,0,0,0,0,0";
        match parse_measurements(line, &registry(&[0, 260])) {
            Err(KnmiDataErr::Parse { line, message }) => {
                assert_eq!(line, 1);
                assert!(message.contains("STN"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_station_fails() {
        match parse_measurements(DE_BILT_LINE, &registry(&[209])) {
            Err(KnmiDataErr::UnknownStation(code)) => assert_eq!(code, StationCode::new(260)),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_lines_fail() {
        let stations = registry(&[260]);

        // Bad date
        let line = "260,20211328,1,240,40,,60,100,,80,0,0,0,0,10120,80,8,90,,,0,0,0,0,0";
        assert!(matches!(
            parse_measurements(line, &stations),
            Err(KnmiDataErr::Parse { line: 1, .. })
        ));

        // Short date
        let line = "260,2021128,1,240,40,,60,100,,80,0,0,0,0,10120,80,8,90,,,0,0,0,0,0";
        assert!(parse_measurements(line, &stations).is_err());

        // Non-numeric reading
        let line = "260,20210128,1,2x0,40,,60,100,,80,0,0,0,0,10120,80,8,90,,,0,0,0,0,0";
        assert!(parse_measurements(line, &stations).is_err());

        // Hour out of range
        let line = "260,20210128,25,240,40,,60,100,,80,0,0,0,0,10120,80,8,90,,,0,0,0,0,0";
        assert!(parse_measurements(line, &stations).is_err());

        // Too few columns
        let line = "260,20210128,1,240,40";
        assert!(parse_measurements(line, &stations).is_err());

        // Bad line after a good one reports the right line
        let text = format!("{}\n260,20210128,x,240", DE_BILT_LINE);
        match parse_measurements(&text, &stations) {
            Err(KnmiDataErr::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
