//! A store of weather stations and their hourly measurements.

use std::{path::PathBuf, str::FromStr};

use rust_decimal::Decimal;

/// The store.
#[derive(Debug)]
pub struct Store {
    root: PathBuf,                 // The root directory.
    db_conn: rusqlite::Connection, // An sqlite connection.
}

mod modify;
mod query;
mod root;

// Decimals are kept as text so they survive the round trip through sqlite exactly.
fn decimal_to_sql(val: &Option<Decimal>) -> Option<String> {
    val.map(|val| val.to_string())
}

fn decimal_column(row: &rusqlite::Row, idx: usize) -> Result<Option<Decimal>, rusqlite::Error> {
    row.get::<_, Option<String>>(idx)?
        .map(|text| {
            Decimal::from_str(&text).map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(err),
                )
            })
        })
        .transpose()
}

fn required_decimal_column(row: &rusqlite::Row, idx: usize) -> Result<Decimal, rusqlite::Error> {
    decimal_column(row, idx)?.ok_or_else(|| {
        rusqlite::Error::InvalidColumnType(idx, "decimal".to_owned(), rusqlite::types::Type::Null)
    })
}
