use payoffopt_types::{PayoffOptError, Result, StrikeGrid, StrikeRow};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Column separator of the option chain export
pub const DEFAULT_DELIMITER: u8 = b';';

/// One row of the option chain export
#[derive(Debug, Deserialize)]
struct ChainRecord {
    #[serde(rename = "Strike")]
    strike: f64,
    #[serde(rename = "Price_CALL")]
    call_price: f64,
    #[serde(rename = "Price_PUT")]
    put_price: f64,
}

impl From<ChainRecord> for StrikeRow {
    fn from(record: ChainRecord) -> Self {
        StrikeRow::new(record.strike, record.call_price, record.put_price)
    }
}

/// Parse strike rows from delimited text with a header line.
///
/// Columns are matched by name (`Strike`, `Price_CALL`, `Price_PUT`); others are ignored.
pub fn read_strike_rows<R: Read>(reader: R, delimiter: u8) -> Result<Vec<StrikeRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<ChainRecord>()
        .map(|record| {
            record
                .map(StrikeRow::from)
                .map_err(|e| PayoffOptError::InputError(e.to_string()))
        })
        .collect()
}

/// Load strike rows from a delimited file
pub fn load_strike_rows(path: impl AsRef<Path>, delimiter: u8) -> Result<Vec<StrikeRow>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| PayoffOptError::IoError(format!("{}: {}", path.display(), e)))?;
    let rows = read_strike_rows(file, delimiter)?;
    tracing::info!("Loaded {} strike rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load and validate a strike grid from a delimited file
pub fn load_strike_grid(path: impl AsRef<Path>, delimiter: u8) -> Result<StrikeGrid> {
    StrikeGrid::new(load_strike_rows(path, delimiter)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semicolon_input() {
        let data = "Price_CALL;Price_PUT;Strike\n120.5;35;2900\n85;50.25;2950\n";
        let rows = read_strike_rows(data.as_bytes(), DEFAULT_DELIMITER).unwrap();

        assert_eq!(
            rows,
            vec![
                StrikeRow::new(2900.0, 120.5, 35.0),
                StrikeRow::new(2950.0, 85.0, 50.25),
            ]
        );
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let data = "Strike ; Expiry ; Price_PUT ; Price_CALL\n 3000 ; SET22 ; 70 ; 55\n";
        let rows = read_strike_rows(data.as_bytes(), DEFAULT_DELIMITER).unwrap();

        assert_eq!(rows, vec![StrikeRow::new(3000.0, 55.0, 70.0)]);
    }

    #[test]
    fn test_missing_column() {
        let data = "Price_CALL;Strike\n120;2900\n";
        let err = read_strike_rows(data.as_bytes(), DEFAULT_DELIMITER).unwrap_err();

        assert!(matches!(err, PayoffOptError::InputError(_)));
    }

    #[test]
    fn test_non_numeric_value() {
        let data = "Price_CALL;Price_PUT;Strike\nabc;35;2900\n";
        assert!(read_strike_rows(data.as_bytes(), DEFAULT_DELIMITER).is_err());
    }

    #[test]
    fn test_comma_delimiter() {
        let data = "Strike,Price_CALL,Price_PUT\n2900,120,35\n";
        let rows = read_strike_rows(data.as_bytes(), b',').unwrap();

        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_strike_rows("/nonexistent/chain.csv", DEFAULT_DELIMITER).unwrap_err();
        assert!(matches!(err, PayoffOptError::IoError(_)));
    }
}
