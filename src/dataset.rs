//! Loading of the raw distillery table from a comma-delimited file.
//!
//! The loader only checks what every later stage relies on: the file parses
//! as CSV, it has a header row, and the identifier and coordinate columns are
//! present with numeric coordinates. The taste range is located and validated
//! by [`crate::metrics`].

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

/// Header of the distillery identifier column.
pub const NAME_COLUMN: &str = "Distillery";

/// Header of the latitude column.
pub const LATITUDE_COLUMN: &str = "Latitude";

/// Header of the longitude column.
pub const LONGITUDE_COLUMN: &str = "Longitude";

/// Errors raised while reading the input table.
#[derive(Debug)]
pub enum DataLoadError {
    /// The file could not be opened or read.
    Io(io::Error),
    /// The content is not well-formed CSV (for example ragged rows).
    Csv(csv::Error),
    /// The input has no header row.
    MissingHeader,
    /// A required column is absent from the header row.
    MissingColumn(&'static str),
    /// A coordinate cell could not be parsed as a number.
    InvalidCoordinate {
        /// 1-indexed data row, not counting the header.
        row: usize,
        /// Header of the offending column.
        column: &'static str,
        /// Raw cell content.
        value: String,
    },
}

impl From<io::Error> for DataLoadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DataLoadError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Failed to read distillery table: {err}"),
            Self::Csv(err) => write!(f, "Malformed distillery table: {err}"),
            Self::MissingHeader => write!(f, "Distillery table has no header row"),
            Self::MissingColumn(column) => {
                write!(f, "Distillery table is missing the `{column}` column")
            }
            Self::InvalidCoordinate { row, column, value } => write!(
                f,
                "Row {row} has a non-numeric `{column}` value {value:?}"
            ),
        }
    }
}

impl std::error::Error for DataLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::MissingHeader | Self::MissingColumn(_) | Self::InvalidCoordinate { .. } => None,
        }
    }
}

/// One data row with its identifier and coordinates already parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedRow {
    name: String,
    latitude: f64,
    longitude: f64,
    fields: StringRecord,
}

impl LoadedRow {
    /// Distillery name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude as stored in the input.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude as stored in the input.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Every cell of the row, in header order.
    pub fn fields(&self) -> &StringRecord {
        &self.fields
    }
}

/// The raw table exactly as read from the input file.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    headers: StringRecord,
    rows: Vec<LoadedRow>,
}

impl Dataset {
    /// Reads the table stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        debug!("loading distillery table from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads the table from any byte source.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, DataLoadError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(DataLoadError::MissingHeader);
        }

        let name_index = required_column(&headers, NAME_COLUMN)?;
        let latitude_index = required_column(&headers, LATITUDE_COLUMN)?;
        let longitude_index = required_column(&headers, LONGITUDE_COLUMN)?;

        let mut rows = Vec::new();
        for (offset, record) in reader.records().enumerate() {
            let fields = record?;
            let row = offset + 1;
            let name = fields.get(name_index).unwrap_or_default().to_owned();
            let latitude = coordinate(&fields, latitude_index, row, LATITUDE_COLUMN)?;
            let longitude = coordinate(&fields, longitude_index, row, LONGITUDE_COLUMN)?;
            rows.push(LoadedRow {
                name,
                latitude,
                longitude,
                fields,
            });
        }

        debug!("loaded {} distillery rows", rows.len());
        Ok(Self { headers, rows })
    }

    /// Header row, trimmed.
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Data rows in file order.
    pub fn rows(&self) -> &[LoadedRow] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the file contained only a header.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named `name`, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        column_position(&self.headers, name)
    }
}

fn column_position(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

fn required_column(headers: &StringRecord, name: &'static str) -> Result<usize, DataLoadError> {
    column_position(headers, name).ok_or(DataLoadError::MissingColumn(name))
}

fn coordinate(
    fields: &StringRecord,
    index: usize,
    row: usize,
    column: &'static str,
) -> Result<f64, DataLoadError> {
    let raw = fields.get(index).unwrap_or_default();
    raw.parse::<f64>()
        .map_err(|_| DataLoadError::InvalidCoordinate {
            row,
            column,
            value: raw.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "RowID,Distillery,Body,Sweetness,Smoky,Medicinal,Tobacco,Honey,Spicy,Winey,Nutty,Malty,Fruity,Floral,Postcode,Latitude,Longitude";

    fn table(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn loads_rows_with_trimmed_cells() {
        let csv = table(&["1,Aberfeldy,2,2,2,0,0,2,1,2,2,2,2,2, PH15 2EB,286580,749680"]);
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("load succeeds");
        assert_eq!(dataset.len(), 1);
        let row = &dataset.rows()[0];
        assert_eq!(row.name(), "Aberfeldy");
        assert_eq!(row.latitude(), 286580.0);
        assert_eq!(row.longitude(), 749680.0);
        assert_eq!(row.fields().get(14), Some("PH15 2EB"));
    }

    #[test]
    fn header_only_input_is_empty() {
        let dataset = Dataset::from_reader(HEADER.as_bytes()).expect("load succeeds");
        assert!(dataset.is_empty());
        assert_eq!(dataset.column_index("Floral"), Some(13));
    }

    #[test]
    fn missing_coordinate_column_is_rejected() {
        let csv = "Distillery,Body,Latitude\nA,1,2";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(LONGITUDE_COLUMN)));
    }

    #[test]
    fn non_numeric_coordinate_is_rejected() {
        let csv = table(&["1,Aberfeldy,2,2,2,0,0,2,1,2,2,2,2,2,PH15,north,749680"]);
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DataLoadError::InvalidCoordinate { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, LATITUDE_COLUMN);
                assert_eq!(value, "north");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let csv = table(&["1,Aberfeldy,2"]);
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::Csv(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Dataset::load("/definitely/not/here/whisky.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::Io(_)));
    }
}
