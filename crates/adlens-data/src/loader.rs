//! CSV loading for the advertising dataset.

use crate::error::{DataError, Result};
use crate::record::AdRecord;
use std::fs::File;
use std::path::Path;

/// Columns the dataset header must contain. Order in the file is not
/// significant; rows are matched to fields by header name.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "date",
    "platform",
    "impressions",
    "clicks",
    "cost",
    "conversions",
    "revenue",
];

/// Load the advertising dataset from a comma-delimited file.
///
/// Fails if the file cannot be opened, if any required column is missing
/// from the header, or if a row cannot be parsed into an [`AdRecord`].
/// There is no partial recovery: the first bad row aborts the load.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<AdRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DataError::MissingColumn(required));
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: AdRecord = row?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "date,platform,impressions,clicks,cost,conversions,revenue";

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_well_formed_rows() {
        let file = write_csv(&format!(
            "{HEADER}\n2024-03-04,google,1200,48,36.5,5,120\n2024-03-04,facebook,900,27,21.0,3,60\n"
        ));
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].platform, "google");
        assert_eq!(records[1].impressions, 900.0);
    }

    #[test]
    fn accepts_reordered_columns() {
        let file = write_csv(
            "platform,date,revenue,impressions,clicks,cost,conversions\n\
             google,2024-03-04,120,1200,48,36.5,5\n",
        );
        let records = load_records(file.path()).unwrap();
        assert_eq!(records[0].revenue, 120.0);
        assert_eq!(records[0].cost, 36.5);
    }

    #[test]
    fn rejects_missing_column() {
        let file = write_csv("date,platform,impressions,clicks,cost,conversions\n");
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("revenue")));
    }

    #[test]
    fn rejects_missing_file() {
        let err = load_records("no_such_dataset.csv").unwrap_err();
        assert!(matches!(err, DataError::Open { .. }));
    }

    #[test]
    fn rejects_malformed_row() {
        let file = write_csv(&format!("{HEADER}\n2024-03-04,google,not_a_number,48,36.5,5,120\n"));
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn empty_body_yields_no_records() {
        let file = write_csv(&format!("{HEADER}\n"));
        let records = load_records(file.path()).unwrap();
        assert!(records.is_empty());
    }
}
