//! Column projection: header names paired with row values.

use std::collections::HashMap;

use super::ScanError;

/// Row values indexed by column name.
#[derive(Debug, Default)]
pub struct ColumnValues<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> ColumnValues<'a> {
    /// Pairs `row` with `header` by position.
    ///
    /// Values past the end of the header are dropped; header columns past
    /// the end of the row stay absent. A repeated column name keeps its
    /// last value.
    pub fn project(header: &'a [String], row: &[&'a str]) -> Self {
        let values = header
            .iter()
            .zip(row)
            .map(|(column, value)| (column.as_str(), *value))
            .collect();
        Self { values }
    }

    /// Makes every label column present, empty unless the row set it.
    pub fn with_label_defaults(mut self, label_columns: &[&'static str]) -> Self {
        for &column in label_columns {
            self.values.entry(column).or_insert("");
        }
        self
    }

    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.values.get(column).copied()
    }

    /// `status_path` followed by one value per label column, `""` if absent.
    pub fn label_tuple(&self, status_path: &str, label_columns: &[&str]) -> Vec<String> {
        let mut labels = Vec::with_capacity(label_columns.len() + 1);
        labels.push(status_path.to_string());
        labels.extend(
            label_columns
                .iter()
                .map(|column| self.get(column).unwrap_or_default().to_string()),
        );
        labels
    }
}

/// Parses a metric column value.
pub fn parse_value(column: &str, raw: &str) -> Result<f64, ScanError> {
    raw.parse::<f64>()
        .map_err(|_| ScanError::InvalidNumericValue {
            column: column.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_project_by_position() {
        let header = header(&["Common Name", "Real Address", "Bytes Received"]);
        let columns = ColumnValues::project(&header, &["alice", "198.51.100.7:51234", "1024"]);
        assert_eq!(columns.get("Common Name"), Some("alice"));
        assert_eq!(columns.get("Bytes Received"), Some("1024"));
        assert_eq!(columns.get("Bytes Sent"), None);
    }

    #[test]
    fn test_project_short_row() {
        let header = header(&["Common Name", "Real Address", "Bytes Received"]);
        let columns = ColumnValues::project(&header, &["alice"]);
        assert_eq!(columns.get("Common Name"), Some("alice"));
        assert_eq!(columns.get("Real Address"), None);
        assert_eq!(columns.get("Bytes Received"), None);
    }

    #[test]
    fn test_project_long_row() {
        let header = header(&["Common Name"]);
        let columns = ColumnValues::project(&header, &["alice", "extra", "1024"]);
        assert_eq!(columns.get("Common Name"), Some("alice"));
        assert_eq!(columns.values.len(), 1);
    }

    #[test]
    fn test_label_defaults_do_not_override() {
        let header = header(&["Common Name", "Bytes Received"]);
        let columns = ColumnValues::project(&header, &["alice", "1024"])
            .with_label_defaults(&["Common Name", "Username"]);
        assert_eq!(columns.get("Common Name"), Some("alice"));
        assert_eq!(columns.get("Username"), Some(""));
    }

    #[test]
    fn test_label_tuple() {
        let header = header(&["Virtual Address", "Common Name"]);
        let columns = ColumnValues::project(&header, &["10.8.0.6", "alice"]);
        assert_eq!(
            columns.label_tuple("/run/openvpn.status", &["Common Name", "Real Address"]),
            vec!["/run/openvpn.status", "alice", ""]
        );
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("Bytes Sent", "2097152").unwrap(), 2097152.0);
        assert_eq!(parse_value("Last Ref (time_t)", "1729416181").unwrap(), 1729416181.0);

        match parse_value("Bytes Received", "abc").unwrap_err() {
            ScanError::InvalidNumericValue { column, value } => {
                assert_eq!(column, "Bytes Received");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_value("Bytes Received", "").is_err());
    }
}
