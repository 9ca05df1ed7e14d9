//! Per-document scan state.

use tracing::debug;

use super::ScanError;
use super::columns::{ColumnValues, parse_value};
use super::dedup::DedupTracker;
use crate::metrics::Measurement;
use crate::schema::{
    MetricDesc, SERVER_CONNECTED_CLIENTS, STATUS_UPDATE_TIME, SectionSpec, StatusSchema,
};

/// State of one document scan.
///
/// Measurements are held back until the whole document parsed, so a
/// failing document contributes nothing.
pub struct Scan<'a> {
    schema: &'a StatusSchema,
    status_path: &'a str,
    dedup: DedupTracker,
    connected_clients: u64,
    measurements: Vec<Measurement>,
}

impl<'a> Scan<'a> {
    pub fn new(schema: &'a StatusSchema, status_path: &'a str) -> Self {
        Self {
            schema,
            status_path,
            dedup: DedupTracker::new(),
            connected_clients: 0,
            measurements: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'a StatusSchema {
        self.schema
    }

    pub fn status_path(&self) -> &'a str {
        self.status_path
    }

    /// Records a sample labeled with the status path only.
    pub fn emit(&mut self, desc: MetricDesc, value: f64) {
        self.measurements
            .push(Measurement::new(desc, value, vec![self.status_path.to_string()]));
    }

    pub fn status_update_time(&mut self, epoch_seconds: f64) {
        self.emit(STATUS_UPDATE_TIME, epoch_seconds);
    }

    pub fn count_client(&mut self) {
        self.connected_clients += 1;
    }

    /// Emits the connected-client gauge; server dialects call this once at the end.
    pub fn emit_connected_clients(&mut self) {
        self.emit(SERVER_CONNECTED_CLIENTS, self.connected_clients as f64);
    }

    /// Emits every metric field of `section` present in `columns`.
    ///
    /// A label tuple a field already emitted is skipped, not an error.
    pub fn emit_row(
        &mut self,
        section: &SectionSpec,
        columns: &ColumnValues<'_>,
    ) -> Result<(), ScanError> {
        let labels = columns.label_tuple(self.status_path, section.label_columns);

        for field in &section.fields {
            let Some(raw) = columns.get(field.column) else {
                continue;
            };
            if !self.dedup.admit(field, &labels) {
                debug!(
                    status_path = self.status_path,
                    column = field.column,
                    labels = ?labels,
                    "metric entry with same labels, skipping"
                );
                continue;
            }
            let value = parse_value(field.column, raw)?;
            self.measurements
                .push(Measurement::new(field.desc, value, labels.clone()));
        }

        Ok(())
    }

    pub fn into_measurements(self) -> Vec<Measurement> {
        self.measurements
    }
}
