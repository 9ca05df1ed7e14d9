//! Scrape orchestration over all configured status files.

use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use tracing::{debug, warn};

use crate::collector::traits::FileSystem;
use crate::metrics::{Measurement, MetricSink};
use crate::schema::{StatusSchema, UP};
use crate::status::{Dialect, ScanError, scan_status};

/// Scans a fixed list of status files on every scrape.
///
/// Each file is scanned independently; a broken one reports `up` = 0
/// and does not affect the others.
pub struct StatusCollector<F: FileSystem> {
    fs: F,
    status_paths: Vec<String>,
    schema: StatusSchema,
}

impl<F: FileSystem> StatusCollector<F> {
    pub fn new(fs: F, status_paths: Vec<String>, schema: StatusSchema) -> Self {
        Self {
            fs,
            status_paths,
            schema,
        }
    }

    pub fn status_paths(&self) -> &[String] {
        &self.status_paths
    }

    /// Configured status paths that do not exist right now.
    pub fn missing_sources(&self) -> Vec<&str> {
        self.status_paths
            .iter()
            .filter(|path| !self.fs.exists(Path::new(path.as_str())))
            .map(String::as_str)
            .collect()
    }

    /// Scans a single status file into `sink`.
    pub fn collect_source(
        &self,
        status_path: &str,
        sink: &mut dyn MetricSink,
    ) -> Result<Dialect, ScanError> {
        let source = self.fs.open(Path::new(status_path))?;
        scan_status(&self.schema, status_path, source, sink)
    }

    /// Scans a single status file and reports its `up` gauge.
    fn scrape_source(&self, status_path: &str, sink: &mut dyn MetricSink) {
        let up = match self.collect_source(status_path, sink) {
            Ok(dialect) => {
                debug!(status_path, ?dialect, "status file scraped");
                1.0
            }
            Err(e) => {
                warn!(status_path, error = %e, "failed to scrape status file");
                0.0
            }
        };
        sink.emit(Measurement::new(UP, up, vec![status_path.to_string()]));
    }

    /// Scans every configured status file, in parallel.
    ///
    /// Measurements of different files arrive in no particular order.
    pub fn collect(&self) -> Vec<Measurement> {
        let started = Instant::now();
        let (tx, rx) = mpsc::channel();

        thread::scope(|s| {
            for status_path in &self.status_paths {
                let mut sink = tx.clone();
                s.spawn(move || self.scrape_source(status_path, &mut sink));
            }
        });
        drop(tx);

        let measurements: Vec<Measurement> = rx.into_iter().collect();
        debug!(
            sources = self.status_paths.len(),
            measurements = measurements.len(),
            elapsed = ?started.elapsed(),
            "scrape finished"
        );
        measurements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::schema::LabelDetail;

    fn up_values(measurements: &[Measurement]) -> Vec<(String, f64)> {
        let mut up: Vec<(String, f64)> = measurements
            .iter()
            .filter(|m| m.name() == "up")
            .map(|m| (m.labels[0].clone(), m.value))
            .collect();
        up.sort_by(|a, b| a.0.cmp(&b.0));
        up
    }

    fn for_path<'a>(measurements: &'a [Measurement], path: &str) -> Vec<&'a Measurement> {
        measurements
            .iter()
            .filter(|m| m.labels[0] == path)
            .collect()
    }

    #[test]
    fn test_collect_all_dialects() {
        let paths = vec![
            "/run/openvpn/server2.status".to_string(),
            "/run/openvpn/server3.status".to_string(),
            "/run/openvpn/server1.status".to_string(),
            "/run/openvpn/client.status".to_string(),
        ];
        let collector =
            StatusCollector::new(MockFs::openvpn_host(), paths, StatusSchema::default());
        let measurements = collector.collect();

        assert_eq!(
            up_values(&measurements),
            vec![
                ("/run/openvpn/client.status".to_string(), 1.0),
                ("/run/openvpn/server1.status".to_string(), 1.0),
                ("/run/openvpn/server2.status".to_string(), 1.0),
                ("/run/openvpn/server3.status".to_string(), 1.0),
            ]
        );
        // 8 scan measurements + up
        assert_eq!(for_path(&measurements, "/run/openvpn/server2.status").len(), 9);
        assert_eq!(for_path(&measurements, "/run/openvpn/server3.status").len(), 9);
        // 6 scan measurements + up
        assert_eq!(for_path(&measurements, "/run/openvpn/server1.status").len(), 7);
        // 10 scan measurements + up
        assert_eq!(for_path(&measurements, "/run/openvpn/client.status").len(), 11);
    }

    #[test]
    fn test_failed_source_reports_down_without_partial_output() {
        let mut fs = MockFs::corrupt_server();
        fs.add_file(
            "/run/openvpn/client.status",
            crate::collector::mock::scenarios::CLIENT_STATUS,
        );
        let collector = StatusCollector::new(
            fs,
            vec![
                "/run/openvpn/server2.status".to_string(),
                "/run/openvpn/client.status".to_string(),
            ],
            StatusSchema::default(),
        );
        let measurements = collector.collect();

        assert_eq!(
            up_values(&measurements),
            vec![
                ("/run/openvpn/client.status".to_string(), 1.0),
                ("/run/openvpn/server2.status".to_string(), 0.0),
            ]
        );
        let server = for_path(&measurements, "/run/openvpn/server2.status");
        assert_eq!(server.len(), 1);
        assert_eq!(server[0].name(), "up");
    }

    #[test]
    fn test_missing_file_reports_down() {
        let collector = StatusCollector::new(
            MockFs::new(),
            vec!["/run/openvpn/gone.status".to_string()],
            StatusSchema::default(),
        );
        let measurements = collector.collect();
        assert_eq!(
            up_values(&measurements),
            vec![("/run/openvpn/gone.status".to_string(), 0.0)]
        );
        assert_eq!(measurements.len(), 1);
    }

    #[test]
    fn test_collect_source_error_kind() {
        let collector = StatusCollector::new(
            MockFs::corrupt_server(),
            Vec::new(),
            StatusSchema::new(LabelDetail::CommonNameOnly),
        );
        let mut sink = Vec::new();
        let err = collector
            .collect_source("/run/openvpn/server2.status", &mut sink)
            .unwrap_err();
        assert!(matches!(err, ScanError::InvalidNumericValue { .. }));
        assert!(sink.is_empty());

        let err = collector
            .collect_source("/run/openvpn/none.status", &mut sink)
            .unwrap_err();
        assert!(matches!(err, ScanError::Io(_)));
    }

    #[test]
    fn test_missing_sources() {
        let mut fs = MockFs::openvpn_host();
        fs.remove_file("/run/openvpn/server3.status");
        let collector = StatusCollector::new(
            fs,
            vec![
                "/run/openvpn/server2.status".to_string(),
                "/run/openvpn/server3.status".to_string(),
            ],
            StatusSchema::default(),
        );
        assert_eq!(collector.missing_sources(), vec!["/run/openvpn/server3.status"]);
    }

    #[test]
    fn test_no_sources() {
        let collector = StatusCollector::new(MockFs::new(), Vec::new(), StatusSchema::default());
        assert!(collector.collect().is_empty());
        assert!(collector.status_paths().is_empty());
    }
}
