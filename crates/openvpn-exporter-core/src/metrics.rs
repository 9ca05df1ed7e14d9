//! Measurements and the sinks they are written into.

use std::sync::mpsc::Sender;

use crate::schema::{MetricDesc, MetricKind};

/// One labeled sample.
///
/// `labels` line up with `desc.label_names`; the first is always the
/// status path.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub desc: MetricDesc,
    pub value: f64,
    pub labels: Vec<String>,
}

impl Measurement {
    pub fn new(desc: MetricDesc, value: f64, labels: Vec<String>) -> Self {
        debug_assert_eq!(labels.len(), desc.label_names.len(), "{}", desc.name);
        Self {
            desc,
            value,
            labels,
        }
    }

    pub fn name(&self) -> &'static str {
        self.desc.name
    }

    pub fn kind(&self) -> MetricKind {
        self.desc.kind
    }
}

/// Destination of finished measurements.
pub trait MetricSink {
    fn emit(&mut self, measurement: Measurement);
}

impl MetricSink for Vec<Measurement> {
    fn emit(&mut self, measurement: Measurement) {
        self.push(measurement);
    }
}

/// Channel sink for scans running on separate threads.
///
/// A disconnected receiver means nobody waits for the scrape anymore, so
/// the measurement is dropped.
impl MetricSink for Sender<Measurement> {
    fn emit(&mut self, measurement: Measurement) {
        let _ = self.send(measurement);
    }
}
