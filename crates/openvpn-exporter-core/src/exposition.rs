//! Prometheus text exposition of collected measurements.
//!
//! A fresh [`Registry`] is built per scrape, so series of clients that have
//! disconnected since the last scrape disappear with them.

use std::collections::{BTreeMap, HashSet};
use std::string::FromUtf8Error;

use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};
use thiserror::Error;
use tracing::warn;

use crate::metrics::Measurement;
use crate::schema::MetricKind;

/// Prefix of every exported metric name.
pub const NAMESPACE: &str = "openvpn";

/// Content type of [`render`] output.
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

#[derive(Debug, Error)]
pub enum ExpositionError {
    #[error("metric registry error: {0}")]
    Registry(#[from] prometheus::Error),

    #[error("exposition is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Builds a registry holding one metric family per measurement name.
///
/// Only the first sample of a label set is exported; later ones are
/// dropped with a warning. Negative or NaN counter values cannot be
/// represented and are dropped too.
pub fn registry(measurements: &[Measurement]) -> Result<Registry, ExpositionError> {
    let mut families: BTreeMap<&'static str, Vec<&Measurement>> = BTreeMap::new();
    for measurement in measurements {
        families
            .entry(measurement.name())
            .or_default()
            .push(measurement);
    }

    let registry = Registry::new();
    for (name, samples) in families {
        let desc = samples[0].desc;
        let opts = Opts::new(name, desc.help).namespace(NAMESPACE);
        let samples = first_per_label_set(name, samples);

        match desc.kind {
            MetricKind::Counter => {
                let family = CounterVec::new(opts, desc.label_names)?;
                for sample in samples {
                    if sample.value.is_nan() || sample.value < 0.0 {
                        warn!(
                            metric = name,
                            value = sample.value,
                            "counter value out of range, dropping"
                        );
                        continue;
                    }
                    family
                        .get_metric_with_label_values(&label_values(sample))?
                        .inc_by(sample.value);
                }
                registry.register(Box::new(family))?;
            }
            MetricKind::Gauge => {
                let family = GaugeVec::new(opts, desc.label_names)?;
                for sample in samples {
                    family
                        .get_metric_with_label_values(&label_values(sample))?
                        .set(sample.value);
                }
                registry.register(Box::new(family))?;
            }
        }
    }

    Ok(registry)
}

fn first_per_label_set<'m>(name: &str, samples: Vec<&'m Measurement>) -> Vec<&'m Measurement> {
    let mut seen: HashSet<&'m [String]> = HashSet::new();
    samples
        .into_iter()
        .filter(|&sample| {
            let first = seen.insert(sample.labels.as_slice());
            if !first {
                warn!(
                    metric = name,
                    labels = ?sample.labels,
                    value = sample.value,
                    "duplicate sample, keeping the first"
                );
            }
            first
        })
        .collect()
}

fn label_values(measurement: &Measurement) -> Vec<&str> {
    measurement.labels.iter().map(String::as_str).collect()
}

/// Renders measurements in the Prometheus text format.
pub fn render(measurements: &[Measurement]) -> Result<String, ExpositionError> {
    let registry = registry(measurements)?;
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
