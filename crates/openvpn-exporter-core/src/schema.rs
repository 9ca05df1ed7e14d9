//! Metric descriptors and the section registry.
//!
//! Everything here is built once by [`StatusSchema::new`] and then only
//! read. Scans borrow the schema; nothing in it changes per scrape.

use std::collections::HashMap;

/// Section identifier of the connected-client table.
pub const CLIENT_LIST: &str = "CLIENT_LIST";
/// Section identifier of the routing table.
pub const ROUTING_TABLE: &str = "ROUTING_TABLE";

/// Label every measurement starts with.
pub const STATUS_PATH_LABEL: &str = "status_path";

const STATUS_PATH_ONLY: &[&str] = &[STATUS_PATH_LABEL];

/// Kind of a Prometheus sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Counter,
    Gauge,
}

/// Identity of an emitted metric.
///
/// `name` carries no namespace; the `openvpn` prefix is added at exposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricDesc {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
    pub label_names: &'static [&'static str],
}

/// A status column exported as a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricFieldSpec {
    /// Column the value is read from, e.g. `Bytes Received`.
    pub column: &'static str,
    pub desc: MetricDesc,
}

/// Columns of one status section that become labels and metrics.
///
/// `label_columns` are looked up in order; each produces one label value
/// after the leading `status_path`, so every field's `desc.label_names`
/// has `label_columns.len() + 1` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    pub label_columns: &'static [&'static str],
    pub fields: Vec<MetricFieldSpec>,
}

pub const UP: MetricDesc = MetricDesc {
    name: "up",
    help: "Whether scraping OpenVPN's metrics was successful.",
    kind: MetricKind::Gauge,
    label_names: STATUS_PATH_ONLY,
};

pub const STATUS_UPDATE_TIME: MetricDesc = MetricDesc {
    name: "status_update_time_seconds",
    help: "UNIX timestamp at which the OpenVPN statistics were updated.",
    kind: MetricKind::Gauge,
    label_names: STATUS_PATH_ONLY,
};

pub const SERVER_CONNECTED_CLIENTS: MetricDesc = MetricDesc {
    name: "server_connected_clients",
    help: "Number Of Connected Clients",
    kind: MetricKind::Gauge,
    label_names: STATUS_PATH_ONLY,
};

const fn client_counter(name: &'static str, help: &'static str) -> MetricDesc {
    MetricDesc {
        name,
        help,
        kind: MetricKind::Counter,
        label_names: STATUS_PATH_ONLY,
    }
}

/// Client statistics keys and the counters they feed.
pub const CLIENT_COUNTERS: [(&str, MetricDesc); 9] = [
    (
        "TUN/TAP read bytes",
        client_counter(
            "client_tun_tap_read_bytes_total",
            "Total amount of TUN/TAP traffic read, in bytes.",
        ),
    ),
    (
        "TUN/TAP write bytes",
        client_counter(
            "client_tun_tap_write_bytes_total",
            "Total amount of TUN/TAP traffic written, in bytes.",
        ),
    ),
    (
        "TCP/UDP read bytes",
        client_counter(
            "client_tcp_udp_read_bytes_total",
            "Total amount of TCP/UDP traffic read, in bytes.",
        ),
    ),
    (
        "TCP/UDP write bytes",
        client_counter(
            "client_tcp_udp_write_bytes_total",
            "Total amount of TCP/UDP traffic written, in bytes.",
        ),
    ),
    (
        "Auth read bytes",
        client_counter(
            "client_auth_read_bytes_total",
            "Total amount of authentication traffic read, in bytes.",
        ),
    ),
    (
        "pre-compress bytes",
        client_counter(
            "client_pre_compress_bytes_total",
            "Total amount of data before compression, in bytes.",
        ),
    ),
    (
        "post-compress bytes",
        client_counter(
            "client_post_compress_bytes_total",
            "Total amount of data after compression, in bytes.",
        ),
    ),
    (
        "pre-decompress bytes",
        client_counter(
            "client_pre_decompress_bytes_total",
            "Total amount of data before decompression, in bytes.",
        ),
    ),
    (
        "post-decompress bytes",
        client_counter(
            "client_post_decompress_bytes_total",
            "Total amount of data after decompression, in bytes.",
        ),
    ),
];

const CLIENT_LABELS: &[&str] = &[
    STATUS_PATH_LABEL,
    "common_name",
    "connection_time",
    "real_address",
    "virtual_address",
    "username",
];
/// `username` is filled from the common name; v4 files carry no
/// `Username` column.
const CLIENT_LABEL_COLUMNS: &[&str] = &[
    "Common Name",
    "Connected Since",
    "Real Address",
    "Virtual Address",
    "Common Name",
];

const ROUTE_LABELS: &[&str] = &[
    STATUS_PATH_LABEL,
    "common_name",
    "real_address",
    "virtual_address",
];
const ROUTE_LABEL_COLUMNS: &[&str] = &["Common Name", "Real Address", "Virtual Address"];

const AGGREGATED_LABELS: &[&str] = &[STATUS_PATH_LABEL, "common_name"];
const AGGREGATED_LABEL_COLUMNS: &[&str] = &["Common Name"];

/// How much per-connection detail server metrics are labeled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelDetail {
    /// Common name plus connection time, addresses and username.
    #[default]
    Individual,
    /// Common name only; keeps series stable across reconnects.
    CommonNameOnly,
}

/// Immutable description of everything a scan may emit.
#[derive(Debug, Clone)]
pub struct StatusSchema {
    sections: HashMap<&'static str, SectionSpec>,
    client_counters: HashMap<&'static str, MetricDesc>,
}

impl StatusSchema {
    pub fn new(detail: LabelDetail) -> Self {
        let (client_labels, client_columns, route_labels, route_columns) = match detail {
            LabelDetail::Individual => (
                CLIENT_LABELS,
                CLIENT_LABEL_COLUMNS,
                ROUTE_LABELS,
                ROUTE_LABEL_COLUMNS,
            ),
            LabelDetail::CommonNameOnly => (
                AGGREGATED_LABELS,
                AGGREGATED_LABEL_COLUMNS,
                AGGREGATED_LABELS,
                AGGREGATED_LABEL_COLUMNS,
            ),
        };

        let client_list = SectionSpec {
            label_columns: client_columns,
            fields: vec![
                MetricFieldSpec {
                    column: "Bytes Received",
                    desc: MetricDesc {
                        name: "server_client_received_bytes_total",
                        help: "Amount of data received over a connection on the VPN server, in bytes.",
                        kind: MetricKind::Counter,
                        label_names: client_labels,
                    },
                },
                MetricFieldSpec {
                    column: "Bytes Sent",
                    desc: MetricDesc {
                        name: "server_client_sent_bytes_total",
                        help: "Amount of data sent over a connection on the VPN server, in bytes.",
                        kind: MetricKind::Counter,
                        label_names: client_labels,
                    },
                },
            ],
        };

        let routing_table = SectionSpec {
            label_columns: route_columns,
            fields: vec![MetricFieldSpec {
                column: "Last Ref (time_t)",
                desc: MetricDesc {
                    name: "server_route_last_reference_time_seconds",
                    help: "Time at which a route was last referenced, in seconds.",
                    kind: MetricKind::Gauge,
                    label_names: route_labels,
                },
            }],
        };

        Self {
            sections: HashMap::from([(CLIENT_LIST, client_list), (ROUTING_TABLE, routing_table)]),
            client_counters: CLIENT_COUNTERS.into_iter().collect(),
        }
    }

    /// Looks up a registered section by its record tag.
    pub fn section(&self, tag: &str) -> Option<&SectionSpec> {
        self.sections.get(tag)
    }

    /// Looks up the counter fed by a client statistics key.
    pub fn client_counter(&self, key: &str) -> Option<&MetricDesc> {
        self.client_counters.get(key)
    }
}

impl Default for StatusSchema {
    fn default() -> Self {
        Self::new(LabelDetail::default())
    }
}
