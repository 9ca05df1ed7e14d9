//! Shared application state and the global allocator.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::sync::Arc;

use openvpn_exporter_core::collector::{FileSystem, StatusCollector};

pub(crate) type Collector = StatusCollector<Box<dyn FileSystem>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) collector: Arc<Collector>,
    /// Path the landing page links to.
    pub(crate) telemetry_path: Arc<str>,
}

impl AppState {
    pub(crate) fn new(collector: Collector, telemetry_path: &str) -> Self {
        Self {
            collector: Arc::new(collector),
            telemetry_path: Arc::from(telemetry_path),
        }
    }
}
