//! Prometheus metric names and recording helpers.

use std::time::Instant;

use metrics::{counter, histogram};
use scene_common::ErrorKind;

pub const REQUESTS_TOTAL: &str = "imagery_requests_total";
pub const ERRORS_TOTAL: &str = "imagery_errors_total";
pub const SCENE_SEARCH_MS: &str = "imagery_scene_search_ms";
pub const BAND_LOAD_MS: &str = "imagery_band_load_ms";
pub const RENDER_MS: &str = "imagery_render_ms";

pub fn record_request() {
    counter!(REQUESTS_TOTAL).increment(1);
}

pub fn record_error(kind: ErrorKind) {
    counter!(ERRORS_TOTAL, "kind" => kind.as_str()).increment(1);
}

/// Timer guard for measuring stage duration.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_micros() as f64 / 1000.0
    }

    /// Record the elapsed time into histogram `name` and return it.
    pub fn record(self, name: &'static str) -> f64 {
        let ms = self.elapsed_ms();
        histogram!(name).record(ms);
        ms
    }
}
