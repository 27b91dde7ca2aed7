//! Optional metrics instrumentation.
//!
//! When the `observe` feature is enabled, key operations emit counters and
//! histograms via the [`metrics`] crate. A downstream application must
//! install a metrics recorder to collect the data.
//!
//! When the feature is **not** enabled every function in this module is a
//! zero-cost no-op.

/// Record a handled invocation (counter + latency histogram).
///
/// - `factoring.invocations_total` – counter with `operation` and `outcome` labels
/// - `factoring.invocation_duration_seconds` – histogram
#[inline]
pub fn record_invocation(operation: &'static str, duration: std::time::Duration, success: bool) {
    #[cfg(feature = "observe")]
    {
        let outcome = if success { "ok" } else { "fail" };
        metrics::counter!("factoring.invocations_total", "operation" => operation, "outcome" => outcome)
            .increment(1);
        metrics::histogram!("factoring.invocation_duration_seconds", "operation" => operation)
            .record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (operation, duration, success);
    }
}

/// Record a persisted record.
///
/// - `factoring.records_written_total` – counter
#[inline]
pub fn record_write() {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("factoring.records_written_total").increment(1);
    }
}

/// Record a lookup and whether it found a record.
///
/// - `factoring.lookups_total` – counter with `path` (`primary` / `business`) and `result` (`hit` / `miss`) labels
#[inline]
pub fn record_lookup(path: &'static str, hit: bool) {
    #[cfg(feature = "observe")]
    {
        let result = if hit { "hit" } else { "miss" };
        metrics::counter!("factoring.lookups_total", "path" => path, "result" => result)
            .increment(1);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (path, hit);
    }
}

/// Record a liveness probe.
///
/// - `factoring.liveness_probes_total` – counter with `outcome` label
#[inline]
pub fn record_liveness(success: bool) {
    #[cfg(feature = "observe")]
    {
        let outcome = if success { "ok" } else { "mismatch" };
        metrics::counter!("factoring.liveness_probes_total", "outcome" => outcome).increment(1);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = success;
    }
}
