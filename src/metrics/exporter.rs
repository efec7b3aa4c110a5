use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::FrequencyMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes in the Prometheus text exposition format so the output can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<FrequencyMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &FrequencyMetricsSnapshot) {
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_updates_total", snapshot.insert_updates);
        self.write_counter("insert_new_total", snapshot.insert_new);
        self.write_counter("evict_calls_total", snapshot.evict_calls);
        self.write_counter("evicted_entries_total", snapshot.evicted_entries);
        self.write_counter("remove_calls_total", snapshot.remove_calls);
        self.write_counter("remove_found_total", snapshot.remove_found);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_gauge("cache_len", snapshot.cache_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("prefix_cache", Vec::new());
        let snapshot = FrequencyMetricsSnapshot {
            get_calls: 5,
            get_hits: 3,
            evicted_entries: 2,
            cache_len: 7,
            capacity: 10,
            ..Default::default()
        };

        exporter.export(&snapshot);
        let text = String::from_utf8(exporter.into_inner()).unwrap();

        assert!(text.contains("# TYPE prefix_cache_get_calls_total counter\n"));
        assert!(text.contains("prefix_cache_get_hits_total 3\n"));
        assert!(text.contains("prefix_cache_evicted_entries_total 2\n"));
        assert!(text.contains("# TYPE prefix_cache_cache_len gauge\n"));
        assert!(text.contains("prefix_cache_capacity 10\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&FrequencyMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();

        assert!(text.lines().any(|line| line == "get_calls_total 0"));
    }
}
