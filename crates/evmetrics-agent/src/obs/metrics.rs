//! Minimal metrics registry for the agent.
//!
//! Label names are fixed when a vector is created and label values are kept
//! in that declared order, so the exposition shows `service`, `object_type`,
//! `action` exactly as registered. Entries are created lazily on first
//! increment and live until `clear()`.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use evmetrics_core::RoutingKey;

/// Exposed name of the event counter.
pub const EVENTS_METRIC: &str = "amqp_events_total";
const EVENTS_HELP: &str = "AMQP Events";
const EVENT_LABELS: [&str; 3] = ["service", "object_type", "action"];

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Counter partitioned by a fixed set of labels.
pub struct CounterVec {
    name: &'static str,
    help: &'static str,
    label_names: &'static [&'static str],
    map: DashMap<Vec<String>, AtomicU64>,
}

impl CounterVec {
    pub fn new(
        name: &'static str,
        help: &'static str,
        label_names: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            label_names,
            map: DashMap::new(),
        }
    }

    /// Increment by 1.
    pub fn inc(&self, values: &[&str]) {
        self.add(values, 1);
    }

    /// Increment by an arbitrary value.
    ///
    /// `values` must line up with the declared label names; a mismatched
    /// arity is dropped with a warning instead of creating a bogus series.
    pub fn add(&self, values: &[&str], v: u64) {
        if values.len() != self.label_names.len() {
            tracing::warn!(
                metric = self.name,
                expected = self.label_names.len(),
                got = values.len(),
                "label arity mismatch, observation dropped"
            );
            return;
        }
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set, `None` if never incremented.
    pub fn get(&self, values: &[&str]) -> Option<u64> {
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.map.get(&key).map(|c| c.load(Ordering::Relaxed))
    }

    /// Every label set seen so far, sorted for stable comparison.
    pub fn label_sets(&self) -> Vec<Vec<String>> {
        let mut sets: Vec<Vec<String>> = self.map.iter().map(|r| r.key().clone()).collect();
        sets.sort();
        sets
    }

    /// Drop every series.
    pub fn clear(&self) {
        self.map.clear();
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, self.help);
        let _ = writeln!(out, "# TYPE {} counter", self.name);

        let mut rows: Vec<(Vec<String>, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();

        for (values, val) in rows {
            let label_str = self
                .label_names
                .iter()
                .zip(values.iter())
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{}{{{}}} {}", self.name, label_str, val);
        }
    }
}

/// Process-wide registry. Owned by startup and shared by `Arc`.
pub struct EventMetrics {
    pub events: CounterVec,
}

impl Default for EventMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EventMetrics {
    pub fn new() -> Self {
        Self {
            events: CounterVec::new(EVENTS_METRIC, EVENTS_HELP, &EVENT_LABELS),
        }
    }

    /// Count one event for the key's label triple.
    pub fn observe(&self, key: &RoutingKey) {
        self.events.inc(&key.labels());
    }

    /// Event count for one triple (0 when never seen).
    pub fn event_count(&self, service: &str, object_type: &str, action: &str) -> u64 {
        self.events.get(&[service, object_type, action]).unwrap_or(0)
    }

    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.events.render(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_labels_in_declared_order() {
        let m = EventMetrics::new();
        m.observe(&RoutingKey::new("org_unit", "employee", "create"));
        m.observe(&RoutingKey::new("org_unit", "employee", "create"));

        let text = m.render();
        assert!(text.contains("# TYPE amqp_events_total counter"));
        assert!(text.contains(
            "amqp_events_total{service=\"org_unit\",object_type=\"employee\",action=\"create\"} 2"
        ));
    }

    #[test]
    fn escapes_label_values() {
        let m = EventMetrics::new();
        m.observe(&RoutingKey::new("a\"b", "c\\d", "e"));
        assert!(m.render().contains("service=\"a\\\"b\",object_type=\"c\\\\d\""));
    }

    #[test]
    fn arity_mismatch_is_dropped() {
        let c = CounterVec::new("x_total", "x", &["a", "b"]);
        c.inc(&["only-one"]);
        assert!(c.label_sets().is_empty());
    }
}
