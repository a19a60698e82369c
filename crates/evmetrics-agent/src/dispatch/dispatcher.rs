use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use evmetrics_core::error::Result;
use evmetrics_core::{RoutingKey, RoutingPattern};

/// Reacts to a delivered event whose routing key matched its pattern.
#[async_trait]
pub trait EventHandler: Send + Sync {
    fn name(&self) -> &'static str;
    async fn handle(&self, key: &RoutingKey, payload: &[u8]) -> Result<()>;
}

struct Route {
    pattern: RoutingPattern,
    handler: Arc<dyn EventHandler>,
}

/// Result of dispatching one key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub matched: usize,
    pub failed: usize,
}

/// Lookup table of `(pattern, handler)` routes.
///
/// Wildcards are resolved per delivery; every matching handler runs, in
/// registration order.
#[derive(Default)]
pub struct Dispatcher {
    routes: DashMap<u64, Route>,
    next_id: std::sync::atomic::AtomicU64,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, pattern: RoutingPattern, handler: Arc<dyn EventHandler>) {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        tracing::debug!(handler = handler.name(), pattern = %pattern, "handler registered");
        self.routes.insert(id, Route { pattern, handler });
    }

    /// Distinct binding keys, in registration order.
    pub fn bindings(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for (_, pattern, _) in self.ordered() {
            let key = pattern.binding_key();
            if !out.contains(&key) {
                out.push(key);
            }
        }
        out
    }

    fn ordered(&self) -> Vec<(u64, RoutingPattern, Arc<dyn EventHandler>)> {
        let mut routes: Vec<_> = self
            .routes
            .iter()
            .map(|e| (*e.key(), e.pattern.clone(), Arc::clone(&e.handler)))
            .collect();
        routes.sort_by_key(|(id, _, _)| *id);
        routes
    }

    /// Run every handler matching `key`. Handler failures are logged and
    /// counted, never propagated: the caller still acknowledges the delivery.
    pub async fn dispatch(&self, key: &RoutingKey, payload: &[u8]) -> DispatchReport {
        let mut report = DispatchReport::default();

        // Snapshot first so no shard guard is held across an await.
        for (_, pattern, handler) in self.ordered() {
            if !pattern.matches(key) {
                continue;
            }
            report.matched += 1;
            if let Err(e) = handler.handle(key, payload).await {
                report.failed += 1;
                tracing::error!(handler = handler.name(), routing_key = %key, error = %e, "handler failed");
            }
        }

        if report.matched == 0 {
            tracing::debug!(routing_key = %key, "no handler matched");
        }
        report
    }
}
