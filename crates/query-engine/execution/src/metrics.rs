//! Metrics setup and update for the query pipeline.

use prometheus::{IntCounter, Registry};

/// The collection of metrics exposed through the `/metrics` endpoint.
#[derive(Debug, Clone)]
pub struct Metrics {
    query_total: IntCounter,
    query_errors_total: IntCounter,
    nl_model_errors_total: IntCounter,
}

impl Metrics {
    /// Set up the counters used to produce Prometheus metrics.
    pub fn initialize(metrics_registry: &mut Registry) -> Result<Self, prometheus::Error> {
        let query_total = add_int_counter_metric(
            metrics_registry,
            "crewchat_query_total",
            "Total queries executed successfully against the dataset.",
        )?;

        let query_errors_total = add_int_counter_metric(
            metrics_registry,
            "crewchat_query_errors_total",
            "Total queries that failed during execution.",
        )?;

        let nl_model_errors_total = add_int_counter_metric(
            metrics_registry,
            "crewchat_nl_model_errors_total",
            "Total natural-language model invocations that failed and fell through to the keyword ladder.",
        )?;

        Ok(Self {
            query_total,
            query_errors_total,
            nl_model_errors_total,
        })
    }

    pub fn record_successful_query(&self) {
        self.query_total.inc();
    }

    pub fn record_failed_query(&self) {
        self.query_errors_total.inc();
    }

    pub fn record_nl_model_error(&self) {
        self.nl_model_errors_total.inc();
    }
}

/// Create a new int counter metric and register it with the provided registry.
fn add_int_counter_metric(
    metrics_registry: &mut Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<IntCounter, prometheus::Error> {
    let opts = prometheus::Opts::new(metric_name, metric_description);
    let int_counter = IntCounter::with_opts(opts)?;
    register_collector(metrics_registry, int_counter)
}

/// Register a collector with the registry, and return it for later use.
fn register_collector<Collector: prometheus::core::Collector + Clone + 'static>(
    metrics_registry: &mut Registry,
    collector: Collector,
) -> Result<Collector, prometheus::Error> {
    metrics_registry.register(Box::new(collector.clone()))?;
    Ok(collector)
}
