use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::types::RiskLabel;

/// Tellere for labeling. Eget registry per instans (ingen global tilstand).
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    labeled: IntCounterVec,
    rejected: IntCounter,
    score: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let labeled = IntCounterVec::new(
            Opts::new("risk_records_labeled_total", "Records labeled, per risk label"),
            &["label"],
        )?;
        let rejected = IntCounter::new(
            "risk_records_rejected_total",
            "Records rejected by validation",
        )?;
        // Båndene går 0–2 / 3–6 / 7–11 / 12+
        let score = Histogram::with_opts(
            HistogramOpts::new("risk_score", "Composite risk score per record")
                .buckets(vec![2.0, 6.0, 11.0, 16.0, 24.0]),
        )?;

        registry.register(Box::new(labeled.clone()))?;
        registry.register(Box::new(rejected.clone()))?;
        registry.register(Box::new(score.clone()))?;

        Ok(Self { registry, labeled, rejected, score })
    }

    pub fn observe(&self, label: RiskLabel, score: u32) {
        self.labeled.with_label_values(&[label.as_str()]).inc();
        self.score.observe(f64::from(score));
    }

    pub fn reject(&self) {
        self.rejected.inc();
    }

    pub fn labeled_count(&self, label: RiskLabel) -> u64 {
        self.labeled.with_label_values(&[label.as_str()]).get()
    }

    pub fn rejected_count(&self) -> u64 {
        self.rejected.get()
    }

    /// Prometheus tekstformat.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
