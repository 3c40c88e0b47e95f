use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::engine::{classify, risk_label, Assessment, ScoreBreakdown};
use crate::error::{RiskError, ValidationError};
use crate::metrics::Metrics;
use crate::storage::{records_from_json, thresholds_from_json};
use crate::thresholds::ThresholdConfig;
use crate::types::{RawRecord, Record, RiskLabel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledRecord {
    pub row: usize,
    pub user_id: Option<u64>,
    pub score: u32,
    pub risk_label: RiskLabel,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowRejection {
    pub row: usize,
    pub user_id: Option<u64>,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    /// Alle labels er med (også 0), sortert etter alvorlighet.
    pub counts: BTreeMap<RiskLabel, usize>,
    pub rows: Vec<LabeledRecord>,
    pub rejected: Vec<RowRejection>,
}

impl BatchReport {
    pub fn count(&self, label: RiskLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }
}

/// Validerer og scorer én rå record.
pub fn label_raw(raw: &RawRecord, cfg: &ThresholdConfig) -> Result<Assessment, ValidationError> {
    let record = Record::try_from(raw)?;
    classify(&record, cfg)
}

/// Ferdig validerte records → labels. Første feil stopper.
pub fn label_records(records: &[Record], cfg: &ThresholdConfig) -> Result<Vec<RiskLabel>, ValidationError> {
    records.iter().map(|r| risk_label(r, cfg)).collect()
}

/// Labeler hver rad uavhengig; en avvist rad stopper ikke resten.
pub fn label_batch(raw: &[RawRecord], cfg: &ThresholdConfig, metrics: Option<&Metrics>) -> BatchReport {
    let mut counts: BTreeMap<RiskLabel, usize> = RiskLabel::ALL.iter().map(|l| (*l, 0)).collect();
    let mut rows = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();

    for (row, r) in raw.iter().enumerate() {
        match label_raw(r, cfg) {
            Ok(a) => {
                *counts.entry(a.label).or_insert(0) += 1;
                if let Some(m) = metrics {
                    m.observe(a.label, a.score);
                }
                rows.push(LabeledRecord {
                    row,
                    user_id: r.user_id,
                    score: a.score,
                    risk_label: a.label,
                    breakdown: a.breakdown,
                });
            }
            Err(e) => {
                warn!("row {} (user_id={:?}) rejected: {}", row, r.user_id, e);
                if let Some(m) = metrics {
                    m.reject();
                }
                rejected.push(RowRejection {
                    row,
                    user_id: r.user_id,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "labeled {} of {} records ({} rejected): {:?}",
        rows.len(),
        raw.len(),
        rejected.len(),
        counts
    );

    BatchReport {
        generated_at: Utc::now(),
        total: raw.len(),
        counts,
        rows,
        rejected,
    }
}

/// JSON inn (liste av records, valgfri config) → JSON-rapport ut.
pub fn label_records_json(records_json: &str, thresholds_json: Option<&str>) -> Result<String, RiskError> {
    let cfg = match thresholds_json {
        Some(j) => thresholds_from_json(j)?,
        None => ThresholdConfig::default(),
    };

    let raw = records_from_json(records_json)?;

    let report = label_batch(&raw, &cfg, None);
    serde_json::to_string(&report).map_err(|e| RiskError::Json {
        path: ".".into(),
        message: e.to_string(),
    })
}
