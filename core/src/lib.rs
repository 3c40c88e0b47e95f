//! Wearable risk core: deterministisk risikoscore og label per record.

pub mod batch;
pub mod cli;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod storage;
pub mod thresholds;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use batch::{label_batch, label_records, label_records_json, BatchReport, LabeledRecord, RowRejection};
pub use engine::{classify, label_for, risk_label, score, score_breakdown, Assessment, ScoreBreakdown};
pub use error::{ConfigError, RiskError, ValidationError};
pub use metrics::Metrics;
pub use storage::{load_thresholds, records_from_json, save_thresholds, thresholds_from_json};
pub use thresholds::{LabelBand, LabelBands, ThresholdConfig};
pub use types::{RawRecord, Record, RiskLabel, WeatherCondition};
