// Python-bindinger (bygges med `--features python`, f.eks. via maturin).
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::engine::risk_label as engine_risk_label;
use crate::thresholds::ThresholdConfig;
use crate::types::{RawRecord, Record};

fn value_err<E: std::fmt::Display>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Én record → label ("LOW" | "MODERATE" | "HIGH" | "CRITICAL") med referansegrensene.
#[pyfunction]
#[pyo3(signature = (
    hr_bpm, spo2_pct, skin_temp, bp_systolic, bp_diastolic,
    altitude, steps, past_incident_flag, weather_condition
))]
#[allow(clippy::too_many_arguments)]
fn risk_label(
    hr_bpm: Option<f64>,
    spo2_pct: Option<f64>,
    skin_temp: Option<f64>,
    bp_systolic: Option<f64>,
    bp_diastolic: Option<f64>,
    altitude: f64,
    steps: i64,
    past_incident_flag: bool,
    weather_condition: &str,
) -> PyResult<String> {
    let raw = RawRecord {
        user_id: None,
        hr_bpm,
        spo2_pct,
        skin_temp,
        bp_systolic,
        bp_diastolic,
        altitude,
        steps,
        past_incident_flag: i64::from(past_incident_flag),
        weather_condition: weather_condition.to_string(),
    };
    let record = Record::try_from(raw).map_err(value_err)?;
    let label = engine_risk_label(&record, &ThresholdConfig::default()).map_err(value_err)?;
    Ok(label.as_str().to_string())
}

/// JSON-liste med records (+ valgfri grense-JSON) → JSON-rapport.
#[pyfunction]
#[pyo3(signature = (records_json, thresholds_json=None))]
fn label_records_json(records_json: &str, thresholds_json: Option<&str>) -> PyResult<String> {
    crate::batch::label_records_json(records_json, thresholds_json).map_err(value_err)
}

#[pymodule]
fn wearable_risk_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(risk_label, m)?)?;
    m.add_function(wrap_pyfunction!(label_records_json, m)?)?;
    Ok(())
}
