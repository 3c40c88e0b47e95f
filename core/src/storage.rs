use std::path::Path;

use log::{info, warn};

use crate::error::RiskError;
use crate::thresholds::ThresholdConfig;
use crate::types::RawRecord;

/// Parser en ThresholdConfig fra JSON. Feil rapporteres med JSON-sti (f.eks. `label_bands[1]`).
pub fn thresholds_from_json(json: &str) -> Result<ThresholdConfig, RiskError> {
    let de = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(de).map_err(RiskError::from_json)
}

/// Parser en JSON-liste med rå records. Feil rapporteres med JSON-sti (f.eks. `[3].altitude`).
pub fn records_from_json(json: &str) -> Result<Vec<RawRecord>, RiskError> {
    let de = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(de).map_err(RiskError::from_json)
}

/// Leser inn grenser fra disk (JSON).
/// Hvis filen ikke finnes, returneres referansegrensene.
pub fn load_thresholds<P: AsRef<Path>>(path: P) -> Result<ThresholdConfig, RiskError> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let cfg = thresholds_from_json(&contents)?;
        info!(
            "thresholds loaded from {} ({} label bands)",
            path.display(),
            cfg.label_bands.as_slice().len()
        );
        Ok(cfg)
    } else {
        warn!(
            "no thresholds file at {}, using reference thresholds",
            path.display()
        );
        Ok(ThresholdConfig::default())
    }
}

/// Lagrer grenser til disk som JSON (pretty-print).
pub fn save_thresholds<P: AsRef<Path>>(cfg: &ThresholdConfig, path: P) -> Result<(), RiskError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(cfg).map_err(|e| RiskError::Json {
        path: ".".into(),
        message: e.to_string(),
    })?;
    std::fs::write(path, json)?;
    info!("thresholds saved to {}", path.display());
    Ok(())
}
