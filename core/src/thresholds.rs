use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::RiskLabel;

/// Puls (bpm). `*_upper` slår til ved `>`, `*_lower` ved `<`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartRateThresholds {
    pub low_upper: f64,
    pub mod_upper: f64,
    pub high_upper: f64,
    pub low_lower: f64,
    pub mod_lower: f64,
    pub high_lower: f64,
}

impl Default for HeartRateThresholds {
    fn default() -> Self {
        Self {
            low_upper: 110.0,
            mod_upper: 130.0,
            high_upper: 140.0,
            low_lower: 60.0,
            mod_lower: 50.0,
            high_lower: 45.0,
        }
    }
}

/// SpO2 (%). Navnene følger alvorlighet: `high` er laveste grense (spo2 < high → +3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spo2Thresholds {
    pub low: f64,
    #[serde(alias = "mod")]
    pub moderate: f64,
    pub high: f64,
}

impl Default for Spo2Thresholds {
    fn default() -> Self {
        Self { low: 95.0, moderate: 92.0, high: 88.0 }
    }
}

/// Hudtemperatur (°C).
///
/// NB: `hypo_high` (35.0) ligger under `hypo_low` (35.5). Rekkefølgen i motoren er bevart slik den er.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinTempThresholds {
    pub fever_low: f64,
    pub fever_high: f64,
    pub hypo_low: f64,
    pub hypo_high: f64,
}

impl Default for SkinTempThresholds {
    fn default() -> Self {
        Self {
            fever_low: 37.8,
            fever_high: 38.5,
            hypo_low: 35.5,
            hypo_high: 35.0,
        }
    }
}

/// Trinnvise blodtrykksgrenser (mmHg); brukes både for systolisk og diastolisk.
/// Uten felt-default: systolisk og diastolisk har ulike referanseverdier, så en gruppe må oppgis komplett.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureThresholds {
    pub high1: f64,
    pub high2: f64,
    pub high3: f64,
    pub low1: f64,
    pub low2: f64,
    pub low3: f64,
}

impl BloodPressureThresholds {
    pub fn systolic() -> Self {
        Self { high1: 140.0, high2: 160.0, high3: 180.0, low1: 90.0, low2: 80.0, low3: 70.0 }
    }

    pub fn diastolic() -> Self {
        Self { high1: 90.0, high2: 100.0, high3: 110.0, low1: 60.0, low2: 50.0, low3: 45.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepThresholds {
    pub very_low: u64,
    pub very_high: u64,
}

impl Default for StepThresholds {
    fn default() -> Self {
        Self { very_low: 2000, very_high: 30000 }
    }
}

/// Høyde × SpO2-interaksjon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltitudeSpo2Thresholds {
    pub alt_high1: f64,
    pub alt_high2: f64,
    pub spo2_soft: f64,
    pub spo2_hard: f64,
    pub spo2_crit: f64,
}

impl Default for AltitudeSpo2Thresholds {
    fn default() -> Self {
        Self {
            alt_high1: 2500.0,
            alt_high2: 3000.0,
            spo2_soft: 94.0,
            spo2_hard: 92.0,
            spo2_crit: 88.0,
        }
    }
}

/// Inklusivt intervall [low, high] → label. `high = None` betyr åpent oppover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelBand {
    pub low: u32,
    pub high: Option<u32>,
    pub label: RiskLabel,
}

impl LabelBand {
    pub fn contains(&self, total: u32) -> bool {
        total >= self.low && self.high.map_or(true, |h| total <= h)
    }
}

/// Ordnet, sammenhengende og uttømmende liste med bånd over alle heltall ≥ 0.
///
/// Kan bare konstrueres via `LabelBands::new` (eller deserialisering, som går samme vei).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LabelBand>", into = "Vec<LabelBand>")]
pub struct LabelBands(Vec<LabelBand>);

impl LabelBands {
    pub fn new(bands: Vec<LabelBand>) -> Result<Self, ConfigError> {
        let first = bands.first().ok_or(ConfigError::EmptyBands)?;
        if first.low != 0 {
            return Err(ConfigError::FirstBandNotZero(first.low));
        }

        let last_index = bands.len() - 1;
        let mut expected = 0u32;
        for (index, band) in bands.iter().enumerate() {
            if band.low != expected {
                return Err(ConfigError::NotContiguous { index, low: band.low, expected });
            }
            match band.high {
                Some(high) if high < band.low => {
                    return Err(ConfigError::InvertedBand { index, low: band.low, high });
                }
                Some(high) if index == last_index => return Err(ConfigError::BoundedTail(high)),
                Some(high) => {
                    // u32::MAX som øvre grense dekker alt som er igjen; da kan ingen bånd følge
                    expected = high.checked_add(1).ok_or(ConfigError::BoundedTail(high))?;
                }
                None if index != last_index => return Err(ConfigError::OpenBandNotLast { index }),
                None => {}
            }
        }

        Ok(Self(bands))
    }

    pub fn as_slice(&self) -> &[LabelBand] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabelBand> {
        self.0.iter()
    }
}

impl Default for LabelBands {
    fn default() -> Self {
        Self(vec![
            LabelBand { low: 0, high: Some(2), label: RiskLabel::Low },
            LabelBand { low: 3, high: Some(6), label: RiskLabel::Moderate },
            LabelBand { low: 7, high: Some(11), label: RiskLabel::High },
            LabelBand { low: 12, high: None, label: RiskLabel::Critical },
        ])
    }
}

impl TryFrom<Vec<LabelBand>> for LabelBands {
    type Error = ConfigError;

    fn try_from(bands: Vec<LabelBand>) -> Result<Self, Self::Error> {
        LabelBands::new(bands)
    }
}

impl From<LabelBands> for Vec<LabelBand> {
    fn from(bands: LabelBands) -> Self {
        bands.0
    }
}

impl<'a> IntoIterator for &'a LabelBands {
    type Item = &'a LabelBand;
    type IntoIter = std::slice::Iter<'a, LabelBand>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Alle grenser motoren bruker. Konstrueres én gang og sendes inn som referanse i hvert kall.
///
/// Deserialisering er tolerant: manglende grupper/felt får referanseverdiene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub hr: HeartRateThresholds,
    pub spo2: Spo2Thresholds,
    pub skin_temp: SkinTempThresholds,
    pub bp_sys: BloodPressureThresholds,
    pub bp_dia: BloodPressureThresholds,
    pub steps: StepThresholds,
    pub altitude_spo2: AltitudeSpo2Thresholds,
    pub label_bands: LabelBands,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            hr: HeartRateThresholds::default(),
            spo2: Spo2Thresholds::default(),
            skin_temp: SkinTempThresholds::default(),
            bp_sys: BloodPressureThresholds::systolic(),
            bp_dia: BloodPressureThresholds::diastolic(),
            steps: StepThresholds::default(),
            altitude_spo2: AltitudeSpo2Thresholds::default(),
            label_bands: LabelBands::default(),
        }
    }
}

impl ThresholdConfig {
    /// Referansegrensene med egne label-bånd (validert).
    pub fn with_label_bands(bands: Vec<LabelBand>) -> Result<Self, ConfigError> {
        Ok(Self {
            label_bands: LabelBands::new(bands)?,
            ..Self::default()
        })
    }
}
