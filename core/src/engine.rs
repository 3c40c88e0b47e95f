use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::thresholds::{
    AltitudeSpo2Thresholds, BloodPressureThresholds, HeartRateThresholds, LabelBands,
    SkinTempThresholds, Spo2Thresholds, StepThresholds, ThresholdConfig,
};
use crate::types::{not_nan, Record, RiskLabel, WeatherCondition};

/// Fast grense for "lavt" skrittall. Ikke del av den navngitte tabellen; beholdt som literal.
pub const STEPS_LOW_LITERAL: u64 = 1000;

/// Varmt vær gir +1 bare sammen med høy hudtemp eller høy puls.
pub const HOT_SKIN_TEMP_C: f64 = 37.8;
pub const HOT_HR_BPM: f64 = 110.0;

/// Poeng per signal. `total()` er summen motoren labeler på.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub hr: u32,
    pub spo2: u32,
    pub skin_temp: u32,
    pub bp_systolic: u32,
    pub bp_diastolic: u32,
    pub altitude_spo2: u32,
    pub activity: u32,
    pub past_incident: u32,
    pub weather: u32,
}

impl ScoreBreakdown {
    pub fn vitals(&self) -> u32 {
        self.hr + self.spo2 + self.skin_temp
    }

    pub fn blood_pressure(&self) -> u32 {
        self.bp_systolic + self.bp_diastolic
    }

    pub fn context(&self) -> u32 {
        self.past_incident + self.weather
    }

    pub fn total(&self) -> u32 {
        self.vitals() + self.blood_pressure() + self.altitude_spo2 + self.activity + self.context()
    }
}

/// Resultat av `classify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub score: u32,
    pub label: RiskLabel,
    pub breakdown: ScoreBreakdown,
}

// ──────────────────────────────────────────────────────────────────────────────
// Vitaler
// ──────────────────────────────────────────────────────────────────────────────

/// Puls: mest alvorlige trinn vinner (ytre bånd sjekkes først). Strenge ulikheter.
pub fn hr_points(hr_bpm: Option<f64>, t: &HeartRateThresholds) -> u32 {
    let Some(hr) = not_nan(hr_bpm) else { return 0 };
    if hr > t.high_upper || hr < t.high_lower {
        3
    } else if hr > t.mod_upper || hr < t.mod_lower {
        2
    } else if hr > t.low_upper || hr < t.low_lower {
        1
    } else {
        0
    }
}

/// SpO2: alvorlighet øker når metningen synker.
pub fn spo2_points(spo2_pct: Option<f64>, t: &Spo2Thresholds) -> u32 {
    let Some(spo2) = not_nan(spo2_pct) else { return 0 };
    if spo2 < t.high {
        3
    } else if spo2 < t.moderate {
        2
    } else if spo2 < t.low {
        1
    } else {
        0
    }
}

/// Hudtemperatur. Rekkefølgen er bevisst uendret: `<= hypo_high` sjekkes før `<= hypo_low`.
pub fn skin_temp_points(skin_temp: Option<f64>, t: &SkinTempThresholds) -> u32 {
    let Some(st) = not_nan(skin_temp) else { return 0 };
    if st >= t.fever_high {
        3
    } else if st >= t.fever_low {
        2
    } else if st <= t.hypo_high {
        2
    } else if st <= t.hypo_low {
        1
    } else {
        0
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Blodtrykk
// ──────────────────────────────────────────────────────────────────────────────

pub fn systolic_points(bp: Option<f64>, t: &BloodPressureThresholds) -> u32 {
    let Some(sys) = not_nan(bp) else { return 0 };
    if sys >= t.high3 {
        3
    } else if sys >= t.high2 {
        2
    } else if sys >= t.high1 {
        1
    } else if sys <= t.low3 {
        3
    } else if sys <= t.low2 {
        2
    } else if sys <= t.low1 {
        1
    } else {
        0
    }
}

/// Diastolisk: high3/high2 (og low3/low2) gir begge +2.
#[allow(clippy::if_same_then_else)]
pub fn diastolic_points(bp: Option<f64>, t: &BloodPressureThresholds) -> u32 {
    let Some(dia) = not_nan(bp) else { return 0 };
    if dia >= t.high3 {
        2
    } else if dia >= t.high2 {
        2
    } else if dia >= t.high1 {
        1
    } else if dia <= t.low3 {
        2
    } else if dia <= t.low2 {
        2
    } else if dia <= t.low1 {
        1
    } else {
        0
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Høyde × SpO2, aktivitet, kontekst
// ──────────────────────────────────────────────────────────────────────────────

/// Kommer i tillegg til `spo2_points` – lav metning i høyden straffes dobbelt.
pub fn altitude_spo2_points(altitude: f64, spo2_pct: Option<f64>, t: &AltitudeSpo2Thresholds) -> u32 {
    let Some(spo2) = not_nan(spo2_pct) else { return 0 };
    if altitude >= t.alt_high2 && spo2 < t.spo2_hard {
        if spo2 < t.spo2_crit {
            4
        } else {
            3
        }
    } else if altitude >= t.alt_high1 && spo2 < t.spo2_soft {
        2
    } else {
        0
    }
}

/// Skritt. Med referansegrensene (very_low = 2000) er `<= 1000`-grenen uoppnåelig.
pub fn activity_points(steps: u64, t: &StepThresholds) -> u32 {
    if steps <= t.very_low {
        2
    } else if steps <= STEPS_LOW_LITERAL {
        1
    } else if steps >= t.very_high {
        1
    } else {
        0
    }
}

pub fn past_incident_points(past_incident_flag: bool) -> u32 {
    if past_incident_flag {
        2
    } else {
        0
    }
}

/// Vær. Manglende hudtemp/puls teller som "ikke oppfylt" for Hot.
pub fn weather_points(weather: WeatherCondition, skin_temp: Option<f64>, hr_bpm: Option<f64>) -> u32 {
    match weather {
        WeatherCondition::Storm => 2,
        WeatherCondition::Rain | WeatherCondition::Snow | WeatherCondition::Fog => 1,
        WeatherCondition::Hot => {
            let hot_skin = not_nan(skin_temp).map_or(false, |st| st >= HOT_SKIN_TEMP_C);
            let fast_hr = not_nan(hr_bpm).map_or(false, |hr| hr > HOT_HR_BPM);
            u32::from(hot_skin || fast_hr)
        }
        WeatherCondition::Clear | WeatherCondition::Cold | WeatherCondition::Windy => 0,
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Sammensetning
// ──────────────────────────────────────────────────────────────────────────────

/// Sjekker det typene ikke kan garantere. Kjøres før noe poeng beregnes.
pub fn validate(record: &Record) -> Result<(), ValidationError> {
    if !record.altitude.is_finite() {
        return Err(ValidationError::NonFiniteAltitude(record.altitude));
    }
    Ok(())
}

pub fn score_breakdown(record: &Record, cfg: &ThresholdConfig) -> Result<ScoreBreakdown, ValidationError> {
    validate(record)?;

    Ok(ScoreBreakdown {
        hr: hr_points(record.hr_bpm, &cfg.hr),
        spo2: spo2_points(record.spo2_pct, &cfg.spo2),
        skin_temp: skin_temp_points(record.skin_temp, &cfg.skin_temp),
        bp_systolic: systolic_points(record.bp_systolic, &cfg.bp_sys),
        bp_diastolic: diastolic_points(record.bp_diastolic, &cfg.bp_dia),
        altitude_spo2: altitude_spo2_points(record.altitude, record.spo2_pct, &cfg.altitude_spo2),
        activity: activity_points(record.steps, &cfg.steps),
        past_incident: past_incident_points(record.past_incident_flag),
        weather: weather_points(record.weather_condition, record.skin_temp, record.hr_bpm),
    })
}

/// Samlet risikoscore (≥ 0) for én record.
pub fn score(record: &Record, cfg: &ThresholdConfig) -> Result<u32, ValidationError> {
    score_breakdown(record, cfg).map(|b| b.total())
}

/// Første bånd som inneholder `total`; LOW hvis ingen (uoppnåelig med validerte bånd).
pub fn label_for(total: u32, bands: &LabelBands) -> RiskLabel {
    bands
        .iter()
        .find(|b| b.contains(total))
        .map(|b| b.label)
        .unwrap_or(RiskLabel::Low)
}

pub fn classify(record: &Record, cfg: &ThresholdConfig) -> Result<Assessment, ValidationError> {
    let breakdown = score_breakdown(record, cfg)?;
    let score = breakdown.total();
    let label = label_for(score, &cfg.label_bands);
    debug!("risk score={} label={} breakdown={:?}", score, label, breakdown);
    Ok(Assessment { score, label, breakdown })
}

/// Kortform: record → label.
pub fn risk_label(record: &Record, cfg: &ThresholdConfig) -> Result<RiskLabel, ValidationError> {
    classify(record, cfg).map(|a| a.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hr_strict_boundaries() {
        let t = HeartRateThresholds::default();
        assert_eq!(hr_points(Some(140.0), &t), 2);
        assert_eq!(hr_points(Some(140.1), &t), 3);
        assert_eq!(hr_points(Some(45.0), &t), 2);
        assert_eq!(hr_points(Some(44.9), &t), 3);
        assert_eq!(hr_points(Some(110.0), &t), 0);
        assert_eq!(hr_points(Some(59.0), &t), 1);
        assert_eq!(hr_points(None, &t), 0);
        assert_eq!(hr_points(Some(f64::NAN), &t), 0);
    }

    #[test]
    fn skin_temp_tier_order_is_preserved() {
        let t = SkinTempThresholds::default();
        assert_eq!(skin_temp_points(Some(38.5), &t), 3);
        assert_eq!(skin_temp_points(Some(37.8), &t), 2);
        assert_eq!(skin_temp_points(Some(35.0), &t), 2);
        assert_eq!(skin_temp_points(Some(35.3), &t), 1);
        assert_eq!(skin_temp_points(Some(35.5), &t), 1);
        assert_eq!(skin_temp_points(Some(35.6), &t), 0);
    }

    #[test]
    fn diastolic_high_tiers_collide() {
        let t = BloodPressureThresholds::diastolic();
        assert_eq!(diastolic_points(Some(115.0), &t), 2);
        assert_eq!(diastolic_points(Some(100.0), &t), 2);
        assert_eq!(diastolic_points(Some(90.0), &t), 1);
        assert_eq!(diastolic_points(Some(40.0), &t), 2);
        assert_eq!(diastolic_points(Some(55.0), &t), 1);
        assert_eq!(diastolic_points(Some(75.0), &t), 0);
    }

    #[test]
    fn systolic_tiers() {
        let t = BloodPressureThresholds::systolic();
        assert_eq!(systolic_points(Some(180.0), &t), 3);
        assert_eq!(systolic_points(Some(165.0), &t), 2);
        assert_eq!(systolic_points(Some(140.0), &t), 1);
        assert_eq!(systolic_points(Some(120.0), &t), 0);
        assert_eq!(systolic_points(Some(90.0), &t), 1);
        assert_eq!(systolic_points(Some(80.0), &t), 2);
        assert_eq!(systolic_points(Some(65.0), &t), 3);
    }

    #[test]
    fn steps_literal_only_reachable_with_lower_very_low() {
        let t = StepThresholds::default();
        assert_eq!(activity_points(800, &t), 2);
        assert_eq!(activity_points(2001, &t), 0);
        assert_eq!(activity_points(30000, &t), 1);

        let custom = StepThresholds { very_low: 500, very_high: 30000 };
        assert_eq!(activity_points(500, &custom), 2);
        assert_eq!(activity_points(800, &custom), 1);
        assert_eq!(activity_points(1001, &custom), 0);
    }
}
