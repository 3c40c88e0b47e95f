use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Værtype fra konteksten rundt målingen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WeatherCondition {
    Clear,
    Hot,
    Cold,
    Rain,
    Storm,
    Snow,
    Windy,
    Fog,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 8] = [
        WeatherCondition::Clear,
        WeatherCondition::Hot,
        WeatherCondition::Cold,
        WeatherCondition::Rain,
        WeatherCondition::Storm,
        WeatherCondition::Snow,
        WeatherCondition::Windy,
        WeatherCondition::Fog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Hot => "Hot",
            WeatherCondition::Cold => "Cold",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Storm => "Storm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Windy => "Windy",
            WeatherCondition::Fog => "Fog",
        }
    }
}

impl FromStr for WeatherCondition {
    type Err = ValidationError;

    // Case-insensitiv, men ellers streng: ukjent verdi er en valideringsfeil, ikke 0 poeng.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        WeatherCondition::ALL
            .iter()
            .copied()
            .find(|w| w.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownWeather(s.to_string()))
    }
}

impl TryFrom<String> for WeatherCondition {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeatherCondition> for String {
    fn from(w: WeatherCondition) -> Self {
        w.as_str().to_string()
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risikonivå, ordnet etter alvorlighet (LOW < MODERATE < HIGH < CRITICAL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLabel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLabel {
    pub const ALL: [RiskLabel; 4] = [
        RiskLabel::Low,
        RiskLabel::Moderate,
        RiskLabel::High,
        RiskLabel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "LOW",
            RiskLabel::Moderate => "MODERATE",
            RiskLabel::High => "HIGH",
            RiskLabel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ett øyeblikksbilde for ett individ – validert input til motoren.
///
/// Vitalene er valgfrie: `None` (eller NaN) betyr "mangler" og gir 0 poeng for det signalet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    pub hr_bpm: Option<f64>,       // slag/min
    pub spo2_pct: Option<f64>,     // %
    pub skin_temp: Option<f64>,    // °C
    pub bp_systolic: Option<f64>,  // mmHg
    pub bp_diastolic: Option<f64>, // mmHg
    pub altitude: f64,             // meter over havet
    pub steps: u64,
    pub past_incident_flag: bool,
    pub weather_condition: WeatherCondition,
}

impl Record {
    /// Record uten vitaler; kontekstfeltene er alltid påkrevd.
    pub fn new(
        altitude: f64,
        steps: u64,
        past_incident_flag: bool,
        weather_condition: WeatherCondition,
    ) -> Self {
        Self {
            hr_bpm: None,
            spo2_pct: None,
            skin_temp: None,
            bp_systolic: None,
            bp_diastolic: None,
            altitude,
            steps,
            past_incident_flag,
            weather_condition,
        }
    }
}

/// Tolerant inngang slik den kommer fra tabell-eksport / JSON.
///
/// Kolonnenavnene fra eksporten (`bloodpressure_systolic`, `skin_temp_c`) aksepteres som alias.
/// Ingen validering her – det skjer i `Record::try_from`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub hr_bpm: Option<f64>,
    #[serde(default)]
    pub spo2_pct: Option<f64>,
    #[serde(default, alias = "skin_temp_c")]
    pub skin_temp: Option<f64>,
    #[serde(default, alias = "bloodpressure_systolic")]
    pub bp_systolic: Option<f64>,
    #[serde(default)]
    pub bp_diastolic: Option<f64>,
    pub altitude: f64,
    pub steps: i64,
    #[serde(deserialize_with = "de_incident_flag")]
    pub past_incident_flag: i64,
    pub weather_condition: String,
}

impl TryFrom<&RawRecord> for Record {
    type Error = ValidationError;

    fn try_from(raw: &RawRecord) -> Result<Self, Self::Error> {
        let weather_condition: WeatherCondition = raw.weather_condition.parse()?;

        if raw.steps < 0 {
            return Err(ValidationError::NegativeSteps(raw.steps));
        }
        let past_incident_flag = match raw.past_incident_flag {
            0 => false,
            1 => true,
            other => return Err(ValidationError::InvalidIncidentFlag(other)),
        };
        if !raw.altitude.is_finite() {
            return Err(ValidationError::NonFiniteAltitude(raw.altitude));
        }

        Ok(Record {
            hr_bpm: not_nan(raw.hr_bpm),
            spo2_pct: not_nan(raw.spo2_pct),
            skin_temp: not_nan(raw.skin_temp),
            bp_systolic: not_nan(raw.bp_systolic),
            bp_diastolic: not_nan(raw.bp_diastolic),
            altitude: raw.altitude,
            steps: raw.steps as u64,
            past_incident_flag,
            weather_condition,
        })
    }
}

impl TryFrom<RawRecord> for Record {
    type Error = ValidationError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Record::try_from(&raw)
    }
}

/// NaN er tabellenes "mangler"-sentinel; vi gjør det om til `None` med en gang.
#[inline]
pub(crate) fn not_nan(v: Option<f64>) -> Option<f64> {
    v.filter(|x| !x.is_nan())
}

// Flagget kommer som bool (JSON), 0/1 (CSV/pandas) eller "true"/"1" (tekst). Domenesjekk gjøres i try_from.
fn de_incident_flag<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean or an integer flag (0/1)")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<i64, E> {
            Ok(i64::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.is_finite() && v.fract() == 0.0 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            let t = v.trim();
            if t.eq_ignore_ascii_case("true") {
                Ok(1)
            } else if t.eq_ignore_ascii_case("false") {
                Ok(0)
            } else {
                t.parse::<i64>()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawRecord {
        RawRecord {
            altitude: 1000.0,
            steps: 5000,
            weather_condition: "Clear".into(),
            ..Default::default()
        }
    }

    #[test]
    fn weather_parse_is_case_insensitive_but_strict() {
        assert_eq!("storm".parse::<WeatherCondition>(), Ok(WeatherCondition::Storm));
        assert_eq!(" Fog ".parse::<WeatherCondition>(), Ok(WeatherCondition::Fog));
        assert_eq!(
            "Drizzle".parse::<WeatherCondition>(),
            Err(ValidationError::UnknownWeather("Drizzle".into()))
        );
    }

    #[test]
    fn nan_vitals_become_missing() {
        let mut r = raw();
        r.hr_bpm = Some(f64::NAN);
        r.spo2_pct = Some(97.0);
        let rec = Record::try_from(r).unwrap();
        assert_eq!(rec.hr_bpm, None);
        assert_eq!(rec.spo2_pct, Some(97.0));
    }

    #[test]
    fn rejects_out_of_domain_fields() {
        let mut r = raw();
        r.steps = -1;
        assert_eq!(Record::try_from(r), Err(ValidationError::NegativeSteps(-1)));

        let mut r = raw();
        r.past_incident_flag = 2;
        assert_eq!(Record::try_from(r), Err(ValidationError::InvalidIncidentFlag(2)));

        let mut r = raw();
        r.altitude = f64::INFINITY;
        assert!(matches!(
            Record::try_from(r),
            Err(ValidationError::NonFiniteAltitude(_))
        ));
    }

    #[test]
    fn oversized_incident_flag_keeps_the_sent_value() {
        let json = r#"{ "altitude": 10, "steps": 1, "weather_condition": "Clear",
                        "past_incident_flag": 18446744073709551615 }"#;
        let err = serde_json::from_str::<RawRecord>(json).unwrap_err().to_string();
        assert!(err.contains("18446744073709551615"), "got: {err}");
        assert!(!err.contains("9223372036854775807"), "got: {err}");
    }

    #[test]
    fn converts_by_reference_without_consuming() {
        let r = raw();
        let rec = Record::try_from(&r).unwrap();
        assert_eq!(rec.weather_condition, WeatherCondition::Clear);
        assert_eq!(r.weather_condition, "Clear");
    }

    #[test]
    fn label_order_follows_severity() {
        assert!(RiskLabel::Low < RiskLabel::Moderate);
        assert!(RiskLabel::High < RiskLabel::Critical);
        assert_eq!(serde_json::to_string(&RiskLabel::Moderate).unwrap(), "\"MODERATE\"");
    }
}
