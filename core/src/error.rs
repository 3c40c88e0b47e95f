use thiserror::Error;

/// Feil i selve recorden (felt utenfor deklarert domene). Rapporteres til kaller, aldri "reparert".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown weather_condition {0:?} (expected one of Clear, Hot, Cold, Rain, Storm, Snow, Windy, Fog)")]
    UnknownWeather(String),

    #[error("steps must be >= 0, got {0}")]
    NegativeSteps(i64),

    #[error("past_incident_flag must be a boolean or 0/1, got {0}")]
    InvalidIncidentFlag(i64),

    #[error("altitude must be a finite number, got {0}")]
    NonFiniteAltitude(f64),
}

/// Ugyldig ThresholdConfig. Fatal ved konstruksjon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("label_bands is empty")]
    EmptyBands,

    #[error("first label band must start at 0, starts at {0}")]
    FirstBandNotZero(u32),

    #[error("label band {index} is inverted (low={low} > high={high})")]
    InvertedBand { index: usize, low: u32, high: u32 },

    #[error("label bands are not contiguous: band {index} starts at {low}, expected {expected}")]
    NotContiguous { index: usize, low: u32, expected: u32 },

    #[error("label band {index} is open-ended but is not the last band")]
    OpenBandNotLast { index: usize },

    #[error("last label band ends at {0}; scores above it would have no label")]
    BoundedTail(u32),
}

/// Paraply-feil for lasting/parsing rundt motoren.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON at `{path}`: {message}")]
    Json { path: String, message: String },
}

impl RiskError {
    pub(crate) fn from_json(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        let inner = err.into_inner();
        RiskError::Json {
            path,
            message: inner.to_string(),
        }
    }
}
