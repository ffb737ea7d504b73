use std::fmt;

/// Configuration rejected before a game is started.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveFps { fps: u32 },
    NonPositiveFireRate { rate: f32 },
    BombVelocityRange { min: f32, max: f32 },
    NegativeValue { field: &'static str, value: f32 },
    NonPositiveValue { field: &'static str, value: f32 },
    EmptyInvaderGrid { ranks: u32, files: u32 },
    InvalidScreen { width: f32, height: f32 },
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveFps { fps } => write!(f, "fps must be positive, got {fps}"),
            Self::NonPositiveFireRate { rate } => {
                write!(f, "rocket_max_fire_rate must be positive, got {rate}")
            }
            Self::BombVelocityRange { min, max } => write!(
                f,
                "bomb velocity range is empty: min={min} is greater than max={max}"
            ),
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::NonPositiveValue { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::EmptyInvaderGrid { ranks, files } => {
                write!(f, "invader grid must not be empty: {ranks} ranks x {files} files")
            }
            Self::InvalidScreen { width, height } => {
                write!(f, "screen must have positive size, got {width}x{height}")
            }
            Self::Parse(msg) => write!(f, "could not parse config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
