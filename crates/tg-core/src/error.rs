//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `tg-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("hour {0} is outside 0..=23")]
    InvalidHour(i64),

    #[error("unrecognized weather {0:?} (expected \"sunny\" or \"rainy\")")]
    UnknownWeather(String),

    #[error("unrecognized day type {0:?} (expected \"weekday\" or \"weekend\")")]
    UnknownDayType(String),

    #[error("unrecognized category {0:?}")]
    UnknownCategory(String),
}

impl CoreError {
    /// `true` for errors that describe a malformed prediction scenario.
    pub fn is_invalid_scenario(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidHour(_) | CoreError::UnknownWeather(_) | CoreError::UnknownDayType(_)
        )
    }
}

/// Shorthand result type for `tg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
