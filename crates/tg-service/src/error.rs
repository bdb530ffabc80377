//! Service error type.
//!
//! Callers distinguish three situations: a malformed request
//! ([`is_bad_request`](ServiceError::is_bad_request)), a service that has no
//! graph yet ([`is_not_ready`](ServiceError::is_not_ready)), and a failed
//! synthesis.

use thiserror::Error;

use tg_core::CoreError;
use tg_model::ModelError;
use tg_network::NetworkError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid scenario: {0}")]
    InvalidScenario(CoreError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No graph has been installed yet.
    #[error("graph not ready")]
    NotReady,

    #[error("network synthesis failed: {0}")]
    Synthesis(#[from] NetworkError),
}

impl ServiceError {
    pub fn is_not_ready(&self) -> bool {
        matches!(self, ServiceError::NotReady)
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self, ServiceError::InvalidScenario(_) | ServiceError::InvalidRequest(_))
    }
}

impl From<CoreError> for ServiceError {
    fn from(e: CoreError) -> Self {
        if e.is_invalid_scenario() {
            ServiceError::InvalidScenario(e)
        } else {
            ServiceError::InvalidRequest(e.to_string())
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::InvalidScenario(e)       => e.into(),
            ModelError::EmptyGraph               => ServiceError::NotReady,
            e @ ModelError::NodeNotFound(_)      => ServiceError::InvalidRequest(e.to_string()),
            e @ ModelError::InvalidSampleCount(_) => ServiceError::InvalidRequest(e.to_string()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
