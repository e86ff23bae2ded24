use thiserror::Error;

use crate::avenue::Avenue;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("cannot score an empty segment: the dataset has no rows")]
    EmptySegment,
    #[error("invalid investor profile: {0}")]
    InvalidProfile(String),
    #[error("risk bonus for {avenue} must be finite and non-negative, got {bonus}")]
    InvalidRiskBonus { avenue: Avenue, bonus: f64 },
    #[error("unknown investment avenue `{0}`")]
    UnknownAvenue(String),
    #[error("unknown dataset category `{0}`")]
    UnknownCategory(String),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("dataset failure: {0}")]
    Dataset(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check the profile values and try again."
            }
            Self::ServiceUnavailable { .. } => {
                "Recommendations are temporarily unavailable. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        let unassigned = || "unassigned".to_owned();
        match value {
            ApplicationError::Domain(
                error @ (DomainError::InvalidProfile(_)
                | DomainError::UnknownAvenue(_)
                | DomainError::UnknownCategory(_)),
            ) => Self::BadRequest { message: error.to_string(), correlation_id: unassigned() },
            ApplicationError::Domain(error @ DomainError::EmptySegment) => {
                Self::ServiceUnavailable { message: error.to_string(), correlation_id: unassigned() }
            }
            ApplicationError::Domain(error @ DomainError::InvalidRiskBonus { .. }) => {
                Self::Internal { message: error.to_string(), correlation_id: unassigned() }
            }
            ApplicationError::Dataset(message) => {
                Self::ServiceUnavailable { message, correlation_id: unassigned() }
            }
            ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: unassigned() }
            }
        }
    }
}
