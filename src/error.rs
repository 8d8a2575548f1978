use std::fmt;

use crate::{
    api::{ServiceError, ServiceErrorCode},
    handler::HandlerErrorCode,
    tags::{ParseTagError, ParseTagsError},
};

#[derive(Debug)]
pub enum Error {
    /// An error response of the IoT service
    Service(ServiceError),
    NotFound {
        type_name: &'static str,
        identifier: String,
    },
    AlreadyExists {
        type_name: &'static str,
        identifier: String,
    },
    NotUpdatable {
        type_name: &'static str,
        properties: Vec<&'static str>,
    },
    ReadOnlyProperties {
        type_name: &'static str,
        properties: Vec<&'static str>,
    },
    InvalidRequest {
        message: String,
    },
    MissingProperty {
        type_name: &'static str,
        property: &'static str,
    },
    InvalidTags(ParseTagsError),
    NotStabilized {
        type_name: &'static str,
        identifier: String,
    },
    UnexpectedNoneValue {
        entity: String,
    },
    InvalidResponseError {
        message: String,
    },
    InvalidTimestampError {
        value: String,
        message: String,
    },
    UnknownResourceType {
        type_name: String,
    },
    Serialization(serde_json::Error),
    Config {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Service(ref inner) => write!(f, "{inner}"),
            Self::NotFound {
                type_name,
                ref identifier,
            } => {
                write!(f, "{type_name} \"{identifier}\" not found")
            }
            Self::AlreadyExists {
                type_name,
                ref identifier,
            } => {
                write!(f, "{type_name} \"{identifier}\" already exists")
            }
            Self::NotUpdatable {
                type_name,
                ref properties,
            } => write!(
                f,
                "create-only properties of {type_name} cannot be updated: {}",
                properties.join(", ")
            ),
            Self::ReadOnlyProperties {
                type_name,
                ref properties,
            } => write!(
                f,
                "read-only properties of {type_name} cannot be set: {}",
                properties.join(", ")
            ),
            Self::InvalidRequest { ref message } => write!(f, "invalid request: {message}"),
            Self::MissingProperty {
                type_name,
                property,
            } => {
                write!(f, "{type_name} requires property \"{property}\"")
            }
            Self::InvalidTags(ref inner) => write!(f, "{inner}"),
            Self::NotStabilized {
                type_name,
                ref identifier,
            } => {
                write!(f, "{type_name} \"{identifier}\" did not stabilize")
            }
            Self::UnexpectedNoneValue { ref entity } => {
                write!(f, "entity \"{entity}\" was empty")
            }
            Self::InvalidResponseError { ref message } => {
                write!(f, "invalid api response: {message}")
            }
            Self::InvalidTimestampError {
                ref value,
                ref message,
            } => {
                write!(f, "failed parsing \"{value}\" as timestamp: {message}")
            }
            Self::UnknownResourceType { ref type_name } => {
                write!(f, "unsupported resource type \"{type_name}\"")
            }
            Self::Serialization(ref e) => write!(f, "serialization error: {e}"),
            Self::Config { ref message } => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// The handler error code reported to CloudFormation for this error.
    pub fn error_code(&self) -> HandlerErrorCode {
        match *self {
            Self::Service(ref inner) => translate(inner.code()),
            Self::NotFound { .. } => HandlerErrorCode::NotFound,
            Self::AlreadyExists { .. } => HandlerErrorCode::AlreadyExists,
            Self::NotUpdatable { .. } => HandlerErrorCode::NotUpdatable,
            Self::ReadOnlyProperties { .. }
            | Self::InvalidRequest { .. }
            | Self::MissingProperty { .. }
            | Self::InvalidTags(_)
            | Self::UnknownResourceType { .. }
            | Self::Serialization(_) => HandlerErrorCode::InvalidRequest,
            Self::NotStabilized { .. } => HandlerErrorCode::NotStabilized,
            Self::UnexpectedNoneValue { .. }
            | Self::InvalidResponseError { .. }
            | Self::InvalidTimestampError { .. }
            | Self::Config { .. } => HandlerErrorCode::InternalFailure,
        }
    }

    pub const fn service_code(&self) -> Option<&ServiceErrorCode> {
        match *self {
            Self::Service(ref inner) => Some(inner.code()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.error_code() == HandlerErrorCode::NotFound
    }

    /// Turns a failed lookup into [`Error::NotFound`].
    ///
    /// The service answers `InvalidRequest` for identifiers it cannot parse.
    /// Such a resource cannot exist either, so it is reported as not found.
    #[must_use]
    pub fn into_not_found(self, type_name: &'static str, identifier: &str) -> Self {
        let missing = matches!(
            self.service_code(),
            Some(&(ServiceErrorCode::ResourceNotFound | ServiceErrorCode::InvalidRequest))
        );
        if missing {
            Self::NotFound {
                type_name,
                identifier: identifier.to_owned(),
            }
        } else {
            self
        }
    }
}

/// Maps an IoT error code to the handler error code reported to
/// CloudFormation.
pub fn translate(code: &ServiceErrorCode) -> HandlerErrorCode {
    match *code {
        ServiceErrorCode::ResourceAlreadyExists | ServiceErrorCode::CertificateConflict => {
            HandlerErrorCode::AlreadyExists
        }
        ServiceErrorCode::ResourceNotFound | ServiceErrorCode::NotConfigured => {
            HandlerErrorCode::NotFound
        }
        ServiceErrorCode::InvalidRequest
        | ServiceErrorCode::MalformedPolicy
        | ServiceErrorCode::SqlParse
        | ServiceErrorCode::CertificateValidation
        | ServiceErrorCode::RegistrationCodeValidation => HandlerErrorCode::InvalidRequest,
        ServiceErrorCode::Unauthorized | ServiceErrorCode::AccessDenied => {
            HandlerErrorCode::AccessDenied
        }
        ServiceErrorCode::Conflict
        | ServiceErrorCode::ConflictingResourceUpdate
        | ServiceErrorCode::VersionConflict
        | ServiceErrorCode::DeleteConflict
        | ServiceErrorCode::CertificateState
        | ServiceErrorCode::InvalidStateTransition => HandlerErrorCode::ResourceConflict,
        ServiceErrorCode::Throttling => HandlerErrorCode::Throttling,
        ServiceErrorCode::LimitExceeded | ServiceErrorCode::VersionsLimitExceeded => {
            HandlerErrorCode::ServiceLimitExceeded
        }
        ServiceErrorCode::ServiceUnavailable => HandlerErrorCode::GeneralServiceException,
        ServiceErrorCode::InternalFailure
        | ServiceErrorCode::Internal
        | ServiceErrorCode::Unknown(_) => HandlerErrorCode::InternalFailure,
    }
}

impl From<ServiceError> for Error {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<ParseTagError> for Error {
    fn from(value: ParseTagError) -> Self {
        Self::InvalidTags(value.into())
    }
}

impl From<ParseTagsError> for Error {
    fn from(value: ParseTagsError) -> Self {
        Self::InvalidTags(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
