//! Service error types.

use maison_commerce::CommerceError;
use maison_data::FetchError;
use thiserror::Error;

/// Errors returned by service calls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The request failed or the backend rejected it.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Input failed validation; nothing was sent.
    #[error("Invalid input: {}", join_messages(.0))]
    Invalid(Vec<CommerceError>),

    /// A domain rule was violated locally.
    #[error(transparent)]
    Domain(#[from] CommerceError),

    /// A required setting is missing.
    #[error("Not configured: {0}")]
    NotConfigured(&'static str),
}

fn join_messages(errors: &[CommerceError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<CommerceError>> for ServiceError {
    fn from(errors: Vec<CommerceError>) -> Self {
        ServiceError::Invalid(errors)
    }
}

impl ServiceError {
    /// The session is missing or expired.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ServiceError::Fetch(e) if e.is_unauthorized())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Fetch(e) if e.is_not_found())
    }

    /// Message suitable for a toast notification.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Fetch(e) => e.user_message(),
            ServiceError::Invalid(errors) => match errors.as_slice() {
                [only] => capitalize(&only.to_string()),
                _ => "Please correct the highlighted fields".to_string(),
            },
            ServiceError::Domain(e) => e.to_string(),
            ServiceError::NotConfigured(_) => "This feature is not available right now".to_string(),
        }
    }

    /// Per-field messages for inline form errors.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let errors: &[CommerceError] = match self {
            ServiceError::Invalid(errors) => errors,
            ServiceError::Domain(e) => std::slice::from_ref(e),
            _ => &[],
        };
        errors
            .iter()
            .filter_map(|e| match e {
                CommerceError::Validation { field, message } => {
                    Some((field.clone(), message.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result alias for service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;
