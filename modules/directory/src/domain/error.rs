use atrium_db::IsolationError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("organization {id} not found")]
    OrganizationNotFound { id: Uuid },

    #[error("administrator access required to {action}")]
    AdminRequired { action: &'static str },

    #[error("validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl DomainError {
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::OrganizationNotFound { id }
    }

    #[must_use]
    pub fn admin_required(action: &'static str) -> Self {
        Self::AdminRequired { action }
    }

    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<IsolationError> for DomainError {
    fn from(err: IsolationError) -> Self {
        Self::Database(anyhow::Error::new(err))
    }
}
