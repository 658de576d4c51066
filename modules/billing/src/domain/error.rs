use atrium_db::IsolationError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invoice {id} not found")]
    InvoiceNotFound { id: Uuid },

    #[error("plan {id} not found")]
    PlanNotFound { id: Uuid },

    #[error("tenant {tenant_id} is outside the caller's scope")]
    TenantForbidden { tenant_id: Uuid },

    #[error("validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl DomainError {
    #[must_use]
    pub fn invoice_not_found(id: Uuid) -> Self {
        Self::InvoiceNotFound { id }
    }

    #[must_use]
    pub fn plan_not_found(id: Uuid) -> Self {
        Self::PlanNotFound { id }
    }

    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

// An out-of-scope tenant in an insert payload is the one isolation failure
// a caller is told about; everything else stays a database error.
impl From<IsolationError> for DomainError {
    fn from(err: IsolationError) -> Self {
        match err {
            IsolationError::TenantOutOfScope { tenant_id } => Self::TenantForbidden { tenant_id },
            IsolationError::Db(db) => Self::Database(anyhow::Error::new(db)),
        }
    }
}
