//! Domain error to gRPC status mapping

use tonic::Status;
use tracing::error;

use crate::domain::DomainError;

impl From<DomainError> for Status {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Validation { message } => Status::invalid_argument(message),
            DomainError::NotFound { message } => Status::not_found(message),
            DomainError::Cache { .. }
            | DomainError::SessionWrite { .. }
            | DomainError::Serialization { .. }
            | DomainError::Configuration { .. }
            | DomainError::Internal { .. } => {
                error!(error = %err.chain(), "gRPC call failed");
                Status::internal("Internal error")
            }
        }
    }
}
