use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::{DbErr, RuntimeErr, SqlErr};
use serde::{Deserialize, Serialize};

/// Error envelope rendered for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Lower snake case form of the HTTP reason phrase (`conflict`, `not_found`, ...)
    pub code: String,
    /// Human-readable description; always empty for internal failures
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code(status),
            message: message.into(),
        }
    }
}

/// Symbol used in the `code` field, derived from the status reason phrase.
pub fn error_code(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("error")
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Domain error kinds shared by the persistence gateway, the services and the
/// request adapters.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    /// A referenced row is missing and the operation cannot tell which one.
    #[error("{0}")]
    ForeignKeyMissing(String),

    /// A referenced row is missing and the operation knows which referent it was.
    #[error("{0}")]
    ReferentNotFound(String),

    #[error("{0}")]
    BodyInvalid(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("invalid id")]
    InvalidId,

    #[error("{0}")]
    FieldTooLong(String),

    #[error("{0}")]
    DateInvalid(String),

    #[error("{0}")]
    DatePast(String),

    /// The request outlived the configured request timeout.
    #[error("request timed out")]
    Timeout,
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        ServiceError::NotFound(format!("{entity} not found"))
    }

    pub fn already_exists(field: &str) -> Self {
        ServiceError::AlreadyExists(format!("{field} already exists"))
    }

    /// Replaces the storage detail of a uniqueness violation so that the
    /// constraint path renders exactly like the pre-check path.
    pub fn with_conflict_on(self, field: &str) -> Self {
        match self {
            ServiceError::AlreadyExists(_) => ServiceError::already_exists(field),
            other => other,
        }
    }

    /// Refines an ambiguous foreign-key failure into a named missing referent.
    pub fn with_referent(self, message: &str) -> Self {
        match self {
            ServiceError::ForeignKeyMissing(_) => ServiceError::ReferentNotFound(message.to_string()),
            other => other,
        }
    }

    /// Replaces the storage detail of a foreign-key failure raised while
    /// deleting a row that other rows still point at.
    pub fn with_dependents(self, entity: &str) -> Self {
        match self {
            ServiceError::ForeignKeyMissing(_) => ServiceError::ForeignKeyMissing(format!(
                "{entity} is still referenced by other records"
            )),
            other => other,
        }
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::ReferentNotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) | Self::ForeignKeyMissing(_) | Self::DatePast(_) => {
                StatusCode::CONFLICT
            }
            Self::BodyInvalid(_) | Self::FieldTooLong(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) | Self::InvalidId | Self::DateInvalid(_) => StatusCode::BAD_REQUEST,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal failures are always redacted; the event logger keeps the full text.
    pub fn response_message(&self) -> String {
        if self.status_code().is_server_error() {
            String::new()
        } else {
            self.to_string()
        }
    }
}

/// Translates a driver-level failure into the domain taxonomy.
pub fn classify_db_err(err: DbErr) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            return ServiceError::AlreadyExists(detail)
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            return ServiceError::ForeignKeyMissing(detail)
        }
        _ => {}
    }

    match &err {
        DbErr::RecordNotFound(detail) => return ServiceError::NotFound(detail.clone()),
        DbErr::RecordNotUpdated => return ServiceError::NotFound("record not found".to_string()),
        _ => {}
    }

    if is_data_too_long(&err) {
        return ServiceError::FieldTooLong("value exceeds the column length".to_string());
    }

    ServiceError::DatabaseError(err)
}

/// SQLSTATE for string truncation and the MySQL "data too long" error number.
const TRUNCATION_CODES: [&str; 2] = ["22001", "1406"];

/// Driver messages for truncation when no error code is available.
const TRUNCATION_PHRASES: [&str; 2] = ["value too long for type", "data too long for column"];

fn is_data_too_long(err: &DbErr) -> bool {
    let runtime = match err {
        DbErr::Exec(runtime) | DbErr::Query(runtime) => runtime,
        _ => return false,
    };

    match runtime {
        RuntimeErr::SqlxError(sqlx_err) => sqlx_err
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .map_or(false, |code| TRUNCATION_CODES.contains(&&*code)),
        RuntimeErr::Internal(message) => {
            let message = message.to_lowercase();
            TRUNCATION_PHRASES
                .iter()
                .any(|phrase| message.contains(phrase))
        }
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(status, self.response_message());

        (status, Json(body)).into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
