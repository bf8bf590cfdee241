use actix_web::{HttpResponse, ResponseError};
use charybdis::errors::CharybdisError;
use log::error;
use scylla::errors::ExecutionError;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum CampushubError {
    ValidationError((String, String)),
    Conflict(String),
    NotFound(String),
    CharybdisError(CharybdisError),
    QueryError(ExecutionError),
    InternalServerError(String),
}

impl fmt::Display for CampushubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampushubError::ValidationError((field, message)) => {
                write!(f, "Validation Error: {} {}", field, message)
            }
            CampushubError::Conflict(message) => write!(f, "Conflict: {}", message),
            CampushubError::NotFound(message) => write!(f, "Not Found: {}", message),
            CampushubError::CharybdisError(e) => write!(f, "Charybdis Error: {}", e),
            CampushubError::QueryError(e) => write!(f, "Query Error: {}", e),
            CampushubError::InternalServerError(message) => {
                write!(f, "Internal Server Error: {}", message)
            }
        }
    }
}

impl std::error::Error for CampushubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CampushubError::CharybdisError(e) => Some(e),
            CampushubError::QueryError(e) => Some(e),
            _ => None,
        }
    }
}

impl ResponseError for CampushubError {
    fn error_response(&self) -> HttpResponse {
        match self {
            CampushubError::ValidationError((field, message)) => {
                HttpResponse::BadRequest().json(json!({
                    "error": format!("{} {}", field, message),
                    "field": field,
                }))
            }
            CampushubError::Conflict(message) => HttpResponse::Conflict().json(json!({
                "error": message,
            })),
            CampushubError::NotFound(message) => HttpResponse::NotFound().json(json!({
                "error": message,
            })),
            CampushubError::CharybdisError(CharybdisError::NotFoundError(e)) => {
                HttpResponse::NotFound().json(json!({
                    "error": format!("Record not found: {}", e),
                }))
            }
            CampushubError::CharybdisError(e) => {
                error!("CharybdisError: {}", e);

                HttpResponse::BadGateway().json(json!({
                    "error": "Store request failed",
                }))
            }
            CampushubError::QueryError(e) => {
                error!("QueryError: {}", e);

                HttpResponse::BadGateway().json(json!({
                    "error": "Store request failed",
                }))
            }
            CampushubError::InternalServerError(message) => {
                error!("InternalServerError: {}", message);

                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal Server Error",
                }))
            }
        }
    }
}

impl From<CharybdisError> for CampushubError {
    fn from(e: CharybdisError) -> Self {
        CampushubError::CharybdisError(e)
    }
}

impl From<ExecutionError> for CampushubError {
    fn from(e: ExecutionError) -> Self {
        CampushubError::QueryError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err = CampushubError::ValidationError(("userId".to_string(), "is required".to_string()));

        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflicts_map_to_conflict() {
        let err = CampushubError::Conflict("like state changed concurrently".to_string());

        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_maps_to_not_found() {
        let err = CampushubError::NotFound("club not found".to_string());

        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_map_to_internal_server_error() {
        let err = CampushubError::InternalServerError("unexpected".to_string());

        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
