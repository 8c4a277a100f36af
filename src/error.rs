use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use std::num;
use std::str;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("template error: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("parse int error: {0}")]
    ParseIntError(#[from] num::ParseIntError),

    #[error("parse bool error: {0}")]
    ParseBoolError(#[from] str::ParseBoolError),

    #[error("not found")]
    NotFound,

    #[error("You didn't select a choice.")]
    InvalidChoice,

    #[error("no reverse match for route {0}")]
    NoReverseMatch(String),

    #[error("bussiness error: {0}")]
    BusinessError(String),

    #[error("server error: {0}")]
    ServerError(String),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::InvalidChoice | Error::BusinessError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
            return HttpResponse::build(status).body("Internal Server Error");
        }
        HttpResponse::build(status).body(self.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::InvalidChoice.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::BusinessError("too long".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::NoReverseMatch("polls:nope".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
