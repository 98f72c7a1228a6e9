use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    /// The lecture is in a state that does not allow the operation, or a
    /// concurrent writer kept winning
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("The recipient is not enrolled. Error message: `{0}`")]
    NotEnrolled(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}

impl actix_web::error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotEnrolled(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
            .body(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, ResponseError};

    #[actix_web::test]
    async fn maps_errors_to_status_codes() {
        let cases = vec![
            (ApiError::InternalError, StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::BadClientData("".into()), StatusCode::BAD_REQUEST),
            (ApiError::Conflict("".into()), StatusCode::CONFLICT),
            (ApiError::NotEnrolled("".into()), StatusCode::FORBIDDEN),
            (ApiError::NotFound("".into()), StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(err.error_response().status(), status);
        }

        let res = ApiError::NotEnrolled("recipient 42".into()).error_response();
        let body = to_bytes(res.into_body()).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("recipient 42"));
    }
}
