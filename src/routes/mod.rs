use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod catalog;
pub mod galleries;
pub mod products;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub kind: &'static str,
    pub message: &'a str,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::DuplicateCode(_) => StatusCode::CONFLICT,
            ServiceError::CapacityExceeded(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::TypeConstraint(_) | ServiceError::Form(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        HttpResponse::build(self.status_code()).json(ErrorBody {
            kind: self.kind(),
            message: &message,
        })
    }
}

/// Registers every `/api/v1` endpoint. Malformed JSON bodies and query
/// strings are reported with the same error body as form failures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ServiceError::Form(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ServiceError::Form(err.to_string()).into()),
    )
    .service(
        web::scope("/api/v1")
            .service(catalog::show_catalog)
            .service(products::create_product)
            .service(products::get_product)
            .service(products::update_product)
            .service(products::delete_product)
            .service(products::record_interaction)
            .service(products::check_product_code)
            .service(galleries::show_gallery)
            .service(galleries::list_variations)
            .service(galleries::update_gallery_state)
            .service(galleries::create_gallery_image)
            .service(galleries::get_gallery_image)
            .service(galleries::update_gallery_image)
            .service(galleries::delete_gallery_image)
            .service(galleries::create_variation)
            .service(galleries::get_variation),
    );
}
