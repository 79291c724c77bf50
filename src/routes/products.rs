use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::clock::Clock;
use crate::domain::product::NewProduct;
use crate::domain::types::{InteractionKind, ProductCode, ProductId};
use crate::dto::products::CodeAvailability;
use crate::forms::products::{InteractionForm, ProductForm};
use crate::repository::InMemoryRepository;
use crate::services::{ServiceResult, products as product_service};

#[post("/products")]
pub async fn create_product(
    form: web::Json<ProductForm>,
    repo: web::Data<InMemoryRepository>,
    clock: web::Data<dyn Clock>,
) -> ServiceResult<HttpResponse> {
    let payload = NewProduct::try_from(form.into_inner())?;
    let details = product_service::create_product(payload, repo.get_ref(), clock.get_ref())?;
    Ok(HttpResponse::Created().json(details))
}

#[get("/products/{product_id}")]
pub async fn get_product(
    product_id: web::Path<String>,
    repo: web::Data<InMemoryRepository>,
    clock: web::Data<dyn Clock>,
) -> ServiceResult<HttpResponse> {
    let id = ProductId::parse(&product_id)?;
    let details = product_service::get_product(id, repo.get_ref(), clock.get_ref())?;
    Ok(HttpResponse::Ok().json(details))
}

#[put("/products/{product_id}")]
pub async fn update_product(
    product_id: web::Path<String>,
    form: web::Json<ProductForm>,
    repo: web::Data<InMemoryRepository>,
    clock: web::Data<dyn Clock>,
) -> ServiceResult<HttpResponse> {
    let id = ProductId::parse(&product_id)?;
    let payload = NewProduct::try_from(form.into_inner())?;
    let details = product_service::update_product(id, payload, repo.get_ref(), clock.get_ref())?;
    Ok(HttpResponse::Ok().json(details))
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<String>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let id = ProductId::parse(&product_id)?;
    let message = product_service::delete_product(id, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(message))
}

#[post("/products/{product_id}/interactions")]
pub async fn record_interaction(
    product_id: web::Path<String>,
    form: web::Json<InteractionForm>,
    repo: web::Data<InMemoryRepository>,
    clock: web::Data<dyn Clock>,
) -> ServiceResult<HttpResponse> {
    let id = ProductId::parse(&product_id)?;
    let kind = InteractionKind::try_from(form.into_inner())?;
    let details = product_service::record_interaction(id, kind, repo.get_ref(), clock.get_ref())?;
    Ok(HttpResponse::Ok().json(details))
}

#[derive(Debug, Deserialize)]
pub struct CodeQuery {
    pub exclude_id: Option<String>,
}

#[get("/product-codes/{code}")]
pub async fn check_product_code(
    code: web::Path<String>,
    query: web::Query<CodeQuery>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let code = ProductCode::new(code.into_inner())?;
    let exclude = match query.exclude_id.as_deref() {
        Some(id) if !id.trim().is_empty() => Some(ProductId::parse(id)?),
        _ => None,
    };
    let exists = product_service::product_code_exists(&code, exclude, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(CodeAvailability { code, exists }))
}
