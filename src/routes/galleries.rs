use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::Deserialize;

use crate::domain::gallery::{GalleryImageChanges, GalleryStateChanges, NewGalleryImage};
use crate::domain::types::{GalleryId, ImageId, ProductId, VariationId};
use crate::domain::variation::NewProductVariation;
use crate::forms::galleries::{
    CreateImageForm, CreateVariationForm, UpdateGalleryForm, UpdateImageForm,
};
use crate::repository::InMemoryRepository;
use crate::services::{ServiceResult, galleries as gallery_service};

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub variation_id: Option<String>,
}

#[get("/products/{product_id}/gallery")]
pub async fn show_gallery(
    product_id: web::Path<String>,
    query: web::Query<GalleryQuery>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let product_id = ProductId::parse(&product_id)?;
    let variation_id = match query.variation_id.as_deref() {
        Some(id) if !id.trim().is_empty() => Some(VariationId::parse(id)?),
        _ => None,
    };
    let view = gallery_service::show_gallery(product_id, variation_id, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/products/{product_id}/variations")]
pub async fn list_variations(
    product_id: web::Path<String>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let product_id = ProductId::parse(&product_id)?;
    let variations = gallery_service::list_variations(product_id, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(variations))
}

#[patch("/galleries/{gallery_id}")]
pub async fn update_gallery_state(
    gallery_id: web::Path<String>,
    form: web::Json<UpdateGalleryForm>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let gallery_id = GalleryId::parse(&gallery_id)?;
    let changes = GalleryStateChanges::try_from(form.into_inner())?;
    let gallery = gallery_service::update_gallery_state(gallery_id, changes, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(gallery))
}

#[post("/galleries/{gallery_id}/images")]
pub async fn create_gallery_image(
    gallery_id: web::Path<String>,
    form: web::Json<CreateImageForm>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let gallery_id = GalleryId::parse(&gallery_id)?;
    let payload = NewGalleryImage::try_from(form.into_inner())?;
    let change = gallery_service::create_gallery_image(gallery_id, payload, repo.get_ref())?;
    Ok(HttpResponse::Created().json(change))
}

#[get("/images/{image_id}")]
pub async fn get_gallery_image(
    image_id: web::Path<String>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let image_id = ImageId::parse(&image_id)?;
    let image = gallery_service::get_gallery_image(image_id, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(image))
}

#[patch("/images/{image_id}")]
pub async fn update_gallery_image(
    image_id: web::Path<String>,
    form: web::Json<UpdateImageForm>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let image_id = ImageId::parse(&image_id)?;
    let changes = GalleryImageChanges::try_from(form.into_inner())?;
    let change = gallery_service::update_gallery_image(image_id, changes, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(change))
}

#[delete("/images/{image_id}")]
pub async fn delete_gallery_image(
    image_id: web::Path<String>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let image_id = ImageId::parse(&image_id)?;
    let change = gallery_service::delete_gallery_image(image_id, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(change))
}

#[post("/variations")]
pub async fn create_variation(
    form: web::Json<CreateVariationForm>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let payload = NewProductVariation::try_from(form.into_inner())?;
    let variation = gallery_service::create_variation(payload, repo.get_ref())?;
    Ok(HttpResponse::Created().json(variation))
}

#[get("/variations/{variation_id}")]
pub async fn get_variation(
    variation_id: web::Path<String>,
    repo: web::Data<InMemoryRepository>,
) -> ServiceResult<HttpResponse> {
    let variation_id = VariationId::parse(&variation_id)?;
    let variation = gallery_service::get_variation(variation_id, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(variation))
}
