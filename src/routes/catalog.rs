use actix_web::{HttpResponse, get, web};

use crate::domain::catalog::CatalogFilters;
use crate::domain::clock::Clock;
use crate::forms::catalog::CatalogQuery;
use crate::models::config::ServerConfig;
use crate::repository::InMemoryRepository;
use crate::services::{ServiceResult, catalog as catalog_service};

#[get("/catalog")]
pub async fn show_catalog(
    query: web::Query<CatalogQuery>,
    repo: web::Data<InMemoryRepository>,
    server_config: web::Data<ServerConfig>,
    clock: web::Data<dyn Clock>,
) -> ServiceResult<HttpResponse> {
    let filters = CatalogFilters::try_from(query.into_inner())?;
    let result = catalog_service::show_catalog(
        &filters,
        &server_config.catalog_title,
        repo.get_ref(),
        clock.get_ref(),
    )?;
    Ok(HttpResponse::Ok().json(result))
}
