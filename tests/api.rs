use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use pushkind_catalog::domain::clock::Clock;
use pushkind_catalog::models::config::ServerConfig;
use pushkind_catalog::routes;
use serde_json::{Value, json};

mod common;

macro_rules! test_app {
    ($repo:expr) => {{
        let clock: Arc<dyn Clock> = Arc::new(common::test_clock());
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new(ServerConfig::default()))
                .app_data(web::Data::from(clock))
                .configure(routes::configure),
        )
        .await
    }};
}

fn product_body(code: &str) -> Value {
    json!({
        "name": "Silla Nórdica",
        "code": code,
        "image": "https://cdn.example.com/silla.jpg",
        "price": 120.0,
        "availability": "available",
        "is_featured": true
    })
}

#[actix_web::test]
async fn product_lifecycle_over_http() {
    let app = test_app!(common::repo_with_limits(10, 50));

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(product_body("sil-0001"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["code"], "SIL-0001");
    assert_eq!(created["is_new"], true);
    let id = created["id"].as_str().expect("id is a string").to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(product_body("SIL-0001"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "duplicate_code");

    let req = test::TestRequest::get()
        .uri("/api/v1/product-codes/sil-0001")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], "SIL-0001");
    assert_eq!(body["exists"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/product-codes/SIL-0001?exclude_id={id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["exists"], false);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/products/{id}/interactions"))
        .set_json(json!({ "kind": "click" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["popularity_score"], 3);

    let req = test::TestRequest::get()
        .uri("/api/v1/catalog?sort=popularity&layout=list&items_per_page=12")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["catalog_title"], "Catálogo de Productos");
    assert_eq!(body["layout"], "list");
    assert_eq!(body["total_products_count"], 1);
    assert_eq!(body["pagination"]["items_per_page"], 12);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/products/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Product SIL-0001 deleted");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/products/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_input_is_a_bad_request() {
    let app = test_app!(common::repo_with_limits(10, 50));

    let req = test::TestRequest::get()
        .uri("/api/v1/catalog?sort=cheapest")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "form");

    let req = test::TestRequest::get()
        .uri("/api/v1/products/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn gallery_flow_over_http() {
    let app = test_app!(common::repo_with_limits(10, 1));
    let product_id = "7f2c1d9e-3b4a-4c5d-8e6f-0a1b2c3d4e5f";

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/products/{product_id}/gallery?variation_id="))
        .to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["gallery"]["total_images"], 0);
    assert_eq!(view["gallery"]["display_mode"], "page");
    let gallery_id = view["gallery"]["id"].as_str().expect("gallery id").to_string();

    let image = json!({
        "thumbnail_url": "https://cdn.example.com/a-t.jpg",
        "full_size_url": "https://cdn.example.com/a.jpg",
        "resolutions": {
            "thumbnail": "https://cdn.example.com/a-t.jpg",
            "medium": "https://cdn.example.com/a-m.jpg",
            "large": "https://cdn.example.com/a-l.jpg",
            "original": "https://cdn.example.com/a.jpg"
        },
        "display_order": 1,
        "category": "detalle"
    });
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/galleries/{gallery_id}/images"))
        .set_json(image.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let change: Value = test::read_body_json(resp).await;
    assert_eq!(change["image"]["lazy_load_priority"], 3);
    let image_id = change["image"]["id"].as_str().expect("image id").to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/images/{image_id}"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["category"], "detalle");
    assert_eq!(change["image"]["show_caption"], true);
    assert_eq!(
        change["gallery"]["main_image_url"],
        "https://cdn.example.com/a.jpg"
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/galleries/{gallery_id}/images"))
        .set_json(image)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/galleries/{gallery_id}"))
        .set_json(json!({ "display_mode": "modal" }))
        .to_request();
    let gallery: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(gallery["display_mode"], "modal");

    let req = test::TestRequest::post()
        .uri("/api/v1/variations")
        .set_json(json!({
            "product_id": product_id,
            "name": "Azul",
            "variation_type": "color",
            "color_code": "#0000ff"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let variation: Value = test::read_body_json(resp).await;
    assert_eq!(variation["color_code"], "#0000FF");
    assert_eq!(variation["is_default"], false);
    let variation_id = variation["id"].as_str().expect("variation id").to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/variations/{variation_id}"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["name"], "Azul");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/products/{product_id}/variations"))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["id"], variation_id.as_str());
}
