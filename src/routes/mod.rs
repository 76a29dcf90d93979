mod api_docs;
mod health;
mod products;

use aide::axum::{ApiRouter, routing::get_with};
use axum::{Router, routing::get};

use crate::{
    AppState,
    config::ApiConfig,
    docs::{self, SPEC_PATH, UI_PATH},
};

pub fn create_router(app_name: &str, api: &ApiConfig) -> Router<AppState> {
    let base = api.base_path.as_str();
    let mut doc = docs::api_doc(app_name);

    let mut router = ApiRouter::new()
        .api_route(
            &format!("{}/products", base),
            get_with(products::list_products, products::list_products_docs)
                .post_with(products::create_product, products::create_product_docs)
                .delete_with(products::delete_products, products::delete_products_docs),
        )
        .api_route(
            &format!("{}/products/{{id}}", base),
            get_with(products::get_product, products::get_product_docs),
        )
        .finish_api(&mut doc)
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    router = if base.is_empty() {
        router.route("/", get(products::index))
    } else {
        router
            .route(base, get(products::index))
            .route(&format!("{}/", base), get(products::index))
    };

    if api.docs {
        router = router
            .route(SPEC_PATH, api_docs::spec_route(doc))
            .route(UI_PATH, api_docs::ui_route(app_name));
    }

    router
}
