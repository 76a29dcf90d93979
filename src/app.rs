use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, middleware::from_fn};

use crate::{
    config::{ApiConfig, AppConfig},
    database,
    error::Result,
    middleware::{access_log, json_content_type},
    queries::ProductRepository,
    routes,
};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    /// Route prefix, used when building `Location` headers.
    pub base_path: Arc<str>,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let products = database::connect(&config.database).await?;

    Ok(router(products, &config.app_name, &config.api))
}

/// Assembles the request pipeline around an already-connected store. Layers
/// run outermost first: access log, JSON content-type default, body limit,
/// then route dispatch.
pub fn router(products: Arc<dyn ProductRepository>, app_name: &str, api: &ApiConfig) -> Router {
    let state = AppState {
        products,
        base_path: Arc::from(api.base_path.as_str()),
    };

    routes::create_router(app_name, api)
        .layer(DefaultBodyLimit::max(api.max_body_size))
        .layer(json_content_type())
        .layer(from_fn(access_log))
        .with_state(state)
}
