use aide::openapi::OpenApi;
use axum::{
    Json,
    response::Html,
    routing::{MethodRouter, get},
};

use crate::{AppState, docs};

/// Serves the document produced by `ApiRouter::finish_api`.
pub fn spec_route(doc: OpenApi) -> MethodRouter<AppState> {
    get(move || async move { Json(doc) })
}

pub fn ui_route(app_name: &str) -> MethodRouter<AppState> {
    let page = docs::swagger_ui_page(app_name);
    get(move || async move { Html(page) })
}
