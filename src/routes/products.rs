use aide::{OperationOutput, transform::TransformOperation};
use axum::{
    Json,
    body::Body,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use http::{StatusCode, header};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        NewProduct, Product, ProductListQuery, ProductPath, ProductPayload, ValidationErrors,
        sort_products,
    },
    validation,
};

const TAG: &str = "Products";

/// Reply to a successful create: the stored row and where to fetch it.
pub struct Created {
    location: String,
    product: Product,
}

impl IntoResponse for Created {
    fn into_response(self) -> Response {
        (
            StatusCode::CREATED,
            [(header::LOCATION, self.location)],
            Json(self.product),
        )
            .into_response()
    }
}

impl OperationOutput for Created {
    type Inner = Product;
}

pub async fn index() -> Body {
    Body::from("Hello World!")
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>> {
    let mut products = state.products.find_all().await?;

    sort_products(&mut products, params.sort.as_deref());

    Ok(Json(products))
}

pub fn list_products_docs(op: TransformOperation) -> TransformOperation {
    op.description("List all products, optionally sorted by one field.")
        .tag(TAG)
        .response_with::<200, Json<Vec<Product>>, _>(|res| res.description("Every stored product"))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(ProductPath { id }): Path<ProductPath>,
) -> Result<Json<Product>> {
    // Ids are integers, so anything else cannot name a product.
    let id: i64 = id.parse().map_err(|_| AppError::NotFound)?;

    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(product))
}

pub fn get_product_docs(op: TransformOperation) -> TransformOperation {
    op.description("Get a single product.")
        .tag(TAG)
        .response_with::<200, Json<Product>, _>(|res| res.description("The product"))
        .response_with::<404, (), _>(|res| res.description("No product with that id"))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(ProductPayload(payload)): Json<ProductPayload>,
) -> Result<Created> {
    let fields = validation::validate_product(&payload)?;
    let new_product = NewProduct::from_payload(fields)?;

    let product = state.products.create(&new_product).await?;
    let location = format!("{}/products/{}", state.base_path, product.id);

    tracing::info!("Created product {}", product.id);

    Ok(Created { location, product })
}

pub fn create_product_docs(op: TransformOperation) -> TransformOperation {
    op.description("Create a product. The new row's URL is returned in `Location`.")
        .tag(TAG)
        .response_with::<201, Json<Product>, _>(|res| res.description("The stored product"))
        .response_with::<400, Json<ValidationErrors>, _>(|res| {
            res.description("One entry per missing field")
        })
}

pub async fn delete_products(State(state): State<AppState>) -> Result<StatusCode> {
    let removed = state.products.delete_all().await?;

    tracing::info!("Deleted {} product(s)", removed);

    Ok(StatusCode::NO_CONTENT)
}

pub fn delete_products_docs(op: TransformOperation) -> TransformOperation {
    op.description("Delete all products.")
        .tag(TAG)
        .response_with::<204, (), _>(|res| res.description("Nothing"))
}
